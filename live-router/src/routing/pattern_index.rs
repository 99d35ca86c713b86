//! Single-tenant wildcard pattern index.
//!
//! Patterns are `/`-separated. A segment is a literal, `*` (exactly one segment)
//! or a final `**` (one or more remaining segments). Lookup walks every branch of
//! the tree that can match and keeps the most specific pattern: no `**` beats `**`,
//! then fewer wildcard segments win, then the pattern whose wildcards sit further
//! right wins. An exact pattern has no wildcards, so it beats any wildcard match.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::error::PatternError;

pub const ANY_SEGMENT: &str = "*";
pub const ANY_REMAINDER: &str = "**";

const SEPARATOR: char = '/';

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PatternSegment<'a> {
    Literal(&'a str),
    AnySegment,
    AnyRemainder,
}

fn is_literal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '=')
}

fn parse_pattern(pattern: &str) -> Result<Vec<PatternSegment<'_>>, PatternError> {
    let error = |reason| PatternError {
        pattern: pattern.to_string(),
        reason,
    };

    if pattern.is_empty() {
        return Err(error("empty pattern"));
    }

    let raw_segments: Vec<&str> = pattern.split(SEPARATOR).collect();
    let last = raw_segments.len() - 1;
    raw_segments
        .iter()
        .enumerate()
        .map(|(position, segment)| match *segment {
            "" => Err(error("empty segment")),
            ANY_SEGMENT => Ok(PatternSegment::AnySegment),
            ANY_REMAINDER if position == last => Ok(PatternSegment::AnyRemainder),
            ANY_REMAINDER => Err(error("`**` is only allowed as the final segment")),
            literal if literal.chars().all(is_literal_char) => Ok(PatternSegment::Literal(literal)),
            _ => Err(error("segment contains characters outside the channel grammar")),
        })
        .collect()
}

/// Checks `pattern` against the wildcard grammar without storing it.
pub(crate) fn validate_pattern(pattern: &str) -> Result<(), PatternError> {
    parse_pattern(pattern).map(|_| ())
}

/// Ranking key of a stored pattern. Smaller is more specific.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
struct Specificity {
    remainder: bool,
    wildcards: usize,
    wildcard_positions: Reverse<Vec<usize>>,
}

impl Specificity {
    fn of(segments: &[PatternSegment<'_>]) -> Self {
        let positions: Vec<usize> = segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| !matches!(segment, PatternSegment::Literal(_)))
            .map(|(position, _)| position)
            .collect();
        Self {
            remainder: matches!(segments.last(), Some(PatternSegment::AnyRemainder)),
            wildcards: positions.len(),
            wildcard_positions: Reverse(positions),
        }
    }
}

#[derive(Clone, Debug)]
struct PatternEntry<V> {
    pattern: String,
    specificity: Specificity,
    payload: V,
}

fn keep_most_specific<'a, V>(
    best: &mut Option<&'a PatternEntry<V>>,
    candidate: Option<&'a PatternEntry<V>>,
) {
    let Some(candidate) = candidate else {
        return;
    };
    match *best {
        Some(current) if current.specificity <= candidate.specificity => {}
        _ => *best = Some(candidate),
    }
}

#[derive(Clone, Debug)]
struct PatternNode<V> {
    literals: HashMap<String, PatternNode<V>>,
    any_segment: Option<Box<PatternNode<V>>>,
    any_remainder: Option<PatternEntry<V>>,
    terminal: Option<PatternEntry<V>>,
}

impl<V> Default for PatternNode<V> {
    fn default() -> Self {
        Self {
            literals: HashMap::new(),
            any_segment: None,
            any_remainder: None,
            terminal: None,
        }
    }
}

impl<V> PatternNode<V> {
    fn find<'a>(&'a self, segments: &[&str], best: &mut Option<&'a PatternEntry<V>>) {
        let Some((head, tail)) = segments.split_first() else {
            keep_most_specific(best, self.terminal.as_ref());
            return;
        };

        if let Some(child) = self.literals.get(*head) {
            child.find(tail, best);
        }
        if let Some(child) = self.any_segment.as_deref() {
            child.find(tail, best);
        }
        keep_most_specific(best, self.any_remainder.as_ref());
    }
}

/// Pattern to payload associations for one tenant.
#[derive(Clone, Debug)]
pub struct PatternIndex<V> {
    root: PatternNode<V>,
    len: usize,
}

impl<V> Default for PatternIndex<V> {
    fn default() -> Self {
        Self {
            root: PatternNode::default(),
            len: 0,
        }
    }
}

impl<V> PatternIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct patterns stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `pattern`, overwriting and returning the previous payload if it was present.
    pub fn insert(&mut self, pattern: &str, payload: V) -> Result<Option<V>, PatternError> {
        let segments = parse_pattern(pattern)?;
        let entry = PatternEntry {
            pattern: pattern.to_string(),
            specificity: Specificity::of(&segments),
            payload,
        };

        let mut node = &mut self.root;
        let mut remainder = false;
        for segment in segments {
            match segment {
                PatternSegment::Literal(literal) => {
                    node = node.literals.entry(literal.to_string()).or_default();
                }
                PatternSegment::AnySegment => {
                    node = &mut **node.any_segment.get_or_insert_with(Box::default);
                }
                // Always the final segment.
                PatternSegment::AnyRemainder => remainder = true,
            }
        }
        let slot = if remainder {
            &mut node.any_remainder
        } else {
            &mut node.terminal
        };

        let previous = slot.replace(entry).map(|previous| previous.payload);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    /// Returns the most specific pattern matching a concrete channel path.
    pub fn lookup(&self, path: &str) -> Option<&V> {
        self.lookup_entry(path).map(|(_, payload)| payload)
    }

    /// Like [`PatternIndex::lookup`], also returning the pattern that matched.
    pub fn lookup_entry(&self, path: &str) -> Option<(&str, &V)> {
        if path.is_empty() {
            return None;
        }
        let segments: Vec<&str> = path.split(SEPARATOR).collect();
        let mut best = None;
        self.root.find(&segments, &mut best);
        best.map(|entry| (entry.pattern.as_str(), &entry.payload))
    }

    /// Whether `pattern` itself is stored, compared structurally rather than by matching.
    pub fn contains_pattern(&self, pattern: &str) -> bool {
        let Ok(segments) = parse_pattern(pattern) else {
            return false;
        };

        let mut node = &self.root;
        for segment in segments {
            let next = match segment {
                PatternSegment::Literal(literal) => node.literals.get(literal),
                PatternSegment::AnySegment => node.any_segment.as_deref(),
                PatternSegment::AnyRemainder => return node.any_remainder.is_some(),
            };
            match next {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.terminal.is_some()
    }
}

#[cfg(test)]
impl<V> FromIterator<(String, V)> for PatternIndex<V> {
    /// Builds an index, skipping malformed patterns. Later duplicates win.
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (pattern, payload) in iter {
            let _ = index.insert(&pattern, payload);
        }
        index
    }
}
