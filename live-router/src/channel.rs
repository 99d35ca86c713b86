//! Channel identifier grammar: `scope/namespace/path`.

use std::fmt;
use std::str::FromStr;

use crate::error::ChannelError;

/// Upper bound on the serialized channel length, in bytes.
pub const MAX_CHANNEL_LENGTH: usize = 160;

const SEPARATOR: char = '/';

/// Known top-level scopes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Scope {
    Grafana,
    Watch,
    Plugin,
    Datasource,
    Stream,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Grafana => "grafana",
            Scope::Watch => "watch",
            Scope::Plugin => "plugin",
            Scope::Datasource => "ds",
            Scope::Stream => "stream",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "grafana" => Some(Scope::Grafana),
            "watch" => Some(Scope::Watch),
            "plugin" => Some(Scope::Plugin),
            "ds" => Some(Scope::Datasource),
            "stream" => Some(Scope::Stream),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed live channel.
///
/// Values built through [`Channel::parse`] always satisfy [`Channel::is_valid`].
/// Trusted callers may assemble one from fields directly; anything that came from
/// outside the process should be checked with [`Channel::is_valid`] first.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Channel {
    /// Subsystem owning the channel.
    pub scope: String,
    /// Scope-dependent: feature name, plugin id, datasource uid or stream id.
    pub namespace: String,
    /// Free-form remainder, may itself contain `/`.
    pub path: String,
}

fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_segment_char(c) || matches!(c, '/' | '=')
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(is_segment_char)
}

fn is_valid_path(path: &str) -> bool {
    !path.is_empty() && path.chars().all(is_path_char)
}

impl Channel {
    pub fn new(
        scope: impl Into<String>,
        namespace: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            scope: scope.into(),
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Parses `scope/namespace/path`, rejecting anything that does not fully validate.
    pub fn parse(s: &str) -> Result<Self, ChannelError> {
        if s.is_empty() {
            return Err(ChannelError::invalid(s, "empty channel"));
        }
        if s.len() > MAX_CHANNEL_LENGTH {
            return Err(ChannelError::invalid(
                s,
                format!("longer than {MAX_CHANNEL_LENGTH} bytes"),
            ));
        }

        let mut parts = s.splitn(3, SEPARATOR);
        let (Some(scope), Some(namespace), Some(path)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ChannelError::invalid(s, "expected scope/namespace/path"));
        };

        let channel = Self::new(scope, namespace, path);
        if !channel.is_valid() {
            return Err(ChannelError::invalid(s, "segment failed validation"));
        }
        Ok(channel)
    }

    /// Re-checks all three segments against the channel grammar.
    pub fn is_valid(&self) -> bool {
        is_valid_segment(&self.scope)
            && is_valid_segment(&self.namespace)
            && is_valid_path(&self.path)
    }

    /// Returns the known scope, if the scope segment names one.
    pub fn scope_kind(&self) -> Option<Scope> {
        Scope::from_name(&self.scope)
    }

    /// Serializes the channel. Empty `namespace` or `path` drop their separator, so the
    /// output of a partially empty value is display-only and does not parse back.
    pub fn format(&self) -> String {
        let mut out =
            String::with_capacity(self.scope.len() + self.namespace.len() + self.path.len() + 2);
        out.push_str(&self.scope);
        if !self.namespace.is_empty() {
            out.push(SEPARATOR);
            out.push_str(&self.namespace);
        }
        if !self.path.is_empty() {
            out.push(SEPARATOR);
            out.push_str(&self.path);
        }
        out
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for Channel {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
