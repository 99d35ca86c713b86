//! Org-prefixed channel helpers.
//!
//! Over the wire every channel carries the org id of the connection as a leading
//! segment, `<org_id>/<scope>/<namespace>/<path>`. Routing works on the channel
//! without the prefix, so the prefix is split off on the way in and put back on
//! the way out.

use crate::error::ChannelError;
use crate::TenantId;

/// Prepends `org_id` to a channel string.
pub fn prepend_org_id(org_id: TenantId, channel: &str) -> String {
    format!("{org_id}/{channel}")
}

/// Splits the leading org id off an org-prefixed channel string.
pub fn strip_org_id(channel: &str) -> Result<(TenantId, &str), ChannelError> {
    let invalid = || ChannelError::InvalidOrgPrefix {
        channel: channel.to_string(),
    };

    let (org, rest) = channel.split_once('/').ok_or_else(invalid)?;
    let org_id: TenantId = org.parse().map_err(|_| invalid())?;
    if org_id <= 0 {
        return Err(invalid());
    }
    Ok((org_id, rest))
}

#[cfg(test)]
mod tests {
    use super::{prepend_org_id, strip_org_id};

    #[test]
    fn strip_returns_org_and_remaining_channel() {
        let (org_id, channel) = strip_org_id("1/stream/telegraf/cpu").expect("valid prefix");
        assert_eq!(org_id, 1);
        assert_eq!(channel, "stream/telegraf/cpu");
    }

    #[test]
    fn strip_rejects_missing_or_non_positive_org() {
        assert!(strip_org_id("stream/telegraf/cpu").is_err());
        assert!(strip_org_id("0/stream/telegraf/cpu").is_err());
        assert!(strip_org_id("-3/stream/telegraf/cpu").is_err());
        assert!(strip_org_id("12").is_err());
    }

    #[test]
    fn prepend_then_strip_yields_original_parts() {
        let prefixed = prepend_org_id(42, "grafana/dashboard/uid/abc");
        assert_eq!(prefixed, "42/grafana/dashboard/uid/abc");
        assert_eq!(
            strip_org_id(&prefixed).unwrap(),
            (42, "grafana/dashboard/uid/abc")
        );
    }
}
