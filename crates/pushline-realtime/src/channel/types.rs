//! Channel kind classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of channel, derived from its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Open channel, no authorization.
    Public,
    /// `private-` channel, authorized by the transport.
    Private,
    /// `private-encrypted-` channel, payloads encrypted end to end.
    Encrypted,
    /// `presence-` channel, membership is visible.
    Presence,
}

impl ChannelKind {
    /// Classifies a channel name.
    pub fn from_name(name: &str) -> Self {
        if name.starts_with("private-encrypted-") {
            ChannelKind::Encrypted
        } else if name.starts_with("private-") {
            ChannelKind::Private
        } else if name.starts_with("presence-") {
            ChannelKind::Presence
        } else {
            ChannelKind::Public
        }
    }

    /// Whether the transport must authorize subscriptions to this kind.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, ChannelKind::Public)
    }

    /// String name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Public => "public",
            ChannelKind::Private => "private",
            ChannelKind::Encrypted => "encrypted",
            ChannelKind::Presence => "presence",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ChannelKind::from_name("room-1"), ChannelKind::Public);
        assert_eq!(ChannelKind::from_name("private-orders"), ChannelKind::Private);
        assert_eq!(
            ChannelKind::from_name("private-encrypted-dm"),
            ChannelKind::Encrypted
        );
        assert_eq!(ChannelKind::from_name("presence-lobby"), ChannelKind::Presence);
    }

    #[test]
    fn test_prefix_must_lead() {
        assert_eq!(ChannelKind::from_name("my-private-room"), ChannelKind::Public);
    }

    #[test]
    fn test_requires_auth() {
        assert!(!ChannelKind::Public.requires_auth());
        assert!(ChannelKind::Private.requires_auth());
        assert!(ChannelKind::Presence.requires_auth());
    }
}
