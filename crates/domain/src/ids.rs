use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored portal record id. Generated on submission, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortalId(Uuid);

impl PortalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PortalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PortalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifiers that come from the game data dump are opaque strings, not UUIDs.
macro_rules! define_key {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

// World topology keys
define_key!(MapId);
define_key!(ExitId);

impl ExitId {
    /// Exit name of the synthetic node that stands in for an exitless open-world zone.
    pub const ROADS: &'static str = "ROADS";

    pub fn roads() -> Self {
        Self(Self::ROADS.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_order_lexicographically() {
        let mut ids = vec![MapId::new("3004"), MapId::new("0000"), MapId::new("1012")];
        ids.sort();
        assert_eq!(
            ids.iter().map(MapId::as_str).collect::<Vec<_>>(),
            vec!["0000", "1012", "3004"]
        );
    }

    #[test]
    fn keys_serialize_as_plain_strings() {
        let json = serde_json::to_string(&MapId::new("4204")).expect("serialize");
        assert_eq!(json, "\"4204\"");
    }

    #[test]
    fn roads_exit_uses_the_reserved_name() {
        assert_eq!(ExitId::roads().as_str(), ExitId::ROADS);
    }

    #[test]
    fn portal_ids_are_unique() {
        assert_ne!(PortalId::new(), PortalId::new());
    }
}
