//! Record identity system using type-prefixed sequence numbers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The seven entity collections tracked by the CRM store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Lead,
    Property,
    Deal,
    Pledge,
    Task,
    Viewing,
    FollowUp,
}

impl EntityKind {
    /// Get the id prefix for this kind (e.g. "L" for leads, "PL" for pledges)
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Lead => "L",
            EntityKind::Property => "P",
            EntityKind::Deal => "D",
            EntityKind::Pledge => "PL",
            EntityKind::Task => "T",
            EntityKind::Viewing => "V",
            EntityKind::FollowUp => "F",
        }
    }

    /// Singular display name
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Lead => "lead",
            EntityKind::Property => "property",
            EntityKind::Deal => "deal",
            EntityKind::Pledge => "pledge",
            EntityKind::Task => "task",
            EntityKind::Viewing => "viewing",
            EntityKind::FollowUp => "follow-up",
        }
    }

    /// Plural form, also used as the data file stem (e.g. "leads.yaml")
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Lead => "leads",
            EntityKind::Property => "properties",
            EntityKind::Deal => "deals",
            EntityKind::Pledge => "pledges",
            EntityKind::Task => "tasks",
            EntityKind::Viewing => "viewings",
            EntityKind::FollowUp => "follow_ups",
        }
    }

    /// Get all kinds
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Lead,
            EntityKind::Property,
            EntityKind::Deal,
            EntityKind::Pledge,
            EntityKind::Task,
            EntityKind::Viewing,
            EntityKind::FollowUp,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A unique record identifier combining a kind prefix and a sequence number.
///
/// Rendered as the prefix plus a zero-padded sequence, e.g. `L001` or
/// `PL012`. Sequences above 999 simply widen the number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId {
    kind: EntityKind,
    seq: u32,
}

impl RecordId {
    /// Create a RecordId from a kind and sequence number
    pub fn new(kind: EntityKind, seq: u32) -> Self {
        Self { kind, seq }
    }

    /// Get the entity kind
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Get the sequence number
    pub fn seq(&self) -> u32 {
        self.seq
    }

    /// Parse a RecordId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.kind.prefix(), self.seq)
    }
}

impl FromStr for RecordId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdParseError::Empty);
        }

        // Longest prefix first so "PL012" is a pledge, not a property
        let mut kinds: Vec<EntityKind> = EntityKind::all().to_vec();
        kinds.sort_by_key(|k| std::cmp::Reverse(k.prefix().len()));

        for kind in kinds {
            if let Some(digits) = s.strip_prefix(kind.prefix()) {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    continue;
                }
                let seq: u32 = digits
                    .parse()
                    .map_err(|_| IdParseError::InvalidSequence(s.to_string()))?;
                return Ok(Self { kind, seq });
            }
        }

        Err(IdParseError::UnknownPrefix(s.to_string()))
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing record IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("empty record ID")]
    Empty,

    #[error("unrecognized record ID '{0}' (expected a prefix like L, P, D, PL, T, V or F followed by digits)")]
    UnknownPrefix(String),

    #[error("record ID '{0}' has a sequence number out of range")]
    InvalidSequence(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display_pads_to_three() {
        assert_eq!(RecordId::new(EntityKind::Lead, 1).to_string(), "L001");
        assert_eq!(RecordId::new(EntityKind::Pledge, 12).to_string(), "PL012");
        assert_eq!(RecordId::new(EntityKind::Deal, 1234).to_string(), "D1234");
    }

    #[test]
    fn test_record_id_roundtrip() {
        for kind in EntityKind::all() {
            let id = RecordId::new(*kind, 42);
            let parsed = RecordId::parse(&id.to_string()).unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_pledge_prefix_wins_over_property() {
        let id = RecordId::parse("PL003").unwrap();
        assert_eq!(id.kind(), EntityKind::Pledge);
        assert_eq!(id.seq(), 3);
    }

    #[test]
    fn test_property_prefix_still_parses() {
        let id = RecordId::parse("P010").unwrap();
        assert_eq!(id.kind(), EntityKind::Property);
        assert_eq!(id.seq(), 10);
    }

    #[test]
    fn test_unknown_prefix_rejected() {
        let err = RecordId::parse("X001").unwrap_err();
        assert!(matches!(err, IdParseError::UnknownPrefix(_)));
    }

    #[test]
    fn test_missing_digits_rejected() {
        assert!(RecordId::parse("L").is_err());
        assert!(RecordId::parse("PL").is_err());
        assert!(RecordId::parse("").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = RecordId::new(EntityKind::FollowUp, 7);
        let yaml = serde_yml::to_string(&id).unwrap();
        assert_eq!(yaml.trim(), "F007");
        let back: RecordId = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(back, id);
    }
}
