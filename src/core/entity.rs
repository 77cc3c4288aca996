//! Record trait - common interface for all CRM record types

use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::{EntityKind, RecordId};

/// Common trait for all CRM records.
///
/// Every record type declares a creation shape (`Draft`, the record minus
/// its id and auto-assigned fields) and a shallow-merge update shape
/// (`Patch`, every field optional). The store mints ids and drives
/// `create`/`apply`; it never inspects record fields beyond the id.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The collection this record belongs to
    const KIND: EntityKind;

    /// Creation input: the record minus id and auto fields
    type Draft;

    /// Shallow-merge update: every field optional
    type Patch: Default;

    /// Build a record from a freshly minted id and a draft
    fn create(id: RecordId, draft: Self::Draft) -> Self;

    /// Merge a patch into this record; `None` fields are left untouched
    fn apply(&mut self, patch: Self::Patch);

    /// Get the record's unique id
    fn id(&self) -> &RecordId;

    /// Short human label (name or title) for display
    fn label(&self) -> &str;
}

/// Priority values shared across record types
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}
