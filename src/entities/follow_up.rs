//! Follow-up entity type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::{Priority, Record};
use crate::core::identity::{EntityKind, RecordId};

/// How the follow-up happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum FollowUpKind {
    #[default]
    Call,
    Email,
    Whatsapp,
    Meeting,
}

impl std::fmt::Display for FollowUpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FollowUpKind::Call => write!(f, "call"),
            FollowUpKind::Email => write!(f, "email"),
            FollowUpKind::Whatsapp => write!(f, "whatsapp"),
            FollowUpKind::Meeting => write!(f, "meeting"),
        }
    }
}

impl std::str::FromStr for FollowUpKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" => Ok(FollowUpKind::Call),
            "email" => Ok(FollowUpKind::Email),
            "whatsapp" => Ok(FollowUpKind::Whatsapp),
            "meeting" => Ok(FollowUpKind::Meeting),
            _ => Err(format!("Unknown follow-up type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum FollowUpStatus {
    #[default]
    Pending,
    Done,
}

impl std::fmt::Display for FollowUpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FollowUpStatus::Pending => write!(f, "pending"),
            FollowUpStatus::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for FollowUpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(FollowUpStatus::Pending),
            "done" => Ok(FollowUpStatus::Done),
            _ => Err(format!("Unknown follow-up status: {}", s)),
        }
    }
}

/// A scheduled touch-point with a lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    /// Unique identifier
    pub id: RecordId,

    /// Lead being followed up, informal reference
    pub lead: String,

    #[serde(rename = "type", default)]
    pub kind: FollowUpKind,

    pub date: NaiveDate,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub status: FollowUpStatus,

    pub assigned_to: String,

    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone)]
pub struct FollowUpDraft {
    pub lead: String,
    pub kind: FollowUpKind,
    pub date: NaiveDate,
    pub notes: String,
    pub status: FollowUpStatus,
    pub assigned_to: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default)]
pub struct FollowUpPatch {
    pub lead: Option<String>,
    pub kind: Option<FollowUpKind>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: Option<FollowUpStatus>,
    pub assigned_to: Option<String>,
    pub priority: Option<Priority>,
}

impl Record for FollowUp {
    const KIND: EntityKind = EntityKind::FollowUp;

    type Draft = FollowUpDraft;
    type Patch = FollowUpPatch;

    fn create(id: RecordId, draft: FollowUpDraft) -> Self {
        Self {
            id,
            lead: draft.lead,
            kind: draft.kind,
            date: draft.date,
            notes: draft.notes,
            status: draft.status,
            assigned_to: draft.assigned_to,
            priority: draft.priority,
        }
    }

    fn apply(&mut self, patch: FollowUpPatch) {
        if let Some(lead) = patch.lead {
            self.lead = lead;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.lead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follow_up() -> FollowUp {
        FollowUp::create(
            RecordId::new(EntityKind::FollowUp, 1),
            FollowUpDraft {
                lead: "Ahmed Hassan".to_string(),
                kind: FollowUpKind::Call,
                date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
                notes: "Discuss payment plan".to_string(),
                status: FollowUpStatus::Pending,
                assigned_to: "Layla".to_string(),
                priority: Priority::Medium,
            },
        )
    }

    #[test]
    fn test_apply_merges_only_patched_fields() {
        let mut follow_up = follow_up();
        follow_up.apply(FollowUpPatch {
            status: Some(FollowUpStatus::Done),
            kind: Some(FollowUpKind::Meeting),
            ..Default::default()
        });

        assert_eq!(follow_up.status, FollowUpStatus::Done);
        assert_eq!(follow_up.kind, FollowUpKind::Meeting);
        assert_eq!(follow_up.lead, "Ahmed Hassan");
        assert_eq!(follow_up.notes, "Discuss payment plan");
    }

    #[test]
    fn test_kind_serializes_under_type_key() {
        let yaml = serde_yml::to_string(&follow_up()).unwrap();
        assert!(yaml.contains("type: call"));

        let back: FollowUp = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(back.kind, FollowUpKind::Call);
    }
}
