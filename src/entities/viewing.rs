//! Viewing entity type

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{EntityKind, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ViewingStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl std::fmt::Display for ViewingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewingStatus::Scheduled => write!(f, "scheduled"),
            ViewingStatus::Completed => write!(f, "completed"),
            ViewingStatus::Cancelled => write!(f, "cancelled"),
            ViewingStatus::NoShow => write!(f, "no_show"),
        }
    }
}

impl std::str::FromStr for ViewingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(ViewingStatus::Scheduled),
            "completed" => Ok(ViewingStatus::Completed),
            "cancelled" | "canceled" => Ok(ViewingStatus::Cancelled),
            "no_show" | "no-show" => Ok(ViewingStatus::NoShow),
            _ => Err(format!("Unknown viewing status: {}", s)),
        }
    }
}

/// A scheduled property viewing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewing {
    /// Unique identifier
    pub id: RecordId,

    pub property: String,

    pub client: String,

    pub date: NaiveDate,

    pub time: NaiveTime,

    pub agent: String,

    #[serde(default)]
    pub status: ViewingStatus,
}

#[derive(Debug, Clone)]
pub struct ViewingDraft {
    pub property: String,
    pub client: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub agent: String,
    pub status: ViewingStatus,
}

#[derive(Debug, Clone, Default)]
pub struct ViewingPatch {
    pub property: Option<String>,
    pub client: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub agent: Option<String>,
    pub status: Option<ViewingStatus>,
}

impl Record for Viewing {
    const KIND: EntityKind = EntityKind::Viewing;

    type Draft = ViewingDraft;
    type Patch = ViewingPatch;

    fn create(id: RecordId, draft: ViewingDraft) -> Self {
        Self {
            id,
            property: draft.property,
            client: draft.client,
            date: draft.date,
            time: draft.time,
            agent: draft.agent,
            status: draft.status,
        }
    }

    fn apply(&mut self, patch: ViewingPatch) {
        if let Some(property) = patch.property {
            self.property = property;
        }
        if let Some(client) = patch.client {
            self.client = client;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(agent) = patch.agent {
            self.agent = agent;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.property
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_merges_only_patched_fields() {
        let mut viewing = Viewing::create(
            RecordId::new(EntityKind::Viewing, 1),
            ViewingDraft {
                property: "Marina Vista 1204".to_string(),
                client: "Sara Khan".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
                time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                agent: "Omar".to_string(),
                status: ViewingStatus::Scheduled,
            },
        );

        viewing.apply(ViewingPatch {
            status: Some(ViewingStatus::Completed),
            time: Some(NaiveTime::from_hms_opt(11, 30, 0).unwrap()),
            ..Default::default()
        });

        assert_eq!(viewing.status, ViewingStatus::Completed);
        assert_eq!(viewing.time, NaiveTime::from_hms_opt(11, 30, 0).unwrap());
        assert_eq!(viewing.client, "Sara Khan");
        assert_eq!(viewing.agent, "Omar");
    }

    #[test]
    fn test_status_parses_spelling_variants() {
        assert_eq!(
            "canceled".parse::<ViewingStatus>(),
            Ok(ViewingStatus::Cancelled)
        );
        assert_eq!("no-show".parse::<ViewingStatus>(), Ok(ViewingStatus::NoShow));
        assert!("missed".parse::<ViewingStatus>().is_err());
    }
}
