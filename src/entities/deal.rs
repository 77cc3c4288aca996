//! Deal entity type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::identity::{EntityKind, RecordId};
use crate::core::money::Money;

/// Sales pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum DealStage {
    #[default]
    Inquiry,
    Viewing,
    Offer,
    Negotiation,
    Won,
    Lost,
}

impl DealStage {
    /// Whether the deal has reached a terminal stage
    pub fn is_closed(&self) -> bool {
        matches!(self, DealStage::Won | DealStage::Lost)
    }
}

impl std::fmt::Display for DealStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DealStage::Inquiry => write!(f, "inquiry"),
            DealStage::Viewing => write!(f, "viewing"),
            DealStage::Offer => write!(f, "offer"),
            DealStage::Negotiation => write!(f, "negotiation"),
            DealStage::Won => write!(f, "won"),
            DealStage::Lost => write!(f, "lost"),
        }
    }
}

impl std::str::FromStr for DealStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inquiry" => Ok(DealStage::Inquiry),
            "viewing" => Ok(DealStage::Viewing),
            "offer" => Ok(DealStage::Offer),
            "negotiation" => Ok(DealStage::Negotiation),
            "won" => Ok(DealStage::Won),
            "lost" => Ok(DealStage::Lost),
            _ => Err(format!("Unknown deal stage: {}", s)),
        }
    }
}

/// A sales-pipeline record for a property transaction.
///
/// `client` and `property` are informal display references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Unique identifier
    pub id: RecordId,

    pub title: String,

    pub client: String,

    pub property: String,

    pub value: Money,

    #[serde(default)]
    pub stage: DealStage,

    /// Win probability, 0..=100
    #[serde(default)]
    pub probability: u8,

    pub expected_close: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct DealDraft {
    pub title: String,
    pub client: String,
    pub property: String,
    pub value: Money,
    pub stage: DealStage,
    pub probability: u8,
    pub expected_close: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct DealPatch {
    pub title: Option<String>,
    pub client: Option<String>,
    pub property: Option<String>,
    pub value: Option<Money>,
    pub stage: Option<DealStage>,
    pub probability: Option<u8>,
    pub expected_close: Option<NaiveDate>,
}

impl Record for Deal {
    const KIND: EntityKind = EntityKind::Deal;

    type Draft = DealDraft;
    type Patch = DealPatch;

    fn create(id: RecordId, draft: DealDraft) -> Self {
        Self {
            id,
            title: draft.title,
            client: draft.client,
            property: draft.property,
            value: draft.value,
            stage: draft.stage,
            probability: draft.probability.min(100),
            expected_close: draft.expected_close,
        }
    }

    fn apply(&mut self, patch: DealPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(client) = patch.client {
            self.client = client;
        }
        if let Some(property) = patch.property {
            self.property = property;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(stage) = patch.stage {
            self.stage = stage;
        }
        if let Some(probability) = patch.probability {
            self.probability = probability.min(100);
        }
        if let Some(expected_close) = patch.expected_close {
            self.expected_close = expected_close;
        }
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_clamped_to_100() {
        let deal = Deal::create(
            RecordId::new(EntityKind::Deal, 1),
            DealDraft {
                title: "Marina 2BR sale".to_string(),
                client: "Fatima Khan".to_string(),
                property: "Marina Heights 1204".to_string(),
                value: Money::aed(2_100_000),
                stage: DealStage::Negotiation,
                probability: 140,
                expected_close: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
            },
        );
        assert_eq!(deal.probability, 100);
    }

    #[test]
    fn test_closed_stages() {
        assert!(DealStage::Won.is_closed());
        assert!(DealStage::Lost.is_closed());
        assert!(!DealStage::Negotiation.is_closed());
    }
}
