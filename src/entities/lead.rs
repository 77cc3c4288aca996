//! Lead entity type

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::brand::Brand;
use crate::core::entity::{Priority, Record};
use crate::core::identity::{EntityKind, RecordId};
use crate::core::money::Money;

/// Lead pipeline status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Negotiation,
    Won,
    Lost,
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadStatus::New => write!(f, "new"),
            LeadStatus::Contacted => write!(f, "contacted"),
            LeadStatus::Qualified => write!(f, "qualified"),
            LeadStatus::Negotiation => write!(f, "negotiation"),
            LeadStatus::Won => write!(f, "won"),
            LeadStatus::Lost => write!(f, "lost"),
        }
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "qualified" => Ok(LeadStatus::Qualified),
            "negotiation" => Ok(LeadStatus::Negotiation),
            "won" => Ok(LeadStatus::Won),
            "lost" => Ok(LeadStatus::Lost),
            _ => Err(format!("Unknown lead status: {}", s)),
        }
    }
}

/// A prospective client, tracked through the status pipeline.
///
/// `interest` (real-estate side) and `company` (business-setup side) are
/// informal display strings; the store never resolves them against other
/// collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Unique identifier
    pub id: RecordId,

    /// Full name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    /// Which side of the product this lead belongs to
    #[serde(default)]
    pub brand: Brand,

    /// Pipeline status
    #[serde(default)]
    pub status: LeadStatus,

    /// Priority level
    #[serde(default)]
    pub priority: Priority,

    /// Estimated deal value
    pub value: Money,

    /// Agent or consultant responsible
    pub assigned_to: String,

    /// Property or area of interest (real-estate leads)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<String>,

    /// Company being set up (business-setup leads)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Where the lead came from (portal, referral, walk-in, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Creation date, assigned by the store on add
    pub created: NaiveDate,
}

/// Creation input for a lead: everything but the id and `created`
#[derive(Debug, Clone)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub brand: Brand,
    pub status: LeadStatus,
    pub priority: Priority,
    pub value: Money,
    pub assigned_to: String,
    pub interest: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
}

/// Shallow-merge update for a lead
#[derive(Debug, Clone, Default)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub brand: Option<Brand>,
    pub status: Option<LeadStatus>,
    pub priority: Option<Priority>,
    pub value: Option<Money>,
    pub assigned_to: Option<String>,
    pub interest: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
}

impl Record for Lead {
    const KIND: EntityKind = EntityKind::Lead;

    type Draft = LeadDraft;
    type Patch = LeadPatch;

    fn create(id: RecordId, draft: LeadDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            brand: draft.brand,
            status: draft.status,
            priority: draft.priority,
            value: draft.value,
            assigned_to: draft.assigned_to,
            interest: draft.interest,
            company: draft.company,
            source: draft.source,
            created: Local::now().date_naive(),
        }
    }

    fn apply(&mut self, patch: LeadPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(brand) = patch.brand {
            self.brand = brand;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(interest) = patch.interest {
            self.interest = Some(interest);
        }
        if let Some(company) = patch.company {
            self.company = Some(company);
        }
        if let Some(source) = patch.source {
            self.source = Some(source);
        }
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> LeadDraft {
        LeadDraft {
            name: "Zara Ahmed".to_string(),
            email: "z@x.com".to_string(),
            phone: "+971 50 123 4567".to_string(),
            brand: Brand::RealEstate,
            status: LeadStatus::New,
            priority: Priority::Medium,
            value: Money::aed(1_200_000),
            assigned_to: "Omar".to_string(),
            interest: Some("Marina Heights 2BR".to_string()),
            company: None,
            source: Some("portal".to_string()),
        }
    }

    #[test]
    fn test_create_assigns_today() {
        let lead = Lead::create(RecordId::new(EntityKind::Lead, 3), draft());
        assert_eq!(lead.id.to_string(), "L003");
        assert_eq!(lead.created, Local::now().date_naive());
    }

    #[test]
    fn test_apply_merges_only_patched_fields() {
        let mut lead = Lead::create(RecordId::new(EntityKind::Lead, 1), draft());
        let before = lead.clone();

        lead.apply(LeadPatch {
            status: Some(LeadStatus::Qualified),
            ..Default::default()
        });

        assert_eq!(lead.status, LeadStatus::Qualified);
        assert_eq!(lead.name, before.name);
        assert_eq!(lead.email, before.email);
        assert_eq!(lead.value, before.value);
        assert_eq!(lead.created, before.created);
    }

    #[test]
    fn test_lead_yaml_roundtrip() {
        let lead = Lead::create(RecordId::new(EntityKind::Lead, 9), draft());
        let yaml = serde_yml::to_string(&lead).unwrap();
        assert!(yaml.contains("id: L009"));
        assert!(yaml.contains("brand: real-estate"));
        let back: Lead = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(back, lead);
    }
}
