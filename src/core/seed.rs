//! Seed data - the fixed mock records every fresh workspace starts with.
//!
//! The records live as YAML under `seed/` and are embedded into the
//! binary, one file per collection. Both brands are represented; list
//! commands scope by brand at display time.

use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::identity::EntityKind;
use crate::core::store::{CrmStore, Snapshot, StoreError};

#[derive(RustEmbed)]
#[folder = "seed/"]
struct SeedAssets;

/// Errors raised while loading the embedded seed pack
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed file '{0}' is missing from the embedded pack")]
    Missing(String),

    #[error("seed file '{file}' failed to parse: {message}")]
    Parse { file: String, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse the embedded seed pack into a snapshot. Counters stay at their
/// default; the store derives them from the seed ids.
pub fn snapshot() -> Result<Snapshot, SeedError> {
    Ok(Snapshot {
        leads: parse(EntityKind::Lead)?,
        properties: parse(EntityKind::Property)?,
        deals: parse(EntityKind::Deal)?,
        pledges: parse(EntityKind::Pledge)?,
        tasks: parse(EntityKind::Task)?,
        viewings: parse(EntityKind::Viewing)?,
        follow_ups: parse(EntityKind::FollowUp)?,
        counters: Default::default(),
    })
}

/// A store pre-populated with the seed records
pub fn store() -> Result<CrmStore, SeedError> {
    Ok(CrmStore::from_snapshot(snapshot()?)?)
}

fn parse<T: DeserializeOwned + 'static>(kind: EntityKind) -> Result<Vec<T>, SeedError> {
    let file = format!("{}.yaml", kind.plural());
    let asset = SeedAssets::get(&file).ok_or_else(|| SeedError::Missing(file.clone()))?;
    let text = String::from_utf8_lossy(asset.data.as_ref());
    serde_yml::from_str(&text).map_err(|e| SeedError::Parse {
        file,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::brand::Brand;
    use crate::entities::{Deal, FollowUp, Lead, Pledge, Property, Task, Viewing};

    #[test]
    fn test_seed_pack_parses_and_loads() {
        let store = store().unwrap();
        assert!(!store.all::<Lead>().is_empty());
        assert!(!store.all::<Property>().is_empty());
        assert!(!store.all::<Deal>().is_empty());
        assert!(!store.all::<Pledge>().is_empty());
        assert!(!store.all::<Task>().is_empty());
        assert!(!store.all::<Viewing>().is_empty());
        assert!(!store.all::<FollowUp>().is_empty());
    }

    #[test]
    fn test_seed_covers_both_brands() {
        let store = store().unwrap();
        let leads = store.all::<Lead>();
        assert!(leads.iter().any(|l| l.brand == Brand::RealEstate));
        assert!(leads.iter().any(|l| l.brand == Brand::BusinessSetup));
    }

    #[test]
    fn test_seed_counter_continues_after_highest_id() {
        let store = store().unwrap();
        let max = store
            .all::<Lead>()
            .iter()
            .map(|l| l.id.seq())
            .max()
            .unwrap();

        let mut store = store;
        let id = store.add::<Lead>(crate::entities::LeadDraft {
            name: "Test".to_string(),
            email: "t@example.com".to_string(),
            phone: "+971".to_string(),
            brand: Brand::RealEstate,
            status: Default::default(),
            priority: Default::default(),
            value: crate::core::money::Money::aed(1),
            assigned_to: "Omar".to_string(),
            interest: None,
            company: None,
            source: None,
        });
        assert_eq!(id.seq(), max + 1);
    }
}
