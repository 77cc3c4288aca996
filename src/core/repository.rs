//! Storage backends behind the store's CRUD contract.
//!
//! The store itself is in-memory and infallible; a [`Repository`] is the
//! seam that gives a caller durability. [`MemoryRepository`] keeps the
//! snapshot in memory (the original product's behavior: data lives for
//! one session). [`YamlRepository`] writes one YAML file per collection
//! into a workspace's `data/` directory.

use std::fs;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::core::identity::EntityKind;
use crate::core::store::{Counters, CrmStore, Snapshot, StoreError};
use crate::core::workspace::Workspace;

/// Errors raised by repository load/save
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to read {file}: {message}")]
    Read { file: String, message: String },

    #[error("failed to write {file}: {message}")]
    Write { file: String, message: String },

    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A backend that can materialize a store and persist one back
pub trait Repository {
    fn load(&self) -> Result<CrmStore, RepositoryError>;
    fn save(&mut self, store: &CrmStore) -> Result<(), RepositoryError>;
}

/// In-memory backend; `save` replaces the held snapshot
#[derive(Debug, Default)]
pub struct MemoryRepository {
    snapshot: Snapshot,
}

impl MemoryRepository {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

impl Repository for MemoryRepository {
    fn load(&self) -> Result<CrmStore, RepositoryError> {
        Ok(CrmStore::from_snapshot(self.snapshot.clone())?)
    }

    fn save(&mut self, store: &CrmStore) -> Result<(), RepositoryError> {
        self.snapshot = store.snapshot();
        Ok(())
    }
}

/// File-per-collection YAML backend rooted in a workspace
#[derive(Debug)]
pub struct YamlRepository {
    workspace: Workspace,
}

impl YamlRepository {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    fn read_collection<T: DeserializeOwned + 'static>(
        &self,
        kind: EntityKind,
    ) -> Result<Vec<T>, RepositoryError> {
        let path = self.workspace.data_file(kind);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = path.display().to_string();
        let text = fs::read_to_string(&path).map_err(|e| RepositoryError::Read {
            file: file.clone(),
            message: e.to_string(),
        })?;

        // An empty data file means an empty collection
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_yml::from_str(&text).map_err(|e| RepositoryError::Parse {
            file,
            message: e.to_string(),
        })
    }

    /// Counters were not written by older workspaces; default lets the
    /// store derive them from the record ids in that case.
    fn read_counters(&self) -> Result<Counters, RepositoryError> {
        let path = self.workspace.counters_file();
        if !path.exists() {
            return Ok(Counters::default());
        }

        let file = path.display().to_string();
        let text = fs::read_to_string(&path).map_err(|e| RepositoryError::Read {
            file: file.clone(),
            message: e.to_string(),
        })?;

        serde_yml::from_str(&text).map_err(|e| RepositoryError::Parse {
            file,
            message: e.to_string(),
        })
    }

    fn write_counters(&self, counters: &Counters) -> Result<(), RepositoryError> {
        let path = self.workspace.counters_file();
        let file = path.display().to_string();

        let text = serde_yml::to_string(counters).map_err(|e| RepositoryError::Write {
            file: file.clone(),
            message: e.to_string(),
        })?;

        fs::write(&path, text).map_err(|e| RepositoryError::Write {
            file,
            message: e.to_string(),
        })
    }

    fn write_collection<T: Serialize>(
        &self,
        kind: EntityKind,
        records: &[T],
    ) -> Result<(), RepositoryError> {
        let path = self.workspace.data_file(kind);
        let file = path.display().to_string();

        let text = serde_yml::to_string(&records).map_err(|e| RepositoryError::Write {
            file: file.clone(),
            message: e.to_string(),
        })?;

        fs::write(&path, text).map_err(|e| RepositoryError::Write {
            file,
            message: e.to_string(),
        })
    }
}

impl Repository for YamlRepository {
    fn load(&self) -> Result<CrmStore, RepositoryError> {
        let snapshot = Snapshot {
            leads: self.read_collection(EntityKind::Lead)?,
            properties: self.read_collection(EntityKind::Property)?,
            deals: self.read_collection(EntityKind::Deal)?,
            pledges: self.read_collection(EntityKind::Pledge)?,
            tasks: self.read_collection(EntityKind::Task)?,
            viewings: self.read_collection(EntityKind::Viewing)?,
            follow_ups: self.read_collection(EntityKind::FollowUp)?,
            counters: self.read_counters()?,
        };
        Ok(CrmStore::from_snapshot(snapshot)?)
    }

    fn save(&mut self, store: &CrmStore) -> Result<(), RepositoryError> {
        let snapshot = store.snapshot();
        self.write_collection(EntityKind::Lead, &snapshot.leads)?;
        self.write_collection(EntityKind::Property, &snapshot.properties)?;
        self.write_collection(EntityKind::Deal, &snapshot.deals)?;
        self.write_collection(EntityKind::Pledge, &snapshot.pledges)?;
        self.write_collection(EntityKind::Task, &snapshot.tasks)?;
        self.write_collection(EntityKind::Viewing, &snapshot.viewings)?;
        self.write_collection(EntityKind::FollowUp, &snapshot.follow_ups)?;
        self.write_counters(&snapshot.counters)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed;
    use crate::entities::{Lead, Pledge};
    use tempfile::tempdir;

    #[test]
    fn test_memory_repository_roundtrip() {
        let mut repo = MemoryRepository::new(seed::snapshot().unwrap());
        let store = repo.load().unwrap();
        let lead_count = store.len::<Lead>();

        repo.save(&store).unwrap();
        let again = repo.load().unwrap();
        assert_eq!(again.len::<Lead>(), lead_count);
    }

    #[test]
    fn test_yaml_repository_roundtrip() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let mut repo = YamlRepository::new(ws);

        let store = seed::store().unwrap();
        repo.save(&store).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.snapshot().leads, store.snapshot().leads);
        assert_eq!(loaded.snapshot().pledges, store.snapshot().pledges);
        assert!(!loaded.all::<Pledge>().is_empty());
    }

    #[test]
    fn test_yaml_repository_retires_deleted_ids() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let mut repo = YamlRepository::new(ws);

        let mut store = seed::store().unwrap();
        let highest = store
            .all::<Lead>()
            .iter()
            .map(|l| l.id.clone())
            .max_by_key(|id| id.seq())
            .unwrap();
        let retired_seq = highest.seq();

        store.remove::<Lead>(&highest);
        repo.save(&store).unwrap();

        let mut reloaded = repo.load().unwrap();
        let id = reloaded.add::<Lead>(crate::entities::LeadDraft {
            name: "Test".to_string(),
            email: "t@example.com".to_string(),
            phone: "+971".to_string(),
            brand: crate::core::brand::Brand::RealEstate,
            status: Default::default(),
            priority: Default::default(),
            value: crate::core::money::Money::aed(1),
            assigned_to: "Omar".to_string(),
            interest: None,
            company: None,
            source: None,
        });
        assert_eq!(id.seq(), retired_seq + 1);
    }

    #[test]
    fn test_yaml_repository_missing_files_mean_empty() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let repo = YamlRepository::new(ws);

        let store = repo.load().unwrap();
        assert_eq!(store.len::<Lead>(), 0);
    }
}
