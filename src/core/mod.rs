//! Core module - identity, the store, and its supporting types

pub mod brand;
pub mod entity;
pub mod identity;
pub mod money;
pub mod repository;
pub mod seed;
pub mod settings;
pub mod store;
pub mod workspace;

pub use brand::Brand;
pub use entity::{Priority, Record};
pub use identity::{EntityKind, IdParseError, RecordId};
pub use money::{Currency, Money};
pub use repository::{MemoryRepository, Repository, RepositoryError, YamlRepository};
pub use settings::{Settings, SettingsError};
pub use store::{Change, ChangeEvent, Collection, CrmStore, Snapshot, StoreError, SubscriptionId};
pub use workspace::{Workspace, WorkspaceError};
