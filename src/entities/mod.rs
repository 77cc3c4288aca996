//! Entity types - the seven CRM record collections

pub mod deal;
pub mod follow_up;
pub mod lead;
pub mod pledge;
pub mod property;
pub mod task;
pub mod viewing;

pub use deal::{Deal, DealDraft, DealPatch, DealStage};
pub use follow_up::{FollowUp, FollowUpDraft, FollowUpKind, FollowUpPatch, FollowUpStatus};
pub use lead::{Lead, LeadDraft, LeadPatch, LeadStatus};
pub use pledge::{Pledge, PledgeDraft, PledgePatch};
pub use property::{Property, PropertyDraft, PropertyPatch, PropertyStatus, PropertyType};
pub use task::{Task, TaskDraft, TaskPatch, TaskStatus};
pub use viewing::{Viewing, ViewingDraft, ViewingPatch, ViewingStatus};
