//! Command implementations

pub mod completions;
pub mod config;
pub mod deal;
pub mod follow_up;
pub mod init;
pub mod lead;
pub mod pledge;
pub mod property;
pub mod status;
pub mod task;
pub mod viewing;
