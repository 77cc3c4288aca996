//! Nexa CRM
//!
//! A dual-brand (real estate / business setup) CRM core: seven typed
//! record collections behind one in-memory store, with plain-text YAML
//! workspaces for durability and a CLI on top.

pub mod cli;
pub mod core;
pub mod entities;
