//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs` — trust/module/tree command trees.
//! - `runtime.rs` — accounts/token/deploy/claim/withdraw/etc.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;

pub use admin::{handle_module_commands, handle_tree_commands, handle_trust_commands};
pub use runtime::handle_runtime_commands;
