//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep DTO/report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — chain state, policy, report/output structs.
//! - `constants.rs` — stable constants (genesis accounts, token metadata,
//!   official trust key, module parameter defaults).
//! - `primitives.rs` — `Address`, `Bytes32`, `Amount` value types.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and integration
//! contracts. Keep schema-impacting changes explicit and synchronized with
//! `docs/contracts/*`.

pub mod constants;
pub mod models;
pub mod primitives;
