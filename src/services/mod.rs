//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `chain.rs` — simulated chain state: genesis, time, contract addresses.
//! - `token.rs` — LayintonToken deploy/transfer/balance/supply semantics.
//! - `airdrop.rs` — LayiAirDrop deploy/claim/withdraw/update-root semantics.
//! - `merkle.rs` — keccak256 leaf/pair hashing, tree levels, proofs.
//! - `manifest.rs` — recipient CSV parsing and tree/proof artifacts.
//! - `trust.rs` — trusted key storage + module signature verification.
//! - `policy.rs` — module source canonicalization and allowlist matching.
//! - `doctor.rs` — check report assembly.
//! - `storage.rs` — local chain-state persistence + audit log.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod airdrop;
pub mod chain;
pub mod doctor;
pub mod manifest;
pub mod merkle;
pub mod output;
pub mod policy;
pub mod storage;
pub mod token;
pub mod trust;
