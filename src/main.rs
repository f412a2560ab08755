mod cli;
mod commands;
mod domain;
mod module;
mod services;

pub use cli::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use domain::primitives::*;
pub use services::airdrop::*;
pub use services::chain::*;
pub use services::doctor::*;
pub use services::manifest::*;
pub use services::merkle::*;
pub use services::output::*;
pub use services::policy::*;
pub use services::storage::*;
pub use services::token::*;
pub use services::trust::*;

use clap::Parser;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        emit_failure(cli.json, error_code(&err), &err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let policy = load_policy()?;

    if commands::handle_trust_commands(cli, &policy)? {
        return Ok(());
    }
    if commands::handle_module_commands(cli, &policy)? {
        return Ok(());
    }
    if commands::handle_tree_commands(cli)? {
        return Ok(());
    }

    let mut state = load_or_init()?;
    commands::handle_runtime_commands(cli, &mut state, &policy)
}

/// Map a failure to the contract-style identifier surfaced in the JSON
/// error envelope.
fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<AirdropError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<TokenError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<ChainError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<ManifestError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<module::ModuleError>() {
        return e.code();
    }
    "HarnessError"
}
