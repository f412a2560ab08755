use crate::domain::models::{PolicyFile, PolicyGeneral};
use crate::module::ModuleError;
use crate::services::storage::state_dir;
use crate::services::trust::verify_module_signature;
use std::path::PathBuf;

pub fn load_policy() -> anyhow::Result<PolicyFile> {
    let path = state_dir()?.join("policy.toml");
    if !path.exists() {
        return Ok(PolicyFile {
            general: PolicyGeneral::default(),
        });
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Doctor-style status for the policy file. An absent file is fine:
/// defaults apply.
pub fn policy_file_status() -> String {
    let path = match state_dir() {
        Ok(dir) => dir.join("policy.toml"),
        Err(_) => return "missing".to_string(),
    };
    if !path.exists() {
        return "ok".to_string();
    }
    match std::fs::read_to_string(&path) {
        Ok(raw) if toml::from_str::<PolicyFile>(&raw).is_ok() => "ok".to_string(),
        _ => "invalid".to_string(),
    }
}

/// Load a deployment module only if the policy admits its source. Signing
/// is exempt so an unsigned module can be signed in the first place.
pub fn checked_load_module(
    policy: &PolicyFile,
    source: &str,
) -> anyhow::Result<crate::module::DeployModule> {
    enforce_module_policy(policy, source)?;
    crate::module::load_module(source)
}

/// Gate a deployment-module source against the local policy: allowlist
/// first, then the signature requirement.
pub fn enforce_module_policy(policy: &PolicyFile, source: &str) -> anyhow::Result<()> {
    if !policy.general.allowed_module_sources.is_empty()
        && !policy
            .general
            .allowed_module_sources
            .iter()
            .any(|allowed| source_matches_allowed(source, allowed))
    {
        return Err(ModuleError::SourceDenied(source.to_string()).into());
    }
    if policy.general.require_signed_module {
        let ok = verify_module_signature(source)?;
        if !ok {
            return Err(ModuleError::SignatureRejected(source.to_string()).into());
        }
    }
    Ok(())
}

pub fn canonical_module_source_id(raw: &str) -> String {
    let s = raw.trim();

    if s.split('/').count() == 2 && !s.contains("://") && !s.starts_with('.') {
        return format!("github:{}", s.to_ascii_lowercase());
    }

    if let Some(rest) = s.strip_prefix("https://github.com/") {
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() >= 2 {
            let owner = parts[0];
            let repo = parts[1].trim_end_matches(".git");
            if !owner.is_empty() && !repo.is_empty() {
                return format!(
                    "github:{}/{}",
                    owner.to_ascii_lowercase(),
                    repo.to_ascii_lowercase()
                );
            }
        }
    }

    if let Some(rest) = s.strip_prefix("https://raw.githubusercontent.com/") {
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() >= 2 {
            let owner = parts[0];
            let repo = parts[1];
            if !owner.is_empty() && !repo.is_empty() {
                return format!(
                    "github:{}/{}",
                    owner.to_ascii_lowercase(),
                    repo.to_ascii_lowercase()
                );
            }
        }
    }

    let p = PathBuf::from(s);
    if p.exists() {
        if let Ok(c) = p.canonicalize() {
            return format!("path:{}", c.to_string_lossy());
        }
    }

    s.trim_end_matches('/').to_ascii_lowercase()
}

pub fn source_matches_allowed(source: &str, allowed: &str) -> bool {
    canonical_module_source_id(source) == canonical_module_source_id(allowed)
}
