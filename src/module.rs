use crate::domain::primitives::Address;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Deployment module: what to deploy and with which parameters. Sources are
/// a directory (containing `deploy/airdrop.module.json`), a file path, an
/// HTTP(S) URL, or an `owner/repo` GitHub shorthand.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DeployModule {
    pub module: String,
    pub contract: String,
    #[serde(default)]
    pub parameters: ModuleParameters,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModuleParameters {
    #[serde(default)]
    pub ending_time_in_sec: Option<u64>,
    #[serde(default)]
    pub token_address: Option<String>,
    #[serde(default)]
    pub required_nft: Option<String>,
    #[serde(default)]
    pub manifest: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ModuleError {
    #[error("deployment module invalid: {0}")]
    Invalid(String),
    #[error("deployment parameter missing: {0}")]
    MissingParameter(String),
    #[error("module source not allowed by policy: {0}")]
    SourceDenied(String),
    #[error("module signature verification failed: {0}")]
    SignatureRejected(String),
}

impl ModuleError {
    pub fn code(&self) -> &'static str {
        match self {
            ModuleError::Invalid(_) => "ModuleInvalid",
            ModuleError::MissingParameter(_) => "ModuleParameterMissing",
            ModuleError::SourceDenied(_) => "ModuleSourceDenied",
            ModuleError::SignatureRejected(_) => "ModuleSignatureInvalid",
        }
    }
}

fn looks_like_github_shorthand(source: &str) -> bool {
    source.split('/').count() == 2 && !source.contains("://") && !source.starts_with('.')
}

fn normalize_source(source: &str) -> String {
    if looks_like_github_shorthand(source) {
        format!(
            "https://raw.githubusercontent.com/{}/main/deploy/airdrop.module.json",
            source
        )
    } else {
        source.to_string()
    }
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://")
        || source.starts_with("https://")
        || looks_like_github_shorthand(source)
}

pub fn resolve_module_file(source: &str) -> PathBuf {
    let p = Path::new(source);
    if p.is_dir() {
        p.join("deploy").join("airdrop.module.json")
    } else {
        p.to_path_buf()
    }
}

/// Companion signature path for a local module file.
pub fn module_signature_file(source: &str) -> anyhow::Result<PathBuf> {
    if is_remote(source) {
        anyhow::bail!("no local signature file for remote source: {}", source);
    }
    Ok(resolve_module_file(source).with_extension("sig"))
}

/// Companion signature URL for a remote source; swaps only the trailing
/// `.json` for `.sig`.
fn remote_signature_url(source: &str) -> Option<String> {
    normalize_source(source)
        .strip_suffix(".json")
        .map(|base| format!("{}.sig", base))
}

fn cache_path(source: &str) -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    let id = hex::encode(hasher.finalize());
    Ok(PathBuf::from(home)
        .join(".cache")
        .join("layidrop")
        .join("modules")
        .join(format!("{}.json", id)))
}

fn fetch_text(url: &str, timeout_ms: u64) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    let resp = client.get(url).send()?.error_for_status()?;
    Ok(resp.text()?)
}

fn load_source_text(source: &str) -> anyhow::Result<String> {
    if is_remote(source) {
        let cache = cache_path(source)?;
        match fetch_text(&normalize_source(source), 2500) {
            Ok(body) => {
                if let Some(parent) = cache.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&cache, &body)?;
                return Ok(body);
            }
            Err(_) if cache.exists() => {
                return Ok(std::fs::read_to_string(cache)?);
            }
            Err(e) => return Err(e),
        }
    }

    let file = resolve_module_file(source);
    Ok(std::fs::read_to_string(file)?)
}

/// Raw module bytes, exactly as signed.
pub fn load_module_raw(source: &str) -> anyhow::Result<String> {
    load_source_text(source)
}

/// Signature lines for a source. A missing signature file reads as empty, so
/// verification reports unsigned rather than erroring.
pub fn load_module_signature(source: &str) -> anyhow::Result<String> {
    if is_remote(source) {
        let Some(url) = remote_signature_url(source) else {
            return Ok(String::new());
        };
        return Ok(fetch_text(&url, 2500).unwrap_or_default());
    }
    let path = module_signature_file(source)?;
    if !path.exists() {
        return Ok(String::new());
    }
    Ok(std::fs::read_to_string(path)?)
}

pub fn load_module(source: &str) -> anyhow::Result<DeployModule> {
    let raw = load_source_text(source)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn validate_module(module: &DeployModule) -> anyhow::Result<()> {
    if module.module.trim().is_empty() {
        return Err(ModuleError::Invalid("module name is empty".into()).into());
    }
    if module.contract.trim().is_empty() {
        return Err(ModuleError::Invalid("contract name is empty".into()).into());
    }
    if let Some(raw) = &module.parameters.token_address {
        Address::parse(raw)
            .map_err(|e| ModuleError::Invalid(format!("tokenAddress: {}", e)))?;
    }
    if module.parameters.ending_time_in_sec == Some(0) {
        return Err(ModuleError::Invalid("endingTimeInSec must be positive".into()).into());
    }
    Ok(())
}

/// Resolve a module-relative manifest path against the module file's parent.
pub fn resolve_manifest_path(source: &str, rel: &str) -> anyhow::Result<PathBuf> {
    if is_remote(source) {
        return Err(
            ModuleError::Invalid("manifest paths require a local module source".into()).into(),
        );
    }
    let file = resolve_module_file(source);
    let base = file.parent().unwrap_or_else(|| Path::new("."));
    Ok(base.join(rel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_and_urls_are_remote_paths_are_not() {
        assert!(is_remote("layinton/airdrop-module"));
        assert!(is_remote("https://example.com/airdrop.module.json"));
        assert!(!is_remote("./deploy/airdrop.module.json"));
        assert!(!is_remote("/tmp/module-dir"));
    }

    #[test]
    fn shorthand_normalizes_to_raw_module_url() {
        assert_eq!(
            normalize_source("layinton/airdrop-module"),
            "https://raw.githubusercontent.com/layinton/airdrop-module/main/deploy/airdrop.module.json"
        );
    }

    #[test]
    fn signature_url_swaps_only_the_trailing_extension() {
        assert_eq!(
            remote_signature_url("layinton/airdrop-module").as_deref(),
            Some("https://raw.githubusercontent.com/layinton/airdrop-module/main/deploy/airdrop.module.sig")
        );
        assert_eq!(
            remote_signature_url("https://example.com/foo.json/deploy/airdrop.module.json")
                .as_deref(),
            Some("https://example.com/foo.json/deploy/airdrop.module.sig")
        );
        assert_eq!(remote_signature_url("https://example.com/module"), None);
    }

    #[test]
    fn directory_sources_resolve_to_the_module_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("mod");
        std::fs::create_dir_all(dir.join("deploy")).unwrap();
        let resolved = resolve_module_file(dir.to_str().unwrap());
        assert!(resolved.ends_with("deploy/airdrop.module.json"));

        let sig = module_signature_file(dir.to_str().unwrap()).unwrap();
        assert!(sig.ends_with("deploy/airdrop.module.sig"));
    }

    #[test]
    fn validation_rejects_bad_token_address_and_zero_window() {
        let mut module = DeployModule {
            module: "LayiAirDropModule".into(),
            contract: "LayiAirDrop".into(),
            parameters: ModuleParameters::default(),
        };
        validate_module(&module).unwrap();

        module.parameters.token_address = Some("nope".into());
        assert!(validate_module(&module).is_err());

        module.parameters.token_address = None;
        module.parameters.ending_time_in_sec = Some(0);
        assert!(validate_module(&module).is_err());
    }

    #[test]
    fn module_json_parses_camel_case_parameters() {
        let raw = r#"{
            "module": "LayiAirDropModule",
            "contract": "LayiAirDrop",
            "parameters": {
                "endingTimeInSec": 2592000,
                "tokenAddress": "0x809c4E72ac8e66226Fe23c5c4a2810B3821E28b2",
                "requiredNft": "layi-og-pass",
                "manifest": "./addresses.csv"
            }
        }"#;
        let module: DeployModule = serde_json::from_str(raw).unwrap();
        assert_eq!(module.parameters.ending_time_in_sec, Some(2_592_000));
        assert_eq!(module.parameters.required_nft.as_deref(), Some("layi-og-pass"));
    }
}
