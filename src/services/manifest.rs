use crate::domain::primitives::{Address, Amount, Bytes32};
use crate::services::merkle;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One allocation row. The index is the 0-based position in the manifest.
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    pub address: Address,
    pub index: u64,
    pub amount: Amount,
}

/// Everything a claimer needs to call `claim`: written by `tree proof`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProofBundle {
    pub address: Address,
    pub index: u64,
    pub amount: Amount,
    pub leaf: Bytes32,
    pub root: Bytes32,
    pub proof: Vec<Bytes32>,
}

#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("manifest has no entries: {0}")]
    Empty(String),
    #[error("duplicate address in manifest: {0}")]
    DuplicateAddress(String),
    #[error("address not present in manifest: {0}")]
    AddressNotFound(String),
    #[error("malformed manifest line {0}: {1}")]
    BadLine(usize, String),
}

impl ManifestError {
    pub fn code(&self) -> &'static str {
        "ManifestInvalid"
    }
}

/// Parse an `address,amount` CSV. Blank lines and `#` comments are skipped,
/// as is an optional `address,amount` header row.
pub fn load_manifest(path: &Path) -> anyhow::Result<Vec<ManifestEntry>> {
    let raw = std::fs::read_to_string(path)?;
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for (line_no, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if entries.is_empty() && trimmed.to_ascii_lowercase().starts_with("address,") {
            continue;
        }
        let mut fields = trimmed.split(',').map(str::trim);
        let (addr_raw, amount_raw) = match (fields.next(), fields.next(), fields.next()) {
            (Some(a), Some(b), None) => (a, b),
            _ => {
                return Err(
                    ManifestError::BadLine(line_no + 1, "expected address,amount".into()).into(),
                )
            }
        };
        let address = Address::parse(addr_raw)
            .map_err(|e| ManifestError::BadLine(line_no + 1, e.to_string()))?;
        let amount: Amount = amount_raw
            .parse()
            .map_err(|e: anyhow::Error| ManifestError::BadLine(line_no + 1, e.to_string()))?;
        if !seen.insert(address) {
            return Err(ManifestError::DuplicateAddress(address.to_string()).into());
        }
        entries.push(ManifestEntry {
            address,
            index: entries.len() as u64,
            amount,
        });
    }

    if entries.is_empty() {
        return Err(ManifestError::Empty(path.display().to_string()).into());
    }
    Ok(entries)
}

pub fn manifest_leaves(entries: &[ManifestEntry]) -> Vec<Bytes32> {
    entries
        .iter()
        .map(|e| merkle::leaf_hash(e.address, e.index, e.amount))
        .collect()
}

pub fn manifest_root(entries: &[ManifestEntry]) -> anyhow::Result<Bytes32> {
    let levels = merkle::build_levels(&manifest_leaves(entries));
    merkle::root_of(&levels)
}

/// Write `root.txt`, `index.txt`, and `tree.txt` for a manifest.
pub fn write_tree_artifacts(
    entries: &[ManifestEntry],
    out_dir: &Path,
) -> anyhow::Result<TreeArtifacts> {
    let levels = merkle::build_levels(&manifest_leaves(entries));
    let root = merkle::root_of(&levels)?;
    std::fs::create_dir_all(out_dir)?;

    write_text_atomic(&out_dir.join("root.txt"), &format!("{}\n", root))?;

    let mut index = String::new();
    for e in entries {
        index.push_str(&format!("{},{},{}\n", e.address, e.index, e.amount));
    }
    write_text_atomic(&out_dir.join("index.txt"), &index)?;

    let mut tree = String::new();
    for (level_no, level) in levels.iter().enumerate() {
        for (pos, node) in level.iter().enumerate() {
            tree.push_str(&format!("{},{},{}\n", level_no, pos, node));
        }
    }
    write_text_atomic(&out_dir.join("tree.txt"), &tree)?;

    Ok(TreeArtifacts {
        leaves: entries.len(),
        root,
    })
}

pub struct TreeArtifacts {
    pub leaves: usize,
    pub root: Bytes32,
}

/// Build the claim bundle for one address in the manifest.
pub fn build_proof_bundle(entries: &[ManifestEntry], address: Address) -> anyhow::Result<ProofBundle> {
    let entry = entries
        .iter()
        .find(|e| e.address == address)
        .ok_or_else(|| ManifestError::AddressNotFound(address.to_string()))?;
    let levels = merkle::build_levels(&manifest_leaves(entries));
    let root = merkle::root_of(&levels)?;
    let proof = merkle::proof_for(&levels, entry.index as usize)?;
    Ok(ProofBundle {
        address: entry.address,
        index: entry.index,
        amount: entry.amount,
        leaf: merkle::leaf_hash(entry.address, entry.index, entry.amount),
        root,
        proof,
    })
}

pub fn read_proof_bundle(path: &Path) -> anyhow::Result<ProofBundle> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn write_proof_bundle(path: &Path, bundle: &ProofBundle) -> anyhow::Result<()> {
    write_text_atomic(path, &serde_json::to_string_pretty(bundle)?)
}

/// Write via a temp file and rename so readers never see partial artifacts.
fn write_text_atomic(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
