use crate::domain::primitives::{Address, Amount, Bytes32};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Full simulated-chain state persisted under `~/.config/layidrop/chain.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChainState {
    pub timestamp: u64,
    pub signers: Vec<Address>,
    #[serde(default)]
    pub nonces: BTreeMap<Address, u64>,
    #[serde(default)]
    pub tokens: BTreeMap<Address, TokenState>,
    #[serde(default)]
    pub airdrops: BTreeMap<Address, AirdropState>,
    #[serde(default)]
    pub nft_holders: BTreeMap<String, BTreeSet<Address>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenState {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Amount,
    pub deployer: Address,
    #[serde(default)]
    pub balances: BTreeMap<Address, Amount>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AirdropState {
    pub module: String,
    pub contract: String,
    pub owner: Address,
    pub token: Address,
    pub merkle_root: Bytes32,
    pub ends_at: u64,
    pub required_nft: String,
    pub deployed_at: u64,
    #[serde(default)]
    pub claimed: BTreeSet<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PolicyFile {
    #[serde(default)]
    pub general: PolicyGeneral,
}

#[derive(Debug, Deserialize, Default)]
pub struct PolicyGeneral {
    #[serde(default)]
    pub require_signed_module: bool,
    #[serde(default)]
    pub allowed_module_sources: Vec<String>,
}

#[derive(Serialize)]
pub struct AccountInfo {
    pub index: usize,
    pub address: Address,
}

#[derive(Serialize)]
pub struct TokenDeployReport {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Amount,
    pub deployer: Address,
}

#[derive(Debug, Serialize)]
pub struct TransferReport {
    pub token: Address,
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
    pub from_balance: Amount,
    pub to_balance: Amount,
}

#[derive(Serialize)]
pub struct BalanceReport {
    pub token: Address,
    pub address: Address,
    pub balance: Amount,
}

#[derive(Debug, Serialize)]
pub struct SupplyReport {
    pub token: Address,
    pub total_supply: Amount,
}

#[derive(Debug, Serialize)]
pub struct DeployReport {
    pub module: String,
    pub contract: String,
    pub address: Address,
    pub owner: Address,
    pub token: Address,
    pub merkle_root: Bytes32,
    pub ends_at: u64,
    pub required_nft: String,
}

#[derive(Debug, Serialize)]
pub struct ClaimReceipt {
    pub airdrop: Address,
    pub claimer: Address,
    pub index: u64,
    pub amount: Amount,
    pub leaf: Bytes32,
    pub claimer_balance: Amount,
}

#[derive(Debug, Serialize)]
pub struct WithdrawReport {
    pub airdrop: Address,
    pub to: Address,
    pub amount: Amount,
}

#[derive(Debug, Serialize)]
pub struct UpdateRootReport {
    pub airdrop: Address,
    pub merkle_root: Bytes32,
}

#[derive(Serialize)]
pub struct AirdropInfo {
    pub address: Address,
    pub module: String,
    pub contract: String,
    pub owner: Address,
    pub token: Address,
    pub merkle_root: Bytes32,
    pub ends_at: u64,
    pub required_nft: String,
    pub claimed_count: usize,
    pub claimed_indices: Vec<u64>,
    pub vault_balance: Amount,
}

#[derive(Serialize)]
pub struct TimeReport {
    pub timestamp: u64,
}

#[derive(Serialize)]
pub struct TreeBuildReport {
    pub leaves: usize,
    pub root: Bytes32,
    pub out_dir: String,
}

#[derive(Serialize)]
pub struct VerifyReport {
    pub root: Bytes32,
    pub leaf: Bytes32,
    pub valid: bool,
}

#[derive(Serialize)]
pub struct SignReport {
    pub source: String,
    pub pubkey: String,
    pub signed: bool,
}

#[derive(Serialize)]
pub struct TrustStatus {
    pub require_signed_module: bool,
    pub trusted_key_count: usize,
    pub module_source: String,
    pub module_signature_ok: bool,
}

#[derive(Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct CheckReport {
    pub overall: String,
    pub trust: TrustStatus,
    pub checks: Vec<CheckItem>,
    pub recommendations: Vec<String>,
}
