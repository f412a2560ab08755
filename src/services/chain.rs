use crate::domain::constants::{GENESIS_SIGNERS, GENESIS_TIMESTAMP};
use crate::domain::models::ChainState;
use crate::domain::primitives::Address;
use crate::services::merkle::keccak256;
use crate::services::storage::{load_chain, save_chain};
use std::collections::BTreeMap;

#[derive(thiserror::Error, Debug)]
pub enum ChainError {
    #[error("no contract deployed at {0}")]
    ContractNotFound(String),
}

impl ChainError {
    pub fn code(&self) -> &'static str {
        match self {
            ChainError::ContractNotFound(_) => "ContractNotFound",
        }
    }
}

pub fn genesis_state() -> anyhow::Result<ChainState> {
    let signers = GENESIS_SIGNERS
        .iter()
        .map(|s| Address::parse(s))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(ChainState {
        timestamp: GENESIS_TIMESTAMP,
        signers,
        nonces: BTreeMap::new(),
        tokens: BTreeMap::new(),
        airdrops: BTreeMap::new(),
        nft_holders: BTreeMap::new(),
    })
}

/// Load the persisted chain, initializing and saving genesis on first use.
pub fn load_or_init() -> anyhow::Result<ChainState> {
    if let Some(state) = load_chain()? {
        return Ok(state);
    }
    let state = genesis_state()?;
    save_chain(&state)?;
    Ok(state)
}

/// Deterministic contract address: keccak over a domain tag, the deployer,
/// and the deployer's nonce, taking the trailing 20 bytes.
pub fn contract_address(deployer: Address, nonce: u64) -> Address {
    let mut preimage = Vec::with_capacity(14 + 20 + 8);
    preimage.extend_from_slice(b"layi.contract:");
    preimage.extend_from_slice(deployer.as_bytes());
    preimage.extend_from_slice(&nonce.to_be_bytes());
    let digest = keccak256(&preimage);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&digest.0[12..32]);
    Address::from_bytes(addr)
}

/// Derive the next contract address for a deployer and bump its nonce.
pub fn next_contract_address(state: &mut ChainState, deployer: Address) -> Address {
    let nonce = state.nonces.entry(deployer).or_insert(0);
    let addr = contract_address(deployer, *nonce);
    *nonce += 1;
    addr
}

pub fn advance_time(state: &mut ChainState, seconds: u64) -> u64 {
    state.timestamp = state.timestamp.saturating_add(seconds);
    state.timestamp
}

/// Default sender when `--from` is omitted: genesis signer 0.
pub fn default_sender(state: &ChainState) -> anyhow::Result<Address> {
    state
        .signers
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("chain state has no genesis signers"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_seeds_ten_signers_at_fixed_timestamp() {
        let state = genesis_state().unwrap();
        assert_eq!(state.signers.len(), 10);
        assert_eq!(state.timestamp, GENESIS_TIMESTAMP);
        assert_eq!(
            state.signers[0].to_string(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn contract_addresses_are_deterministic_and_nonce_dependent() {
        let mut state = genesis_state().unwrap();
        let deployer = state.signers[0];
        let a = next_contract_address(&mut state, deployer);
        let b = next_contract_address(&mut state, deployer);
        assert_ne!(a, b);
        assert_eq!(a, contract_address(deployer, 0));
        assert_eq!(b, contract_address(deployer, 1));
    }

    #[test]
    fn time_advances_saturating() {
        let mut state = genesis_state().unwrap();
        let t = advance_time(&mut state, 3600);
        assert_eq!(t, GENESIS_TIMESTAMP + 3600);
        advance_time(&mut state, u64::MAX);
        assert_eq!(state.timestamp, u64::MAX);
    }
}
