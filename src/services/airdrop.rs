use crate::domain::models::{
    AirdropInfo, AirdropState, ChainState, ClaimReceipt, DeployReport, UpdateRootReport,
    WithdrawReport,
};
use crate::domain::primitives::{Address, Amount, Bytes32};
use crate::services::chain::{next_contract_address, ChainError};
use crate::services::merkle::{leaf_hash, verify_proof};
use crate::services::token::{balance_of, transfer_token};

/// Revert identifiers mirror the LayiAirDrop contract's custom errors, so
/// harness assertions read like on-chain revert assertions.
#[derive(thiserror::Error, Debug)]
pub enum AirdropError {
    #[error("claim window closed at {0}")]
    ClaimWindowClosed(u64),
    #[error("claimer does not hold the required nft collection: {0}")]
    MissingRequiredNft(String),
    #[error("leaf does not commit to claimer, index, and amount")]
    LeafMismatch,
    #[error("merkle proof does not resolve to the stored root")]
    ProofRejected,
    #[error("index {0} has already been claimed")]
    AlreadyClaimed(u64),
    #[error("caller is not the contract owner")]
    NotOwner,
    #[error("airdrop is still active until {0}")]
    StillActive(u64),
}

impl AirdropError {
    pub fn code(&self) -> &'static str {
        match self {
            AirdropError::ClaimWindowClosed(_) => "ClaimingTimeAlreadyPassed",
            AirdropError::MissingRequiredNft(_) => "YouDonNotOwnRequiredNft",
            AirdropError::LeafMismatch => "InvalidClaimLeaf",
            AirdropError::ProofRejected => "InvalidMerkleProof",
            AirdropError::AlreadyClaimed(_) => "AirDropAlreadyClaimed",
            AirdropError::NotOwner => "NotOwner",
            AirdropError::StillActive(_) => "AirdropIsStillActive",
        }
    }
}

pub struct AirdropParams {
    pub module: String,
    pub contract: String,
    pub token: Address,
    pub merkle_root: Bytes32,
    pub ending_time_in_sec: u64,
    pub required_nft: String,
}

pub struct ClaimInput {
    pub proof: Vec<Bytes32>,
    pub leaf: Bytes32,
    pub index: u64,
    pub amount: Amount,
}

pub fn deploy_air_drop(
    state: &mut ChainState,
    params: AirdropParams,
    deployer: Address,
) -> anyhow::Result<DeployReport> {
    if !state.tokens.contains_key(&params.token) {
        return Err(ChainError::ContractNotFound(params.token.to_string()).into());
    }
    let address = next_contract_address(state, deployer);
    let ends_at = state.timestamp.saturating_add(params.ending_time_in_sec);
    state.airdrops.insert(
        address,
        AirdropState {
            module: params.module.clone(),
            contract: params.contract.clone(),
            owner: deployer,
            token: params.token,
            merkle_root: params.merkle_root,
            ends_at,
            required_nft: params.required_nft.clone(),
            deployed_at: state.timestamp,
            claimed: Default::default(),
        },
    );
    Ok(DeployReport {
        module: params.module,
        contract: params.contract,
        address,
        owner: deployer,
        token: params.token,
        merkle_root: params.merkle_root,
        ends_at,
        required_nft: params.required_nft,
    })
}

fn require_airdrop<'a>(state: &'a ChainState, airdrop: Address) -> anyhow::Result<&'a AirdropState> {
    state
        .airdrops
        .get(&airdrop)
        .ok_or_else(|| ChainError::ContractNotFound(airdrop.to_string()).into())
}

fn holds_nft(state: &ChainState, collection: &str, address: Address) -> bool {
    state
        .nft_holders
        .get(collection)
        .map(|holders| holders.contains(&address))
        .unwrap_or(false)
}

/// Claim path. Checks run in the contract's observable order: window, NFT
/// gate, leaf binding, proof, replay, funds.
pub fn claim_air_drop(
    state: &mut ChainState,
    airdrop: Address,
    claimer: Address,
    input: &ClaimInput,
) -> anyhow::Result<ClaimReceipt> {
    let drop = require_airdrop(state, airdrop)?;
    let token = drop.token;
    let root = drop.merkle_root;
    let ends_at = drop.ends_at;
    let required_nft = drop.required_nft.clone();
    let already_claimed = drop.claimed.contains(&input.index);

    if state.timestamp > ends_at {
        return Err(AirdropError::ClaimWindowClosed(ends_at).into());
    }
    if !holds_nft(state, &required_nft, claimer) {
        return Err(AirdropError::MissingRequiredNft(required_nft).into());
    }
    let expected_leaf = leaf_hash(claimer, input.index, input.amount);
    if input.leaf != expected_leaf {
        return Err(AirdropError::LeafMismatch.into());
    }
    if !verify_proof(root, input.leaf, &input.proof) {
        return Err(AirdropError::ProofRejected.into());
    }
    if already_claimed {
        return Err(AirdropError::AlreadyClaimed(input.index).into());
    }

    transfer_token(state, token, airdrop, claimer, input.amount)?;
    if let Some(drop) = state.airdrops.get_mut(&airdrop) {
        drop.claimed.insert(input.index);
    }

    Ok(ClaimReceipt {
        airdrop,
        claimer,
        index: input.index,
        amount: input.amount,
        leaf: input.leaf,
        claimer_balance: balance_of(state, token, claimer),
    })
}

/// Sweep whatever remains in the vault back to the owner once the claim
/// window has closed. A zero sweep is valid.
pub fn withdraw_remaining(
    state: &mut ChainState,
    airdrop: Address,
    caller: Address,
) -> anyhow::Result<WithdrawReport> {
    let drop = require_airdrop(state, airdrop)?;
    let token = drop.token;
    let owner = drop.owner;
    let ends_at = drop.ends_at;

    if caller != owner {
        return Err(AirdropError::NotOwner.into());
    }
    if state.timestamp <= ends_at {
        return Err(AirdropError::StillActive(ends_at).into());
    }

    let remaining = balance_of(state, token, airdrop);
    if !remaining.is_zero() {
        transfer_token(state, token, airdrop, owner, remaining)?;
    }
    Ok(WithdrawReport {
        airdrop,
        to: owner,
        amount: remaining,
    })
}

pub fn update_merkle_root(
    state: &mut ChainState,
    airdrop: Address,
    caller: Address,
    root: Bytes32,
) -> anyhow::Result<UpdateRootReport> {
    let drop = require_airdrop(state, airdrop)?;
    if caller != drop.owner {
        return Err(AirdropError::NotOwner.into());
    }
    if let Some(drop) = state.airdrops.get_mut(&airdrop) {
        drop.merkle_root = root;
    }
    Ok(UpdateRootReport {
        airdrop,
        merkle_root: root,
    })
}

pub fn inspect_airdrop(state: &ChainState, airdrop: Address) -> anyhow::Result<AirdropInfo> {
    let drop = require_airdrop(state, airdrop)?;
    Ok(AirdropInfo {
        address: airdrop,
        module: drop.module.clone(),
        contract: drop.contract.clone(),
        owner: drop.owner,
        token: drop.token,
        merkle_root: drop.merkle_root,
        ends_at: drop.ends_at,
        required_nft: drop.required_nft.clone(),
        claimed_count: drop.claimed.len(),
        claimed_indices: drop.claimed.iter().copied().collect(),
        vault_balance: balance_of(state, drop.token, airdrop),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::chain::genesis_state;
    use crate::services::merkle::{build_levels, proof_for, root_of};
    use crate::services::token::deploy_token;

    struct Fixture {
        state: ChainState,
        airdrop: Address,
        claimer: Address,
        input: ClaimInput,
        ends_at: u64,
    }

    fn fixture() -> Fixture {
        let mut state = genesis_state().unwrap();
        let owner = state.signers[0];
        let claimer = state.signers[5];
        let token = deploy_token(&mut state, owner).address;

        let entries: Vec<(Address, u64, Amount)> = vec![
            (state.signers[3], 0, Amount::from_raw(10)),
            (state.signers[4], 1, Amount::from_raw(20)),
            (claimer, 2, Amount::from_raw(40)),
        ];
        let leaves: Vec<Bytes32> = entries
            .iter()
            .map(|(a, i, v)| leaf_hash(*a, *i, *v))
            .collect();
        let levels = build_levels(&leaves);
        let root = root_of(&levels).unwrap();

        let report = deploy_air_drop(
            &mut state,
            AirdropParams {
                module: "LayiAirDropModule".into(),
                contract: "LayiAirDrop".into(),
                token,
                merkle_root: root,
                ending_time_in_sec: 1000,
                required_nft: "layi-og-pass".into(),
            },
            owner,
        )
        .unwrap();
        let ends_at = report.ends_at;
        let airdrop = report.address;

        transfer_token(&mut state, token, owner, airdrop, Amount::from_raw(1000)).unwrap();
        state
            .nft_holders
            .entry("layi-og-pass".into())
            .or_default()
            .insert(claimer);

        let input = ClaimInput {
            proof: proof_for(&levels, 2).unwrap(),
            leaf: leaves[2],
            index: 2,
            amount: Amount::from_raw(40),
        };
        Fixture {
            state,
            airdrop,
            claimer,
            input,
            ends_at,
        }
    }

    fn code_of(err: &anyhow::Error) -> &'static str {
        err.downcast_ref::<AirdropError>().unwrap().code()
    }

    #[test]
    fn deploy_requires_an_existing_token() {
        let mut state = genesis_state().unwrap();
        let owner = state.signers[0];
        let missing_token = state.signers[7];
        let err = deploy_air_drop(
            &mut state,
            AirdropParams {
                module: "LayiAirDropModule".into(),
                contract: "LayiAirDrop".into(),
                token: missing_token,
                merkle_root: leaf_hash(owner, 0, Amount::from_raw(1)),
                ending_time_in_sec: 1000,
                required_nft: "layi-og-pass".into(),
            },
            owner,
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ChainError>().unwrap().code(),
            "ContractNotFound"
        );
        assert!(state.airdrops.is_empty());
    }

    #[test]
    fn valid_claim_transfers_exact_amount_and_records_index() {
        let mut fx = fixture();
        let receipt =
            claim_air_drop(&mut fx.state, fx.airdrop, fx.claimer, &fx.input).unwrap();
        assert_eq!(receipt.claimer_balance, Amount::from_raw(40));
        assert!(fx.state.airdrops[&fx.airdrop].claimed.contains(&2));
    }

    #[test]
    fn replayed_index_is_rejected() {
        let mut fx = fixture();
        claim_air_drop(&mut fx.state, fx.airdrop, fx.claimer, &fx.input).unwrap();
        let err = claim_air_drop(&mut fx.state, fx.airdrop, fx.claimer, &fx.input).unwrap_err();
        assert_eq!(code_of(&err), "AirDropAlreadyClaimed");
    }

    #[test]
    fn claim_without_nft_is_rejected_before_proof_checks() {
        let mut fx = fixture();
        fx.state.nft_holders.clear();
        let err = claim_air_drop(&mut fx.state, fx.airdrop, fx.claimer, &fx.input).unwrap_err();
        assert_eq!(code_of(&err), "YouDonNotOwnRequiredNft");
    }

    #[test]
    fn claim_after_window_is_rejected() {
        let mut fx = fixture();
        fx.state.timestamp = fx.ends_at + 1;
        let err = claim_air_drop(&mut fx.state, fx.airdrop, fx.claimer, &fx.input).unwrap_err();
        assert_eq!(code_of(&err), "ClaimingTimeAlreadyPassed");
    }

    #[test]
    fn borrowed_bundle_fails_leaf_binding() {
        let mut fx = fixture();
        let intruder = fx.state.signers[6];
        fx.state
            .nft_holders
            .entry("layi-og-pass".into())
            .or_default()
            .insert(intruder);
        let err = claim_air_drop(&mut fx.state, fx.airdrop, intruder, &fx.input).unwrap_err();
        assert_eq!(code_of(&err), "InvalidClaimLeaf");
    }

    #[test]
    fn mismatched_proof_is_rejected() {
        let mut fx = fixture();
        fx.input.proof[0] = leaf_hash(fx.claimer, 9, Amount::from_raw(1));
        let err = claim_air_drop(&mut fx.state, fx.airdrop, fx.claimer, &fx.input).unwrap_err();
        assert_eq!(code_of(&err), "InvalidMerkleProof");
    }

    #[test]
    fn withdraw_requires_owner_and_closed_window() {
        let mut fx = fixture();
        let owner = fx.state.signers[0];

        let err = withdraw_remaining(&mut fx.state, fx.airdrop, fx.claimer).unwrap_err();
        assert_eq!(code_of(&err), "NotOwner");

        let err = withdraw_remaining(&mut fx.state, fx.airdrop, owner).unwrap_err();
        assert_eq!(code_of(&err), "AirdropIsStillActive");

        fx.state.timestamp = fx.ends_at + 1;
        let report = withdraw_remaining(&mut fx.state, fx.airdrop, owner).unwrap();
        assert_eq!(report.amount, Amount::from_raw(1000));
        let info = inspect_airdrop(&fx.state, fx.airdrop).unwrap();
        assert!(info.vault_balance.is_zero());
    }

    #[test]
    fn root_rotation_is_owner_only() {
        let mut fx = fixture();
        let owner = fx.state.signers[0];
        let new_root = leaf_hash(owner, 0, Amount::from_raw(1));

        let err =
            update_merkle_root(&mut fx.state, fx.airdrop, fx.claimer, new_root).unwrap_err();
        assert_eq!(code_of(&err), "NotOwner");

        update_merkle_root(&mut fx.state, fx.airdrop, owner, new_root).unwrap();
        let info = inspect_airdrop(&fx.state, fx.airdrop).unwrap();
        assert_eq!(info.merkle_root, new_root);
    }
}
