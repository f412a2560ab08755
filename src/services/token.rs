use crate::domain::constants::{INITIAL_SUPPLY_TOKENS, TOKEN_DECIMALS, TOKEN_NAME, TOKEN_SYMBOL};
use crate::domain::models::{BalanceReport, ChainState, SupplyReport, TokenDeployReport, TokenState, TransferReport};
use crate::domain::primitives::{Address, Amount};
use crate::services::chain::{next_contract_address, ChainError};
use std::collections::BTreeMap;

#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    #[error("transfer amount exceeds balance of {0}")]
    InsufficientBalance(String),
}

impl TokenError {
    // Mirrors the token contract's custom error identifier.
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::InsufficientBalance(_) => "ERC20InsufficientBalance",
        }
    }
}

pub fn initial_supply() -> Amount {
    Amount::from_raw(INITIAL_SUPPLY_TOKENS * 10u128.pow(TOKEN_DECIMALS as u32))
}

/// Deploy the token ledger and mint the full supply to the deployer.
pub fn deploy_token(state: &mut ChainState, deployer: Address) -> TokenDeployReport {
    let address = next_contract_address(state, deployer);
    let supply = initial_supply();
    let mut balances = BTreeMap::new();
    balances.insert(deployer, supply);
    state.tokens.insert(
        address,
        TokenState {
            name: TOKEN_NAME.to_string(),
            symbol: TOKEN_SYMBOL.to_string(),
            decimals: TOKEN_DECIMALS,
            total_supply: supply,
            deployer,
            balances,
        },
    );
    TokenDeployReport {
        address,
        name: TOKEN_NAME.to_string(),
        symbol: TOKEN_SYMBOL.to_string(),
        decimals: TOKEN_DECIMALS,
        total_supply: supply,
        deployer,
    }
}

fn require_token<'a>(state: &'a ChainState, token: Address) -> anyhow::Result<&'a TokenState> {
    state
        .tokens
        .get(&token)
        .ok_or_else(|| ChainError::ContractNotFound(token.to_string()).into())
}

pub fn transfer_token(
    state: &mut ChainState,
    token: Address,
    from: Address,
    to: Address,
    amount: Amount,
) -> anyhow::Result<TransferReport> {
    let ledger = state
        .tokens
        .get_mut(&token)
        .ok_or_else(|| ChainError::ContractNotFound(token.to_string()))?;

    let from_balance = ledger.balances.get(&from).copied().unwrap_or(Amount::ZERO);
    let debited = from_balance
        .checked_sub(amount)
        .ok_or_else(|| TokenError::InsufficientBalance(from.to_string()))?;

    ledger.balances.insert(from, debited);
    let to_balance = ledger.balances.get(&to).copied().unwrap_or(Amount::ZERO);
    let credited = to_balance
        .checked_add(amount)
        .ok_or_else(|| anyhow::anyhow!("balance overflow for {}", to))?;
    ledger.balances.insert(to, credited);

    Ok(TransferReport {
        token,
        from,
        to,
        amount,
        from_balance: ledger.balances.get(&from).copied().unwrap_or(Amount::ZERO),
        to_balance: ledger.balances.get(&to).copied().unwrap_or(Amount::ZERO),
    })
}

pub fn token_balance(
    state: &ChainState,
    token: Address,
    address: Address,
) -> anyhow::Result<BalanceReport> {
    let ledger = require_token(state, token)?;
    Ok(BalanceReport {
        token,
        address,
        balance: ledger.balances.get(&address).copied().unwrap_or(Amount::ZERO),
    })
}

pub fn token_supply(state: &ChainState, token: Address) -> anyhow::Result<SupplyReport> {
    let ledger = require_token(state, token)?;
    Ok(SupplyReport {
        token,
        total_supply: ledger.total_supply,
    })
}

pub fn balance_of(state: &ChainState, token: Address, address: Address) -> Amount {
    state
        .tokens
        .get(&token)
        .and_then(|t| t.balances.get(&address))
        .copied()
        .unwrap_or(Amount::ZERO)
}
