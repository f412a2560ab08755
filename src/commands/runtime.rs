use crate::*;
use std::path::Path;

fn sender(state: &ChainState, flag: &Option<String>) -> anyhow::Result<Address> {
    match flag {
        Some(raw) => Address::parse(raw),
        None => default_sender(state),
    }
}

pub fn handle_runtime_commands(
    cli: &Cli,
    state: &mut ChainState,
    policy: &PolicyFile,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Accounts => {
            let accounts: Vec<AccountInfo> = state
                .signers
                .iter()
                .enumerate()
                .map(|(index, address)| AccountInfo {
                    index,
                    address: *address,
                })
                .collect();
            print_out(cli.json, &accounts, |a| {
                format!("{}\t{}", a.index, a.address)
            })?;
        }
        Commands::Token { command } => match command {
            TokenCommands::Deploy { from } => {
                let deployer = sender(state, from)?;
                let report = deploy_token(state, deployer);
                audit(
                    "token_deploy",
                    serde_json::json!({"token": report.address, "deployer": report.deployer}),
                );
                save_chain(state)?;
                print_one(cli.json, report, |r| {
                    format!("{} ({}) deployed at {}", r.name, r.symbol, r.address)
                })?;
            }
            TokenCommands::Transfer {
                token,
                from,
                to,
                amount,
            } => {
                let token = Address::parse(token)?;
                let from = sender(state, from)?;
                let to = Address::parse(to)?;
                let amount = parse_units(amount, TOKEN_DECIMALS)?;
                let report = transfer_token(state, token, from, to, amount)?;
                audit(
                    "token_transfer",
                    serde_json::json!({"token": token, "from": from, "to": to, "amount": amount}),
                );
                save_chain(state)?;
                print_one(cli.json, report, |r| {
                    format!("transferred {} base units to {}", r.amount, r.to)
                })?;
            }
            TokenCommands::Balance { token, address } => {
                let report = token_balance(state, Address::parse(token)?, Address::parse(address)?)?;
                print_one(cli.json, report, |r| format!("{}", r.balance))?;
            }
            TokenCommands::Supply { token } => {
                let report = token_supply(state, Address::parse(token)?)?;
                print_one(cli.json, report, |r| format!("{}", r.total_supply))?;
            }
        },
        Commands::Deploy {
            token,
            ending_time,
            root,
            manifest,
            required_nft,
            from,
        } => {
            if root.is_some() && manifest.is_some() {
                anyhow::bail!("pass --root or --manifest, not both");
            }
            let module = checked_load_module(policy, &cli.module)?;
            crate::module::validate_module(&module)?;
            let params = &module.parameters;

            let token = match token.as_deref().or(params.token_address.as_deref()) {
                Some(raw) => Address::parse(raw)?,
                None => Address::parse(DEFAULT_TOKEN_ADDRESS)?,
            };
            let ending_time_in_sec = ending_time
                .or(params.ending_time_in_sec)
                .unwrap_or(DEFAULT_ENDING_TIME_IN_SEC);
            let required_nft = required_nft
                .clone()
                .or_else(|| params.required_nft.clone())
                .unwrap_or_else(|| DEFAULT_REQUIRED_NFT.to_string());

            let merkle_root = if let Some(raw) = root {
                Bytes32::parse(raw)?
            } else if let Some(path) = manifest {
                manifest_root(&load_manifest(Path::new(path))?)?
            } else if let Some(rel) = &params.manifest {
                let path = crate::module::resolve_manifest_path(&cli.module, rel)?;
                manifest_root(&load_manifest(&path)?)?
            } else {
                return Err(crate::module::ModuleError::MissingParameter(
                    "manifest (or pass --root / --manifest)".into(),
                )
                .into());
            };

            let deployer = sender(state, from)?;
            let report = deploy_air_drop(
                state,
                AirdropParams {
                    module: module.module.clone(),
                    contract: module.contract.clone(),
                    token,
                    merkle_root,
                    ending_time_in_sec,
                    required_nft,
                },
                deployer,
            )?;
            audit(
                "deploy",
                serde_json::json!({"airdrop": report.address, "module": report.module, "owner": report.owner}),
            );
            save_chain(state)?;
            print_one(cli.json, report, |r| {
                format!(
                    "{} deployed at {} (ends at {})",
                    r.contract, r.address, r.ends_at
                )
            })?;
        }
        Commands::Claim {
            airdrop,
            claimer,
            bundle,
            proof,
            leaf,
            index,
            amount,
        } => {
            let airdrop = Address::parse(airdrop)?;
            let claimer = Address::parse(claimer)?;
            let input = match bundle {
                Some(path) => {
                    let b = read_proof_bundle(Path::new(path))?;
                    ClaimInput {
                        proof: b.proof,
                        leaf: b.leaf,
                        index: b.index,
                        amount: b.amount,
                    }
                }
                None => {
                    let leaf = leaf
                        .as_deref()
                        .ok_or_else(|| anyhow::anyhow!("--leaf is required without --bundle"))?;
                    let index = index
                        .ok_or_else(|| anyhow::anyhow!("--index is required without --bundle"))?;
                    let amount = amount
                        .as_deref()
                        .ok_or_else(|| anyhow::anyhow!("--amount is required without --bundle"))?;
                    ClaimInput {
                        proof: proof
                            .iter()
                            .map(|h| Bytes32::parse(h))
                            .collect::<anyhow::Result<Vec<_>>>()?,
                        leaf: Bytes32::parse(leaf)?,
                        index,
                        amount: amount.parse()?,
                    }
                }
            };
            let receipt = claim_air_drop(state, airdrop, claimer, &input)?;
            audit(
                "claim",
                serde_json::json!({"airdrop": airdrop, "claimer": claimer, "index": receipt.index}),
            );
            save_chain(state)?;
            print_one(cli.json, receipt, |r| {
                format!("claimed {} base units for {}", r.amount, r.claimer)
            })?;
        }
        Commands::Withdraw { airdrop, from } => {
            let airdrop = Address::parse(airdrop)?;
            let caller = sender(state, from)?;
            let report = withdraw_remaining(state, airdrop, caller)?;
            audit(
                "withdraw",
                serde_json::json!({"airdrop": airdrop, "to": report.to, "amount": report.amount}),
            );
            save_chain(state)?;
            print_one(cli.json, report, |r| {
                format!("withdrew {} base units to {}", r.amount, r.to)
            })?;
        }
        Commands::UpdateRoot {
            airdrop,
            root,
            from,
        } => {
            let airdrop = Address::parse(airdrop)?;
            let caller = sender(state, from)?;
            let report = update_merkle_root(state, airdrop, caller, Bytes32::parse(root)?)?;
            audit(
                "update_root",
                serde_json::json!({"airdrop": airdrop, "root": report.merkle_root}),
            );
            save_chain(state)?;
            print_one(cli.json, report, |r| {
                format!("merkle root updated to {}", r.merkle_root)
            })?;
        }
        Commands::Show { airdrop } => {
            let info = inspect_airdrop(state, Address::parse(airdrop)?)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: info
                    })?
                );
            } else {
                println!("address: {}", info.address);
                println!("module: {}", info.module);
                println!("contract: {}", info.contract);
                println!("owner: {}", info.owner);
                println!("token: {}", info.token);
                println!("merkle_root: {}", info.merkle_root);
                println!("ends_at: {}", info.ends_at);
                println!("required_nft: {}", info.required_nft);
                println!("claimed: {}", info.claimed_count);
                println!("vault_balance: {}", info.vault_balance);
            }
        }
        Commands::Nft { command } => match command {
            NftCommands::Grant { collection, holder } => {
                let holder = Address::parse(holder)?;
                state
                    .nft_holders
                    .entry(collection.clone())
                    .or_default()
                    .insert(holder);
                audit(
                    "nft_grant",
                    serde_json::json!({"collection": collection, "holder": holder}),
                );
                save_chain(state)?;
                let data = serde_json::json!({
                    "collection": collection,
                    "holder": holder,
                    "granted": true
                });
                print_one(cli.json, data, |_| {
                    format!("granted {} to {}", collection, holder)
                })?;
            }
            NftCommands::Revoke { collection, holder } => {
                let holder = Address::parse(holder)?;
                let revoked = state
                    .nft_holders
                    .get_mut(collection)
                    .map(|holders| holders.remove(&holder))
                    .unwrap_or(false);
                audit(
                    "nft_revoke",
                    serde_json::json!({"collection": collection, "holder": holder, "revoked": revoked}),
                );
                save_chain(state)?;
                let data = serde_json::json!({
                    "collection": collection,
                    "holder": holder,
                    "revoked": revoked
                });
                print_one(cli.json, data, |_| {
                    format!("revoked {} from {}", collection, holder)
                })?;
            }
            NftCommands::Holders { collection } => {
                let holders: Vec<Address> = state
                    .nft_holders
                    .get(collection)
                    .map(|s| s.iter().copied().collect())
                    .unwrap_or_default();
                print_out(cli.json, &holders, |a| a.to_string())?;
            }
        },
        Commands::Time { command } => match command {
            TimeCommands::Now => {
                let report = TimeReport {
                    timestamp: state.timestamp,
                };
                print_one(cli.json, report, |r| format!("{}", r.timestamp))?;
            }
            TimeCommands::Increase { seconds } => {
                let timestamp = advance_time(state, *seconds);
                audit("time_increase", serde_json::json!({"seconds": seconds}));
                save_chain(state)?;
                let report = TimeReport { timestamp };
                print_one(cli.json, report, |r| format!("timestamp {}", r.timestamp))?;
            }
        },
        Commands::Check => {
            let trust = TrustStatus {
                require_signed_module: policy.general.require_signed_module,
                trusted_key_count: list_pubkeys()?.len(),
                module_source: cli.module.clone(),
                module_signature_ok: verify_module_signature(&cli.module).unwrap_or(false),
            };

            let mut checks = Vec::new();
            checks.push(CheckItem {
                name: "state-dir".to_string(),
                status: match state_dir() {
                    Ok(dir) if dir.exists() => "ok",
                    _ => "missing",
                }
                .to_string(),
            });
            checks.push(CheckItem {
                name: "chain-state".to_string(),
                status: if state.signers.is_empty() {
                    "empty".to_string()
                } else {
                    "ok".to_string()
                },
            });
            match crate::module::load_module(&cli.module) {
                Ok(module) => {
                    let status = if crate::module::validate_module(&module).is_ok() {
                        "ok"
                    } else {
                        "invalid"
                    };
                    checks.push(CheckItem {
                        name: "module".to_string(),
                        status: status.to_string(),
                    });
                    if let Some(rel) = &module.parameters.manifest {
                        let status = match crate::module::resolve_manifest_path(&cli.module, rel) {
                            Ok(path) if load_manifest(&path).is_ok() => "ok",
                            Ok(_) => "invalid",
                            Err(_) => "invalid",
                        };
                        checks.push(CheckItem {
                            name: "manifest".to_string(),
                            status: status.to_string(),
                        });
                    }
                }
                Err(_) => {
                    checks.push(CheckItem {
                        name: "module".to_string(),
                        status: "missing".to_string(),
                    });
                }
            }
            checks.push(CheckItem {
                name: "policy-file".to_string(),
                status: policy_file_status(),
            });

            let report = build_check_report(trust, checks);
            audit("check", serde_json::json!({"overall": report.overall}));
            print_one(cli.json, report, |r| format!("check: {}", r.overall))?;
        }
        Commands::Reset => {
            *state = genesis_state()?;
            save_chain(state)?;
            audit("reset", serde_json::json!({}));
            print_one(cli.json, "reset", |_| {
                "chain state reset to genesis".to_string()
            })?;
        }
        Commands::Trust { .. } | Commands::Module { .. } | Commands::Tree { .. } => {
            unreachable!("handled before chain state loading")
        }
    }

    Ok(())
}
