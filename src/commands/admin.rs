use crate::*;
use std::path::Path;

pub fn handle_trust_commands(cli: &Cli, policy: &PolicyFile) -> anyhow::Result<bool> {
    let Commands::Trust { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        TrustCommands::Init => {
            trust_init(OFFICIAL_DISTRIBUTOR_PUBKEY_HEX)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: "initialized"
                    })?
                );
            } else {
                println!("trust initialized (official distributor key installed)");
            }
        }
        TrustCommands::List => {
            let keys = list_pubkeys()?;
            print_out(cli.json, &keys, |k| k.to_string())?;
        }
        TrustCommands::Status => {
            let keys = list_pubkeys()?;
            let sig_ok = verify_module_signature(&cli.module).unwrap_or(false);
            let status = TrustStatus {
                require_signed_module: policy.general.require_signed_module,
                trusted_key_count: keys.len(),
                module_source: cli.module.clone(),
                module_signature_ok: sig_ok,
            };
            print_one(cli.json, status, |s| {
                format!(
                    "signed_required={} keys={} module_sig_ok={}",
                    s.require_signed_module, s.trusted_key_count, s.module_signature_ok
                )
            })?;
        }
    }

    Ok(true)
}

pub fn handle_module_commands(cli: &Cli, policy: &PolicyFile) -> anyhow::Result<bool> {
    let Commands::Module { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        ModuleCommands::Show => {
            let module = checked_load_module(policy, &cli.module)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: module
                    })?
                );
            } else {
                println!("module: {}", module.module);
                println!("contract: {}", module.contract);
                if let Some(v) = module.parameters.ending_time_in_sec {
                    println!("endingTimeInSec: {}", v);
                }
                if let Some(v) = &module.parameters.token_address {
                    println!("tokenAddress: {}", v);
                }
                if let Some(v) = &module.parameters.required_nft {
                    println!("requiredNft: {}", v);
                }
                if let Some(v) = &module.parameters.manifest {
                    println!("manifest: {}", v);
                }
            }
        }
        ModuleCommands::Validate => {
            let module = checked_load_module(policy, &cli.module)?;
            crate::module::validate_module(&module)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: "valid"
                    })?
                );
            } else {
                println!("module valid");
            }
        }
        ModuleCommands::Sign { key } => {
            let pubkey = sign_module(&cli.module, key)?;
            let report = SignReport {
                source: cli.module.clone(),
                pubkey,
                signed: true,
            };
            print_one(cli.json, report, |r| format!("module signed by {}", r.pubkey))?;
        }
    }

    Ok(true)
}

pub fn handle_tree_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Tree { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        TreeCommands::Build { input, out_dir } => {
            let entries = load_manifest(Path::new(input))?;
            let out = out_dir.clone().unwrap_or_else(|| "tree".to_string());
            let artifacts = write_tree_artifacts(&entries, Path::new(&out))?;
            let report = TreeBuildReport {
                leaves: artifacts.leaves,
                root: artifacts.root,
                out_dir: out,
            };
            print_one(cli.json, report, |r| {
                format!("root {} ({} leaves) written to {}", r.root, r.leaves, r.out_dir)
            })?;
        }
        TreeCommands::Proof {
            input,
            address,
            output,
        } => {
            let entries = load_manifest(Path::new(input))?;
            let address = Address::parse(address)?;
            let bundle = build_proof_bundle(&entries, address)?;
            if let Some(path) = output {
                write_proof_bundle(Path::new(path), &bundle)?;
            }
            print_one(cli.json, bundle, |b| {
                format!("index {} amount {} leaf {}", b.index, b.amount, b.leaf)
            })?;
        }
        TreeCommands::Verify {
            bundle,
            root,
            leaf,
            proof,
        } => {
            let (root, leaf, proof) = match bundle {
                Some(path) => {
                    let b = read_proof_bundle(Path::new(path))?;
                    (b.root, b.leaf, b.proof)
                }
                None => {
                    let root = root
                        .as_deref()
                        .ok_or_else(|| anyhow::anyhow!("--root is required without --bundle"))?;
                    let leaf = leaf
                        .as_deref()
                        .ok_or_else(|| anyhow::anyhow!("--leaf is required without --bundle"))?;
                    let proof = proof
                        .iter()
                        .map(|h| Bytes32::parse(h))
                        .collect::<anyhow::Result<Vec<_>>>()?;
                    (Bytes32::parse(root)?, Bytes32::parse(leaf)?, proof)
                }
            };
            let valid = verify_proof(root, leaf, &proof);
            let report = VerifyReport { root, leaf, valid };
            print_one(cli.json, report, |r| {
                format!("proof {}", if r.valid { "valid" } else { "invalid" })
            })?;
        }
    }

    Ok(true)
}
