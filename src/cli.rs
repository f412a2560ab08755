use crate::domain::constants::DEFAULT_REQUIRED_NFT;
use clap::{Parser, Subcommand};

pub const DEFAULT_MODULE_SOURCE: &str = "layinton/airdrop-module";

#[derive(Parser, Debug)]
#[command(name = "layidrop", version, about = "Layinton airdrop deployment and claim harness")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_MODULE_SOURCE,
        help = "Deployment module source (dir, airdrop.module.json, url, or owner/repo)"
    )]
    pub module: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Accounts,
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
    Deploy {
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        ending_time: Option<u64>,
        #[arg(long)]
        root: Option<String>,
        #[arg(long)]
        manifest: Option<String>,
        #[arg(long)]
        required_nft: Option<String>,
        #[arg(long)]
        from: Option<String>,
    },
    Claim {
        #[arg(long)]
        airdrop: String,
        #[arg(long)]
        claimer: String,
        #[arg(long)]
        bundle: Option<String>,
        #[arg(long, value_delimiter = ',')]
        proof: Vec<String>,
        #[arg(long)]
        leaf: Option<String>,
        #[arg(long)]
        index: Option<u64>,
        #[arg(long)]
        amount: Option<String>,
    },
    Withdraw {
        #[arg(long)]
        airdrop: String,
        #[arg(long)]
        from: Option<String>,
    },
    UpdateRoot {
        #[arg(long)]
        airdrop: String,
        #[arg(long)]
        root: String,
        #[arg(long)]
        from: Option<String>,
    },
    Show {
        airdrop: String,
    },
    Nft {
        #[command(subcommand)]
        command: NftCommands,
    },
    Time {
        #[command(subcommand)]
        command: TimeCommands,
    },
    Tree {
        #[command(subcommand)]
        command: TreeCommands,
    },
    Module {
        #[command(subcommand)]
        command: ModuleCommands,
    },
    Trust {
        #[command(subcommand)]
        command: TrustCommands,
    },
    Check,
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    Deploy {
        #[arg(long)]
        from: Option<String>,
    },
    Transfer {
        #[arg(long)]
        token: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
    },
    Balance {
        #[arg(long)]
        token: String,
        address: String,
    },
    Supply {
        #[arg(long)]
        token: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NftCommands {
    Grant {
        #[arg(long, default_value = DEFAULT_REQUIRED_NFT)]
        collection: String,
        #[arg(long)]
        holder: String,
    },
    Revoke {
        #[arg(long, default_value = DEFAULT_REQUIRED_NFT)]
        collection: String,
        #[arg(long)]
        holder: String,
    },
    Holders {
        #[arg(long, default_value = DEFAULT_REQUIRED_NFT)]
        collection: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TimeCommands {
    Now,
    Increase {
        #[arg(long)]
        seconds: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum TreeCommands {
    Build {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out_dir: Option<String>,
    },
    Proof {
        #[arg(long)]
        input: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        output: Option<String>,
    },
    Verify {
        #[arg(long)]
        bundle: Option<String>,
        #[arg(long)]
        root: Option<String>,
        #[arg(long)]
        leaf: Option<String>,
        #[arg(long, value_delimiter = ',')]
        proof: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModuleCommands {
    Show,
    Validate,
    Sign {
        #[arg(long)]
        key: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TrustCommands {
    Init,
    List,
    Status,
}
