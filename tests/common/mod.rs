use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const OWNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const TOKEN_HOLDER: &str = "0x6E404D8eBf475e196E0581Df3B5C1D43478ad40C";
pub const NON_HOLDER: &str = "0xf584F8728B874a6a5c7A8d4d387C9aae9172D621";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub module_dir: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let module_dir = make_fixture_module(tmp.path());

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            module_dir,
            cargo_home,
            rustup_home,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("layidrop");
        cmd.env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home);
        cmd
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.module_dir.join("deploy/addresses.csv")
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_module(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--module")
            .arg(self.module_dir.to_str().expect("module path utf8"))
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_fail(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }

    pub fn run_json_module_fail(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--module")
            .arg(self.module_dir.to_str().expect("module path utf8"))
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }
}

fn make_fixture_module(base: &Path) -> PathBuf {
    let module_dir = base.join("airdrop-module");
    let deploy = module_dir.join("deploy");
    fs::create_dir_all(&deploy).expect("create module deploy dir");

    let module = serde_json::json!({
        "module": "LayiAirDropModule",
        "contract": "LayiAirDrop",
        "parameters": {
            "endingTimeInSec": 2_592_000,
            "requiredNft": "layi-og-pass",
            "manifest": "./addresses.csv"
        }
    });
    fs::write(
        deploy.join("airdrop.module.json"),
        serde_json::to_string_pretty(&module).expect("serialize module"),
    )
    .expect("write module file");

    fs::write(
        deploy.join("addresses.csv"),
        "address,amount\n\
         0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266,250000000000000000000\n\
         0x70997970C51812dc3A010C7d01b50e0d17dc79C8,120000000000000000000\n\
         0x3C44CdDdB6a900fA2b585dd299e03d12FA4293BC,75000000000000000000\n\
         0x6E404D8eBf475e196E0581Df3B5C1D43478ad40C,40000000000000000000\n\
         0xf584F8728B874a6a5c7A8d4d387C9aae9172D621,15000000000000000000\n\
         0xa0Ee7A142d267C1f36714E4a8F75612F20a79720,40000000000000000000\n",
    )
    .expect("write manifest");

    module_dir
}
