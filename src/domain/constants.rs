/// Official distributor signing key (hex-encoded ed25519 public key).
/// `trust init` installs this into the local trust store.
pub const OFFICIAL_DISTRIBUTOR_PUBKEY_HEX: &str =
    "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c";

pub const TOKEN_NAME: &str = "Layinton Token";
pub const TOKEN_SYMBOL: &str = "LAYI";
pub const TOKEN_DECIMALS: u8 = 18;
/// Whole-token supply minted to the deployer (scaled by 10^decimals).
pub const INITIAL_SUPPLY_TOKENS: u128 = 500_000;

/// Module parameter defaults, mirrored from the published deployment module.
pub const DEFAULT_ENDING_TIME_IN_SEC: u64 = 30 * 24 * 60 * 60;
pub const DEFAULT_TOKEN_ADDRESS: &str = "0x809c4E72ac8e66226Fe23c5c4a2810B3821E28b2";
pub const DEFAULT_REQUIRED_NFT: &str = "layi-og-pass";

pub const GENESIS_TIMESTAMP: u64 = 1_700_000_000;

/// Well-known dev-node accounts seeded at genesis. Index 0 acts as the
/// conventional owner/deployer when `--from` is omitted.
pub const GENESIS_SIGNERS: [&str; 10] = [
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fA2b585dd299e03d12FA4293BC",
    "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
    "0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65",
    "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc",
    "0x976EA74026E726554dB657fA54763abd0C3a0aa9",
    "0x14dC79964da2C08b23698B3D3cc7Ca32193d9955",
    "0x23618e81E3f5cdF7f54C3d65f7FBc0aBf5B21E8f",
    "0xa0Ee7A142d267C1f36714E4a8F75612F20a79720",
];
