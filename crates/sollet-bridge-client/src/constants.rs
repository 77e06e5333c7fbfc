use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    pubkey::Pubkey,
};

pub const PROCESSED: CommitmentConfig = CommitmentConfig {
    commitment: CommitmentLevel::Processed,
};
pub const CONFIRMED: CommitmentConfig = CommitmentConfig {
    commitment: CommitmentLevel::Confirmed,
};
pub const FINALIZED: CommitmentConfig = CommitmentConfig {
    commitment: CommitmentLevel::Finalized,
};

pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;
pub const ASSOCIATED_TOKEN_ACCOUNT_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;
/// `So11111111111111111111111111111111111111112`
pub const WRAPPED_SOL_MINT: Pubkey = spl_token::native_mint::ID;
pub const SYSVAR_CLOCK_ID: Pubkey = solana_sdk::sysvar::clock::ID;

pub const DEFAULT_NETWORK: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_TOKEN_LIST_URL: &str =
    "https://raw.githubusercontent.com/solana-labs/token-list/main/src/tokens/solana.tokenlist.json";
