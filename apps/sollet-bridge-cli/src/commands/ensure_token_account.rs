use super::{report, Session};
use crate::{config::load_keypair, error::CliResult};
use solana_sdk::pubkey::Pubkey;
use sollet_bridge_client::get_or_create_token_account;
use std::path::PathBuf;

pub async fn execute(session: &Session, keypair: PathBuf, mint: Pubkey) -> CliResult<()> {
    let wallet = session.connect(load_keypair(&keypair)?).await?;

    let staged =
        get_or_create_token_account(session.connection.as_ref(), &mint, wallet.as_ref()).await?;
    println!("🏦 Associated token account: {}", staged.address);

    if staged.is_empty() {
        println!("✅ Account already exists");
        return Ok(());
    }

    let name = format!("create token account for {}", mint);
    let status = session.submit(&wallet, &staged, &name, true).await?;
    report(&name, status)
}
