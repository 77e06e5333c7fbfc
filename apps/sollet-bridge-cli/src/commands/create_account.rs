use super::{report, Session};
use crate::{config::load_keypair, error::CliResult};
use solana_sdk::pubkey::Pubkey;
use sollet_bridge_client::create_account;
use std::path::PathBuf;

pub async fn execute(session: &Session, keypair: PathBuf, owner: Pubkey) -> CliResult<()> {
    let wallet = session.connect(load_keypair(&keypair)?).await?;

    let staged = create_account(session.connection.as_ref(), wallet.as_ref(), &owner).await?;
    println!("🆕 New account {} owned by {}", staged.address, owner);

    let status = session.submit(&wallet, &staged, "create account", true).await?;
    report("create account", status)
}
