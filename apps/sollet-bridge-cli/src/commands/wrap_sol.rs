use super::{report, Session};
use crate::{config::load_keypair, error::CliResult};
use sollet_bridge_client::{get_or_create_native_token_account, ui_amount};
use std::path::PathBuf;

/// Wrap `lamports` into a temporary native token account.
///
/// Without `keep` the account is closed in the same transaction, returning the
/// lamports; with it the wrapped balance stays in the new account.
pub async fn execute(
    session: &Session,
    keypair: PathBuf,
    lamports: u64,
    keep: bool,
) -> CliResult<()> {
    let wallet = session.connect(load_keypair(&keypair)?).await?;

    let staged =
        get_or_create_native_token_account(session.connection.as_ref(), wallet.as_ref(), lamports)
            .await?;
    println!(
        "🌯 Wrapping {} SOL into {}",
        ui_amount(lamports, 9),
        staged.address
    );

    let status = session.submit(&wallet, &staged, "wrap sol", !keep).await?;
    report("wrap sol", status)
}
