use super::Session;
use crate::error::CliResult;
use solana_sdk::pubkey::Pubkey;
use sollet_bridge_client::{fetch_token_accounts, TokenRegistry, TOKEN_PROGRAM_ID};
use tracing::warn;

pub async fn execute(session: &Session, owner: Pubkey, skip_registry: bool) -> CliResult<()> {
    println!("💰 Token balances for {}", owner);

    if !skip_registry {
        let registry = TokenRegistry::new(session.config.token_list_url.clone());
        match session
            .state
            .load_token_registry(&registry, session.config.chain_id)
            .await
        {
            Ok(count) => println!("📚 Loaded {} registry tokens", count),
            // Balances are still useful without names
            Err(e) => warn!("Token registry unavailable: {}", e),
        }
    }

    let accounts =
        fetch_token_accounts(session.connection.as_ref(), &owner, &TOKEN_PROGRAM_ID).await?;
    session.state.update_user_tokens(accounts);

    let tokens = session.state.user_tokens();
    if tokens.is_empty() {
        println!("   (no token accounts)");
        return Ok(());
    }

    for token in tokens {
        println!(
            "   {:<12} {:>20}  {} ({})",
            token.symbol,
            token.account.info.token_amount.ui_amount_string,
            token.name,
            token.account.pubkey
        );
    }
    Ok(())
}
