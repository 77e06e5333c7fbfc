use crate::{
    connection::Connection,
    constants::{FINALIZED, PROCESSED},
    wallet::WalletAdapter,
    BridgeError, BridgeResult,
};
use solana_sdk::{
    signature::{Keypair, Signature},
    transaction::Transaction,
};
use tracing::{debug, info};

/// Sign `transaction` with the co-signers and the wallet, then broadcast it.
///
/// Each step returns early on failure; nothing is retried. The wallet's
/// signature may wait on user approval for an arbitrary time.
pub async fn sign_and_send_transaction(
    connection: &dyn Connection,
    mut transaction: Transaction,
    wallet: &dyn WalletAdapter,
    signers: &[&Keypair],
) -> BridgeResult<Signature> {
    let fee_payer = wallet.public_key().ok_or(BridgeError::WalletNotConnected)?;

    let recent_blockhash = connection.get_latest_blockhash(FINALIZED).await?;
    transaction.message.recent_blockhash = recent_blockhash;
    debug!("Using blockhash {} for fee payer {}", recent_blockhash, fee_payer);

    if !signers.is_empty() {
        transaction.try_partial_sign(signers, recent_blockhash)?;
    }

    let transaction = wallet.sign_transaction(transaction).await?;
    debug!("Wallet signed transaction");

    let raw_transaction = serialize_transaction(&transaction)?;

    let signature = connection
        .send_raw_transaction(&raw_transaction, PROCESSED.commitment)
        .await?;
    info!("Sent transaction {}", signature);

    Ok(signature)
}

/// Wire-format bytes of a fully signed transaction.
pub fn serialize_transaction(transaction: &Transaction) -> BridgeResult<Vec<u8>> {
    if !transaction.is_signed() {
        return Err(BridgeError::Serialization(
            "Transaction is missing required signatures".to_string(),
        ));
    }
    transaction
        .verify()
        .map_err(|e| BridgeError::Serialization(e.to_string()))?;

    bincode::serde::encode_to_vec(transaction, bincode::config::legacy())
        .map_err(|e| BridgeError::Serialization(e.to_string()))
}
