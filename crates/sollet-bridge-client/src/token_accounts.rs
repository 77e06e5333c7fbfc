/*!
# Token Account Staging

Builders that look up whether a token account already exists and stage the
instructions needed to create it. Nothing here is submitted; the result is
handed to the transaction submitter.
*/

use crate::{
    address_finder::AddressFinder,
    connection::Connection,
    constants::{CONFIRMED, TOKEN_PROGRAM_ID, WRAPPED_SOL_MINT},
    wallet::WalletAdapter,
    BridgeError, BridgeResult,
};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::Transaction,
};
use spl_associated_token_account::instruction::create_associated_token_account;
use spl_token::solana_program::program_pack::Pack;
use tracing::debug;

/// A staged, not-yet-submitted unit of on-chain work
#[derive(Debug)]
pub struct CustomInstructionResult {
    /// The account the instructions create or use
    pub address: Pubkey,
    pub instructions: Vec<Instruction>,
    /// Run after everything else in the same transaction
    pub cleanup_instructions: Vec<Instruction>,
    /// Extra keypairs that must co-sign
    pub signers: Vec<Keypair>,
}

impl CustomInstructionResult {
    pub fn all_instructions(&self) -> Vec<Instruction> {
        self.instructions
            .iter()
            .chain(self.cleanup_instructions.iter())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty() && self.cleanup_instructions.is_empty()
    }

    /// Unsigned transaction paid for by `payer`; the blockhash is filled in at submission.
    pub fn unsigned_transaction(&self, payer: &Pubkey, with_cleanup: bool) -> Transaction {
        let instructions = if with_cleanup {
            self.all_instructions()
        } else {
            self.instructions.clone()
        };
        Transaction::new_with_payer(&instructions, Some(payer))
    }

    pub fn signer_refs(&self) -> Vec<&Keypair> {
        self.signers.iter().collect()
    }
}

/// Get or stage creation of the wallet's associated token account for `mint`.
///
/// Does not handle the wrapped SOL mint; use [`get_or_create_native_token_account`].
pub async fn get_or_create_token_account(
    connection: &dyn Connection,
    mint: &Pubkey,
    wallet: &dyn WalletAdapter,
) -> BridgeResult<CustomInstructionResult> {
    let address_finder = AddressFinder::default();

    if address_finder.is_wrapped_sol_mint(mint) {
        return Err(BridgeError::WrappedSolNotSupported);
    }
    let owner = wallet.public_key().ok_or(BridgeError::WalletNotConnected)?;

    let (address, _bump) = address_finder.find_associated_token_address(&owner, mint);
    let existing = connection.get_account_info(&address, CONFIRMED).await?;

    let mut instructions = Vec::new();
    if existing.is_none() {
        debug!("Staging associated token account {} for mint {}", address, mint);
        instructions.push(create_associated_token_account(
            &owner,
            &owner,
            mint,
            &address_finder.token_program_id,
        ));
    }

    Ok(CustomInstructionResult {
        address,
        instructions,
        cleanup_instructions: vec![],
        signers: vec![],
    })
}

/// Stage a temporary wrapped SOL account holding `amount` lamports.
///
/// The account is always closed back into the wallet by the cleanup instruction.
pub async fn get_or_create_native_token_account(
    connection: &dyn Connection,
    wallet: &dyn WalletAdapter,
    amount: u64,
) -> BridgeResult<CustomInstructionResult> {
    let owner = wallet.public_key().ok_or(BridgeError::WalletNotConnected)?;

    let new_account = Keypair::new();
    let address = new_account.pubkey();

    let close_account_ix =
        spl_token::instruction::close_account(&TOKEN_PROGRAM_ID, &address, &owner, &owner, &[])
            .map_err(|e| BridgeError::InstructionBuild(e.to_string()))?;

    let existing = connection.get_account_info(&address, CONFIRMED).await?;

    let mut instructions = Vec::new();
    if existing.is_none() {
        let rent = connection
            .get_minimum_balance_for_rent_exemption(spl_token::state::Account::LEN)
            .await?;
        instructions.push(system_instruction::create_account(
            &owner,
            &address,
            rent,
            spl_token::state::Account::LEN as u64,
            &TOKEN_PROGRAM_ID,
        ));

        // Lamports sent before initialization become the wrapped balance
        if amount > 0 {
            instructions.push(system_instruction::transfer(&owner, &address, amount));
        }

        instructions.push(
            spl_token::instruction::initialize_account(
                &TOKEN_PROGRAM_ID,
                &address,
                &WRAPPED_SOL_MINT,
                &owner,
            )
            .map_err(|e| BridgeError::InstructionBuild(e.to_string()))?,
        );
    }

    Ok(CustomInstructionResult {
        address,
        instructions,
        cleanup_instructions: vec![close_account_ix],
        signers: vec![new_account],
    })
}

/// Stage a fresh rent-exempt account owned by `account_owner`.
pub async fn create_account(
    connection: &dyn Connection,
    wallet: &dyn WalletAdapter,
    account_owner: &Pubkey,
) -> BridgeResult<CustomInstructionResult> {
    let payer = wallet.public_key().ok_or(BridgeError::WalletNotConnected)?;

    let new_account = Keypair::new();
    let space = spl_token::state::Account::LEN;
    let lamports = connection
        .get_minimum_balance_for_rent_exemption(space)
        .await?;

    Ok(CustomInstructionResult {
        address: new_account.pubkey(),
        instructions: vec![system_instruction::create_account(
            &payer,
            &new_account.pubkey(),
            lamports,
            space as u64,
            account_owner,
        )],
        cleanup_instructions: vec![],
        signers: vec![new_account],
    })
}
