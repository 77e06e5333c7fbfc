use crate::constants::{ASSOCIATED_TOKEN_ACCOUNT_PROGRAM_ID, TOKEN_PROGRAM_ID, WRAPPED_SOL_MINT};
use solana_sdk::pubkey::Pubkey;

pub struct AddressFinder {
    pub associated_token_program_id: Pubkey,
    pub token_program_id: Pubkey,
    pub wrapped_sol_mint: Pubkey,
}

impl AddressFinder {
    pub fn new(
        associated_token_program_id: Pubkey,
        token_program_id: Pubkey,
        wrapped_sol_mint: Pubkey,
    ) -> Self {
        Self {
            associated_token_program_id,
            token_program_id,
            wrapped_sol_mint,
        }
    }

    /// Seeds are `[owner, token_program, mint]` under the associated token program.
    pub fn find_associated_token_address(&self, owner: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                owner.as_ref(),
                self.token_program_id.as_ref(),
                mint.as_ref(),
            ],
            &self.associated_token_program_id,
        )
    }

    pub fn is_wrapped_sol_mint(&self, mint: &Pubkey) -> bool {
        *mint == self.wrapped_sol_mint
    }
}

impl Default for AddressFinder {
    fn default() -> Self {
        Self::new(
            ASSOCIATED_TOKEN_ACCOUNT_PROGRAM_ID,
            TOKEN_PROGRAM_ID,
            WRAPPED_SOL_MINT,
        )
    }
}

/// Associated token address for `owner` holding `mint`. No network access.
pub fn derive_associated_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    AddressFinder::default()
        .find_associated_token_address(owner, mint)
        .0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        assert_eq!(
            derive_associated_address(&owner, &mint),
            derive_associated_address(&owner, &mint)
        );
    }

    #[test]
    fn test_matches_spl_associated_token_account() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        assert_eq!(
            derive_associated_address(&owner, &mint),
            spl_associated_token_account::get_associated_token_address(&owner, &mint)
        );
    }

    #[test]
    fn test_different_mints_give_different_addresses() {
        let owner = Pubkey::new_unique();
        let finder = AddressFinder::default();

        let (a, _) = finder.find_associated_token_address(&owner, &Pubkey::new_unique());
        let (b, _) = finder.find_associated_token_address(&owner, &Pubkey::new_unique());
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrapped_sol_detection() {
        let finder = AddressFinder::default();
        assert!(finder.is_wrapped_sol_mint(&WRAPPED_SOL_MINT));
        assert!(!finder.is_wrapped_sol_mint(&Pubkey::new_unique()));
    }
}
