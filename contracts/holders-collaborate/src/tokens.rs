use crate::access::AccessManager;
use crate::contribute::ContributionManager;
use crate::levels::LevelManager;
use crate::types::{DataKey, Error, Token};
use soroban_sdk::{token, Address, Env, Symbol, Vec};

pub struct TokenManager;

impl TokenManager {
    /// Store the accepted token set. The set is fixed for the lifetime of
    /// the collaboration; contributed amounts always start at zero.
    pub fn init(env: &Env, tokens: &Vec<Token>) -> Result<(), Error> {
        if tokens.is_empty() {
            return Err(Error::ConfigError);
        }

        let mut stored: Vec<Token> = Vec::new(env);
        for entry in tokens.iter() {
            if entry.usd_price <= 0 {
                return Err(Error::ConfigError);
            }
            // Reject duplicate addresses
            for prior in stored.iter() {
                if prior.address == entry.address {
                    return Err(Error::ConfigError);
                }
            }
            stored.push_back(Token {
                address: entry.address.clone(),
                usd_price: entry.usd_price,
                amount: 0,
            });
        }

        env.storage().instance().set(&DataKey::Tokens, &stored);

        Ok(())
    }

    pub fn get_tokens(env: &Env) -> Result<Vec<Token>, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Tokens)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_token(env: &Env, index: u32) -> Result<Token, Error> {
        let tokens = Self::get_tokens(env)?;
        tokens.get(index).ok_or(Error::NotFound)
    }

    /// Locate a registered token by address
    pub fn find(env: &Env, address: &Address) -> Result<(u32, Token), Error> {
        let tokens = Self::get_tokens(env)?;
        for (i, entry) in tokens.iter().enumerate() {
            if &entry.address == address {
                return Ok((i as u32, entry));
            }
        }
        Err(Error::NotFound)
    }

    /// Re-price a token in place, admin. The cumulative contributed amount
    /// is never touched. Lowering a price shrinks the USD value of the
    /// escrow, so it re-checks reserve adequacy first.
    pub fn update_token(
        env: &Env,
        caller: &Address,
        address: &Address,
        usd_price: i128,
    ) -> Result<(), Error> {
        AccessManager::require_admin(env, caller)?;

        if usd_price <= 0 {
            return Err(Error::ConfigError);
        }

        let (index, current) = Self::find(env, address)?;

        let mut tokens = Self::get_tokens(env)?;
        tokens.set(
            index,
            Token {
                address: current.address.clone(),
                usd_price,
                amount: current.amount,
            },
        );

        if usd_price < current.usd_price {
            let levels = LevelManager::get_levels(env)?;
            let collaborators = ContributionManager::get_collaborator_count(env);
            LevelManager::verify_reserve(env, &tokens, &levels, collaborators)?;
        }

        env.storage().instance().set(&DataKey::Tokens, &tokens);

        env.events().publish(
            (Symbol::new(env, "token_updated"), caller.clone()),
            (address.clone(), usd_price),
        );

        Ok(())
    }

    /// Credit a contribution against a token's running total
    pub fn record_contribution(env: &Env, index: u32, amount: i128) -> Result<(), Error> {
        let mut tokens = Self::get_tokens(env)?;
        let mut entry = tokens.get(index).ok_or(Error::NotFound)?;

        entry.amount = entry.amount.checked_add(amount).ok_or(Error::OutOfTierBounds)?;
        tokens.set(index, entry);

        env.storage().instance().set(&DataKey::Tokens, &tokens);

        Ok(())
    }

    /// USD value of the token balances the contract currently holds
    pub fn escrow_usd_value(env: &Env, tokens: &Vec<Token>) -> i128 {
        let holder = env.current_contract_address();
        let mut total: i128 = 0;
        for entry in tokens.iter() {
            let balance = token::Client::new(env, &entry.address).balance(&holder);
            total = total.saturating_add(balance.saturating_mul(entry.usd_price));
        }
        total
    }
}
