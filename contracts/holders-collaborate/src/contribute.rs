use crate::levels::LevelManager;
use crate::lifecycle::LifecycleManager;
use crate::tokens::TokenManager;
use crate::types::{Collaborator, CollaboratorKey, DataKey, Error};
use soroban_sdk::{token, Address, Env, Symbol};

pub struct ContributionManager;

impl ContributionManager {
    /// Initialize the collaborator counter and the running USD total
    pub fn init(env: &Env) {
        env.storage()
            .instance()
            .set(&DataKey::CollaboratorCount, &0u32);
        env.storage().instance().set(&DataKey::TotalUsd, &0i128);
    }

    /// Record a contribution. Validations run in a fixed order, each with
    /// its own failure; the escrow pull happens only once every check has
    /// passed, and state is committed only after the pull.
    pub fn contribute(
        env: &Env,
        contributor: &Address,
        token_address: &Address,
        amount: i128,
    ) -> Result<u32, Error> {
        // 1. Lifecycle gate: Active status and inside [start, end)
        if !LifecycleManager::is_open(env)? {
            return Err(Error::NotActive);
        }

        // 2. Token must be registered
        let (index, entry) = match TokenManager::find(env, token_address) {
            Ok(found) => found,
            Err(Error::NotFound) => return Err(Error::InvalidToken),
            Err(e) => return Err(e),
        };

        // 3. Tier bounds, in USD
        if amount <= 0 {
            return Err(Error::OutOfTierBounds);
        }
        let usd = amount
            .checked_mul(entry.usd_price)
            .ok_or(Error::OutOfTierBounds)?;

        let levels = LevelManager::get_levels(env)?;
        let total_usd = Self::get_total_usd(env);

        let key = CollaboratorKey(token_address.clone(), contributor.clone());
        let existing: Option<Collaborator> =
            env.storage().instance().get(&DataKey::Collaborator(key.clone()));

        let (new_amount, new_value) = match &existing {
            Some(record) => (
                record
                    .amount
                    .checked_add(amount)
                    .ok_or(Error::OutOfTierBounds)?,
                record
                    .usd_value
                    .checked_add(usd)
                    .ok_or(Error::OutOfTierBounds)?,
            ),
            None => (amount, usd),
        };

        match &existing {
            // First contribution lands inside the active tier's bounds
            None => {
                let active = LevelManager::active_level(&levels, total_usd);
                if usd < active.minimum || usd > active.maximum {
                    return Err(Error::OutOfTierBounds);
                }
            }
            // A repeat contribution may grow the cumulative value as long
            // as some tier's ceiling still covers it
            Some(_) => {
                if LevelManager::ceiling_level(&levels, new_value).is_none() {
                    return Err(Error::OutOfTierBounds);
                }
            }
        }

        let new_total = total_usd.checked_add(usd).ok_or(Error::OutOfTierBounds)?;

        // 4. Pull the tokens into escrow
        let client = token::Client::new(env, token_address);
        if client.balance(contributor) < amount {
            return Err(Error::TransferFailed);
        }
        client.transfer(contributor, &env.current_contract_address(), &amount);

        // Commit
        TokenManager::record_contribution(env, index, amount)?;
        env.storage().instance().set(&DataKey::TotalUsd, &new_total);

        let record = match existing {
            Some(record) => Collaborator {
                id: record.id,
                token: record.token,
                address: record.address,
                amount: new_amount,
                usd_value: new_value,
            },
            None => {
                let id = Self::get_collaborator_count(env);
                env.storage()
                    .instance()
                    .set(&DataKey::CollaboratorCount, &(id + 1));
                Collaborator {
                    id,
                    token: token_address.clone(),
                    address: contributor.clone(),
                    amount: new_amount,
                    usd_value: new_value,
                }
            }
        };
        let id = record.id;
        env.storage()
            .instance()
            .set(&DataKey::Collaborator(key), &record);

        env.events().publish(
            (Symbol::new(env, "contributed"), contributor.clone()),
            (token_address.clone(), amount, usd, id),
        );

        Ok(id)
    }

    pub fn get_collaborator(
        env: &Env,
        token_address: &Address,
        address: &Address,
    ) -> Result<Collaborator, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Collaborator(CollaboratorKey(
                token_address.clone(),
                address.clone(),
            )))
            .ok_or(Error::NotFound)
    }

    pub fn get_collaborator_id(
        env: &Env,
        token_address: &Address,
        address: &Address,
    ) -> Result<u32, Error> {
        Ok(Self::get_collaborator(env, token_address, address)?.id)
    }

    pub fn get_collaborator_count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::CollaboratorCount)
            .unwrap_or(0)
    }

    pub fn get_total_usd(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalUsd)
            .unwrap_or(0)
    }
}
