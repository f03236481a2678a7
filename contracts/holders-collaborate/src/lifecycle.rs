use crate::access::AccessManager;
use crate::types::{CollaborationStatus, DataKey, Error};
use soroban_sdk::{Address, Env, Symbol};

pub struct LifecycleManager;

impl LifecycleManager {
    /// Store the initial window and status
    pub fn init(env: &Env, start: u64, end: u64) -> Result<(), Error> {
        if start >= end {
            return Err(Error::ConfigError);
        }

        env.storage().instance().set(&DataKey::Start, &start);
        env.storage().instance().set(&DataKey::End, &end);
        env.storage()
            .instance()
            .set(&DataKey::Status, &CollaborationStatus::Pending);

        Ok(())
    }

    pub fn get_status(env: &Env) -> Result<CollaborationStatus, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Status)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_start(env: &Env) -> Result<u64, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Start)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_end(env: &Env) -> Result<u64, Error> {
        env.storage()
            .instance()
            .get(&DataKey::End)
            .ok_or(Error::NotInitialized)
    }

    /// Transition the lifecycle status, owner only. Any transition is
    /// permitted; only the contribution gate cares about the value.
    pub fn update_status(
        env: &Env,
        caller: &Address,
        new_status: CollaborationStatus,
    ) -> Result<(), Error> {
        AccessManager::require_owner(env, caller)?;

        env.storage().instance().set(&DataKey::Status, &new_status);

        env.events().publish(
            (Symbol::new(env, "status_changed"), caller.clone()),
            new_status,
        );

        Ok(())
    }

    /// Move the contribution window, admin. Recorded contributions are
    /// untouched.
    pub fn update_window(
        env: &Env,
        caller: &Address,
        new_start: u64,
        new_end: u64,
    ) -> Result<(), Error> {
        AccessManager::require_admin(env, caller)?;

        if new_start >= new_end {
            return Err(Error::ConfigError);
        }

        env.storage().instance().set(&DataKey::Start, &new_start);
        env.storage().instance().set(&DataKey::End, &new_end);

        env.events().publish(
            (Symbol::new(env, "window_updated"), caller.clone()),
            (new_start, new_end),
        );

        Ok(())
    }

    /// Contribution gate: status must be Active and now inside [start, end).
    /// Both conditions are independently necessary.
    pub fn is_open(env: &Env) -> Result<bool, Error> {
        let status = Self::get_status(env)?;
        let start = Self::get_start(env)?;
        let end = Self::get_end(env)?;
        let now = env.ledger().timestamp();

        Ok(status == CollaborationStatus::Active && now >= start && now < end)
    }
}
