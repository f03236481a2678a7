use crate::types::{DataKey, Error};
use soroban_sdk::{Address, Env, Symbol};

pub struct AccessManager;

impl AccessManager {
    /// Store the owner and seed them into the admin set
    pub fn init(env: &Env, owner: &Address) {
        env.storage().instance().set(&DataKey::Owner, owner);
        env.storage()
            .instance()
            .set(&DataKey::Admin(owner.clone()), &true);
    }

    pub fn get_owner(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    pub fn is_admin(env: &Env, address: &Address) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Admin(address.clone()))
            .unwrap_or(false)
    }

    /// Verify the caller is the owner
    pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();

        let owner = Self::get_owner(env)?;
        if caller != &owner {
            return Err(Error::Unauthorized);
        }

        Ok(())
    }

    /// Verify the caller is in the admin set
    pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();

        // Initialization check first, so an empty contract reports NotInitialized
        Self::get_owner(env)?;

        if !Self::is_admin(env, caller) {
            return Err(Error::Unauthorized);
        }

        Ok(())
    }

    /// Add or remove an admin, owner only
    pub fn set_admin(
        env: &Env,
        caller: &Address,
        address: &Address,
        is_admin: bool,
    ) -> Result<(), Error> {
        Self::require_owner(env, caller)?;

        if is_admin {
            env.storage()
                .instance()
                .set(&DataKey::Admin(address.clone()), &true);
        } else {
            env.storage()
                .instance()
                .remove(&DataKey::Admin(address.clone()));
        }

        env.events().publish(
            (Symbol::new(env, "admin_set"), caller.clone()),
            (address.clone(), is_admin),
        );

        Ok(())
    }

    /// Hand the contract to a new owner, owner only
    pub fn transfer_ownership(env: &Env, caller: &Address, new_owner: &Address) -> Result<(), Error> {
        Self::require_owner(env, caller)?;

        env.storage().instance().set(&DataKey::Owner, new_owner);
        env.storage()
            .instance()
            .set(&DataKey::Admin(new_owner.clone()), &true);

        env.events().publish(
            (Symbol::new(env, "owner_changed"), caller.clone()),
            new_owner.clone(),
        );

        Ok(())
    }
}
