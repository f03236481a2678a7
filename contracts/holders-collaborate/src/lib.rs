#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};

pub mod access;
pub mod contribute;
pub mod levels;
pub mod lifecycle;
pub mod tokens;
pub mod types;

use access::AccessManager;
use contribute::ContributionManager;
use levels::LevelManager;
use lifecycle::LifecycleManager;
use tokens::TokenManager;
use types::{Collaborator, CollaborationStatus, DataKey, Error, Level, Token};

/// Main contract trait defining all available functions
pub trait HoldersCollaborateTrait {
    // Setup
    fn initialize(
        env: Env,
        owner: Address,
        tokens: Vec<Token>,
        levels: Vec<Level>,
        start: u64,
        end: u64,
    ) -> Result<(), Error>;

    // Roles and lifecycle, owner only
    fn set_admin(env: Env, caller: Address, address: Address, is_admin: bool) -> Result<(), Error>;
    fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error>;
    fn update_status(env: Env, caller: Address, new_status: CollaborationStatus)
        -> Result<(), Error>;

    // Configuration, admin
    fn update_token(env: Env, caller: Address, token: Address, usd_price: i128)
        -> Result<(), Error>;
    fn update_level(env: Env, caller: Address, index: u32, level: Level) -> Result<(), Error>;
    fn add_level(env: Env, caller: Address, level: Level) -> Result<(), Error>;
    fn update_start_end_time(
        env: Env,
        caller: Address,
        new_start: u64,
        new_end: u64,
    ) -> Result<(), Error>;

    // Contribution flow
    fn contribute(env: Env, contributor: Address, token: Address, amount: i128)
        -> Result<u32, Error>;

    // Read accessors
    fn get_owner(env: Env) -> Result<Address, Error>;
    fn is_admin(env: Env, address: Address) -> bool;
    fn get_status(env: Env) -> Result<CollaborationStatus, Error>;
    fn get_start(env: Env) -> Result<u64, Error>;
    fn get_end(env: Env) -> Result<u64, Error>;
    fn get_token(env: Env, index: u32) -> Result<Token, Error>;
    fn get_tokens(env: Env) -> Result<Vec<Token>, Error>;
    fn get_level(env: Env, index: u32) -> Result<Level, Error>;
    fn get_levels(env: Env) -> Result<Vec<Level>, Error>;
    fn get_collaborator(env: Env, token: Address, address: Address) -> Result<Collaborator, Error>;
    fn get_collaborator_id(env: Env, token: Address, address: Address) -> Result<u32, Error>;
    fn get_collaborator_count(env: Env) -> u32;
    fn get_total_usd_raised(env: Env) -> i128;
}

#[contract]
pub struct HoldersCollaborate;

#[contractimpl]
impl HoldersCollaborateTrait for HoldersCollaborate {
    /// One-time setup: owner, accepted tokens, tier table and the
    /// contribution window. Status starts at Pending.
    fn initialize(
        env: Env,
        owner: Address,
        tokens: Vec<Token>,
        levels: Vec<Level>,
        start: u64,
        end: u64,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        AccessManager::init(&env, &owner);
        TokenManager::init(&env, &tokens)?;
        LevelManager::init(&env, &levels)?;
        LifecycleManager::init(&env, start, end)?;
        ContributionManager::init(&env);

        env.events()
            .publish((Symbol::new(&env, "initialized"),), (owner, start, end));

        Ok(())
    }

    fn set_admin(env: Env, caller: Address, address: Address, is_admin: bool) -> Result<(), Error> {
        AccessManager::set_admin(&env, &caller, &address, is_admin)
    }

    fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        AccessManager::transfer_ownership(&env, &caller, &new_owner)
    }

    fn update_status(
        env: Env,
        caller: Address,
        new_status: CollaborationStatus,
    ) -> Result<(), Error> {
        LifecycleManager::update_status(&env, &caller, new_status)
    }

    fn update_token(
        env: Env,
        caller: Address,
        token: Address,
        usd_price: i128,
    ) -> Result<(), Error> {
        TokenManager::update_token(&env, &caller, &token, usd_price)
    }

    fn update_level(env: Env, caller: Address, index: u32, level: Level) -> Result<(), Error> {
        LevelManager::update_level(&env, &caller, index, level)
    }

    fn add_level(env: Env, caller: Address, level: Level) -> Result<(), Error> {
        LevelManager::add_level(&env, &caller, level)
    }

    fn update_start_end_time(
        env: Env,
        caller: Address,
        new_start: u64,
        new_end: u64,
    ) -> Result<(), Error> {
        LifecycleManager::update_window(&env, &caller, new_start, new_end)
    }

    /// Contribute `amount` of `token`. Returns the collaborator's id,
    /// assigned at first contribution.
    fn contribute(
        env: Env,
        contributor: Address,
        token: Address,
        amount: i128,
    ) -> Result<u32, Error> {
        contributor.require_auth();
        ContributionManager::contribute(&env, &contributor, &token, amount)
    }

    fn get_owner(env: Env) -> Result<Address, Error> {
        AccessManager::get_owner(&env)
    }

    fn is_admin(env: Env, address: Address) -> bool {
        AccessManager::is_admin(&env, &address)
    }

    fn get_status(env: Env) -> Result<CollaborationStatus, Error> {
        LifecycleManager::get_status(&env)
    }

    fn get_start(env: Env) -> Result<u64, Error> {
        LifecycleManager::get_start(&env)
    }

    fn get_end(env: Env) -> Result<u64, Error> {
        LifecycleManager::get_end(&env)
    }

    fn get_token(env: Env, index: u32) -> Result<Token, Error> {
        TokenManager::get_token(&env, index)
    }

    fn get_tokens(env: Env) -> Result<Vec<Token>, Error> {
        TokenManager::get_tokens(&env)
    }

    fn get_level(env: Env, index: u32) -> Result<Level, Error> {
        LevelManager::get_level(&env, index)
    }

    fn get_levels(env: Env) -> Result<Vec<Level>, Error> {
        LevelManager::get_levels(&env)
    }

    fn get_collaborator(env: Env, token: Address, address: Address) -> Result<Collaborator, Error> {
        ContributionManager::get_collaborator(&env, &token, &address)
    }

    fn get_collaborator_id(env: Env, token: Address, address: Address) -> Result<u32, Error> {
        ContributionManager::get_collaborator_id(&env, &token, &address)
    }

    fn get_collaborator_count(env: Env) -> u32 {
        ContributionManager::get_collaborator_count(&env)
    }

    fn get_total_usd_raised(env: Env) -> i128 {
        ContributionManager::get_total_usd(&env)
    }
}
