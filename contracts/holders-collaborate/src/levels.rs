use crate::access::AccessManager;
use crate::contribute::ContributionManager;
use crate::tokens::TokenManager;
use crate::types::{DataKey, Error, Level, Token};
use soroban_sdk::{Address, Env, Symbol, Vec};

/// Reward scalars are expressed in basis points
const REWARD_BPS: i128 = 10_000;

pub struct LevelManager;

impl LevelManager {
    /// Store the initial tier table
    pub fn init(env: &Env, levels: &Vec<Level>) -> Result<(), Error> {
        if levels.is_empty() {
            return Err(Error::ConfigError);
        }
        for level in levels.iter() {
            Self::validate_fields(&level)?;
        }
        Self::validate_table(levels)?;

        env.storage().instance().set(&DataKey::Levels, levels);

        Ok(())
    }

    pub fn get_levels(env: &Env) -> Result<Vec<Level>, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Levels)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_level(env: &Env, index: u32) -> Result<Level, Error> {
        let levels = Self::get_levels(env)?;
        levels.get(index).ok_or(Error::NotFound)
    }

    /// Append a tier, admin. The new tier must keep the table ordered and
    /// the escrow must cover the grown reward obligations.
    pub fn add_level(env: &Env, caller: &Address, level: Level) -> Result<(), Error> {
        AccessManager::require_admin(env, caller)?;
        Self::validate_fields(&level)?;

        let mut levels = Self::get_levels(env)?;
        levels.push_back(level.clone());
        Self::validate_table(&levels)?;

        let tokens = TokenManager::get_tokens(env)?;
        let collaborators = ContributionManager::get_collaborator_count(env);
        Self::verify_reserve(env, &tokens, &levels, collaborators)?;

        env.storage().instance().set(&DataKey::Levels, &levels);

        env.events().publish(
            (Symbol::new(env, "level_added"), caller.clone()),
            (level.order, level.threshold, level.reward),
        );

        Ok(())
    }

    /// Replace the tier at a storage index, admin. Raising the threshold or
    /// reward grows the obligations, so adequacy is re-checked before the
    /// table is committed.
    pub fn update_level(
        env: &Env,
        caller: &Address,
        index: u32,
        level: Level,
    ) -> Result<(), Error> {
        AccessManager::require_admin(env, caller)?;
        Self::validate_fields(&level)?;

        let mut levels = Self::get_levels(env)?;
        let current = levels.get(index).ok_or(Error::NotFound)?;

        levels.set(index, level.clone());
        Self::validate_table(&levels)?;

        if level.threshold > current.threshold || level.reward > current.reward {
            let tokens = TokenManager::get_tokens(env)?;
            let collaborators = ContributionManager::get_collaborator_count(env);
            Self::verify_reserve(env, &tokens, &levels, collaborators)?;
        }

        env.storage().instance().set(&DataKey::Levels, &levels);

        env.events().publish(
            (Symbol::new(env, "level_updated"), caller.clone()),
            (index, level.order, level.threshold, level.reward),
        );

        Ok(())
    }

    /// The tier currently accepting contributions: the lowest-order level
    /// whose threshold the total raised has not yet reached. Once every
    /// threshold is met the last tier stays active.
    pub fn active_level(levels: &Vec<Level>, total_usd: i128) -> Level {
        for level in levels.iter() {
            if total_usd < level.threshold {
                return level;
            }
        }
        levels.last_unchecked()
    }

    /// The tier bracketing a cumulative contribution value, by ceiling
    pub fn ceiling_level(levels: &Vec<Level>, usd_value: i128) -> Option<Level> {
        for level in levels.iter() {
            if usd_value <= level.maximum {
                return Some(level);
            }
        }
        None
    }

    /// USD reserve needed to pay the highest-reward tier to every
    /// registered collaborator at that tier's maximum contribution
    pub fn required_reserve_usd(levels: &Vec<Level>, collaborator_count: u32) -> i128 {
        let mut per_collaborator: i128 = 0;
        for level in levels.iter() {
            let payout = level
                .maximum
                .saturating_mul(level.reward)
                / REWARD_BPS;
            if payout > per_collaborator {
                per_collaborator = payout;
            }
        }
        per_collaborator.saturating_mul(collaborator_count as i128)
    }

    /// Funding adequacy: escrowed balances must cover the reward
    /// obligations implied by the tier table
    pub fn verify_reserve(
        env: &Env,
        tokens: &Vec<Token>,
        levels: &Vec<Level>,
        collaborator_count: u32,
    ) -> Result<(), Error> {
        let escrow = TokenManager::escrow_usd_value(env, tokens);
        let required = Self::required_reserve_usd(levels, collaborator_count);

        if escrow < required {
            return Err(Error::InsufficientReserve);
        }

        Ok(())
    }

    fn validate_fields(level: &Level) -> Result<(), Error> {
        if level.threshold <= 0
            || level.minimum <= 0
            || level.maximum <= 0
            || level.reward <= 0
            || level.maximum < level.minimum
        {
            return Err(Error::ConfigError);
        }
        Ok(())
    }

    /// Order must strictly increase; threshold and reward must never
    /// regress between consecutive tiers.
    fn validate_table(levels: &Vec<Level>) -> Result<(), Error> {
        let mut prev: Option<Level> = None;
        for level in levels.iter() {
            if let Some(p) = prev {
                if level.order <= p.order
                    || level.threshold < p.threshold
                    || level.reward < p.reward
                {
                    return Err(Error::ConfigError);
                }
            }
            prev = Some(level);
        }
        Ok(())
    }
}
