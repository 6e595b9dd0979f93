//! Skill Check Service - Authoring checks and resolving rolls against them
//!
//! Resolution draws a d20 through [`RandomPort`], classifies the outcome,
//! picks the narrative text and appends a [`RollResult`] to the roll log.
//! Red checks allow one attempt per character; the attempt is serialized
//! per (character, check) so two concurrent rolls cannot both get through.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use super::keyed_lock::KeyedLocks;
use super::{ServiceError, ServiceResult};
use crate::application::ports::outbound::{
    CharacterRepositoryPort, ClockPort, RandomPort, RollResultRepositoryPort,
    SkillCheckRepositoryPort,
};
use crate::domain::entities::{RollResult, SkillCheck};
use crate::domain::services::{resolve_with_die, RollOutcome, CHECK_DIE_SIDES};
use crate::domain::value_objects::{CharacterId, SkillCheckId};

/// Skill check service trait defining the application use cases
#[async_trait]
pub trait SkillCheckService: Send + Sync {
    /// Roll a d20 for an arbitrary skill value against a target number
    fn resolve(&self, skill_value: i32, target_number: i32) -> RollOutcome;

    /// Store a new skill check after validating it
    async fn create_skill_check(&self, check: SkillCheck) -> ServiceResult<SkillCheck>;

    /// Get a skill check by ID
    async fn get_skill_check(&self, id: SkillCheckId) -> ServiceResult<SkillCheck>;

    /// Roll the check for a character and record the result
    async fn resolve_skill_check(
        &self,
        character_id: CharacterId,
        skill_check_id: SkillCheckId,
    ) -> ServiceResult<RollResult>;

    /// Every roll a character has made, oldest first
    async fn roll_history(&self, character_id: CharacterId) -> ServiceResult<Vec<RollResult>>;

    /// Every roll made against a check, oldest first
    async fn check_history(&self, skill_check_id: SkillCheckId) -> ServiceResult<Vec<RollResult>>;
}

/// Default implementation of SkillCheckService
pub struct SkillCheckServiceImpl {
    characters: Arc<dyn CharacterRepositoryPort>,
    checks: Arc<dyn SkillCheckRepositoryPort>,
    rolls: Arc<dyn RollResultRepositoryPort>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
    attempt_locks: KeyedLocks<(CharacterId, SkillCheckId)>,
}

impl SkillCheckServiceImpl {
    pub fn new(
        characters: Arc<dyn CharacterRepositoryPort>,
        checks: Arc<dyn SkillCheckRepositoryPort>,
        rolls: Arc<dyn RollResultRepositoryPort>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            characters,
            checks,
            rolls,
            random,
            clock,
            attempt_locks: KeyedLocks::new(),
        }
    }
}

#[async_trait]
impl SkillCheckService for SkillCheckServiceImpl {
    fn resolve(&self, skill_value: i32, target_number: i32) -> RollOutcome {
        let die = self.random.roll_die(CHECK_DIE_SIDES);
        resolve_with_die(skill_value, target_number, die)
    }

    #[instrument(skip(self, check), fields(skill_check_id = %check.id, skill = %check.skill))]
    async fn create_skill_check(&self, check: SkillCheck) -> ServiceResult<SkillCheck> {
        check.validate()?;
        self.checks.create(&check).await?;
        info!(
            target_number = check.target_number(),
            kind = ?check.kind,
            "Created skill check"
        );
        Ok(check)
    }

    #[instrument(skip(self))]
    async fn get_skill_check(&self, id: SkillCheckId) -> ServiceResult<SkillCheck> {
        self.checks
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("SkillCheck", id))
    }

    #[instrument(skip(self))]
    async fn resolve_skill_check(
        &self,
        character_id: CharacterId,
        skill_check_id: SkillCheckId,
    ) -> ServiceResult<RollResult> {
        let character = self
            .characters
            .get(character_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Character", character_id))?;
        let check = self.get_skill_check(skill_check_id).await?;

        let _attempt = if check.kind.is_retryable() {
            None
        } else {
            let guard = self.attempt_locks.lock((character_id, skill_check_id)).await;
            let previous = self.rolls.list_for(character_id, skill_check_id).await?;
            if !previous.is_empty() {
                warn!(
                    character_id = %character_id,
                    skill_check_id = %skill_check_id,
                    "Rejected second attempt at red check"
                );
                return Err(ServiceError::invalid_state(format!(
                    "Red check {} was already attempted by character {}",
                    skill_check_id, character_id
                )));
            }
            Some(guard)
        };

        let skill_value = character.skill(check.skill);
        let outcome = self.resolve(skill_value, check.target_number());
        let text = check.outcome_text(&outcome);
        debug!(breakdown = %outcome.breakdown(), outcome = ?outcome.outcome_type(), "Roll resolved");

        let result = RollResult::record(
            character_id,
            skill_check_id,
            check.skill,
            &outcome,
            text,
            self.clock.now(),
        );
        self.rolls.append(&result).await?;

        info!(
            roll_id = %result.id,
            success = result.success,
            critical_success = result.critical_success,
            critical_failure = result.critical_failure,
            "Skill check resolved"
        );
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn roll_history(&self, character_id: CharacterId) -> ServiceResult<Vec<RollResult>> {
        Ok(self.rolls.list_by_character(character_id).await?)
    }

    #[instrument(skip(self))]
    async fn check_history(&self, skill_check_id: SkillCheckId) -> ServiceResult<Vec<RollResult>> {
        Ok(self.rolls.list_by_skill_check(skill_check_id).await?)
    }
}
