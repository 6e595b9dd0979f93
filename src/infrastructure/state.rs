//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::{ClockPort, RandomPort};
use crate::application::services::{
    CharacterServiceImpl, DialogueServiceImpl, QuestServiceImpl, SkillCheckServiceImpl,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::InMemoryRepository;
use crate::infrastructure::random::{StdRandom, SystemClock};
use crate::infrastructure::telemetry::init_tracing;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub repository: InMemoryRepository,
    // Application services
    pub character_service: Arc<CharacterServiceImpl>,
    pub skill_check_service: Arc<SkillCheckServiceImpl>,
    pub quest_service: Arc<QuestServiceImpl>,
    pub dialogue_service: Arc<DialogueServiceImpl>,
}

impl AppState {
    /// Load configuration from the environment, install tracing and wire services
    pub fn from_env() -> Result<Self> {
        let config = AppConfig::from_env()?;
        init_tracing(&config);
        tracing::info!(
            rng_seeded = config.rng_seed.is_some(),
            enforce_option_access = config.enforce_option_access,
            "Configuration loaded"
        );
        Ok(Self::new(config))
    }

    pub fn new(config: AppConfig) -> Self {
        let random = Arc::new(StdRandom::from_seed_option(config.rng_seed));
        Self::with_ports(config, random, Arc::new(SystemClock))
    }

    /// Wire services over explicit randomness and clock sources
    pub fn with_ports(
        config: AppConfig,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let repository = InMemoryRepository::new();

        let character_service = Arc::new(CharacterServiceImpl::new(Arc::new(
            repository.characters(),
        )));
        let skill_check_service = Arc::new(SkillCheckServiceImpl::new(
            Arc::new(repository.characters()),
            Arc::new(repository.skill_checks()),
            Arc::new(repository.roll_results()),
            random,
            clock,
        ));
        let quest_service = Arc::new(QuestServiceImpl::new(
            Arc::new(repository.quests()),
            Arc::new(repository.characters()),
        ));
        let dialogue_service = Arc::new(
            DialogueServiceImpl::new(
                Arc::new(repository.dialogues()),
                Arc::new(repository.characters()),
                Arc::new(repository.skill_checks()),
                skill_check_service.clone(),
                quest_service.clone(),
            )
            .with_option_access_enforced(config.enforce_option_access),
        );

        Self {
            config,
            repository,
            character_service,
            skill_check_service,
            quest_service,
            dialogue_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{MockClockPort, MockRandomPort};
    use crate::application::services::{
        CharacterService, CreateCharacterRequest, DialogueService, QuestService,
        SkillCheckService,
    };
    use crate::domain::entities::{
        DialogueOption, DialoguePost, OutcomeTexts, Quest, QuestStatus, SkillCheck,
    };
    use crate::domain::value_objects::{DifficultyTier, Skill};
    use chrono::Utc;

    fn state_with_faces(faces: Vec<i32>) -> AppState {
        let mut faces = faces.into_iter();
        let mut random = MockRandomPort::new();
        random
            .expect_roll_die()
            .returning(move |_| faces.next().unwrap_or(10));
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(Utc::now);
        AppState::with_ports(AppConfig::default(), Arc::new(random), Arc::new(clock))
    }

    #[tokio::test]
    async fn test_dialogue_check_drives_quest() {
        let state = state_with_faces(vec![12]);
        let character = state
            .character_service
            .create_character(CreateCharacterRequest {
                project_id: crate::domain::value_objects::ProjectId::new(),
                name: "Harry".to_string(),
                stats: vec![(Skill::Logic.into(), 5)],
            })
            .await
            .unwrap();
        let project_id = character.project_id;

        let dialogue = state
            .dialogue_service
            .create_dialogue(project_id, "Crime Scene".to_string())
            .await
            .unwrap();
        let opening = state
            .dialogue_service
            .add_post(DialoguePost::new(dialogue.id, 0, "The body sways.").with_speaker("Kim"))
            .await
            .unwrap();
        let insight = state
            .dialogue_service
            .add_post(DialoguePost::new(dialogue.id, 1, "The belt was cut."))
            .await
            .unwrap();
        let check = state
            .skill_check_service
            .create_skill_check(
                SkillCheck::new(project_id, Skill::Logic, DifficultyTier::Medium)
                    .with_dialogue(dialogue.id)
                    .with_texts(OutcomeTexts::simple("It was no suicide.", "Nothing adds up.")),
            )
            .await
            .unwrap();
        let quest = state
            .quest_service
            .create_quest(Quest::new(project_id, "Find the Murderer"))
            .await
            .unwrap();
        let option = state
            .dialogue_service
            .add_option(
                DialogueOption::new(dialogue.id, 0, "Study the knot")
                    .with_skill_check(check.id)
                    .with_next_post(insight.id)
                    .triggers_quest(quest.id),
            )
            .await
            .unwrap();

        let offered = state
            .dialogue_service
            .get_available_options(opening.id, Some(character.id))
            .await
            .unwrap();
        assert_eq!(offered.len(), 1);

        let response = state
            .dialogue_service
            .execute_dialogue_option(option.id, character.id)
            .await
            .unwrap();
        assert_eq!(response.roll_result.as_ref().unwrap().outcome_text, "It was no suicide.");
        assert_eq!(response.next_post_id, Some(insight.id));
        assert_eq!(response.quest_actions.len(), 1);

        let stored = state.quest_service.get_quest(quest.id).await.unwrap();
        assert_eq!(stored.status, QuestStatus::Active);
        assert_eq!(stored.assigned_character, Some(character.id));

        assert!(state
            .dialogue_service
            .validate_dialogue(dialogue.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            state.skill_check_service.roll_history(character.id).await.unwrap().len(),
            1
        );
    }

    #[test]
    fn test_seeded_state_builds() {
        let config = AppConfig {
            rng_seed: Some(7),
            ..AppConfig::default()
        };
        let state = AppState::new(config);
        let face = state.skill_check_service.resolve(0, 10).die;
        assert!((1..=20).contains(&face));
    }
}
