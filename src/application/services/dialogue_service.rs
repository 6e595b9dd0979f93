//! Dialogue Service - Option accessibility, branching and quest side effects
//!
//! Executing an option runs in a fixed order: accessibility, linked skill
//! check, branch selection, then quest actions. Every referenced id is
//! resolved before the roll is drawn so a bad reference never leaves a
//! half-applied execution behind.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use super::{QuestService, ServiceError, ServiceResult, SkillCheckService};
use crate::application::dto::{ExecuteOptionResponse, QuestActionRecord};
use crate::application::ports::outbound::{
    CharacterRepositoryPort, DialogueRepositoryPort, SkillCheckRepositoryPort,
};
use crate::domain::entities::{Character, Dialogue, DialogueOption, DialoguePost, ObjectiveRef};
use crate::domain::services::{validate_dialogue, DialogueIssue};
use crate::domain::value_objects::{
    validate_stat_value, CharacterId, DialogueId, OptionId, PostId, ProjectId,
};

/// Dialogue service trait defining the application use cases
#[async_trait]
pub trait DialogueService: Send + Sync {
    async fn create_dialogue(&self, project_id: ProjectId, title: String) -> ServiceResult<Dialogue>;

    async fn get_dialogue(&self, id: DialogueId) -> ServiceResult<Dialogue>;

    /// Add a post to an existing dialogue
    async fn add_post(&self, post: DialoguePost) -> ServiceResult<DialoguePost>;

    /// Add an option to an existing dialogue
    async fn add_option(&self, option: DialogueOption) -> ServiceResult<DialogueOption>;

    /// Set the externally managed condition flag of an option
    async fn set_option_condition(&self, option_id: OptionId, met: bool) -> ServiceResult<DialogueOption>;

    /// Toggle whether an option is offered at all
    async fn set_option_available(
        &self,
        option_id: OptionId,
        available: bool,
    ) -> ServiceResult<DialogueOption>;

    /// Options offered at a post, in order. With a character, only the
    /// options that character can access.
    async fn get_available_options(
        &self,
        post_id: PostId,
        character_id: Option<CharacterId>,
    ) -> ServiceResult<Vec<DialogueOption>>;

    /// Take an option: roll its check, pick the next node, fire quest actions
    async fn execute_dialogue_option(
        &self,
        option_id: OptionId,
        character_id: CharacterId,
    ) -> ServiceResult<ExecuteOptionResponse>;

    /// Fire the quest side effects of an option for a character
    async fn execute_quest_actions(
        &self,
        option: &DialogueOption,
        character_id: CharacterId,
    ) -> ServiceResult<Vec<QuestActionRecord>>;

    /// Report graph problems in a dialogue
    async fn validate_dialogue(&self, dialogue_id: DialogueId) -> ServiceResult<Vec<DialogueIssue>>;
}

/// Default implementation of DialogueService
pub struct DialogueServiceImpl {
    dialogues: Arc<dyn DialogueRepositoryPort>,
    characters: Arc<dyn CharacterRepositoryPort>,
    skill_checks: Arc<dyn SkillCheckRepositoryPort>,
    skill_check_service: Arc<dyn SkillCheckService>,
    quest_service: Arc<dyn QuestService>,
    enforce_option_access: bool,
}

impl DialogueServiceImpl {
    pub fn new(
        dialogues: Arc<dyn DialogueRepositoryPort>,
        characters: Arc<dyn CharacterRepositoryPort>,
        skill_checks: Arc<dyn SkillCheckRepositoryPort>,
        skill_check_service: Arc<dyn SkillCheckService>,
        quest_service: Arc<dyn QuestService>,
    ) -> Self {
        Self {
            dialogues,
            characters,
            skill_checks,
            skill_check_service,
            quest_service,
            enforce_option_access: true,
        }
    }

    /// Allow executing options the character cannot access
    pub fn with_option_access_enforced(mut self, enforce: bool) -> Self {
        self.enforce_option_access = enforce;
        self
    }

    async fn load_option(&self, option_id: OptionId) -> ServiceResult<DialogueOption> {
        self.dialogues
            .get_option(option_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("DialogueOption", option_id))
    }

    async fn load_character(&self, character_id: CharacterId) -> ServiceResult<Character> {
        self.characters
            .get(character_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Character", character_id))
    }

    async fn update_option(
        &self,
        option_id: OptionId,
        change: impl FnOnce(&mut DialogueOption) + Send,
    ) -> ServiceResult<DialogueOption> {
        let mut option = self.load_option(option_id).await?;
        change(&mut option);
        self.dialogues.update_option(&option).await?;
        Ok(option)
    }

    /// Resolve every quest and objective an option refers to
    async fn ensure_action_targets(&self, option: &DialogueOption) -> ServiceResult<()> {
        for quest_id in [option.quest_trigger, option.quest_completion].into_iter().flatten() {
            self.quest_service.get_quest(quest_id).await?;
        }
        for ObjectiveRef {
            quest_id,
            objective_id,
        } in [option.objective_trigger, option.objective_completion]
            .into_iter()
            .flatten()
        {
            let quest = self.quest_service.get_quest(quest_id).await?;
            if quest.objective(objective_id).is_none() {
                return Err(ServiceError::not_found("QuestObjective", objective_id));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DialogueService for DialogueServiceImpl {
    #[instrument(skip(self))]
    async fn create_dialogue(&self, project_id: ProjectId, title: String) -> ServiceResult<Dialogue> {
        if title.trim().is_empty() {
            return Err(ServiceError::Validation(
                "Dialogue title cannot be empty".to_string(),
            ));
        }
        let dialogue = Dialogue::new(project_id, title.trim());
        self.dialogues.create(&dialogue).await?;
        info!(dialogue_id = %dialogue.id, "Created dialogue: {}", dialogue.title);
        Ok(dialogue)
    }

    #[instrument(skip(self))]
    async fn get_dialogue(&self, id: DialogueId) -> ServiceResult<Dialogue> {
        self.dialogues
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Dialogue", id))
    }

    #[instrument(skip(self, post), fields(dialogue_id = %post.dialogue_id, order = post.order))]
    async fn add_post(&self, post: DialoguePost) -> ServiceResult<DialoguePost> {
        self.get_dialogue(post.dialogue_id).await?;
        self.dialogues.create_post(&post).await?;
        debug!(post_id = %post.id, "Added post");
        Ok(post)
    }

    #[instrument(skip(self, option), fields(dialogue_id = %option.dialogue_id, order = option.order))]
    async fn add_option(&self, option: DialogueOption) -> ServiceResult<DialogueOption> {
        self.get_dialogue(option.dialogue_id).await?;
        if let (Some(stat), Some(minimum)) = (option.required_skill, option.required_skill_value) {
            validate_stat_value(stat, minimum)?;
        }
        self.dialogues.create_option(&option).await?;
        debug!(option_id = %option.id, "Added option");
        Ok(option)
    }

    #[instrument(skip(self))]
    async fn set_option_condition(&self, option_id: OptionId, met: bool) -> ServiceResult<DialogueOption> {
        self.update_option(option_id, |option| option.condition_met = met)
            .await
    }

    #[instrument(skip(self))]
    async fn set_option_available(
        &self,
        option_id: OptionId,
        available: bool,
    ) -> ServiceResult<DialogueOption> {
        self.update_option(option_id, |option| option.is_available = available)
            .await
    }

    #[instrument(skip(self))]
    async fn get_available_options(
        &self,
        post_id: PostId,
        character_id: Option<CharacterId>,
    ) -> ServiceResult<Vec<DialogueOption>> {
        let post = self
            .dialogues
            .get_post(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("DialoguePost", post_id))?;

        let mut options: Vec<DialogueOption> = self
            .dialogues
            .list_options(post.dialogue_id)
            .await?
            .into_iter()
            .filter(|option| option.order >= post.order)
            .collect();
        options.sort_by_key(|option| option.order);

        if let Some(character_id) = character_id {
            let character = self.load_character(character_id).await?;
            options.retain(|option| option.is_accessible(&character));
        }

        debug!(count = options.len(), "Options offered");
        Ok(options)
    }

    #[instrument(skip(self))]
    async fn execute_dialogue_option(
        &self,
        option_id: OptionId,
        character_id: CharacterId,
    ) -> ServiceResult<ExecuteOptionResponse> {
        let option = self.load_option(option_id).await?;
        let character = self.load_character(character_id).await?;

        if self.enforce_option_access && !option.is_accessible(&character) {
            warn!(option_id = %option_id, character_id = %character_id, "Rejected inaccessible option");
            return Err(ServiceError::invalid_state(format!(
                "Option {} is not accessible to character {}",
                option_id, character_id
            )));
        }
        self.ensure_action_targets(&option).await?;

        let roll_result = match option.skill_check_id {
            Some(check_id) => Some(
                self.skill_check_service
                    .resolve_skill_check(character_id, check_id)
                    .await?,
            ),
            None => None,
        };

        let failed_check = roll_result.as_ref().is_some_and(|roll| !roll.success);
        let next_post_id = match option.failure_post_id {
            Some(failure_post) if failed_check => Some(failure_post),
            _ => option.next_post_id,
        };

        let quest_actions = self.execute_quest_actions(&option, character_id).await?;

        info!(
            option_id = %option_id,
            rolled = roll_result.is_some(),
            failed_check,
            actions = quest_actions.len(),
            "Dialogue option executed"
        );

        Ok(ExecuteOptionResponse {
            next_dialogue_id: option.next_dialogue_id,
            option,
            quest_actions,
            roll_result: roll_result.map(Into::into),
            next_post_id,
        })
    }

    #[instrument(skip(self, option), fields(option_id = %option.id))]
    async fn execute_quest_actions(
        &self,
        option: &DialogueOption,
        character_id: CharacterId,
    ) -> ServiceResult<Vec<QuestActionRecord>> {
        let mut actions = Vec::new();

        if let Some(quest_id) = option.quest_trigger {
            let response = self.quest_service.start_quest(quest_id, character_id).await?;
            if response.started {
                actions.push(QuestActionRecord::QuestStarted {
                    quest_id,
                    title: response.quest.title,
                });
            }
        }

        if let Some(quest_id) = option.quest_completion {
            if let Some(quest) = self
                .quest_service
                .complete_quest_for(quest_id, character_id)
                .await?
            {
                actions.push(QuestActionRecord::QuestCompleted {
                    quest_id,
                    title: quest.title,
                });
            }
        }

        if let Some(target) = option.objective_trigger {
            if let Some(update) = self
                .quest_service
                .update_objective_progress_for(target.quest_id, target.objective_id, character_id, 1)
                .await?
            {
                actions.push(QuestActionRecord::ObjectiveProgressed {
                    quest_id: target.quest_id,
                    objective_id: target.objective_id,
                    current_count: update.objective.current_count,
                    required_count: update.objective.required_count,
                });
            }
        }

        if let Some(target) = option.objective_completion {
            let update = self
                .quest_service
                .complete_objective_for(target.quest_id, target.objective_id, character_id)
                .await?;
            if update.is_some_and(|update| update.objective_completed) {
                actions.push(QuestActionRecord::ObjectiveCompleted {
                    quest_id: target.quest_id,
                    objective_id: target.objective_id,
                });
            }
        }

        Ok(actions)
    }

    #[instrument(skip(self))]
    async fn validate_dialogue(&self, dialogue_id: DialogueId) -> ServiceResult<Vec<DialogueIssue>> {
        let dialogue = self.get_dialogue(dialogue_id).await?;
        let posts = self.dialogues.list_posts(dialogue_id).await?;
        let options = self.dialogues.list_options(dialogue_id).await?;
        let known_checks: HashSet<_> = self
            .skill_checks
            .list_ids_by_project(dialogue.project_id)
            .await?
            .into_iter()
            .collect();

        let issues = validate_dialogue(&posts, &options, &known_checks);
        let errors = issues.iter().filter(|issue| issue.is_error()).count();
        debug!(issues = issues.len(), errors, "Dialogue validated");
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{MockRandomPort, RandomPort, RollResultRepositoryPort};
    use crate::application::services::{QuestServiceImpl, SkillCheckServiceImpl};
    use crate::domain::entities::{
        OutcomeTexts, Quest, QuestObjective, QuestStatus, SkillCheck,
    };
    use crate::domain::services::IssueKind;
    use crate::domain::value_objects::{DifficultyTier, QuestId, Skill, SkillCheckId};
    use crate::infrastructure::persistence::InMemoryRepository;
    use crate::infrastructure::random::SystemClock;

    struct Fixture {
        repository: InMemoryRepository,
        service: DialogueServiceImpl,
        quests: Arc<QuestServiceImpl>,
        project_id: ProjectId,
        dialogue: Dialogue,
    }

    impl Fixture {
        async fn new(faces: Vec<i32>) -> Self {
            let mut faces = faces.into_iter();
            let mut random = MockRandomPort::new();
            random
                .expect_roll_die()
                .returning(move |_| faces.next().unwrap_or(10));
            Self::with_random(Arc::new(random)).await
        }

        async fn with_random(random: Arc<dyn RandomPort>) -> Self {
            let repository = InMemoryRepository::new();
            let quests = Arc::new(QuestServiceImpl::new(
                Arc::new(repository.quests()),
                Arc::new(repository.characters()),
            ));
            let checks = Arc::new(SkillCheckServiceImpl::new(
                Arc::new(repository.characters()),
                Arc::new(repository.skill_checks()),
                Arc::new(repository.roll_results()),
                random,
                Arc::new(SystemClock),
            ));
            let service = DialogueServiceImpl::new(
                Arc::new(repository.dialogues()),
                Arc::new(repository.characters()),
                Arc::new(repository.skill_checks()),
                checks,
                quests.clone(),
            );
            let project_id = ProjectId::new();
            let dialogue = service
                .create_dialogue(project_id, "Interrogation".to_string())
                .await
                .unwrap();
            Self {
                repository,
                service,
                quests,
                project_id,
                dialogue,
            }
        }

        async fn character(&self, logic: i32) -> CharacterId {
            let character = Character::new(self.project_id, "Harry")
                .with_skill(Skill::Logic, logic)
                .unwrap();
            self.repository.characters().create(&character).await.unwrap();
            character.id
        }

        async fn post(&self, order: u32, text: &str) -> DialoguePost {
            self.service
                .add_post(DialoguePost::new(self.dialogue.id, order, text))
                .await
                .unwrap()
        }

        async fn option(&self, option: DialogueOption) -> DialogueOption {
            self.service.add_option(option).await.unwrap()
        }

        fn new_option(&self, order: u32, text: &str) -> DialogueOption {
            DialogueOption::new(self.dialogue.id, order, text)
        }

        async fn check(&self, difficulty: DifficultyTier) -> SkillCheck {
            let check = SkillCheck::new(self.project_id, Skill::Logic, difficulty)
                .with_texts(OutcomeTexts::simple("Clear.", "Murky."));
            self.repository.skill_checks().create(&check).await.unwrap();
            check
        }
    }

    #[tokio::test]
    async fn test_options_from_post_order_onwards() {
        let fx = Fixture::new(vec![]).await;
        let _opening = fx.post(0, "Who are you?").await;
        let middle = fx.post(1, "Why are you here?").await;
        fx.option(fx.new_option(0, "I'm a cop.")).await;
        fx.option(fx.new_option(2, "Leave.")).await;
        fx.option(fx.new_option(1, "Investigating.")).await;

        let offered = fx.service.get_available_options(middle.id, None).await.unwrap();
        let orders: Vec<u32> = offered.iter().map(|o| o.order).collect();
        assert_eq!(orders, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_character_filter_applies_skill_gate() {
        let fx = Fixture::new(vec![]).await;
        let post = fx.post(0, "The body hangs there.").await;
        let gated = fx
            .option(fx.new_option(0, "Deduce the motive").with_requirement(Skill::Logic, 10))
            .await;
        fx.option(fx.new_option(1, "Look away")).await;
        let character_id = fx.character(8).await;

        let offered = fx
            .service
            .get_available_options(post.id, Some(character_id))
            .await
            .unwrap();
        assert_eq!(offered.len(), 1);
        assert_eq!(offered[0].text, "Look away");

        let all = fx.service.get_available_options(post.id, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|o| o.id == gated.id));
    }

    #[tokio::test]
    async fn test_condition_and_availability_setters() {
        let fx = Fixture::new(vec![]).await;
        let post = fx.post(0, "Hello.").await;
        let option = fx.option(fx.new_option(0, "Mention the tie")).await;
        let character_id = fx.character(5).await;

        fx.service.set_option_condition(option.id, false).await.unwrap();
        assert!(fx
            .service
            .get_available_options(post.id, Some(character_id))
            .await
            .unwrap()
            .is_empty());

        fx.service.set_option_condition(option.id, true).await.unwrap();
        let hidden = fx.service.set_option_available(option.id, false).await.unwrap();
        assert!(!hidden.is_available);
        assert!(fx
            .service
            .get_available_options(post.id, Some(character_id))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_execute_success_follows_next_post() {
        let fx = Fixture::new(vec![12]).await;
        let next = fx.post(1, "The rope was cut.").await;
        let failure = fx.post(2, "You see nothing.").await;
        let check = fx.check(DifficultyTier::Medium).await;
        let option = fx
            .option(
                fx.new_option(0, "Examine the rope")
                    .with_skill_check(check.id)
                    .with_next_post(next.id)
                    .with_failure_post(failure.id),
            )
            .await;
        let character_id = fx.character(5).await;

        let response = fx
            .service
            .execute_dialogue_option(option.id, character_id)
            .await
            .unwrap();
        let roll = response.roll_result.as_ref().unwrap();
        assert_eq!(roll.total, 17);
        assert_eq!(roll.outcome_text, "Clear.");
        assert_eq!(response.check_passed(), Some(true));
        assert_eq!(response.next_post_id, Some(next.id));
    }

    #[tokio::test]
    async fn test_execute_failure_branches_to_failure_post() {
        let fx = Fixture::new(vec![3]).await;
        let next = fx.post(1, "The rope was cut.").await;
        let failure = fx.post(2, "You see nothing.").await;
        let check = fx.check(DifficultyTier::Medium).await;
        let option = fx
            .option(
                fx.new_option(0, "Examine the rope")
                    .with_skill_check(check.id)
                    .with_next_post(next.id)
                    .with_failure_post(failure.id),
            )
            .await;
        let character_id = fx.character(5).await;

        let response = fx
            .service
            .execute_dialogue_option(option.id, character_id)
            .await
            .unwrap();
        assert_eq!(response.check_passed(), Some(false));
        assert_eq!(response.next_post_id, Some(failure.id));
    }

    #[tokio::test]
    async fn test_execute_without_check_uses_links() {
        let fx = Fixture::new(vec![]).await;
        let elsewhere = fx
            .service
            .create_dialogue(fx.project_id, "Boardwalk".to_string())
            .await
            .unwrap();
        let option = fx
            .option(fx.new_option(0, "Walk outside").with_next_dialogue(elsewhere.id))
            .await;
        let character_id = fx.character(1).await;

        let response = fx
            .service
            .execute_dialogue_option(option.id, character_id)
            .await
            .unwrap();
        assert!(response.roll_result.is_none());
        assert_eq!(response.next_post_id, None);
        assert_eq!(response.next_dialogue_id, Some(elsewhere.id));
    }

    #[tokio::test]
    async fn test_inaccessible_option_is_rejected_before_rolling() {
        let fx = Fixture::new(vec![20]).await;
        let check = fx.check(DifficultyTier::Trivial).await;
        let option = fx
            .option(
                fx.new_option(0, "Deduce the motive")
                    .with_requirement(Skill::Logic, 10)
                    .with_skill_check(check.id),
            )
            .await;
        let character_id = fx.character(8).await;

        let err = fx
            .service
            .execute_dialogue_option(option.id, character_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        assert!(fx.repository.roll_results().list_by_character(character_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_access_enforcement_can_be_disabled() {
        let mut fx = Fixture::new(vec![]).await;
        fx.service = fx.service.with_option_access_enforced(false);
        let option = fx
            .option(fx.new_option(0, "Deduce the motive").with_requirement(Skill::Logic, 10))
            .await;
        let character_id = fx.character(8).await;

        assert!(fx
            .service
            .execute_dialogue_option(option.id, character_id)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_quest_actions_fire_in_order() {
        let fx = Fixture::new(vec![]).await;
        let character_id = fx.character(5).await;

        let objective = QuestObjective::new("Question the witness", 2);
        let objective_id = objective.id;
        let quest = fx
            .quests
            .create_quest(
                Quest::new(fx.project_id, "Find the Murderer")
                    .with_max_progress(2)
                    .with_objective(objective),
            )
            .await
            .unwrap();

        let start = fx
            .option(
                fx.new_option(0, "I'll take the case")
                    .triggers_quest(quest.id)
                    .triggers_objective(quest.id, objective_id),
            )
            .await;
        let response = fx
            .service
            .execute_dialogue_option(start.id, character_id)
            .await
            .unwrap();
        assert_eq!(
            response.quest_actions,
            vec![
                QuestActionRecord::QuestStarted {
                    quest_id: quest.id,
                    title: "Find the Murderer".to_string(),
                },
                QuestActionRecord::ObjectiveProgressed {
                    quest_id: quest.id,
                    objective_id,
                    current_count: 1,
                    required_count: 2,
                },
            ]
        );

        let witness = fx
            .option(fx.new_option(1, "That settles it").completes_objective(quest.id, objective_id))
            .await;
        let response = fx
            .service
            .execute_dialogue_option(witness.id, character_id)
            .await
            .unwrap();
        assert_eq!(
            response.quest_actions,
            vec![QuestActionRecord::ObjectiveCompleted {
                quest_id: quest.id,
                objective_id,
            }]
        );

        let finish = fx
            .option(fx.new_option(2, "Case closed").completes_quest(quest.id))
            .await;
        let response = fx
            .service
            .execute_dialogue_option(finish.id, character_id)
            .await
            .unwrap();
        assert_eq!(
            response.quest_actions,
            vec![QuestActionRecord::QuestCompleted {
                quest_id: quest.id,
                title: "Find the Murderer".to_string(),
            }]
        );
        let stored = fx.quests.get_quest(quest.id).await.unwrap();
        assert_eq!(stored.status, QuestStatus::Completed);
        assert!(stored.objective(objective_id).unwrap().is_completed);
    }

    #[tokio::test]
    async fn test_unmet_quest_actions_are_skipped() {
        let fx = Fixture::new(vec![]).await;
        let character_id = fx.character(5).await;
        let objective = QuestObjective::new("Read the graffiti", 1);
        let objective_id = objective.id;
        let quest = fx
            .quests
            .create_quest(Quest::new(fx.project_id, "Later").with_objective(objective).locked())
            .await
            .unwrap();

        let option = fx
            .option(
                fx.new_option(0, "Ask about it")
                    .triggers_quest(quest.id)
                    .completes_quest(quest.id)
                    .triggers_objective(quest.id, objective_id)
                    .completes_objective(quest.id, objective_id),
            )
            .await;
        let response = fx
            .service
            .execute_dialogue_option(option.id, character_id)
            .await
            .unwrap();
        assert!(response.quest_actions.is_empty());
        let stored = fx.quests.get_quest(quest.id).await.unwrap();
        assert_eq!(stored.status, QuestStatus::Locked);
        assert_eq!(stored.progress, 0);
        assert!(!stored.objective(objective_id).unwrap().is_completed);
    }

    #[tokio::test]
    async fn test_dangling_quest_reference_fails_before_rolling() {
        let fx = Fixture::new(vec![15]).await;
        let check = fx.check(DifficultyTier::Easy).await;
        let option = fx
            .option(
                fx.new_option(0, "Promise help")
                    .with_skill_check(check.id)
                    .triggers_quest(QuestId::new()),
            )
            .await;
        let character_id = fx.character(5).await;

        let err = fx
            .service
            .execute_dialogue_option(option.id, character_id)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(fx.repository.roll_results().list_by_skill_check(check.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_option_rejects_out_of_range_threshold() {
        let fx = Fixture::new(vec![]).await;
        let err = fx
            .service
            .add_option(fx.new_option(0, "Impossible").with_requirement(Skill::Logic, 25))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = fx
            .service
            .add_option(DialogueOption::new(DialogueId::new(), 0, "Nowhere"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_validate_dialogue_reports_issues() {
        let fx = Fixture::new(vec![]).await;
        let _opening = fx.post(0, "Hello.").await;
        let _stranded = fx.post(1, "Unreachable.").await;
        let check = fx.check(DifficultyTier::Easy).await;
        fx.option(fx.new_option(0, "Fine").with_skill_check(check.id)).await;
        fx.option(
            fx.new_option(1, "Broken")
                .with_next_post(PostId::new())
                .with_skill_check(SkillCheckId::new()),
        )
        .await;

        let issues = fx.service.validate_dialogue(fx.dialogue.id).await.unwrap();
        let kinds: Vec<IssueKind> = issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::MissingConnection,
                IssueKind::InvalidSkillCheck,
                IssueKind::OrphanedPost
            ]
        );
    }
}
