//! Dialogue repository implementation for the in-memory store

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use super::store::InMemoryStore;
use crate::application::ports::outbound::DialogueRepositoryPort;
use crate::domain::entities::{Dialogue, DialogueOption, DialoguePost};
use crate::domain::value_objects::{DialogueId, OptionId, PostId};

/// Repository for dialogues, posts and options
pub struct InMemoryDialogueRepository {
    store: InMemoryStore,
}

impl InMemoryDialogueRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    async fn ensure_dialogue(&self, dialogue_id: DialogueId) -> Result<()> {
        if !self.store.dialogues.read().await.contains_key(&dialogue_id) {
            bail!("Dialogue {} does not exist", dialogue_id);
        }
        Ok(())
    }
}

#[async_trait]
impl DialogueRepositoryPort for InMemoryDialogueRepository {
    async fn create(&self, dialogue: &Dialogue) -> Result<()> {
        let mut dialogues = self.store.dialogues.write().await;
        if dialogues.contains_key(&dialogue.id) {
            bail!("Dialogue {} already exists", dialogue.id);
        }
        dialogues.insert(dialogue.id, dialogue.clone());
        Ok(())
    }

    async fn get(&self, id: DialogueId) -> Result<Option<Dialogue>> {
        Ok(self.store.dialogues.read().await.get(&id).cloned())
    }

    async fn create_post(&self, post: &DialoguePost) -> Result<()> {
        self.ensure_dialogue(post.dialogue_id)
            .await
            .context("Failed to create dialogue post")?;
        self.store.posts.write().await.insert(post.id, post.clone());
        Ok(())
    }

    async fn get_post(&self, id: PostId) -> Result<Option<DialoguePost>> {
        Ok(self.store.posts.read().await.get(&id).cloned())
    }

    async fn list_posts(&self, dialogue_id: DialogueId) -> Result<Vec<DialoguePost>> {
        let mut posts: Vec<DialoguePost> = self
            .store
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.dialogue_id == dialogue_id)
            .cloned()
            .collect();
        posts.sort_by_key(|p| p.order);
        Ok(posts)
    }

    async fn create_option(&self, option: &DialogueOption) -> Result<()> {
        self.ensure_dialogue(option.dialogue_id)
            .await
            .context("Failed to create dialogue option")?;
        self.store.options.write().await.insert(option.id, option.clone());
        Ok(())
    }

    async fn get_option(&self, id: OptionId) -> Result<Option<DialogueOption>> {
        Ok(self.store.options.read().await.get(&id).cloned())
    }

    async fn update_option(&self, option: &DialogueOption) -> Result<()> {
        let mut options = self.store.options.write().await;
        let slot = options
            .get_mut(&option.id)
            .with_context(|| format!("Cannot update missing option {}", option.id))?;
        *slot = option.clone();
        Ok(())
    }

    async fn list_options(&self, dialogue_id: DialogueId) -> Result<Vec<DialogueOption>> {
        let mut options: Vec<DialogueOption> = self
            .store
            .options
            .read()
            .await
            .values()
            .filter(|o| o.dialogue_id == dialogue_id)
            .cloned()
            .collect();
        options.sort_by_key(|o| o.order);
        Ok(options)
    }
}
