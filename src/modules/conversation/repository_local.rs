use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    configs::LocalStorage,
    constants::CONVERSATIONS_KEY,
    modules::conversation::{repository::ConversationRepository, schema::ConversationEntity},
    utils::new_id,
};

#[derive(Clone)]
pub struct ConversationRepositoryLocal {
    storage: Arc<LocalStorage>,
}

impl ConversationRepositoryLocal {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    fn conversations(&self) -> Vec<ConversationEntity> {
        self.storage.load_or_default(CONVERSATIONS_KEY)
    }
}

impl ConversationRepository for ConversationRepositoryLocal {
    fn save(
        &self,
        conversation: &ConversationEntity,
    ) -> Result<ConversationEntity, error::SystemError> {
        self.storage.update(CONVERSATIONS_KEY, |conversations: &mut Vec<ConversationEntity>| {
            match conversations.iter_mut().find(|c| c.id == conversation.id) {
                Some(existing) => *existing = conversation.clone(),
                None => conversations.push(conversation.clone()),
            }
        })?;
        Ok(conversation.clone())
    }

    fn find_by_id(&self, id: &Uuid) -> Result<Option<ConversationEntity>, error::SystemError> {
        Ok(self.conversations().into_iter().find(|c| c.id == *id))
    }

    fn get_or_create(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        let (id1, id2) = ConversationEntity::normalize_pair(*user_a, *user_b);

        if let Some(existing) = self.conversations().into_iter().find(|c| c.is_between(id1, id2)) {
            return Ok(existing);
        }

        // look again under the write lock so two callers cannot both create
        self.storage.update(CONVERSATIONS_KEY, |conversations: &mut Vec<ConversationEntity>| {
            if let Some(existing) = conversations.iter().find(|c| c.is_between(id1, id2)) {
                return existing.clone();
            }
            let conversation = ConversationEntity::between(new_id(), id1, id2);
            log::debug!("Created conversation {} between {} and {}", conversation.id, id1, id2);
            conversations.push(conversation.clone());
            conversation
        })
    }

    fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<ConversationEntity>, error::SystemError> {
        Ok(self.conversations().into_iter().filter(|c| c.involves(*user_id)).collect())
    }

    fn find_all(&self) -> Result<Vec<ConversationEntity>, error::SystemError> {
        Ok(self.conversations())
    }
}
