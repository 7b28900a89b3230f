use std::{cmp::Reverse, sync::Arc};
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        conversation::{
            model::{ConversationMessages, ConversationSummary, StoreStats},
            repository::ConversationRepository,
            repository_local::ConversationRepositoryLocal,
            schema::ConversationEntity,
        },
        message::{repository::MessageRepository, repository_local::MessageRepositoryLocal},
        user::{
            model::UserResponse, repository::UserRepository,
            repository_local::UserRepositoryLocal,
        },
    },
};

pub type LocalConversationService =
    ConversationService<ConversationRepositoryLocal, MessageRepositoryLocal, UserRepositoryLocal>;

#[derive(Clone)]
pub struct ConversationService<R, M, U>
where
    R: ConversationRepository + Send + Sync + 'static,
    M: MessageRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    conversation_repo: Arc<R>,
    message_repo: Arc<M>,
    user_repo: Arc<U>,
}

impl<R, M, U> ConversationService<R, M, U>
where
    R: ConversationRepository + Send + Sync + 'static,
    M: MessageRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn with_dependencies(
        conversation_repo: Arc<R>,
        message_repo: Arc<M>,
        user_repo: Arc<U>,
    ) -> Self {
        ConversationService { conversation_repo, message_repo, user_repo }
    }

    /// The conversation, provided `user_id` is one of its two participants.
    pub fn get_for_participant(
        &self,
        user_id: Uuid,
        conversation_id: Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        let conversation = self
            .conversation_repo
            .find_by_id(&conversation_id)?
            .ok_or_else(|| error::SystemError::not_found("Conversation not found"))?;

        if !conversation.involves(user_id) {
            return Err(error::SystemError::forbidden("You are not part of this conversation"));
        }

        Ok(conversation)
    }

    pub fn start_conversation(
        &self,
        user_id: Uuid,
        recipient_id: Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        if user_id == recipient_id {
            return Err(error::SystemError::bad_request(
                "You cannot start a conversation with yourself",
            ));
        }

        for id in [user_id, recipient_id] {
            if self.user_repo.find_by_id(&id)?.is_none() {
                return Err(error::SystemError::not_found("User not found"));
            }
        }

        self.conversation_repo.get_or_create(&user_id, &recipient_id)
    }

    /// Conversations of `user_id`, most recently updated first.
    pub fn list_conversations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, error::SystemError> {
        let mut conversations = self.conversation_repo.find_by_user(&user_id)?;
        conversations.sort_by_key(|c| Reverse(c.updated_at));

        conversations
            .into_iter()
            .map(|conversation| {
                let partner = match conversation.other_participant(user_id) {
                    Some(id) => self.user_repo.find_by_id(&id)?.map(UserResponse::from),
                    None => None,
                };
                let unread_count = self
                    .message_repo
                    .find_by_conversation(&conversation.id)?
                    .iter()
                    .filter(|m| m.receiver_id == user_id && !m.read)
                    .count();
                Ok::<_, error::SystemError>(ConversationSummary {
                    conversation,
                    partner,
                    unread_count,
                })
            })
            .collect()
    }

    pub fn store_stats(&self) -> Result<StoreStats, error::SystemError> {
        Ok(StoreStats {
            users: self.user_repo.find_all()?.len(),
            conversations: self.conversation_repo.find_all()?.len(),
            messages: self.message_repo.find_all()?.len(),
        })
    }

    /// Ordered messages of the conversation. Messages addressed to `user_id`
    /// are marked read on the way.
    pub fn open_conversation(
        &self,
        user_id: Uuid,
        conversation_id: Uuid,
    ) -> Result<ConversationMessages, error::SystemError> {
        let conversation = self.get_for_participant(user_id, conversation_id)?;

        let marked_read = self.message_repo.mark_conversation_read(&conversation.id, &user_id)?;
        let messages = self.message_repo.find_by_conversation(&conversation.id)?;

        Ok(ConversationMessages { conversation, messages, marked_read })
    }
}
