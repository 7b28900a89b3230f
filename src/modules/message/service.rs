use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::conversation::repository::ConversationRepository;
use crate::modules::conversation::repository_local::ConversationRepositoryLocal;
use crate::modules::message::repository::MessageRepository;
use crate::modules::message::repository_local::MessageRepositoryLocal;
use crate::modules::message::schema::MessageEntity;
use crate::utils::new_id;

pub type LocalMessageService = MessageService<MessageRepositoryLocal, ConversationRepositoryLocal>;

#[derive(Clone)]
pub struct MessageService<M, C>
where
    M: MessageRepository + Send + Sync,
    C: ConversationRepository + Send + Sync,
{
    message_repo: Arc<M>,
    conversation_repo: Arc<C>,
}

impl<M, C> MessageService<M, C>
where
    M: MessageRepository + Send + Sync,
    C: ConversationRepository + Send + Sync,
{
    pub fn with_dependencies(message_repo: Arc<M>, conversation_repo: Arc<C>) -> Self {
        MessageService { message_repo, conversation_repo }
    }

    /// Stores a message from `sender_id` to the other participant and
    /// refreshes the conversation's last-message cache.
    pub fn send_message(
        &self,
        sender_id: Uuid,
        conversation_id: Uuid,
        content: &str,
    ) -> Result<MessageEntity, error::SystemError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Message cannot be empty"));
        }

        let mut conversation = self
            .conversation_repo
            .find_by_id(&conversation_id)?
            .ok_or_else(|| error::SystemError::not_found("Conversation not found"))?;

        let receiver_id = conversation.other_participant(sender_id).ok_or_else(|| {
            error::SystemError::forbidden("You are not part of this conversation")
        })?;

        let message = MessageEntity {
            id: new_id(),
            sender_id,
            receiver_id,
            conversation_id: conversation.id,
            content: content.to_string(),
            timestamp: chrono::Utc::now(),
            read: false,
        };
        self.message_repo.save(&message)?;

        conversation.last_message = Some(message.content.clone());
        conversation.last_message_time = Some(message.timestamp);
        conversation.updated_at = message.timestamp;
        self.conversation_repo.save(&conversation)?;

        log::debug!("Message {} sent in conversation {}", message.id, conversation.id);
        Ok(message)
    }

    pub fn unread_count(&self, user_id: Uuid) -> Result<usize, error::SystemError> {
        self.message_repo.count_unread(&user_id)
    }

    /// Only the receiver may mark a message as read.
    pub fn mark_as_read(&self, user_id: Uuid, message_id: Uuid) -> Result<(), error::SystemError> {
        let message = self
            .message_repo
            .find_by_id(&message_id)?
            .ok_or_else(|| error::SystemError::not_found("Message not found"))?;

        if message.receiver_id != user_id {
            return Err(error::SystemError::forbidden("Only the receiver can mark a message as read"));
        }

        if !message.read {
            self.message_repo.mark_as_read(&message_id)?;
        }
        Ok(())
    }
}
