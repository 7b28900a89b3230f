use uuid::Uuid;

use crate::{api::error, modules::conversation::schema::ConversationEntity};

pub trait ConversationRepository {
    /// Replaces the conversation with the same id, or appends a new one.
    fn save(
        &self,
        conversation: &ConversationEntity,
    ) -> Result<ConversationEntity, error::SystemError>;

    fn find_by_id(&self, id: &Uuid) -> Result<Option<ConversationEntity>, error::SystemError>;

    /// Returns the conversation between the unordered pair, creating it if absent.
    /// Calling it again for the same pair, in either order, yields the same id.
    fn get_or_create(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError>;

    fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<ConversationEntity>, error::SystemError>;

    fn find_all(&self) -> Result<Vec<ConversationEntity>, error::SystemError>;
}
