use uuid::Uuid;

use crate::{api::error, modules::message::schema::MessageEntity};

pub trait MessageRepository {
    /// Appends the message as given; callers make sure the conversation exists.
    fn save(&self, message: &MessageEntity) -> Result<MessageEntity, error::SystemError>;

    fn find_by_id(&self, id: &Uuid) -> Result<Option<MessageEntity>, error::SystemError>;

    /// Messages of one conversation, oldest first. Equal timestamps keep the
    /// order in which they were saved.
    fn find_by_conversation(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;

    fn count_unread(&self, user_id: &Uuid) -> Result<usize, error::SystemError>;

    /// Returns `false` when no message has this id.
    fn mark_as_read(&self, id: &Uuid) -> Result<bool, error::SystemError>;

    /// Marks every message in the conversation addressed to `reader_id` as
    /// read, returning how many changed.
    fn mark_conversation_read(
        &self,
        conversation_id: &Uuid,
        reader_id: &Uuid,
    ) -> Result<usize, error::SystemError>;

    fn find_all(&self) -> Result<Vec<MessageEntity>, error::SystemError>;
}
