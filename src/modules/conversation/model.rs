use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::{
    conversation::schema::ConversationEntity, message::schema::MessageEntity,
    user::model::UserResponse,
};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StartConversationModel {
    pub recipient_id: Uuid,
}

/// One row of the conversation list: the conversation, who it is with and how
/// many messages the viewer has not read yet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    #[serde(flatten)]
    pub conversation: ConversationEntity,
    pub partner: Option<UserResponse>,
    pub unread_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessages {
    pub conversation: ConversationEntity,
    pub messages: Vec<MessageEntity>,
    pub marked_read: usize,
}

/// Collection sizes of the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub users: usize,
    pub conversations: usize,
    pub messages: usize,
}
