//! Fixtures shared by the unit tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    configs::LocalStorage,
    modules::{
        auth::model::ProfileModel,
        message::schema::MessageEntity,
        user::schema::{Gender, LookingFor, UserEntity},
    },
};

pub fn memory_storage() -> Arc<LocalStorage> {
    Arc::new(LocalStorage::in_memory())
}

pub fn sample_user(email: &str, name: &str) -> UserEntity {
    UserEntity {
        id: Uuid::now_v7(),
        email: email.to_string(),
        name: name.to_string(),
        age: 29,
        gender: Gender::Female,
        looking_for: LookingFor::Male,
        location: "Portland, OR".to_string(),
        bio: "Coffee, bikes and bad puns".to_string(),
        avatar: None,
        created_at: Utc::now(),
    }
}

pub fn sample_profile(name: &str) -> ProfileModel {
    ProfileModel {
        name: name.to_string(),
        age: 31,
        gender: Gender::Male,
        looking_for: LookingFor::Both,
        location: "Austin, TX".to_string(),
        bio: String::new(),
        avatar: None,
    }
}

pub fn message_at(
    conversation_id: Uuid,
    sender_id: Uuid,
    receiver_id: Uuid,
    content: &str,
    timestamp: DateTime<Utc>,
) -> MessageEntity {
    MessageEntity {
        id: Uuid::now_v7(),
        sender_id,
        receiver_id,
        conversation_id,
        content: content.to_string(),
        timestamp,
        read: false,
    }
}
