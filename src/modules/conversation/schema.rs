use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A one-to-one conversation. The pair is stored normalized, so
/// `user1_id <= user2_id` always holds for conversations built here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationEntity {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_time: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ConversationEntity {
    pub fn normalize_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn between(id: Uuid, a: Uuid, b: Uuid) -> Self {
        let (user1_id, user2_id) = Self::normalize_pair(a, b);
        let now = chrono::Utc::now();
        ConversationEntity {
            id,
            user1_id,
            user2_id,
            last_message: None,
            last_message_time: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Matches the unordered pair, whichever order it was stored in.
    pub fn is_between(&self, a: Uuid, b: Uuid) -> bool {
        (self.user1_id == a && self.user2_id == b) || (self.user1_id == b && self.user2_id == a)
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }

    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        if self.user1_id == user_id {
            Some(self.user2_id)
        } else if self.user2_id == user_id {
            Some(self.user1_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_normalizes_pair() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();

        let forward = ConversationEntity::between(Uuid::now_v7(), a, b);
        let backward = ConversationEntity::between(Uuid::now_v7(), b, a);

        assert_eq!((forward.user1_id, forward.user2_id), (backward.user1_id, backward.user2_id));
        assert!(forward.user1_id <= forward.user2_id);
    }

    #[test]
    fn test_other_participant() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let conv = ConversationEntity::between(Uuid::now_v7(), a, b);

        assert_eq!(conv.other_participant(a), Some(b));
        assert_eq!(conv.other_participant(b), Some(a));
        assert_eq!(conv.other_participant(Uuid::now_v7()), None);
    }

    #[test]
    fn test_is_between_accepts_unnormalized_rows() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let mut conv = ConversationEntity::between(Uuid::now_v7(), a, b);
        std::mem::swap(&mut conv.user1_id, &mut conv.user2_id);

        assert!(conv.is_between(a, b));
        assert!(conv.is_between(b, a));
    }

    #[test]
    fn test_camel_case_layout() {
        let conv = ConversationEntity::between(Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        let json = serde_json::to_string(&conv).unwrap();
        assert!(json.contains("\"user1Id\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(!json.contains("lastMessage"));
    }
}
