use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    configs::LocalStorage,
    constants::MESSAGES_KEY,
    modules::message::{repository::MessageRepository, schema::MessageEntity},
};

#[derive(Clone)]
pub struct MessageRepositoryLocal {
    storage: Arc<LocalStorage>,
}

impl MessageRepositoryLocal {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    fn messages(&self) -> Vec<MessageEntity> {
        self.storage.load_or_default(MESSAGES_KEY)
    }
}

impl MessageRepository for MessageRepositoryLocal {
    fn save(&self, message: &MessageEntity) -> Result<MessageEntity, error::SystemError> {
        self.storage
            .update(MESSAGES_KEY, |messages: &mut Vec<MessageEntity>| messages.push(message.clone()))?;
        Ok(message.clone())
    }

    fn find_by_id(&self, id: &Uuid) -> Result<Option<MessageEntity>, error::SystemError> {
        Ok(self.messages().into_iter().find(|m| m.id == *id))
    }

    fn find_by_conversation(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let mut messages: Vec<MessageEntity> =
            self.messages().into_iter().filter(|m| m.conversation_id == *conversation_id).collect();
        // stable, so ties stay in insertion order
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }

    fn count_unread(&self, user_id: &Uuid) -> Result<usize, error::SystemError> {
        Ok(self.messages().iter().filter(|m| m.receiver_id == *user_id && !m.read).count())
    }

    fn mark_as_read(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        if !self.messages().iter().any(|m| m.id == *id) {
            return Ok(false);
        }

        self.storage.update(MESSAGES_KEY, |messages: &mut Vec<MessageEntity>| {
            match messages.iter_mut().find(|m| m.id == *id) {
                Some(message) => {
                    message.read = true;
                    true
                }
                None => false,
            }
        })
    }

    fn mark_conversation_read(
        &self,
        conversation_id: &Uuid,
        reader_id: &Uuid,
    ) -> Result<usize, error::SystemError> {
        let is_pending =
            |m: &MessageEntity| m.conversation_id == *conversation_id && m.receiver_id == *reader_id && !m.read;

        if !self.messages().iter().any(is_pending) {
            return Ok(0);
        }

        self.storage.update(MESSAGES_KEY, |messages: &mut Vec<MessageEntity>| {
            let mut changed = 0;
            for message in messages.iter_mut().filter(|m| is_pending(&**m)) {
                message.read = true;
                changed += 1;
            }
            changed
        })
    }

    fn find_all(&self) -> Result<Vec<MessageEntity>, error::SystemError> {
        Ok(self.messages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{memory_storage, message_at};
    use chrono::{Duration, Utc};

    #[test]
    fn test_messages_come_back_in_timestamp_order() {
        let repo = MessageRepositoryLocal::new(memory_storage());
        let (a, b, conv) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        let base = Utc::now();

        let late = repo.save(&message_at(conv, b, a, "third", base + Duration::seconds(20))).unwrap();
        let early = repo.save(&message_at(conv, a, b, "first", base)).unwrap();
        let middle = repo.save(&message_at(conv, a, b, "second", base + Duration::seconds(10))).unwrap();
        repo.save(&message_at(Uuid::now_v7(), a, b, "elsewhere", base)).unwrap();

        let ids: Vec<Uuid> = repo.find_by_conversation(&conv).unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![early.id, middle.id, late.id]);
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let repo = MessageRepositoryLocal::new(memory_storage());
        let (a, b, conv) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        let at = Utc::now();

        let first = repo.save(&message_at(conv, a, b, "one", at)).unwrap();
        let second = repo.save(&message_at(conv, b, a, "two", at)).unwrap();

        let messages = repo.find_by_conversation(&conv).unwrap();
        assert_eq!(messages[0].id, first.id);
        assert_eq!(messages[1].id, second.id);
    }

    #[test]
    fn test_unread_count_and_mark_as_read() {
        let repo = MessageRepositoryLocal::new(memory_storage());
        let (a, b, conv) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());

        let hello = repo.save(&message_at(conv, a, b, "hello", Utc::now())).unwrap();
        repo.save(&message_at(conv, a, b, "are you there?", Utc::now())).unwrap();
        repo.save(&message_at(conv, b, a, "yes!", Utc::now())).unwrap();

        assert_eq!(repo.count_unread(&b).unwrap(), 2);
        assert_eq!(repo.count_unread(&a).unwrap(), 1);

        assert!(repo.mark_as_read(&hello.id).unwrap());
        assert_eq!(repo.count_unread(&b).unwrap(), 1);
        assert!(repo.find_by_id(&hello.id).unwrap().unwrap().read);

        assert!(!repo.mark_as_read(&Uuid::now_v7()).unwrap());
    }

    #[test]
    fn test_mark_conversation_read_only_touches_reader() {
        let repo = MessageRepositoryLocal::new(memory_storage());
        let (a, b, conv) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());

        repo.save(&message_at(conv, a, b, "hi", Utc::now())).unwrap();
        repo.save(&message_at(conv, a, b, "hi again", Utc::now())).unwrap();
        repo.save(&message_at(conv, b, a, "hey", Utc::now())).unwrap();

        assert_eq!(repo.mark_conversation_read(&conv, &b).unwrap(), 2);
        assert_eq!(repo.mark_conversation_read(&conv, &b).unwrap(), 0);
        assert_eq!(repo.count_unread(&b).unwrap(), 0);
        assert_eq!(repo.count_unread(&a).unwrap(), 1);
    }

    #[test]
    fn test_malformed_messages_read_as_empty() {
        let storage = memory_storage();
        storage.set_item(MESSAGES_KEY, "null".to_string()).unwrap();
        let repo = MessageRepositoryLocal::new(storage);

        assert_eq!(repo.count_unread(&Uuid::now_v7()).unwrap(), 0);
        assert!(repo.find_all().unwrap().is_empty());
    }
}
