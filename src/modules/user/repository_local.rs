use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    configs::LocalStorage,
    constants::USERS_KEY,
    modules::user::{repository::UserRepository, schema::UserEntity},
};

#[derive(Clone)]
pub struct UserRepositoryLocal {
    storage: Arc<LocalStorage>,
}

impl UserRepositoryLocal {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    fn users(&self) -> Vec<UserEntity> {
        self.storage.load_or_default(USERS_KEY)
    }
}

impl UserRepository for UserRepositoryLocal {
    fn save(&self, user: &UserEntity) -> Result<UserEntity, error::SystemError> {
        self.storage.update(USERS_KEY, |users: &mut Vec<UserEntity>| {
            match users.iter_mut().find(|u| u.id == user.id) {
                Some(existing) => *existing = user.clone(),
                None => users.push(user.clone()),
            }
        })?;
        Ok(user.clone())
    }

    fn create(&self, user: &UserEntity) -> Result<UserEntity, error::SystemError> {
        let inserted = self.storage.update(USERS_KEY, |users: &mut Vec<UserEntity>| {
            if users.iter().any(|u| u.email == user.email) {
                return false;
            }
            users.push(user.clone());
            true
        })?;

        if !inserted {
            return Err(error::SystemError::conflict("Email already registered"));
        }
        Ok(user.clone())
    }

    fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        self.storage.update(USERS_KEY, |users: &mut Vec<UserEntity>| {
            let before = users.len();
            users.retain(|u| u.id != *id);
            users.len() != before
        })
    }

    fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.users().into_iter().find(|u| u.id == *id))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.users().into_iter().find(|u| u.email == email))
    }

    fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError> {
        Ok(self.users())
    }

    fn search(&self, query: &str) -> Result<Vec<UserEntity>, error::SystemError> {
        Ok(self.users().into_iter().filter(|u| u.matches_query(query)).collect())
    }
}
