use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    configs::LocalStorage,
    constants::{CURRENT_USER_KEY, PASSWORDS_KEY},
    modules::auth::repository::{CredentialRepository, SessionRepository},
};

#[derive(Clone)]
pub struct AuthRepositoryLocal {
    storage: Arc<LocalStorage>,
}

impl AuthRepositoryLocal {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }
}

impl CredentialRepository for AuthRepositoryLocal {
    fn save_password_hash(&self, user_id: &Uuid, hash: &str) -> Result<(), error::SystemError> {
        self.storage.update(PASSWORDS_KEY, |hashes: &mut HashMap<Uuid, String>| {
            hashes.insert(*user_id, hash.to_string());
        })
    }

    fn find_password_hash(&self, user_id: &Uuid) -> Result<Option<String>, error::SystemError> {
        let mut hashes: HashMap<Uuid, String> = self.storage.load_or_default(PASSWORDS_KEY);
        Ok(hashes.remove(user_id))
    }
}

impl SessionRepository for AuthRepositoryLocal {
    fn current_user_id(&self) -> Result<Option<Uuid>, error::SystemError> {
        self.storage.get::<Uuid>(CURRENT_USER_KEY)
    }

    fn set_current_user_id(&self, user_id: &Uuid) -> Result<(), error::SystemError> {
        self.storage.set(CURRENT_USER_KEY, user_id)
    }

    fn clear_current_user_id(&self) -> Result<(), error::SystemError> {
        self.storage.remove_item(CURRENT_USER_KEY)
    }
}
