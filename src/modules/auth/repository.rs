use uuid::Uuid;

use crate::api::error;

/// Password hashes keyed by user id.
pub trait CredentialRepository {
    fn save_password_hash(&self, user_id: &Uuid, hash: &str) -> Result<(), error::SystemError>;
    fn find_password_hash(&self, user_id: &Uuid) -> Result<Option<String>, error::SystemError>;
}

/// The persisted pointer to the signed-in user.
pub trait SessionRepository {
    fn current_user_id(&self) -> Result<Option<Uuid>, error::SystemError>;
    fn set_current_user_id(&self, user_id: &Uuid) -> Result<(), error::SystemError>;
    fn clear_current_user_id(&self) -> Result<(), error::SystemError>;
}
