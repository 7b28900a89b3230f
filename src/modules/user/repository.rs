use uuid::Uuid;

use crate::{api::error, modules::user::schema::UserEntity};

pub trait UserRepository {
    /// Replaces the user with the same id, or appends a new one.
    fn save(&self, user: &UserEntity) -> Result<UserEntity, error::SystemError>;

    /// Appends a new user unless the email is already taken, checked under the
    /// same lock as the write.
    fn create(&self, user: &UserEntity) -> Result<UserEntity, error::SystemError>;
    fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
    fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;
    fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;
    fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError>;

    /// Case-insensitive substring match over name, email, location and bio.
    fn search(&self, query: &str) -> Result<Vec<UserEntity>, error::SystemError>;
}
