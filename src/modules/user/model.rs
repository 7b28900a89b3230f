use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::user::schema::{Gender, LookingFor, UserEntity};

#[derive(Deserialize, Validate)]
pub struct SearchUsersQuery {
    #[validate(length(min = 1, max = 100, message = "Search query must be 1-100 characters long"))]
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub looking_for: LookingFor,
    pub location: String,
    pub bio: String,
    pub avatar: Option<String>,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        UserResponse {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            age: entity.age,
            gender: entity.gender,
            looking_for: entity.looking_for,
            location: entity.location,
            bio: entity.bio,
            avatar: entity.avatar,
        }
    }
}
