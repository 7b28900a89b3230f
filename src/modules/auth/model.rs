use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::user::{
    model::UserResponse,
    schema::{Gender, LookingFor},
};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileModel {
    #[validate(length(min = 1, max = 80, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(range(min = 18, max = 120, message = "Age must be between 18 and 120"))]
    pub age: u8,
    pub gender: Gender,
    #[serde(alias = "looking_for")]
    pub looking_for: LookingFor,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Bio must be at most 500 characters long"))]
    pub bio: String,
    #[serde(default)]
    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct SignUpModel {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: ProfileModel,
}

#[derive(Deserialize, Validate)]
pub struct SignInModel {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<UserResponse>,
    pub loading: bool,
}
