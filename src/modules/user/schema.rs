use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookingFor {
    Male,
    Female,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub looking_for: LookingFor,
    pub location: String,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserEntity {
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        [&self.name, &self.email, &self.location, &self.bio]
            .iter()
            .any(|field| field.to_lowercase().contains(&q))
    }
}
