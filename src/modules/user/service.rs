use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::user::model::UserResponse;
use crate::modules::user::repository::UserRepository;
use crate::modules::user::repository_local::UserRepositoryLocal;

pub type LocalUserService = UserService<UserRepositoryLocal>;

#[derive(Clone)]
pub struct UserService<U>
where
    U: UserRepository + Send + Sync,
{
    repo: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(repo: Arc<U>) -> Self {
        log::info!("UserService initialized with dependencies");
        UserService { repo }
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        self.repo
            .find_by_id(&id)?
            .map(UserResponse::from)
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    /// Every user except `viewer_id`, optionally narrowed by a search query.
    pub fn browse(
        &self,
        viewer_id: Uuid,
        query: Option<&str>,
    ) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => self.repo.search(q)?,
            None => self.repo.find_all()?,
        };

        Ok(users.into_iter().filter(|u| u.id != viewer_id).map(UserResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{memory_storage, sample_user};

    fn service_with_users() -> (LocalUserService, Vec<Uuid>) {
        let repo = UserRepositoryLocal::new(memory_storage());
        let ids = [("maya@example.com", "Maya"), ("leo@example.com", "Leo"), ("ana@example.com", "Ana")]
            .into_iter()
            .map(|(email, name)| repo.save(&sample_user(email, name)).unwrap().id)
            .collect();
        (UserService::with_dependencies(Arc::new(repo)), ids)
    }

    #[test]
    fn test_get_by_id_missing_user() {
        let (service, _) = service_with_users();
        let err = service.get_by_id(Uuid::now_v7()).unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[test]
    fn test_browse_excludes_viewer() {
        let (service, ids) = service_with_users();

        let all = service.browse(ids[0], None).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|u| u.id != ids[0]));

        let blank = service.browse(ids[0], Some("   ")).unwrap();
        assert_eq!(blank.len(), 2);

        let found = service.browse(ids[0], Some("leo")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Leo");
    }
}
