use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use log::{info, warn};
use validator::{Validate, ValidateEmail};

use crate::api::error;
use crate::constants::{DEMO_EMAIL, DEMO_PASSWORD, DEMO_USER_ID};
use crate::modules::auth::model::ProfileModel;
use crate::modules::auth::repository::{CredentialRepository, SessionRepository};
use crate::modules::auth::repository_local::AuthRepositoryLocal;
use crate::modules::user::repository::UserRepository;
use crate::modules::user::repository_local::UserRepositoryLocal;
use crate::modules::user::schema::{Gender, LookingFor, UserEntity};
use crate::utils::{hash_password, new_id, verify_password};

pub type LocalSessionService = SessionService<UserRepositoryLocal, AuthRepositoryLocal>;

#[derive(Debug, Default)]
struct SessionState {
    user: Option<UserEntity>,
    pending: usize,
}

/// Local sign-up/sign-in against the store, holding the current session.
///
/// Clones share the same session.
#[derive(Clone)]
pub struct SessionService<U, A>
where
    U: UserRepository + Send + Sync,
    A: CredentialRepository + SessionRepository + Send + Sync,
{
    user_repo: Arc<U>,
    auth_repo: Arc<A>,
    latency: Duration,
    state: Arc<RwLock<SessionState>>,
}

/// Keeps `loading` true while alive.
struct LoadingGuard<'a> {
    state: &'a RwLock<SessionState>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a RwLock<SessionState>) -> Self {
        state.write().unwrap_or_else(PoisonError::into_inner).pending += 1;
        LoadingGuard { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.pending = state.pending.saturating_sub(1);
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> error::SystemError {
    error::SystemError::unauthorized("Invalid email or password")
}

impl<U, A> SessionService<U, A>
where
    U: UserRepository + Send + Sync,
    A: CredentialRepository + SessionRepository + Send + Sync,
{
    /// Builds the service and restores the session from the stored pointer.
    pub fn open(user_repo: Arc<U>, auth_repo: Arc<A>, latency: Duration) -> Self {
        let service = SessionService {
            user_repo,
            auth_repo,
            latency,
            state: Arc::new(RwLock::new(SessionState::default())),
        };
        service.restore();
        info!("SessionService initialized with dependencies");
        service
    }

    pub fn user(&self) -> Option<UserEntity> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).user.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.read().unwrap_or_else(PoisonError::into_inner).pending > 0
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: ProfileModel,
    ) -> Result<UserEntity, error::SystemError> {
        let _loading = LoadingGuard::start(&self.state);
        self.simulate_latency().await;

        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(error::SystemError::bad_request("Please enter a valid email"));
        }
        if password.chars().count() < 6 {
            return Err(error::SystemError::bad_request("Password must be at least 6 characters"));
        }
        profile.validate().map_err(|e| error::SystemError::bad_request(e.to_string()))?;

        if email == DEMO_EMAIL || self.user_repo.find_by_email(&email)?.is_some() {
            return Err(error::SystemError::conflict("Email already registered"));
        }

        let password_hash = hash_password(password)?;
        let user = UserEntity {
            id: new_id(),
            email,
            name: profile.name.trim().to_string(),
            age: profile.age,
            gender: profile.gender,
            looking_for: profile.looking_for,
            location: profile.location.trim().to_string(),
            bio: profile.bio,
            avatar: profile.avatar,
            created_at: chrono::Utc::now(),
        };

        self.user_repo.create(&user)?;
        if let Err(e) = self.auth_repo.save_password_hash(&user.id, &password_hash) {
            if let Err(rollback) = self.user_repo.delete(&user.id) {
                warn!("Could not remove user {} after failed sign-up: {:?}", user.id, rollback);
            }
            return Err(e);
        }
        self.establish(user.clone())?;

        info!("User {} signed up", user.id);
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserEntity, error::SystemError> {
        let _loading = LoadingGuard::start(&self.state);
        self.simulate_latency().await;

        let email = normalize_email(email);
        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            let demo = self.ensure_demo_user()?;
            self.establish(demo.clone())?;
            info!("Demo user signed in");
            return Ok(demo);
        }

        let user = self.user_repo.find_by_email(&email)?.ok_or_else(invalid_credentials)?;
        let hash = self.auth_repo.find_password_hash(&user.id)?.ok_or_else(invalid_credentials)?;
        if !verify_password(&hash, password)? {
            return Err(invalid_credentials());
        }

        self.establish(user.clone())?;
        info!("User {} signed in", user.id);
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<(), error::SystemError> {
        let _loading = LoadingGuard::start(&self.state);

        self.auth_repo.clear_current_user_id()?;
        let previous = self.state.write().unwrap_or_else(PoisonError::into_inner).user.take();

        if let Some(user) = previous {
            info!("User {} signed out", user.id);
        }
        Ok(())
    }

    fn restore(&self) {
        let _loading = LoadingGuard::start(&self.state);

        let user_id = match self.auth_repo.current_user_id() {
            Ok(Some(id)) => id,
            Ok(None) => return,
            Err(e) => {
                log::error!("Failed to restore session: {}", e);
                self.forget_pointer();
                return;
            }
        };

        match self.user_repo.find_by_id(&user_id) {
            Ok(Some(user)) => {
                info!("Session restored for user {}", user.id);
                self.state.write().unwrap_or_else(PoisonError::into_inner).user = Some(user);
            }
            Ok(None) => {
                warn!("Stored session points at unknown user {}, clearing it", user_id);
                self.forget_pointer();
            }
            Err(e) => log::error!("Failed to restore session: {}", e),
        }
    }

    fn forget_pointer(&self) {
        if let Err(e) = self.auth_repo.clear_current_user_id() {
            log::error!("Failed to clear session pointer: {}", e);
        }
    }

    fn establish(&self, user: UserEntity) -> Result<(), error::SystemError> {
        self.auth_repo.set_current_user_id(&user.id)?;
        self.state.write().unwrap_or_else(PoisonError::into_inner).user = Some(user);
        Ok(())
    }

    fn ensure_demo_user(&self) -> Result<UserEntity, error::SystemError> {
        if let Some(user) = self.user_repo.find_by_id(&DEMO_USER_ID)? {
            return Ok(user);
        }

        let demo = UserEntity {
            id: DEMO_USER_ID,
            email: DEMO_EMAIL.to_string(),
            name: "Alex Johnson".to_string(),
            age: 28,
            gender: Gender::Male,
            looking_for: LookingFor::Female,
            location: "New York, NY".to_string(),
            bio: "Adventure seeker and coffee enthusiast. Love hiking and exploring new places!"
                .to_string(),
            avatar: None,
            created_at: chrono::Utc::now(),
        };
        info!("Seeding demo user {}", demo.id);
        self.user_repo.save(&demo)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}
