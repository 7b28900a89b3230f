use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    middleware::from_fn,
    web::{self, ServiceConfig},
};

use crate::{
    configs::LocalStorage,
    middlewares::authentication,
    modules::{
        auth::{repository_local::AuthRepositoryLocal, service::SessionService},
        conversation::{
            repository_local::ConversationRepositoryLocal, service::ConversationService,
        },
        message::{repository_local::MessageRepositoryLocal, service::MessageService},
        user::{repository_local::UserRepositoryLocal, service::UserService},
    },
};

pub mod auth {
    pub mod model;
    pub mod repository;
    pub mod repository_local;
    pub mod service;
    pub mod handle;
    pub mod route;
}

pub mod user {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_local;
    pub mod service;
    pub mod handle;
    pub mod route;
}

pub mod conversation {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_local;
    pub mod service;
    pub mod handle;
    pub mod route;
}

pub mod message {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_local;
    pub mod service;
    pub mod handle;
    pub mod route;
}

/// Every service built over one storage. The session lives here, so build
/// this once and share it between workers.
#[derive(Clone)]
pub struct AppServices {
    pub session: web::Data<auth::service::LocalSessionService>,
    pub users: web::Data<user::service::LocalUserService>,
    pub conversations: web::Data<conversation::service::LocalConversationService>,
    pub messages: web::Data<message::service::LocalMessageService>,
}

impl AppServices {
    pub fn build(storage: Arc<LocalStorage>, latency: Duration) -> Self {
        let user_repo = Arc::new(UserRepositoryLocal::new(storage.clone()));
        let auth_repo = Arc::new(AuthRepositoryLocal::new(storage.clone()));
        let conversation_repo = Arc::new(ConversationRepositoryLocal::new(storage.clone()));
        let message_repo = Arc::new(MessageRepositoryLocal::new(storage));

        let session = SessionService::open(user_repo.clone(), auth_repo, latency);
        let users = UserService::with_dependencies(user_repo.clone());
        let conversations = ConversationService::with_dependencies(
            conversation_repo.clone(),
            message_repo.clone(),
            user_repo,
        );
        let messages = MessageService::with_dependencies(message_repo, conversation_repo);

        AppServices {
            session: web::Data::new(session),
            users: web::Data::new(users),
            conversations: web::Data::new(conversations),
            messages: web::Data::new(messages),
        }
    }

    pub fn configure(&self, cfg: &mut ServiceConfig) {
        cfg.app_data(self.session.clone())
            .app_data(self.users.clone())
            .app_data(self.conversations.clone())
            .app_data(self.messages.clone());
    }
}

pub fn configure_api(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api").configure(auth::route::public_api_configure).service(
            web::scope("")
                .wrap(from_fn(authentication))
                .configure(user::route::configure)
                .configure(conversation::route::configure)
                .configure(message::route::configure),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use crate::constants::{DEMO_EMAIL, DEMO_PASSWORD};

    fn services() -> AppServices {
        AppServices::build(Arc::new(LocalStorage::in_memory()), Duration::ZERO)
    }

    macro_rules! app {
        ($services:expr) => {{
            let services = $services.clone();
            test::init_service(
                App::new().configure(move |cfg| services.configure(cfg)).configure(configure_api),
            )
            .await
        }};
    }

    fn signup_body(email: &str, name: &str) -> Value {
        json!({
            "email": email,
            "password": "hunter22",
            "name": name,
            "age": 30,
            "gender": "female",
            "lookingFor": "male",
            "location": "Denver, CO",
            "bio": "Trail runner"
        })
    }

    #[actix_web::test]
    async fn test_protected_routes_require_session() {
        let app = app!(services());

        let req = test::TestRequest::get().uri("/api/conversations").to_request();
        let Err(err) = test::try_call_service(&app, req).await else {
            panic!("protected route answered without a session");
        };
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Unauthorized: Please sign in to continue");

        let req = test::TestRequest::get().uri("/api/auth/session").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["user"], Value::Null);
        assert_eq!(body["data"]["loading"], false);
    }

    #[actix_web::test]
    async fn test_signup_conflict_is_reported_inline() {
        let app = app!(services());

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(signup_body("maya@example.com", "Maya"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(signup_body("maya@example.com", "Maya again"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Email already registered");
    }

    #[actix_web::test]
    async fn test_signup_validation_error() {
        let app = app!(services());

        let mut body = signup_body("maya@example.com", "Maya");
        body["password"] = json!("123");
        let req = test::TestRequest::post().uri("/api/auth/signup").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_chat_flow_over_http() {
        let services = services();
        let app = app!(services);

        // Leo registers, then the demo user signs in and writes to him
        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(signup_body("leo@example.com", "Leo"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let leo_id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/auth/signin")
            .set_json(json!({"email": DEMO_EMAIL, "password": DEMO_PASSWORD}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/conversations")
            .set_json(json!({"recipientId": leo_id}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let conversation_id = body["data"]["id"].as_str().unwrap().to_string();

        for text in ["Hi Leo!", "Coffee this weekend?"] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/conversations/{conversation_id}/messages"))
                .set_json(json!({"content": text}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/api/conversations").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["lastMessage"], "Coffee this weekend?");
        assert_eq!(body["data"][0]["partner"]["name"], "Leo");

        // Leo reads them
        let req = test::TestRequest::post().uri("/api/auth/signout").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
        let req = test::TestRequest::post()
            .uri("/api/auth/signin")
            .set_json(json!({"email": "leo@example.com", "password": "hunter22"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/messages/unread").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["unreadCount"], 2);

        let req = test::TestRequest::get()
            .uri(&format!("/api/conversations/{conversation_id}/messages"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let contents: Vec<&str> = body["data"]["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec!["Hi Leo!", "Coffee this weekend?"]);
        assert_eq!(body["data"]["markedRead"], 2);

        let req = test::TestRequest::get().uri("/api/messages/unread").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["unreadCount"], 0);

        assert_eq!(services.conversations.store_stats().unwrap().messages, 2);
    }

    #[actix_web::test]
    async fn test_users_listing_excludes_viewer() {
        let app = app!(services());

        for (email, name) in [("maya@example.com", "Maya"), ("leo@example.com", "Leo")] {
            let req = test::TestRequest::post()
                .uri("/api/auth/signup")
                .set_json(signup_body(email, name))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        // Leo signed up last and holds the session
        let req = test::TestRequest::get().uri("/api/users").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> =
            body["data"].as_array().unwrap().iter().map(|u| u["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Maya"]);

        let req = test::TestRequest::get().uri("/api/users/profile").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["email"], "leo@example.com");

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}", uuid::Uuid::now_v7()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
