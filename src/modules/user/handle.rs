use actix_web::{get, web, HttpRequest};
use uuid::Uuid;

use crate::middlewares::get_session_user;
use crate::modules::user::{model, service::LocalUserService};
use crate::{
    api::{error, success},
    utils::ValidatedQuery,
};

#[get("/profile")]
pub async fn get_profile(req: HttpRequest) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = get_session_user(&req)?;
    Ok(success::Success::ok(Some(user.into())).message("Profile retrieved successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_user(
    user_service: web::Data<LocalUserService>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_by_id(user_id.into_inner())?;
    Ok(success::Success::ok(Some(user)).message("User retrieved successfully"))
}

#[get("")]
pub async fn browse_users(
    user_service: web::Data<LocalUserService>,
    query: ValidatedQuery<model::SearchUsersQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<model::UserResponse>>, error::Error> {
    let viewer = get_session_user(&req)?;
    let users = user_service.browse(viewer.id, query.0.q.as_deref())?;
    Ok(success::Success::ok(Some(users)).message("Users retrieved successfully"))
}
