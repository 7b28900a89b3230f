use actix_web::{get, patch, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_session_user,
    modules::message::{model::UnreadCountResponse, service::LocalMessageService},
};

#[get("/unread")]
pub async fn get_unread_count(
    message_svc: web::Data<LocalMessageService>,
    req: HttpRequest,
) -> Result<success::Success<UnreadCountResponse>, error::Error> {
    let user_id = get_session_user(&req)?.id;

    let unread_count = message_svc.unread_count(user_id)?;

    Ok(success::Success::ok(Some(UnreadCountResponse { unread_count })))
}

#[patch("/{message_id}/read")]
pub async fn mark_as_read(
    message_svc: web::Data<LocalMessageService>,
    message_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_session_user(&req)?.id;

    message_svc.mark_as_read(user_id, message_id.into_inner())?;

    Ok(success::Success::no_content())
}
