use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, HttpMessage, HttpRequest,
};

use crate::{
    api::error,
    modules::{auth::service::LocalSessionService, user::schema::UserEntity},
};

/// Rejects the request unless a user is signed in, and stores that user in
/// the request extensions.
pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let session = req
        .app_data::<web::Data<LocalSessionService>>()
        .ok_or(error::Error::InternalServer)?;

    let user = match session.user() {
        Some(user) => user,
        None => {
            return Err(error::Error::unauthorized("Please sign in to continue").into());
        }
    };

    req.extensions_mut().insert(user);

    next.call(req).await
}

pub fn get_session_user(req: &HttpRequest) -> Result<UserEntity, error::Error> {
    let extensions = req.extensions();

    let user = extensions
        .get::<UserEntity>()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))?
        .clone();

    Ok(user)
}
