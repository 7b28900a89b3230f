use actix_web::{get, post, web};

use crate::modules::auth::{model, service::LocalSessionService};
use crate::modules::user::model::UserResponse;
use crate::{
    api::{error, success},
    utils::ValidatedJson,
};

#[post("/signup")]
pub async fn sign_up(
    session: web::Data<LocalSessionService>,
    user_data: ValidatedJson<model::SignUpModel>,
) -> Result<success::Success<UserResponse>, error::Error> {
    let model::SignUpModel { email, password, profile } = user_data.0;
    let user = session.sign_up(&email, &password, profile).await?;
    Ok(success::Success::created(Some(user.into())).message("Signup successful"))
}

#[post("/signin")]
pub async fn sign_in(
    session: web::Data<LocalSessionService>,
    user_data: ValidatedJson<model::SignInModel>,
) -> Result<success::Success<UserResponse>, error::Error> {
    let user = session.sign_in(&user_data.0.email, &user_data.0.password).await?;
    Ok(success::Success::ok(Some(user.into())).message("Signin successful"))
}

#[post("/signout")]
pub async fn sign_out(
    session: web::Data<LocalSessionService>,
) -> Result<success::Success<()>, error::Error> {
    session.sign_out().await?;
    Ok(success::Success::no_content())
}

#[get("/session")]
pub async fn get_session(
    session: web::Data<LocalSessionService>,
) -> Result<success::Success<model::SessionResponse>, error::Error> {
    let response = model::SessionResponse {
        user: session.user().map(UserResponse::from),
        loading: session.loading(),
    };
    Ok(success::Success::ok(Some(response)))
}
