use crate::modules::auth::handle::*;
use actix_web::web::{scope, ServiceConfig};

/// Auth routes work with or without a signed-in user.
pub fn public_api_configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/auth").service(sign_up).service(sign_in).service(sign_out).service(get_session),
    );
}
