use actix_web::{get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_session_user,
    modules::{
        conversation::{
            model::{ConversationMessages, ConversationSummary, StartConversationModel},
            schema::ConversationEntity,
            service::LocalConversationService,
        },
        message::{model::SendMessageModel, schema::MessageEntity, service::LocalMessageService},
    },
    utils::ValidatedJson,
};

#[get("")]
pub async fn get_conversations(
    conversation_svc: web::Data<LocalConversationService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<ConversationSummary>>, error::Error> {
    let user_id = get_session_user(&req)?.id;

    let conversations = conversation_svc.list_conversations(user_id)?;

    Ok(success::Success::ok(Some(conversations)).message("Successfully retrieved conversations"))
}

#[post("")]
pub async fn start_conversation(
    conversation_svc: web::Data<LocalConversationService>,
    body: ValidatedJson<StartConversationModel>,
    req: HttpRequest,
) -> Result<success::Success<ConversationEntity>, error::Error> {
    let user_id = get_session_user(&req)?.id;

    let conversation = conversation_svc.start_conversation(user_id, body.0.recipient_id)?;

    Ok(success::Success::ok(Some(conversation)).message("Successfully opened conversation"))
}

#[get("/{conversation_id}/messages")]
pub async fn get_messages(
    conversation_svc: web::Data<LocalConversationService>,
    conversation_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<ConversationMessages>, error::Error> {
    let user_id = get_session_user(&req)?.id;

    let messages = conversation_svc.open_conversation(user_id, conversation_id.into_inner())?;

    Ok(success::Success::ok(Some(messages)).message("Successfully retrieved messages"))
}

#[post("/{conversation_id}/messages")]
pub async fn send_message(
    message_svc: web::Data<LocalMessageService>,
    conversation_id: web::Path<Uuid>,
    body: ValidatedJson<SendMessageModel>,
    req: HttpRequest,
) -> Result<success::Success<MessageEntity>, error::Error> {
    let user_id = get_session_user(&req)?.id;

    let message = message_svc.send_message(user_id, conversation_id.into_inner(), &body.0.content)?;

    Ok(success::Success::created(Some(message)).message("Message sent"))
}
