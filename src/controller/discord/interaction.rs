use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;

use crate::shared::error::InteractionError;
use crate::shared::structs::AppState;
use crate::shared::structs::discord::interaction::{
    DEFERRED_CHANNEL_MESSAGE_RESPONSE, Interaction, InteractionRequest, InteractionType,
    PONG_RESPONSE,
};
use crate::shared::utility::command_name::{resolve_command_name, topic_name};

pub async fn handle_interaction(State(app_state): State<AppState>, request: Request) -> Response {
    let result = match request.into_body().collect().await {
        Ok(collected) => dispatch(&app_state, collected.to_bytes()).await,
        Err(e) => Err(InteractionError::ReadFailure(format!("{e:?}"))),
    };

    match result {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

/// Routes an authenticated body by interaction type. Application commands
/// are forwarded verbatim, so fields this service does not model survive.
pub async fn dispatch(app_state: &AppState, body: Bytes) -> Result<Response, InteractionError> {
    let interaction_request = serde_json::from_slice::<InteractionRequest>(&body)
        .map_err(|e| InteractionError::DecodeFailure(e.to_string()))?;

    match interaction_request.r#type {
        InteractionType::Ping => Ok(json_response(PONG_RESPONSE)),
        InteractionType::ApplicationCommand => {
            let interaction = serde_json::from_slice::<Interaction>(&body)
                .map_err(|e| InteractionError::DecodeFailure(e.to_string()))?;

            tracing::debug!("Received incoming command interaction: {:?}", &interaction);

            run_application_command(app_state, &interaction, &body).await?;

            Ok(json_response(DEFERRED_CHANNEL_MESSAGE_RESPONSE))
        }
        other => Err(InteractionError::UnprocessableType(other)),
    }
}

fn json_response(body: &'static str) -> Response {
    (StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response()
}

async fn run_application_command(
    app_state: &AppState,
    interaction: &Interaction,
    body: &[u8],
) -> Result<(), InteractionError> {
    let command_name = resolve_command_name(interaction, None);
    let topic = topic_name(&app_state.config.topic_prefix, &command_name);

    let message_id = app_state
        .publisher
        .publish(&topic, body)
        .await
        .map_err(InteractionError::PublishFailure)?;

    tracing::info!(
        "Published command {} to topic {} with message id {}",
        &command_name,
        &topic,
        &message_id
    );

    Ok(())
}
