use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, Method, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::Instrument;

use crate::shared::error::InteractionError;
use crate::shared::structs::AppState;
use crate::shared::structs::discord::public_key::PublicKey;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";
pub const SIGNATURE_LENGTH: usize = 64;
pub const READ_LIMIT: usize = 10 * 1024 * 1024;

const JSON_CONTENT_TYPE: &str = "application/json";

pub async fn validate_interaction(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let span = tracing::info_span!(
        "interaction",
        request_id = %uuid::Uuid::now_v7(),
        method = %request.method(),
        path = %request.uri().path()
    );

    async move {
        match authenticate(&app_state.public_key, request).await {
            Ok(request) => next.run(request).await,
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}

/// Runs every check in order and stops at the first failure. The cheap
/// header checks come before the body is read or the signature computed.
///
/// On success the returned request carries the fully buffered body.
pub async fn authenticate(
    public_key: &PublicKey,
    request: Request,
) -> Result<Request, InteractionError> {
    let (parts, body) = request.into_parts();

    check_method(&parts.method)?;
    check_content_type(&parts.headers)?;
    let signature = extract_signature(&parts.headers)?;
    let timestamp = extract_timestamp(&parts.headers)?;
    let bytes = read_body(body).await?;
    verify(public_key, timestamp, &signature, &bytes)?;

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn check_method(method: &Method) -> Result<(), InteractionError> {
    if *method == Method::POST {
        Ok(())
    } else {
        Err(InteractionError::MethodNotAllowed)
    }
}

fn check_content_type(headers: &HeaderMap) -> Result<(), InteractionError> {
    if header_value(headers, CONTENT_TYPE.as_str()) == JSON_CONTENT_TYPE {
        Ok(())
    } else {
        Err(InteractionError::BadRequest("content type is not application/json"))
    }
}

fn extract_signature(headers: &HeaderMap) -> Result<[u8; SIGNATURE_LENGTH], InteractionError> {
    let hex_signature = header_value(headers, SIGNATURE_HEADER);
    if hex_signature.is_empty() {
        return Err(InteractionError::BadRequest("missing signature header"));
    }

    let signature = hex::decode(hex_signature)
        .map_err(|_| InteractionError::BadRequest("signature is not valid hex"))?;

    signature
        .try_into()
        .map_err(|_| InteractionError::BadRequest("signature has the wrong length"))
}

fn extract_timestamp(headers: &HeaderMap) -> Result<&str, InteractionError> {
    let timestamp = header_value(headers, TIMESTAMP_HEADER);
    if timestamp.is_empty() {
        Err(InteractionError::BadRequest("missing timestamp header"))
    } else {
        Ok(timestamp)
    }
}

/// Buffers the body up to [`READ_LIMIT`]. A body that reaches the limit is
/// rejected even when it fits exactly.
async fn read_body(body: Body) -> Result<Bytes, InteractionError> {
    let bytes = Limited::new(body, READ_LIMIT)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                InteractionError::BadRequest("request body exceeds read limit")
            } else {
                InteractionError::ReadFailure(format!("{e:?}"))
            }
        })?
        .to_bytes();

    if bytes.len() >= READ_LIMIT {
        return Err(InteractionError::BadRequest("request body reached read limit"));
    }

    Ok(bytes)
}

fn verify(
    public_key: &PublicKey,
    timestamp: &str,
    signature: &[u8; SIGNATURE_LENGTH],
    body: &[u8],
) -> Result<(), InteractionError> {
    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    match nacl::sign::verify(signature, &message, public_key.as_bytes()) {
        Ok(true) => Ok(()),
        Ok(false) => Err(InteractionError::Unauthorized),
        Err(e) => Err(InteractionError::VerifierFault(format!("{e:?}"))),
    }
}
