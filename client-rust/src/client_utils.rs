use crate::{ApiEnvelope, ClientError};
use reqwest::{header::HeaderMap, Client, Method, StatusCode};
use serde_json::Value;

/// Send an optional JSON body and decode the backend envelope.
///
/// The envelope is returned whatever the status code, since the backend
/// reports failures through `success: false`. A `401` becomes
/// [`ClientError::Unauthorized`]; a non-OK status without a readable envelope
/// becomes [`ClientError::StatusCode`].
pub async fn send_json(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<&Value>,
    headers: HeaderMap,
) -> Result<ApiEnvelope, ClientError> {
    let mut request = client.request(method, url).headers(headers);
    if let Some(body) = body {
        request = request.json(body);
    }
    let response = request.send().await?;
    let status = response.status();

    let text = response.text().await?;

    if status == StatusCode::UNAUTHORIZED {
        let message = serde_json::from_str::<ApiEnvelope>(&text)
            .ok()
            .and_then(|envelope| envelope.message);
        return Err(ClientError::Unauthorized { message });
    }

    match serde_json::from_str::<ApiEnvelope>(&text) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Err(ClientError::StatusCode(status, text)),
        Err(error) => Err(ClientError::InvalidResponse(format!(
            "Failed to parse response envelope: {error}"
        ))),
    }
}
