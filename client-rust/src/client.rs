use crate::{
    opentelemetry::trace_request, Backend, BackendRequest, ClientError, ClientOptions,
    ClientResult, ContactSubmission, ContentFields, ContentKey, ContentUpdate, Creatable,
    Editable, HttpBackend, HttpMethod, LoginOutcome, LoginRequest, Message, Resource, ResourceId,
    SessionStore,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const LOGIN_FAILED: &str = "Login failed";

/// HTTP client adapter for the portfolio backend.
///
/// Every call reads the bearer token from the injected [`SessionStore`]. A
/// `401` on an authenticated call means the session expired: the store is
/// cleared so guarded views redirect to the login page.
#[derive(Clone)]
pub struct PortfolioClient {
    backend: Arc<dyn Backend>,
    session: SessionStore,
}

impl PortfolioClient {
    pub fn new(backend: Arc<dyn Backend>, session: SessionStore) -> Self {
        Self { backend, session }
    }

    /// Client over [`HttpBackend`].
    pub fn http(options: ClientOptions, session: SessionStore) -> ClientResult<Self> {
        Ok(Self::new(Arc::new(HttpBackend::new(options)?), session))
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    async fn call(&self, mut request: BackendRequest) -> ClientResult<Option<Value>> {
        request.bearer_token = self.session.token();
        let authenticated = request.bearer_token.is_some();
        let backend = self.backend.clone();

        let result = trace_request(backend.name(), request, |request| async move {
            backend.send(request).await
        })
        .await;

        match result {
            Ok(envelope) if envelope.success => Ok(envelope.data),
            Ok(envelope) => Err(ClientError::Rejected {
                message: envelope.message,
            }),
            Err(error) => {
                if error.is_unauthorized() && authenticated {
                    tracing::warn!("backend rejected the session token, signing out");
                    self.session.logout();
                }
                Err(error)
            }
        }
    }

    /// Log in with the admin credentials. Failures are reported in the
    /// outcome, never as an error.
    pub async fn login(&self, identifier: &str, secret: &str) -> LoginOutcome {
        let request = LoginRequest {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        };
        let body = match to_body(&request) {
            Ok(body) => body,
            Err(error) => return login_failure(&error),
        };

        // Sent without a token even if a stale one is stored.
        let backend = self.backend.clone();
        let result = trace_request(
            backend.name(),
            BackendRequest::new(HttpMethod::Post, "/auth/login").with_body(body),
            |request| async move { backend.send(request).await },
        )
        .await;

        let envelope = match result {
            Ok(envelope) => envelope,
            Err(error) => return login_failure(&error),
        };
        if !envelope.success {
            return login_failure(&ClientError::Rejected {
                message: envelope.message,
            });
        }

        let token = envelope
            .extra
            .get("token")
            .or_else(|| envelope.data.as_ref().and_then(|data| data.get("token")))
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty());

        match token {
            Some(token) => {
                self.session.establish(token);
                tracing::debug!("admin logged in");
                LoginOutcome::Success
            }
            None => login_failure(&ClientError::InvalidResponse(
                "login succeeded without a token".to_string(),
            )),
        }
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    pub async fn fetch_content(&self) -> ClientResult<ContentFields> {
        let data = self
            .call(BackendRequest::new(HttpMethod::Get, "/content"))
            .await?;
        decode_or_default(data, "content")
    }

    pub async fn update_content(&self, key: ContentKey, value: &str) -> ClientResult<()> {
        let body = to_body(&ContentUpdate {
            key,
            value: value.to_string(),
        })?;
        self.call(BackendRequest::new(HttpMethod::Post, "/content/update").with_body(body))
            .await?;
        Ok(())
    }

    /// The whole collection in server order.
    pub async fn list<R: Resource>(&self) -> ClientResult<Vec<R>> {
        let data = self
            .call(BackendRequest::new(
                HttpMethod::Get,
                format!("/{}", R::COLLECTION),
            ))
            .await?;
        decode_or_default(data, R::COLLECTION)
    }

    /// Post a draft and return the stored entity with its assigned id.
    pub async fn create<R: Creatable>(&self, draft: &R::Draft) -> ClientResult<R> {
        let body = to_body(draft)?;
        let data = self
            .call(
                BackendRequest::new(HttpMethod::Post, format!("/{}", R::COLLECTION))
                    .with_body(body),
            )
            .await?;
        decode(data, R::LABEL)
    }

    pub async fn update<R: Editable>(&self, id: ResourceId, patch: &R::Patch) -> ClientResult<()> {
        let body = to_body(patch)?;
        self.call(
            BackendRequest::new(HttpMethod::Put, format!("/{}/{id}", R::COLLECTION))
                .with_body(body),
        )
        .await?;
        Ok(())
    }

    pub async fn delete<R: Resource>(&self, id: ResourceId) -> ClientResult<()> {
        self.call(BackendRequest::new(
            HttpMethod::Delete,
            format!("/{}/{id}", R::COLLECTION),
        ))
        .await?;
        Ok(())
    }

    pub async fn mark_message_read(&self, id: ResourceId) -> ClientResult<()> {
        self.call(BackendRequest::new(
            HttpMethod::Put,
            format!("/{}/{id}/read", Message::COLLECTION),
        ))
        .await?;
        Ok(())
    }

    /// Store a contact-form message on the backend.
    pub async fn submit_contact(&self, submission: &ContactSubmission) -> ClientResult<()> {
        let body = to_body(submission)?;
        self.call(
            BackendRequest::new(HttpMethod::Post, format!("/{}", Message::COLLECTION))
                .with_body(body),
        )
        .await?;
        Ok(())
    }
}

fn login_failure(error: &ClientError) -> LoginOutcome {
    tracing::debug!(%error, "admin login failed");
    LoginOutcome::Failure {
        message: error.user_message(LOGIN_FAILED),
    }
}

fn to_body<T: Serialize>(value: &T) -> ClientResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| ClientError::InvalidInput(format!("Failed to encode request: {error}")))
}

fn decode<T: DeserializeOwned>(data: Option<Value>, what: &str) -> ClientResult<T> {
    let data = data.ok_or_else(|| {
        ClientError::InvalidResponse(format!("response for {what} carried no data"))
    })?;
    serde_json::from_value(data)
        .map_err(|error| ClientError::InvalidResponse(format!("Malformed {what}: {error}")))
}

fn decode_or_default<T: DeserializeOwned + Default>(
    data: Option<Value>,
    what: &str,
) -> ClientResult<T> {
    match data {
        None | Some(Value::Null) => Ok(T::default()),
        Some(data) => decode(Some(data), what),
    }
}
