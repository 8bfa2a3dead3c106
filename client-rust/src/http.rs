use crate::{
    client_utils, ApiEnvelope, Backend, BackendRequest, ClientError, ClientResult, HttpMethod,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION},
    Client, Method,
};
use std::{collections::HashMap, env, time::Duration};

const BACKEND_NAME: &str = "http";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const BASE_URL_ENV: &str = "PORTFOLIO_API_URL";
pub const TIMEOUT_ENV: &str = "PORTFOLIO_API_TIMEOUT_SECS";

#[derive(Clone, Default)]
pub struct ClientOptions {
    /// Root of the REST API. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    /// Per-request timeout. Defaults to [`DEFAULT_TIMEOUT`]. Ignored when a
    /// custom `client` is supplied.
    pub timeout: Option<Duration>,
    /// Extra headers sent with every request.
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

impl ClientOptions {
    /// Read the base URL and timeout from `PORTFOLIO_API_URL` and
    /// `PORTFOLIO_API_TIMEOUT_SECS`. Unset variables keep the defaults.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = env::var(BASE_URL_ENV).ok().filter(|url| !url.is_empty());
        let timeout = match env::var(TIMEOUT_ENV) {
            Ok(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|error| {
                ClientError::InvalidInput(format!("Invalid {TIMEOUT_ENV} value '{raw}': {error}"))
            })?)),
            Err(_) => None,
        };
        Ok(Self {
            base_url,
            timeout,
            ..Default::default()
        })
    }
}

/// [`Backend`] over HTTP with reqwest.
pub struct HttpBackend {
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

impl HttpBackend {
    pub fn new(mut options: ClientOptions) -> ClientResult<Self> {
        let base_url = options
            .base_url
            .take()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = match options.client.take() {
            Some(client) => client,
            None => Client::builder()
                .timeout(options.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()?,
        };

        Ok(Self {
            base_url,
            client,
            headers: options.headers.unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_headers(&self, bearer_token: Option<&str>) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                ClientError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                ClientError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(header_name, header_value);
        }

        if let Some(token) = bearer_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|error| {
                ClientError::InvalidInput(format!("Invalid session token header value: {error}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn send(&self, request: BackendRequest) -> ClientResult<ApiEnvelope> {
        let headers = self.request_headers(request.bearer_token.as_deref())?;
        client_utils::send_json(
            &self.client,
            to_reqwest_method(request.method),
            &format!("{}{}", self.base_url, request.path),
            request.body.as_ref(),
            headers,
        )
        .await
    }
}
