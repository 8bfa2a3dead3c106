use crate::{ApiEnvelope, BackendRequest, ClientResult};
use opentelemetry::trace::Status;
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct RequestSpan {
    span: Span,
    start_time: Instant,
    success: Option<bool>,
}

impl RequestSpan {
    pub fn new(backend: &str, request: &BackendRequest) -> Self {
        let span = info_span!("portfolio_client.request");
        span.set_attribute("http.request.method", request.method.as_str());
        span.set_attribute("url.path", request.path.clone());
        span.set_attribute("portfolio_client.backend", backend.to_string());
        span.set_attribute(
            "portfolio_client.authenticated",
            request.bearer_token.is_some(),
        );

        Self {
            span,
            start_time: Instant::now(),
            success: None,
        }
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span.clone()).await
    }

    pub fn on_envelope(&mut self, envelope: &ApiEnvelope) {
        self.success = Some(envelope.success);
        if !envelope.success {
            if let Some(message) = &envelope.message {
                self.span
                    .set_attribute("portfolio_client.rejection", message.clone());
            }
        }
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        if let Some(success) = self.success {
            self.span
                .set_attribute("portfolio_client.success", success);
        }
        self.span.set_attribute(
            "portfolio_client.duration_seconds",
            self.start_time.elapsed().as_secs_f64(),
        );
    }
}

pub async fn trace_request<F, Fut>(
    backend: &str,
    request: BackendRequest,
    f: F,
) -> ClientResult<ApiEnvelope>
where
    F: FnOnce(BackendRequest) -> Fut,
    Fut: std::future::Future<Output = ClientResult<ApiEnvelope>>,
{
    let mut span = RequestSpan::new(backend, &request);
    let result = span.instrument_future(f(request)).await;

    match &result {
        Ok(envelope) => span.on_envelope(envelope),
        Err(error) => span.on_error(error),
    }

    span.on_end();
    result
}
