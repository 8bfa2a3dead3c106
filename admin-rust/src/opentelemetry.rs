use crate::AdminResult;
use opentelemetry::trace::Status;
use std::future::Future;
use tracing::info_span;
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Clone, Copy, Debug)]
pub enum Operation {
    FetchAll,
    Create,
    Update,
    Delete,
    MarkRead,
    SaveContent,
    SubmitContact,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::FetchAll => "fetch_all",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::MarkRead => "mark_read",
            Self::SaveContent => "save_content",
            Self::SubmitContact => "submit_contact",
        }
    }
}

/// Run a manager operation inside a `portfolio_admin.operation` span.
pub async fn trace_operation<T, Fut>(
    operation: Operation,
    subject: &str,
    future: Fut,
) -> AdminResult<T>
where
    Fut: Future<Output = AdminResult<T>>,
{
    let span = info_span!(
        "portfolio_admin.operation",
        operation = operation.as_str(),
        subject
    );
    span.set_attribute("portfolio_admin.operation", operation.as_str());
    span.set_attribute("portfolio_admin.subject", subject.to_string());

    let result = future.instrument(span.clone()).await;
    if let Err(error) = &result {
        span.set_attribute("exception.message", error.to_string());
        span.set_status(Status::error(error.to_string()));
    }
    result
}
