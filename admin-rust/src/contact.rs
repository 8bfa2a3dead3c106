use crate::{
    opentelemetry::{trace_operation, Operation},
    AdminError, AdminResult, NoticeBoard,
};
use email_address::EmailAddress;
use portfolio_client::{ClientError, ContactSubmission, PortfolioClient};
use serde::Serialize;
use std::sync::Arc;

pub const EMAIL_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// The public contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Check the form and produce what gets delivered.
    pub fn validate(&self) -> AdminResult<ContactSubmission> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() {
            return Err(AdminError::Validation("Name is required".to_string()));
        }
        if email.is_empty() {
            return Err(AdminError::Validation("Email is required".to_string()));
        }
        if !EmailAddress::is_valid(email) {
            return Err(AdminError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        if message.is_empty() {
            return Err(AdminError::Validation("Message is required".to_string()));
        }

        Ok(ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactDelivery {
    /// The message left the site.
    Sent,
    /// Nothing was sent; the visitor finishes in another app at this URL.
    OpenLink(String),
}

/// Where contact form submissions go.
#[async_trait::async_trait]
pub trait ContactChannel: Send + Sync {
    fn name(&self) -> &'static str;
    async fn deliver(&self, submission: &ContactSubmission) -> AdminResult<ContactDelivery>;
}

/// Stores the message on the portfolio backend, where it shows up in the
/// dashboard inbox.
pub struct RestContactChannel {
    client: PortfolioClient,
}

impl RestContactChannel {
    pub fn new(client: PortfolioClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ContactChannel for RestContactChannel {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn deliver(&self, submission: &ContactSubmission) -> AdminResult<ContactDelivery> {
        self.client.submit_contact(submission).await?;
        Ok(ContactDelivery::Sent)
    }
}

#[derive(Serialize)]
struct RelayTemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    time: String,
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: RelayTemplateParams<'a>,
}

/// Sends the message through a hosted email relay. The relay renders the
/// template and mails it to the site owner.
pub struct EmailRelayChannel {
    http: reqwest::Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    user_id: String,
}

impl EmailRelayChannel {
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: EMAIL_RELAY_ENDPOINT.to_string(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            user_id: user_id.into(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }
}

#[async_trait::async_trait]
impl ContactChannel for EmailRelayChannel {
    fn name(&self) -> &'static str {
        "email_relay"
    }

    async fn deliver(&self, submission: &ContactSubmission) -> AdminResult<ContactDelivery> {
        let request = RelayRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.user_id,
            template_params: RelayTemplateParams {
                name: &submission.name,
                email: &submission.email,
                message: &submission.message,
                time: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            },
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::StatusCode(status, body).into());
        }
        Ok(ContactDelivery::Sent)
    }
}

/// Builds a prefilled chat link instead of sending anything.
pub struct MessagingLinkChannel {
    phone: String,
}

impl MessagingLinkChannel {
    /// `phone` in international format; spaces, dashes and a leading `+`
    /// are dropped.
    pub fn new(phone: &str) -> Self {
        Self {
            phone: phone.chars().filter(char::is_ascii_digit).collect(),
        }
    }

    #[must_use]
    pub fn link(&self, submission: &ContactSubmission) -> String {
        let text = format!(
            "Name: {}\nEmail: {}\n\n{}",
            submission.name, submission.email, submission.message
        );
        format!(
            "https://wa.me/{}?text={}",
            self.phone,
            urlencoding::encode(&text)
        )
    }
}

#[async_trait::async_trait]
impl ContactChannel for MessagingLinkChannel {
    fn name(&self) -> &'static str {
        "messaging_link"
    }

    async fn deliver(&self, submission: &ContactSubmission) -> AdminResult<ContactDelivery> {
        Ok(ContactDelivery::OpenLink(self.link(submission)))
    }
}

/// The contact page: validates the form and hands it to the configured
/// channel.
pub struct ContactPage {
    channel: Arc<dyn ContactChannel>,
    notices: NoticeBoard,
}

impl ContactPage {
    pub fn new(channel: Arc<dyn ContactChannel>, notices: NoticeBoard) -> Self {
        Self { channel, notices }
    }

    #[must_use]
    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Deliver the form. It is cleared only after a successful delivery.
    pub async fn submit(&self, form: &mut ContactForm) -> AdminResult<ContactDelivery> {
        let result = trace_operation(Operation::SubmitContact, self.channel.name(), async {
            let submission = form.validate()?;
            self.channel.deliver(&submission).await
        })
        .await;

        match result {
            Ok(delivery) => {
                form.clear();
                self.notices
                    .success("Your message has been sent successfully!");
                Ok(delivery)
            }
            Err(error) => {
                self.notices
                    .error(error.user_message("Failed to send message."));
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: " Sam ".to_string(),
            email: "sam@example.com".to_string(),
            message: "Can you cut my vlog?".to_string(),
        }
    }

    #[test]
    fn validation_trims_and_checks_email() {
        assert_eq!(form().validate().unwrap().name, "Sam");

        let invalid = ContactForm {
            email: "sam-at-example".to_string(),
            ..form()
        };
        assert!(matches!(
            invalid.validate(),
            Err(AdminError::Validation(message)) if message == "Please enter a valid email address"
        ));

        let empty = ContactForm {
            message: "  ".to_string(),
            ..form()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn messaging_link_is_prefilled_and_encoded() {
        let channel = MessagingLinkChannel::new("+212 600-000000");
        let link = channel.link(&form().validate().unwrap());
        assert_eq!(
            link,
            "https://wa.me/212600000000?text=Name%3A%20Sam%0AEmail%3A%20sam%40example.com%0A%0ACan%20you%20cut%20my%20vlog%3F"
        );
    }
}
