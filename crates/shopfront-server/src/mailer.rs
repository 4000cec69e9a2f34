//! SMTP delivery for contact-form submissions.
//!
//! Each submission becomes one plain-text message to the shop owner with the
//! sender as `Reply-To`. Without SMTP settings the contact route reports
//! `not_configured`.

use std::time::Duration;

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use shopfront_core::{AppConfig, ContactMailConfig, SmtpSecurity};

/// A validated contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[cfg(test)]
    #[error("stub delivery failed: {0}")]
    Stub(#[from] lettre::transport::stub::Error),
}

enum Transport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    #[cfg(test)]
    Stub(lettre::transport::stub::AsyncStubTransport),
}

pub struct ContactMailer {
    transport: Transport,
    to: Mailbox,
    from: Mailbox,
}

impl std::fmt::Debug for ContactMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactMailer")
            .field("to", &self.to.to_string())
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

impl ContactMailer {
    /// Builds the SMTP transport. No connection is made until the first send.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if an address does not parse or the TLS
    /// parameters for `smtp_host` cannot be built.
    pub fn new(config: &ContactMailConfig, timeout_secs: u64) -> Result<Self, MailError> {
        let builder = match config.security {
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?,
            SmtpSecurity::Plain => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            }
        };
        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(timeout_secs)));
        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: Transport::Smtp(builder.build()),
            to: config.to_address.parse()?,
            from: config.from_address.parse()?,
        })
    }

    /// `Ok(None)` when contact mail is not configured.
    ///
    /// # Errors
    ///
    /// As for [`ContactMailer::new`].
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, MailError> {
        config
            .contact_mail
            .as_ref()
            .map(|mail| Self::new(mail, config.request_timeout_secs))
            .transpose()
    }

    #[cfg(test)]
    pub(crate) fn with_stub(
        to: &str,
        from: &str,
        stub: lettre::transport::stub::AsyncStubTransport,
    ) -> Result<Self, MailError> {
        Ok(Self {
            transport: Transport::Stub(stub),
            to: to.parse()?,
            from: from.parse()?,
        })
    }

    fn compose(&self, message: &ContactMessage) -> Result<Message, MailError> {
        let reply_to = Mailbox::new(Some(message.name.clone()), message.email.parse::<Address>()?);
        let email = Message::builder()
            .from(self.from.clone())
            .reply_to(reply_to)
            .to(self.to.clone())
            .subject(subject_line(message))
            .header(ContentType::TEXT_PLAIN)
            .body(body_text(message))?;
        Ok(email)
    }

    /// Sends `message` to the configured recipient.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the sender address is rejected or SMTP
    /// delivery fails.
    pub async fn send(&self, message: &ContactMessage) -> Result<(), MailError> {
        let email = self.compose(message)?;
        match &self.transport {
            Transport::Smtp(smtp) => {
                smtp.send(email).await?;
            }
            #[cfg(test)]
            Transport::Stub(stub) => {
                stub.send(email).await?;
            }
        }
        tracing::info!(reply_to = %message.email, "contact message sent");
        Ok(())
    }
}

fn subject_line(message: &ContactMessage) -> String {
    match message.subject.as_deref() {
        Some(subject) => format!("Contact form: {subject}"),
        None => format!("Contact form: message from {}", message.name),
    }
}

fn body_text(message: &ContactMessage) -> String {
    let mut text = format!("Name: {}\nEmail: {}\n", message.name, message.email);
    if let Some(phone) = &message.phone {
        text.push_str(&format!("Phone: {phone}\n"));
    }
    text.push('\n');
    text.push_str(&message.message);
    text
}
