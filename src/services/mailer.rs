use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Invalid attachment content type")]
    ContentType,

    #[error("Mail build error: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

pub struct MailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: &'static str,
}

/// SMTP dispatch. When no SMTP host is configured the mailer is disabled and
/// `send` becomes a logged no-op, so development and test environments work
/// without a mail relay.
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    pub fn new(host: Option<&str>, port: u16, user: &str, pass: &str, from: &str) -> Self {
        let transport = host.map(|host| {
            let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .unwrap_or_else(|_| AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host))
                .port(port);
            if !user.is_empty() {
                builder = builder.credentials(Credentials::new(user.to_string(), pass.to_string()));
            }
            builder.build()
        });

        Self {
            transport,
            from: from.to_string(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: "HR Department <hr@company.com>".to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachments: Vec<MailAttachment>,
    ) -> Result<(), MailError> {
        let Some(transport) = &self.transport else {
            tracing::warn!(to, subject, "SMTP not configured, skipping email dispatch");
            return Ok(());
        };

        let from: Mailbox = self.from.parse()?;
        let to: Mailbox = to.parse()?;

        let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(body.to_string()));
        for attachment in attachments {
            let content_type =
                ContentType::parse(attachment.content_type).map_err(|_| MailError::ContentType)?;
            multipart = multipart.singlepart(
                Attachment::new(attachment.filename).body(attachment.content, content_type),
            );
        }

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .multipart(multipart)?;

        transport.send(message).await?;
        Ok(())
    }
}
