use lettre::message::header::ContentType;
use lettre::message::{Attachment as MimeAttachment, Mailbox, Message, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use tracing::debug;

use super::{Email, MailTransport};
use crate::config::MailSettings;
use crate::error::{ExportError, Result};

/// Sends change emails through an SMTP relay
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &MailSettings) -> Result<Self> {
        let from: Mailbox = settings
            .from
            .parse()
            .map_err(|e| {
                ExportError::Mail(format!("invalid from address '{}': {e}", settings.from))
            })?;

        let mut builder = if settings.use_tls {
            SmtpTransport::starttls_relay(&settings.server)
                .map_err(|e| ExportError::Mail(format!("invalid SMTP host: {e}")))?
                .port(settings.port)
        } else {
            SmtpTransport::builder_dangerous(&settings.server).port(settings.port)
        };

        if let Some(username) = settings.username.as_deref().filter(|u| !u.trim().is_empty()) {
            builder = builder.credentials(Credentials::new(
                username.to_string(),
                settings.password.clone().unwrap_or_default(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, email: &Email) -> Result<Message> {
        if email.to.is_empty() {
            return Err(ExportError::Mail(format!("'{}' has no recipients", email.subject)));
        }
        let mut builder = Message::builder().from(self.from.clone()).subject(&email.subject);
        for address in &email.to {
            let mailbox: Mailbox = address
                .parse()
                .map_err(|e| ExportError::Mail(format!("invalid recipient '{address}': {e}")))?;
            builder = builder.to(mailbox);
        }

        let mut body = MultiPart::mixed().singlepart(SinglePart::plain(email.body.to_text()));
        for attachment in &email.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| ExportError::Mail(e.to_string()))?;
            body = body.singlepart(
                MimeAttachment::new(attachment.file_name.clone())
                    .body(attachment.bytes.clone(), content_type),
            );
        }

        builder
            .multipart(body)
            .map_err(|e| ExportError::Mail(format!("failed to build email: {e}")))
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, email: &Email) -> Result<()> {
        let message = self.build_message(email)?;
        debug!(subject = %email.subject, "sending email via SMTP");
        self.transport
            .send(&message)
            .map_err(|e| ExportError::Mail(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Attachment, EmailBody};

    fn mailer() -> SmtpMailer {
        SmtpMailer::new(&MailSettings {
            server: "localhost".to_string(),
            port: 2525,
            username: None,
            password: None,
            from: "Bakery <noreply@example.com>".to_string(),
            use_tls: false,
        })
        .unwrap()
    }

    fn email(to: Vec<String>) -> Email {
        Email {
            to,
            subject: "Sale SAL-0001 Deleted".to_string(),
            body: EmailBody::default(),
            attachments: vec![Attachment::new("SALE_INVOICE.xlsx", vec![1, 2, 3])],
        }
    }

    #[test]
    fn test_empty_recipient_list_is_a_mail_error() {
        match mailer().send(&email(Vec::new())) {
            Err(ExportError::Mail(msg)) => assert!(msg.contains("no recipients")),
            other => panic!("expected mail error, got {other:?}"),
        }
    }

    #[test]
    fn test_message_carries_attachment() {
        let message = mailer()
            .build_message(&email(vec!["ops@example.com".to_string()]))
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("To: ops@example.com"));
        assert!(raw.contains("SALE_INVOICE.xlsx"));
    }
}
