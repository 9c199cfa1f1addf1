use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use tracing::debug;

use crate::{config::MailCredentials, extractor::ListingRecord};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivers a matched listing to the operator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notify: Send + Sync {
    async fn notify(&self, record: &ListingRecord) -> Result<(), NotifyError>;
}

/// HTML body: a heading linking the listing, then its body markup.
pub fn compose_html(record: &ListingRecord) -> String {
    format!(
        "<html><body><h3><a href='{}'>{}</a></h3>{}</body></html>",
        record.url, record.date_posted, record.description_html
    )
}

/// Build the mail sent for `record`, addressed from and to `mailbox`.
pub fn compose_message(record: &ListingRecord, mailbox: &Mailbox) -> Result<Message, NotifyError> {
    let message = Message::builder()
        .from(mailbox.clone())
        .to(mailbox.clone())
        .subject(record.title.as_str())
        .multipart(MultiPart::alternative().singlepart(SinglePart::html(compose_html(record))))?;
    Ok(message)
}

/// Sends each match through an authenticated STARTTLS submission session.
pub struct SmtpNotifier {
    mailbox: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    /// Prepare the transport. No connection is made until the first send.
    pub fn new(credentials: &MailCredentials) -> Result<Self, NotifyError> {
        let mailbox: Mailbox = credentials.address.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&credentials.relay)?
            .credentials(Credentials::new(
                credentials.address.clone(),
                credentials.password.clone(),
            ))
            .build();

        Ok(Self { mailbox, transport })
    }
}

#[async_trait]
impl Notify for SmtpNotifier {
    async fn notify(&self, record: &ListingRecord) -> Result<(), NotifyError> {
        debug!("sending email for {}", record.title);
        let message = compose_message(record, &self.mailbox)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ListingRecord {
        ListingRecord {
            url: "http://denver.craigslist.org/web/5012345678.html".to_string(),
            id: "5012345678".to_string(),
            date_posted: "2015-04-02 10:21am".to_string(),
            title: "Python / AWS Engineer".to_string(),
            description_text: "python and aws".to_string(),
            description_html: "<section id=\"postingbody\">\n python and aws\n</section>\n"
                .to_string(),
        }
    }

    #[test]
    fn test_compose_html_links_listing() {
        let html = compose_html(&record());
        assert_eq!(
            html,
            "<html><body><h3><a href='http://denver.craigslist.org/web/5012345678.html'>2015-04-02 10:21am</a></h3>\
             <section id=\"postingbody\">\n python and aws\n</section>\n</body></html>"
        );
    }

    #[test]
    fn test_compose_message_headers() {
        let mailbox: Mailbox = "me@gmail.com".parse().unwrap();
        let message = compose_message(&record(), &mailbox).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("From: me@gmail.com"));
        assert!(raw.contains("To: me@gmail.com"));
        assert!(raw.contains("Subject: Python / AWS Engineer"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_bad_address_is_rejected() {
        let credentials = MailCredentials {
            address: "not an address".to_string(),
            password: "secret".to_string(),
            relay: "smtp.gmail.com".to_string(),
        };
        assert!(matches!(
            SmtpNotifier::new(&credentials),
            Err(NotifyError::Address(_))
        ));
    }

    #[tokio::test]
    async fn test_smtp_notifier_builds_for_valid_account() {
        let credentials = MailCredentials {
            address: "me@gmail.com".to_string(),
            password: "secret".to_string(),
            relay: "smtp.gmail.com".to_string(),
        };
        assert!(SmtpNotifier::new(&credentials).is_ok());
    }
}
