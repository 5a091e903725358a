pub mod message;
pub mod sendmail;

use async_trait::async_trait;

use crate::app::Result;

pub use message::{Envelope, Message};
pub use sendmail::SendmailMailer;

/// Outbound mail transport.
///
/// `Ok(())` means the transport accepted the message; only then is the
/// entry recorded as delivered.
#[async_trait]
pub trait Mailer {
    async fn send(&self, message: &Message) -> Result<()>;
}
