//! E-mail sender adapters.

mod log_sender;
mod resend;

pub use log_sender::LogEmailSender;
pub use resend::{ResendConfig, ResendEmailSender};
