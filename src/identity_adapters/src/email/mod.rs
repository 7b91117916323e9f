pub mod mock_email_client;
pub mod postmark_email_client;
pub mod verification_mailer;

pub use mock_email_client::{MockEmailClient, SentEmail};
pub use postmark_email_client::{PostmarkEmailClient, PostmarkError};
pub use verification_mailer::{QueuedVerificationMailer, verification_link};
