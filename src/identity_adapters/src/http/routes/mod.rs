pub mod error;
pub mod login;
pub mod logout;
pub mod me;
pub mod signup;
pub mod verify_email;

pub use error::{ErrorResponse, IdentityApiError};
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use signup::signup;
pub use verify_email::{VerifyEmailRequest, verify_email, verify_email_link};
