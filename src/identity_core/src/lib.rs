pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    email::UserEmail,
    error::{ErrorKind, UseCaseError},
    password::Password,
    person_name::{NameError, PersonName},
    result::{Outcome, combine},
    token::{SessionId, TokenError, VerificationToken},
    user::{PersistedUser, User, UserError, UserId, UserProps},
};

pub use ports::{
    repositories::{
        UserRepository, UserRepositoryError, VerificationTokenStore, VerificationTokenStoreError,
    },
    services::{EmailClient, EmailVerificationService},
    sessions::{SessionError, SessionLayer},
};

pub use strategies::authenticator::{AuthenticationStrategy, Credentials};
