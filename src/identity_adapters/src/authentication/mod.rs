pub mod local_strategy;

pub use local_strategy::{CredentialStore, LocalStrategy, LocalStrategyError, PasswordRecord};
