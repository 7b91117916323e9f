//! # Identity - account registration and session authentication
//!
//! Facade crate re-exporting the public API of the identity workspace.
//!
//! ## Structure
//!
//! - **Core domain types**: `UserEmail`, `Password`, `User`, `UseCaseError`, etc.
//! - **Ports**: `UserRepository`, `SessionLayer`, `AuthenticationStrategy`, ...
//! - **Use cases**: `SignUpUseCase`, `LoginUseCase`, ...
//! - **Adapters**: in-memory and PostgreSQL/Redis stores, Postmark client, HTTP routes
//! - **Service**: `IdentityService`, the axum router and server

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use identity_core::*;
}

pub use identity_core::{
    ErrorKind, Outcome, Password, PersistedUser, PersonName, SessionId, UseCaseError, User,
    UserEmail, UserError, UserId, UserProps, VerificationToken, combine,
};

// ============================================================================
// Ports
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use identity_core::{
        AuthenticationStrategy, Credentials, EmailClient, EmailVerificationService, SessionError,
        SessionLayer, UserRepository, UserRepositoryError, VerificationTokenStore,
        VerificationTokenStoreError,
    };
}

pub use ports::*;

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use identity_application::*;
}

pub use identity_application::{
    CurrentUserUseCase, LoginOutcome, LoginResponseDto, LoginUseCase, LogoutUseCase,
    SignUpRequestDto, SignUpResponseDto, SignUpUseCase, UseCase, UserDto, VerifyEmailUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use identity_adapters::{authentication, config, email, http, persistence, sessions};
}

pub use identity_adapters::{
    DashMapSessionStore, HashMapVerificationTokenStore, InMemoryUserRepository, LocalStrategy,
    MockEmailClient, PostgresUserRepository, PostmarkEmailClient, QueuedVerificationMailer,
    RedisSessionStore, RedisVerificationTokenStore, SessionCookie,
};

// ============================================================================
// Service
// ============================================================================

pub use identity_service::{
    IdentityService, configure_postgresql, configure_redis, get_redis_client,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
