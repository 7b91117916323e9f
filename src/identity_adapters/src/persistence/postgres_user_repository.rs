use chrono::{DateTime, Utc};
use identity_core::{
    Password, PersistedUser, User, UserEmail, UserId, UserRepository, UserRepositoryError,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool, migrate::Migrator};
use uuid::Uuid;

use super::password_hashing::compute_password_hash;
use crate::authentication::{CredentialStore, PasswordRecord};

/// Schema for the users table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, verified, created_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_persisted(self) -> Result<(PersistedUser, Secret<String>), UserRepositoryError> {
        let email = UserEmail::try_from(Secret::new(self.email))
            .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;
        let user = User::restore(email, &self.first_name, &self.last_name, self.verified)
            .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;

        Ok((
            PersistedUser::new(UserId::from(self.id), user, self.created_at),
            Secret::new(self.password_hash),
        ))
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn unexpected(error: sqlx::Error) -> UserRepositoryError {
    UserRepositoryError::UnexpectedError(error.to_string())
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, id: &UserId) -> Result<Option<UserRow>, UserRepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)
    }

    async fn fetch_by_email(&self, email: &UserEmail) -> Result<Option<UserRow>, UserRepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)
    }
}

#[async_trait::async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(name = "Checking email in PostgreSQL", skip_all)]
    async fn exists(&self, email: &UserEmail) -> Result<bool, UserRepositoryError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create(
        &self,
        user: User,
        password: Password,
    ) -> Result<PersistedUser, UserRepositoryError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserRepositoryError::UnexpectedError)?;

        let sql = format!(
            "INSERT INTO users (id, email, password_hash, first_name, last_name, verified) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(user.username().as_str())
            .bind(password_hash.expose_secret())
            .bind(user.first_name().as_str())
            .bind(user.last_name().as_str())
            .bind(user.is_verified())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    return UserRepositoryError::UserAlreadyExists;
                }
                unexpected(e)
            })?;

        row.into_persisted().map(|(user, _)| user)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<PersistedUser>, UserRepositoryError> {
        self.fetch_by_id(id)
            .await?
            .map(|row| row.into_persisted().map(|(user, _)| user))
            .transpose()
    }

    #[tracing::instrument(name = "Verifying user in PostgreSQL", skip_all)]
    async fn mark_verified(&self, id: &UserId) -> Result<PersistedUser, UserRepositoryError> {
        let sql = format!("UPDATE users SET verified = TRUE WHERE id = $1 RETURNING {USER_COLUMNS}");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(UserRepositoryError::UserNotFound)?;

        row.into_persisted().map(|(user, _)| user)
    }
}

#[async_trait::async_trait]
impl CredentialStore for PostgresUserRepository {
    #[tracing::instrument(name = "Loading credentials from PostgreSQL", skip_all)]
    async fn password_record(
        &self,
        email: &UserEmail,
    ) -> Result<Option<PasswordRecord>, UserRepositoryError> {
        self.fetch_by_email(email)
            .await?
            .map(|row| {
                row.into_persisted()
                    .map(|(user, password_hash)| PasswordRecord {
                        user,
                        password_hash,
                    })
            })
            .transpose()
    }
}
