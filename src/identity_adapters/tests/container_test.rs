//! Adapter tests against real PostgreSQL and Redis. They need Docker:
//! `cargo test -- --ignored`.

use std::sync::Arc;
use std::time::Duration;

use identity_adapters::{
    CredentialStore, MIGRATOR, PostgresUserRepository, RedisSessionStore,
    RedisVerificationTokenStore,
};
use identity_core::{
    Password, PersistedUser, SessionLayer, User, UserEmail, UserId, UserProps, UserRepository,
    UserRepositoryError, VerificationTokenStore,
};
use secrecy::Secret;
use sqlx::postgres::PgPoolOptions;
use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::{postgres, redis as redis_module};
use tokio::sync::RwLock;

async fn postgres_repository() -> (ContainerAsync<postgres::Postgres>, PostgresUserRepository) {
    let container = postgres::Postgres::default().start().await.unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();

    (container, PostgresUserRepository::new(pool))
}

async fn redis_connection() -> (
    ContainerAsync<redis_module::Redis>,
    Arc<RwLock<redis::Connection>>,
) {
    let container = redis_module::Redis::default().start().await.unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(6379).await.unwrap();

    let connection = redis::Client::open(format!("redis://{host}:{port}/"))
        .unwrap()
        .get_connection()
        .unwrap();

    (container, Arc::new(RwLock::new(connection)))
}

fn new_user(email: &str) -> User {
    User::create(UserProps {
        username: UserEmail::create(email).unwrap(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
    })
    .unwrap()
}

fn password(raw: &str) -> Password {
    Password::create(Secret::new(raw.to_string())).unwrap()
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_postgres_create_find_verify() {
    let (_container, repository) = postgres_repository().await;

    let created = repository
        .create(new_user("grace@navy.mil"), password("cobol"))
        .await
        .unwrap();

    assert!(
        repository
            .exists(&UserEmail::create("grace@navy.mil").unwrap())
            .await
            .unwrap()
    );
    assert_eq!(
        repository.find_by_id(created.id()).await.unwrap(),
        Some(created.clone())
    );

    let verified = repository.mark_verified(created.id()).await.unwrap();
    assert!(verified.is_verified());
    assert_eq!(
        repository.mark_verified(&UserId::new()).await,
        Err(UserRepositoryError::UserNotFound)
    );

    let record = repository
        .password_record(&UserEmail::create("grace@navy.mil").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.user.id(), created.id());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_postgres_unique_email_constraint() {
    let (_container, repository) = postgres_repository().await;
    repository
        .create(new_user("grace@navy.mil"), password("cobol"))
        .await
        .unwrap();

    let duplicate = repository
        .create(new_user("grace@navy.mil"), password("fortran"))
        .await;

    assert_eq!(duplicate, Err(UserRepositoryError::UserAlreadyExists));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_redis_sessions_and_tokens() {
    let (_container, connection) = redis_connection().await;
    let sessions = RedisSessionStore::new(connection.clone(), Duration::from_secs(60));
    let tokens = RedisVerificationTokenStore::new(connection, Duration::from_secs(60));

    let user_id = UserId::new();
    let token = tokens.issue(user_id).await.unwrap();
    assert_eq!(tokens.peek(&token).await.unwrap(), Some(user_id));
    assert_eq!(tokens.consume(&token).await.unwrap(), Some(user_id));
    assert_eq!(tokens.consume(&token).await.unwrap(), None);

    let user = PersistedUser::new(UserId::new(), new_user("grace@navy.mil"), chrono::Utc::now());

    let session_id = sessions.log_in(&user).await.unwrap();
    assert_eq!(
        sessions.principal(&session_id).await.unwrap(),
        Some(*user.id())
    );
    sessions.log_out(&session_id).await.unwrap();
    assert_eq!(sessions.principal(&session_id).await.unwrap(), None);
}
