use std::sync::Arc;

use identity_adapters::{MIGRATOR, config::PostgresSettings};
use redis::{Client, RedisResult};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::sync::RwLock;

/// Connect to PostgreSQL and apply pending migrations.
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, sqlx::Error> {
    let pg_pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(settings.url.expose_secret())
        .await?;

    MIGRATOR.run(&pg_pool).await?;

    Ok(pg_pool)
}

/// Open a Redis connection shared by the session and verification token stores.
pub fn configure_redis(redis_host_name: &str) -> RedisResult<Arc<RwLock<redis::Connection>>> {
    let connection = get_redis_client(redis_host_name)?.get_connection()?;
    Ok(Arc::new(RwLock::new(connection)))
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
