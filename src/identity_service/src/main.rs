use color_eyre::eyre::{Result, bail};
use identity_adapters::{
    CredentialStore, DashMapSessionStore, HashMapVerificationTokenStore, InMemoryUserRepository,
    LocalStrategy, PostgresUserRepository, PostmarkEmailClient, QueuedVerificationMailer,
    RedisSessionStore, RedisVerificationTokenStore, SessionCookie, config::IdentitySettings,
};
use identity_core::{SessionLayer, UserRepository, VerificationTokenStore};
use identity_service::{IdentityService, configure_postgresql, configure_redis};
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = IdentitySettings::load()?;

    match (&settings.postgres, &settings.redis) {
        (Some(postgres), Some(redis)) => {
            let pg_pool = configure_postgresql(postgres).await?;
            let redis_conn = configure_redis(&redis.host_name)?;
            tracing::info!("Using PostgreSQL users and Redis sessions");

            serve(
                &settings,
                PostgresUserRepository::new(pg_pool),
                RedisSessionStore::new(redis_conn.clone(), settings.session.ttl()),
                RedisVerificationTokenStore::new(redis_conn, settings.verification.token_ttl()),
            )
            .await
        }
        (None, None) => {
            tracing::warn!("No PostgreSQL or Redis configured, state is kept in memory");

            serve(
                &settings,
                InMemoryUserRepository::new(),
                DashMapSessionStore::new(settings.session.ttl()),
                HashMapVerificationTokenStore::new(settings.verification.token_ttl()),
            )
            .await
        }
        _ => bail!("postgres and redis must be configured together"),
    }
}

async fn serve<R, L, T>(
    settings: &IdentitySettings,
    user_repository: R,
    session_layer: L,
    token_store: T,
) -> Result<()>
where
    R: UserRepository + CredentialStore + Clone + 'static,
    L: SessionLayer + Clone + 'static,
    T: VerificationTokenStore + Clone + 'static,
{
    let email_client = PostmarkEmailClient::from_settings(&settings.email_client)?;

    let (mailer, _mail_worker) = QueuedVerificationMailer::spawn(
        token_store.clone(),
        email_client,
        settings.verification.link_base_url.clone(),
    );

    let identity_service = IdentityService::new(
        user_repository.clone(),
        LocalStrategy::new(user_repository),
        session_layer,
        token_store,
        mailer,
        SessionCookie::from(&settings.session),
    );

    let listener = TcpListener::bind(&settings.application.address).await?;

    identity_service
        .run_standalone(listener, Some(settings.allowed_origins.clone()))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
