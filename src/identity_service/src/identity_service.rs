use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use identity_adapters::{
    SessionCookie,
    config::AllowedOrigins,
    http::routes::{login, logout, me, signup, verify_email, verify_email_link},
};
use identity_core::{
    AuthenticationStrategy, EmailVerificationService, SessionLayer, UserRepository,
    VerificationTokenStore,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// HTTP surface of the identity service.
pub struct IdentityService {
    router: Router,
}

impl IdentityService {
    /// Wire the routes to their collaborators.
    ///
    /// Every collaborator is cheap to clone (shared state behind an `Arc`),
    /// and each route only receives the ones it uses.
    pub fn new<R, S, L, T, V>(
        user_repository: R,
        strategy: S,
        session_layer: L,
        token_store: T,
        verification_service: V,
        session_cookie: SessionCookie,
    ) -> Self
    where
        R: UserRepository + Clone + 'static,
        S: AuthenticationStrategy + Clone + 'static,
        L: SessionLayer + Clone + 'static,
        T: VerificationTokenStore + Clone + 'static,
        V: EmailVerificationService + Clone + 'static,
    {
        let router = Router::new()
            .route("/signup", post(signup::<R, V>))
            .with_state((user_repository.clone(), verification_service))
            .route("/login", post(login::<S, L>))
            .with_state((strategy, session_layer.clone(), session_cookie.clone()))
            .route("/logout", post(logout::<L>))
            .with_state((session_layer.clone(), session_cookie.clone()))
            .route("/me", get(me::<L, R>))
            .with_state((session_layer, user_repository.clone(), session_cookie))
            .route(
                "/verify-email",
                post(verify_email::<T, R>).get(verify_email_link::<T, R>),
            )
            .with_state((token_store, user_repository));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Router ready to be nested into a larger application.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Identity service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
