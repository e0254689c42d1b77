use crate::handlers::{self, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

/// Largest accepted `/WhoIs` body. A name lookup is a few dozen bytes.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Slack for the server-side timeout on top of the CCB client timeout.
const TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Builds the application router.
///
/// When the server-side timeout fires, the handler future is dropped, which
/// cancels any outbound CCB call still in flight. Rate limiting keys on the
/// client IP, so it needs `ConnectInfo` and is left off in tests.
pub fn build_router(state: Arc<AppState>, rate_limited: bool) -> anyhow::Result<Router> {
    let request_timeout = Duration::from_secs(state.config.ccb_timeout_secs) + TIMEOUT_MARGIN;

    let mut api_routes: Router<Arc<AppState>> = Router::new()
        .route("/WhoIs", post(handlers::who_is))
        .layer(
            ServiceBuilder::new()
                // Request size limit (a name lookup is tiny)
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(TimeoutLayer::new(request_timeout)),
        );

    if rate_limited {
        // 10 req/sec per IP, burst of 20
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .per_second(10)
                .burst_size(20)
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
        );
        api_routes = api_routes.layer(GovernorLayer {
            config: governor_conf,
        });
    }

    // Health check bypasses rate limiting
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    Ok(app)
}
