//! CORS policy for browser clients.
//!
//! Responsibility:
//! - One consistent CORS policy for the whole API, applied at Router level.
//!
//! Policy:
//! - Development: permissive (Allow-Origin: *), WITHOUT credentials.
//! - Production: allowlist origins from Config, WITH credentials — the
//!   session rides a cookie, which browsers only attach cross-origin when
//!   credentials are allowed.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

/// Apply the CORS policy to the given Router.
///
/// IMPORTANT:
/// - Do not combine wildcard origin (`Any`) with `allow_credentials(true)`.
pub fn apply(router: Router, config: &Config) -> Router {
    let cors = if config.app_env.is_production() {
        // Exact-match allowlist. An empty allowlist allows no origin at all,
        // which beats accidentally allowing every origin.
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        });

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_credentials(true)
    } else {
        CorsLayer::new().allow_origin(Any)
    }
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
    .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
    .max_age(std::time::Duration::from_secs(60 * 10));

    router.layer(cors)
}
