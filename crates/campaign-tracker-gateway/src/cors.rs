//! CORS layer built from the `cors` config section.

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::CorsSection;

/// Any method and header; no credentials. Origins as configured.
///
/// Origins are checked by `CorsSection::validate`; any that fail to parse
/// here are skipped.
pub fn layer(cfg: &CorsSection) -> CorsLayer {
    let origins = if cfg.allows_any() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cfg.allow_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
