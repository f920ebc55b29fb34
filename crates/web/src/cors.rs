use std::time::Duration;

use anyhow::{Result, bail};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Which browser origins may read the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    Open,
    SingleOrigin { origins: Vec<String> },
}

impl CorsPolicy {
    /// `policy` is `open` or `single-origin`; `origins` is a comma separated
    /// whitelist, required for `single-origin`.
    pub fn from_parts(policy: &str, origins: &str) -> Result<Self> {
        match policy.trim() {
            "open" => Ok(Self::Open),
            "single-origin" => {
                let origins: Vec<String> = origins
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();

                if origins.is_empty() {
                    bail!("CORS_ALLOWED_ORIGINS is required when CORS_POLICY is single-origin");
                }
                for origin in &origins {
                    if HeaderValue::from_str(origin).is_err() {
                        bail!("Invalid origin in CORS_ALLOWED_ORIGINS: {origin}");
                    }
                }

                Ok(Self::SingleOrigin { origins })
            }
            other => bail!("CORS_POLICY must be 'open' or 'single-origin', got '{other}'"),
        }
    }

    pub fn layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
            .max_age(Duration::from_secs(3600));

        match self {
            Self::Open => layer.allow_origin(Any),
            Self::SingleOrigin { origins } => layer.allow_origin(AllowOrigin::list(
                origins
                    .iter()
                    .filter_map(|origin| HeaderValue::from_str(origin).ok()),
            )),
        }
    }
}
