//! Logging setup for processes embedding hexaleg.
//!
//! The library itself only emits `tracing` events (`trace!` per kinematics
//! call, `debug!` for config loading, `warn!` for detected singularities and
//! ignored overrides).  Call [`init_tracing`] once at process startup to
//! print them.
//!
//! # Environment variables
//!
//! | Variable | Effect |
//! |---|---|
//! | `RUST_LOG` | Log filter (default `"info"`). |
//! | `HEXALEG_LOG_FORMAT=json` | Emit newline-delimited JSON logs. |

use hexaleg_types::KinematicsError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "HEXALEG_LOG_FORMAT";

/// Install the global `tracing` subscriber.
///
/// # Errors
///
/// Returns [`KinematicsError::Telemetry`] if a global subscriber is already
/// installed.
pub fn init_tracing() -> Result<(), KinematicsError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if wants_json(std::env::var(LOG_FORMAT_ENV).ok().as_deref()) {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init()
    };

    result.map_err(|e| KinematicsError::Telemetry(e.to_string()))
}

fn wants_json(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.eq_ignore_ascii_case("json"))
}
