use std::sync::Once;

use metrics::{Unit, describe_counter};
use thiserror::Error;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings, SettingsError};

static METRIC_DESCRIPTIONS: Once = Once::new();

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry initialisation failed: {0}")]
    Init(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), TelemetryError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level()?.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| TelemetryError::Init(format!("failed to install subscriber: {err}")))
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "fabrica_cache_hit_total",
            Unit::Count,
            "Reads served from a fresh cache entry without a network call."
        );
        describe_counter!(
            "fabrica_cache_miss_total",
            Unit::Count,
            "Reads that required a network fetch (cold or stale entry)."
        );
        describe_counter!(
            "fabrica_cache_coalesced_total",
            Unit::Count,
            "Reads that waited on an in-flight fetch for the same key."
        );
        describe_counter!(
            "fabrica_upload_bytes_total",
            Unit::Bytes,
            "Bytes transferred through the upload channel."
        );
        describe_counter!(
            "fabrica_request_failure_total",
            Unit::Count,
            "Resource client requests that ended in a typed failure."
        );
    });
}
