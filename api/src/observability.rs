use anyhow::Result;
use prometheus::Registry;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::metrics;

const DEFAULT_FILTER: &str = "validator_api=info,tower_http=info";

pub struct Observability {
    pub registry: Registry,
}

impl Observability {
    /// Install the tracing subscriber and build the metrics registry.
    ///
    /// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` switches to
    /// JSON lines.
    pub fn init() -> Result<Self> {
        let registry = Registry::new_custom(Some("validator".into()), None)?;
        metrics::register_all(&registry)?;

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
        let json = json_logs_requested(std::env::var("LOG_FORMAT").ok().as_deref());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json.then(|| fmt::layer().json()))
            .with((!json).then(fmt::layer))
            .try_init()?;

        tracing::info!(
            "Observability initialized (log format: {})",
            if json { "json" } else { "text" }
        );
        Ok(Self { registry })
    }
}

fn json_logs_requested(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.trim().eq_ignore_ascii_case("json"))
}
