use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub service_name: String,
    pub log_level: String,
    /// When set (and the `loki` feature is enabled), logs are shipped to
    /// this Loki endpoint in addition to the console.
    pub loki_url: Option<String>,
}

impl LoggingConfig {
    /// Reads `MINVEST_SERVICE_NAME`, `RUST_LOG` and `MINVEST_LOKI_URL`,
    /// loading a `.env` file first if one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            service_name: std::env::var("MINVEST_SERVICE_NAME")
                .unwrap_or_else(|_| "minvest-core".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            loki_url: std::env::var("MINVEST_LOKI_URL").ok(),
        }
    }
}

pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "loki")]
    if let Some(loki_url) = config.loki_url.clone() {
        return init_with_loki(config, &loki_url);
    }

    #[cfg(not(feature = "loki"))]
    if config.loki_url.is_some() {
        return Err("MINVEST_LOKI_URL set but the loki feature is disabled".into());
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::info!(service = %config.service_name, "console logging initialized");

    Ok(())
}

#[cfg(feature = "loki")]
fn init_with_loki(
    config: LoggingConfig,
    loki_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = url::Url::parse(loki_url)?;

    let (loki_layer, task) = tracing_loki::builder()
        .label("service", &config.service_name)?
        .build_url(url)?;

    // Background task that drains the log buffer to Loki.
    tokio::spawn(task);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .with(loki_layer)
        .init();
    tracing::info!(service = %config.service_name, %loki_url, "loki logging initialized");

    Ok(())
}
