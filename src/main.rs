use std::sync::Arc;

use airmon_server::configs::Settings;
use airmon_server::run;

#[tokio::main]
async fn main() {
    let settings = Arc::new(Settings::new().expect("Failed to load settings."));

    let default_filter = {
        let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
        let level = settings.logger.level.as_str();
        format!("{crate_name}={level},tower_http={level}")
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    run(&settings).await;
}
