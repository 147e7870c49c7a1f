use std::sync::Arc;

use holderscan_core::{config::Config, ports::HolderQueries};
use holderscan_dune::DuneClient;

#[tokio::main]
async fn main() -> Result<(), holderscan_core::Error> {
    holderscan_core::logging::init("holderscan")?;

    let cfg = Arc::new(Config::load()?);

    let queries: Arc<dyn HolderQueries> = Arc::new(
        DuneClient::with_base_url(
            cfg.dune_api_key.clone(),
            cfg.dune_query_id,
            cfg.dune_api_url.clone(),
        )
        .with_poll_interval(cfg.dune_poll_interval),
    );

    holderscan_telegram::router::run_polling(cfg, queries)
        .await
        .map_err(|e| holderscan_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
