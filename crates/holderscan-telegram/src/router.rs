use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use holderscan_core::{config::Config, ports::HolderQueries};

use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub queries: Arc<dyn HolderQueries>,
}

pub async fn run_polling(cfg: Arc<Config>, queries: Arc<dyn HolderQueries>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Basic startup info.
    if let Ok(me) = bot.get_me().await {
        tracing::info!("holderscan started: @{}", me.username());
    }
    tracing::info!(
        allowed_chats = cfg.allowed_chats.len(),
        query_id = cfg.dune_query_id,
        "dispatching commands"
    );

    let state = Arc::new(AppState { cfg, queries });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
