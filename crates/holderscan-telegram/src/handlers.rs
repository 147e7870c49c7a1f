use std::sync::Arc;

use teloxide::{prelude::*, types::ParseMode};

use holderscan_core::{
    domain::ChatId,
    report::{render_analysis_started, render_holder_report, render_query_error, USAGE_TEXT},
    security::is_allowed_chat,
};

use crate::router::AppState;

/// What the bot should send back for one inbound message.
///
/// Planning is pure so the command surface can be unit tested without a live
/// bot; `handle_message` only executes the plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Unauthorized chat, plain text, or unknown command: no reply at all.
    Silent,
    Usage,
    Analyze { token_mint: String },
}

pub fn plan_reply(chat_id: Option<i64>, allowed_chats: &[i64], text: &str) -> Reply {
    if !is_allowed_chat(chat_id.map(ChatId), allowed_chats) {
        return Reply::Silent;
    }

    let Some((command, args)) = parse_command(text) else {
        return Reply::Silent;
    };

    match command.as_str() {
        "start" | "help" => Reply::Usage,
        "analyze" => match args.as_slice() {
            [token_mint] => Reply::Analyze {
                token_mint: token_mint.clone(),
            },
            _ => Reply::Usage,
        },
        _ => Reply::Silent,
    }
}

/// Split `/cmd@botname arg1 ...` into the command word and its arguments.
fn parse_command(text: &str) -> Option<(String, Vec<String>)> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    let first = parts.next()?;
    let command = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();
    if command.is_empty() {
        return None;
    }

    let args = parts.map(|s| s.to_string()).collect();
    Some((command, args))
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let text = msg.text().unwrap_or_default();

    match plan_reply(Some(msg.chat.id.0), &state.cfg.allowed_chats, text) {
        Reply::Silent => Ok(()),
        Reply::Usage => {
            bot.send_message(msg.chat.id, USAGE_TEXT)
                .parse_mode(ParseMode::Html)
                .await?;
            Ok(())
        }
        Reply::Analyze { token_mint } => run_analysis(bot, msg, state, &token_mint).await,
    }
}

async fn run_analysis(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    token_mint: &str,
) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, render_analysis_started(token_mint))
        .parse_mode(ParseMode::Html)
        .await?;

    let reply = match state
        .queries
        .first_buyers_still_top(token_mint)
        .await
        .and_then(|rows| render_holder_report(&rows))
    {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(error = %e, "holder query failed");
            render_query_error(&e)
        }
    };

    bot.send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .disable_web_page_preview(true)
        .await?;

    Ok(())
}
