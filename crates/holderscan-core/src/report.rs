//! Holder-report rendering (Telegram HTML).

use crate::{domain::HolderRow, errors::Error, Result};

/// Block-explorer address page used for wallet links.
pub const GMGN_ADDRESS_URL: &str = "https://gmgn.ai/sol/address";

pub const NO_HOLDERS_TEXT: &str = "No matching holders found.";

/// Welcome/usage reply for `/start`, `/help`, and `/analyze` with the wrong
/// number of arguments. Pre-escaped for HTML parse mode.
pub const USAGE_TEXT: &str = "👋 Welcome!\n\n\
Use /analyze &lt;token_mint&gt; to check if any of the first 100 buyers of a token are still in the top 100 holders.\n\n\
Example:\n\
/analyze 7cEgQdp8JTXvBrpjSzji7bLEeCHWENRwX62B2Ep97k5H";

const REPORT_BANNER: &str = "FIRST 100 BUYERS IN TOP 100 HOLDER POSITION";

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Acknowledgement sent before the query round trip.
pub fn render_analysis_started(token_mint: &str) -> String {
    format!(
        "🔍 Running analysis for <code>{}</code>…",
        escape_html(token_mint)
    )
}

/// User-visible rendering of an upstream query failure.
pub fn render_query_error(err: &Error) -> String {
    format!("❗ Error querying Dune: {}", escape_html(&err.to_string()))
}

/// Render the ranked report for a result set, one block per row in warehouse
/// order, or the fixed "no holders" line for an empty one.
pub fn render_holder_report(rows: &[HolderRow]) -> Result<String> {
    if rows.is_empty() {
        return Ok(NO_HOLDERS_TEXT.to_string());
    }

    let mut blocks = Vec::with_capacity(rows.len() + 1);
    blocks.push(format!("<b>{REPORT_BANNER}</b>\n"));
    for row in rows {
        blocks.push(render_holder_block(row)?);
    }
    Ok(blocks.join("\n"))
}

fn render_holder_block(row: &HolderRow) -> Result<String> {
    let wallet = escape_html(&row.wallet);
    let link = format!(r#"<a href="{GMGN_ADDRESS_URL}/{wallet}">{wallet}</a>"#);
    let initial = format_balance(&row.initial_balance)?;
    let current = format_balance(&row.current_balance)?;

    Ok(format!(
        "<b>Rank {} - Top 100 Holders</b>\n\
         <b>Wallet</b> - {link}\n\
         <b>Initial</b> - {initial}\n\
         <b>Current</b> - {current}\n",
        row.current_rank
    ))
}

/// Truncate a decimal balance toward zero and insert thousands separators.
///
/// Fractional holdings are dropped, not rounded.
pub fn format_balance(raw: &str) -> Result<String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::Query(format!("could not parse balance value {raw:?}")))?;

    Ok(group_thousands(value.trunc() as i64))
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(wallet: &str, rank: i64, initial: &str, current: &str) -> HolderRow {
        HolderRow {
            wallet: wallet.to_string(),
            current_rank: rank,
            initial_balance: initial.to_string(),
            current_balance: current.to_string(),
        }
    }

    #[test]
    fn empty_table_renders_fixed_line() {
        assert_eq!(render_holder_report(&[]).unwrap(), NO_HOLDERS_TEXT);
    }

    #[test]
    fn one_block_per_row_with_matching_ranks() {
        let rows = vec![
            row("Wa1", 3, "100", "50"),
            row("Wa2", 17, "2000.5", "1999"),
            row("Wa3", 99, "1", "1"),
        ];
        let report = render_holder_report(&rows).unwrap();

        assert_eq!(report.matches("<b>Rank ").count(), rows.len());
        for r in &rows {
            assert!(report.contains(&format!("<b>Rank {} - Top 100 Holders</b>", r.current_rank)));
        }
        assert!(report.starts_with("<b>FIRST 100 BUYERS IN TOP 100 HOLDER POSITION</b>"));
    }

    #[test]
    fn wallet_links_point_at_gmgn() {
        let report = render_holder_report(&[row("W", 1, "10", "10")]).unwrap();
        assert!(report.contains(r#"<a href="https://gmgn.ai/sol/address/W">W</a>"#));
    }

    #[test]
    fn balances_truncate_and_group_thousands() {
        assert_eq!(format_balance("1234567.89").unwrap(), "1,234,567");
        assert_eq!(format_balance("999.999").unwrap(), "999");
        assert_eq!(format_balance("1000").unwrap(), "1,000");
        assert_eq!(format_balance("0.4").unwrap(), "0");
        assert_eq!(format_balance("-1234.5").unwrap(), "-1,234");
    }

    #[test]
    fn unparseable_balance_is_a_query_error() {
        let err = format_balance("lots").unwrap_err();
        assert!(matches!(err, Error::Query(_)));
        assert!(err.to_string().contains("lots"));

        assert!(format_balance("NaN").is_err());
        assert!(format_balance("inf").is_err());
    }

    #[test]
    fn query_error_reply_has_fixed_prefix() {
        let err = Error::Query("execution ended in state failed".to_string());
        let reply = render_query_error(&err);
        assert!(reply.starts_with("❗ Error querying Dune: "));
        assert!(reply.contains("execution ended in state failed"));
    }

    #[test]
    fn html_escaping_covers_telegram_specials() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
