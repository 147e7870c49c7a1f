use async_trait::async_trait;

use crate::{domain::HolderRow, Result};

/// Hexagonal port for the holder-overlap query.
///
/// The Dune adapter is the only implementation today; keeping the Telegram
/// layer behind a trait lets it be exercised without network access.
#[async_trait]
pub trait HolderQueries: Send + Sync {
    /// Run the pre-registered overlap query for `token_mint` and return the
    /// result rows in warehouse order.
    async fn first_buyers_still_top(&self, token_mint: &str) -> Result<Vec<HolderRow>>;
}
