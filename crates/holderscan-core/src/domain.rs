/// Telegram chat id (numeric; group chats are negative).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// One row of the holder-overlap result set.
///
/// Values are carried verbatim from the warehouse columns; balances stay
/// decimal strings until the report formatter renders them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolderRow {
    pub wallet: String,
    pub current_rank: i64,
    pub initial_balance: String,
    pub current_balance: String,
}
