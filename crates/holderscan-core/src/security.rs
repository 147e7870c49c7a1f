use crate::domain::ChatId;

/// Chats (direct users and groups) permitted to invoke commands.
///
/// Fixed at build time; unauthorized chats are dropped without a reply.
pub const ALLOWED_CHAT_IDS: &[i64] = &[1273464377, 6484752597, -1002294232925];

pub fn is_allowed_chat(chat_id: Option<ChatId>, allowed_chats: &[i64]) -> bool {
    let Some(chat_id) = chat_id else {
        return false;
    };
    if allowed_chats.is_empty() {
        return false;
    }
    allowed_chats.contains(&chat_id.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chats_are_allowed() {
        let allowed = [42, -100500];
        assert!(is_allowed_chat(Some(ChatId(42)), &allowed));
        assert!(is_allowed_chat(Some(ChatId(-100500)), &allowed));
    }

    #[test]
    fn unknown_or_missing_chats_are_denied() {
        let allowed = [42];
        assert!(!is_allowed_chat(Some(ChatId(7)), &allowed));
        assert!(!is_allowed_chat(None, &allowed));
    }

    #[test]
    fn empty_allow_list_denies_everyone() {
        assert!(!is_allowed_chat(Some(ChatId(42)), &[]));
    }
}
