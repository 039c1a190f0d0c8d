//! Admin command parsing
//!
//! The only command is `/unban <userId>`. The command word may carry a bot mention
//! (`/unban@GuardBot 123`); a mention of a different bot means the command is not ours.

use guard_core::value_objects::UserId;

const UNBAN: &str = "/unban";

/// A recognised admin command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    Unban(UserId),
}

/// Malformed admin input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Wrong argument count or an argument that is not a user id
    #[error("Usage: /unban <userId>")]
    UnbanUsage,
}

impl AdminCommand {
    /// Parse message text
    ///
    /// Returns `None` when the text is not an admin command addressed to this bot.
    /// `bot_username` is matched case-insensitively against a `@mention` suffix.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Result<Self, CommandError>> {
        let mut words = text.split_whitespace();
        let head = words.next()?;

        let (name, mention) = match head.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (head, None),
        };
        if !name.eq_ignore_ascii_case(UNBAN) {
            return None;
        }
        if let (Some(mention), Some(bot)) = (mention, bot_username) {
            if !mention.eq_ignore_ascii_case(bot) {
                return None;
            }
        }

        let args: Vec<&str> = words.collect();
        let command = match args.as_slice() {
            [raw] => UserId::parse(raw)
                .map(Self::Unban)
                .map_err(|_| CommandError::UnbanUsage),
            _ => Err(CommandError::UnbanUsage),
        };
        Some(command)
    }
}
