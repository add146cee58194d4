//! Inbound update model: chat identity, commands, and update kinds.

use serde::{Deserialize, Serialize};

/// A chat the bot talks to. All per-conversation state is keyed by this id;
/// private chats have `id == user id` on Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Chat {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

/// Slash commands the bot registers in its command menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Random,
    Gpt,
    Talk,
    Quiz,
    Translate,
    ResumeHelp,
}

impl Command {
    /// Parses a slash command from raw message text. Accepts `/cmd`, the
    /// group form `/cmd@botname`, and trailing arguments after whitespace
    /// (`/gpt hello`); only the first token decides.
    pub fn parse(text: &str) -> Option<Command> {
        let first = text.split_whitespace().next()?;
        let rest = first.strip_prefix('/')?;
        let name = rest.split('@').next().unwrap_or(rest);
        match name {
            "start" => Some(Command::Start),
            "random" => Some(Command::Random),
            "gpt" => Some(Command::Gpt),
            "talk" => Some(Command::Talk),
            "quiz" => Some(Command::Quiz),
            "translate" => Some(Command::Translate),
            "resume_help" => Some(Command::ResumeHelp),
            _ => None,
        }
    }

    /// The command name as registered with the platform (without the slash).
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Random => "random",
            Command::Gpt => "gpt",
            Command::Talk => "talk",
            Command::Quiz => "quiz",
            Command::Translate => "translate",
            Command::ResumeHelp => "resume_help",
        }
    }
}

/// What kind of update arrived: a slash command, an inline-button payload,
/// or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateKind {
    Command(Command),
    Button(String),
    Text(String),
}

/// One inbound update, already reduced to what the dispatcher needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub chat: Chat,
    pub kind: UpdateKind,
}

impl Update {
    pub fn command(chat: Chat, command: Command) -> Self {
        Self {
            chat,
            kind: UpdateKind::Command(command),
        }
    }

    pub fn button(chat: Chat, payload: impl Into<String>) -> Self {
        Self {
            chat,
            kind: UpdateKind::Button(payload.into()),
        }
    }

    pub fn text(chat: Chat, text: impl Into<String>) -> Self {
        Self {
            chat,
            kind: UpdateKind::Text(text.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/resume_help"), Some(Command::ResumeHelp));
        assert_eq!(Command::parse("  /quiz  "), Some(Command::Quiz));
    }

    #[test]
    fn parses_group_form_with_bot_name() {
        assert_eq!(Command::parse("/translate@my_bot"), Some(Command::Translate));
    }

    #[test]
    fn parses_command_with_trailing_arguments() {
        assert_eq!(Command::parse("/gpt hello there"), Some(Command::Gpt));
        assert_eq!(Command::parse("/talk@my_bot привіт"), Some(Command::Talk));
    }

    #[test]
    fn rejects_non_commands() {
        assert_eq!(Command::parse("start"), None);
        assert_eq!(Command::parse("/unknown"), None);
        assert_eq!(Command::parse(""), None);
        // A slash mid-message is not a command.
        assert_eq!(Command::parse("hi /gpt"), None);
    }
}
