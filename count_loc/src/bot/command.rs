// src/bot/command.rs
use std::num::NonZeroUsize;

pub const BUTTON_COUNT: &str = "Count LOC";
pub const BUTTON_TOP_10: &str = "Top 10";
pub const BUTTON_TOP_20: &str = "Top 20";
pub const BUTTON_HELP: &str = "Help";

pub const REFRESH_TOP_10: &str = "refresh_top_10";
pub const REFRESH_TOP_20: &str = "refresh_top_20";

pub const TOP_10: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);
pub const TOP_20: NonZeroUsize = NonZeroUsize::MIN.saturating_add(19);

/// What a chat asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    /// The "Count LOC" button: ask for a link.
    PromptForUrl,
    SetTop(NonZeroUsize),
    /// Count the URL found in the message.
    Count(String),
    /// Re-run the last count of the chat with a new top-N.
    Refresh(NonZeroUsize),
    /// Text with neither a button label nor a link.
    Unrecognized,
}

impl Command {
    /// Interprets a text message. Blank text and unknown slash commands yield
    /// `None` and get no reply.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(command) = text.strip_prefix('/') {
            let name = command
                .split_whitespace()
                .next()
                .and_then(|word| word.split('@').next())
                .unwrap_or_default();
            return match name {
                "start" => Some(Self::Start),
                "help" => Some(Self::Help),
                _ => None,
            };
        }

        Some(match text {
            BUTTON_COUNT => Self::PromptForUrl,
            BUTTON_TOP_10 => Self::SetTop(TOP_10),
            BUTTON_TOP_20 => Self::SetTop(TOP_20),
            BUTTON_HELP => Self::Help,
            _ => extract_url(text).map_or(Self::Unrecognized, |url| Self::Count(url.to_owned())),
        })
    }

    /// Interprets inline button data.
    #[must_use]
    pub fn from_callback(data: &str) -> Option<Self> {
        match data {
            REFRESH_TOP_10 => Some(Self::Refresh(TOP_10)),
            REFRESH_TOP_20 => Some(Self::Refresh(TOP_20)),
            _ => None,
        }
    }
}

/// First `http://` or `https://` run of non-whitespace in `text`.
fn extract_url(text: &str) -> Option<&str> {
    let lower = text.to_ascii_lowercase();
    let start = ["http://", "https://"]
        .iter()
        .filter_map(|scheme| lower.find(scheme))
        .min()?;
    let rest = &text[start..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(&rest[..end])
}
