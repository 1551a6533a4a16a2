// src/bot/reply.rs
use serde_json::{Value, json};

use super::command::{
    BUTTON_COUNT, BUTTON_HELP, BUTTON_TOP_10, BUTTON_TOP_20, REFRESH_TOP_10, REFRESH_TOP_20,
};

/// Longest text Telegram accepts in one message, in UTF-16 code units.
pub const MESSAGE_LIMIT: usize = 4096;

/// Keyboards attached to outgoing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Persistent reply keyboard with the four main buttons.
    MainKeyboard,
    /// Inline refresh buttons under a report.
    RefreshButtons,
}

impl Markup {
    #[must_use]
    pub fn to_json(self) -> Value {
        match self {
            Self::MainKeyboard => json!({
                "keyboard": [
                    [{ "text": BUTTON_COUNT }, { "text": BUTTON_TOP_10 }],
                    [{ "text": BUTTON_TOP_20 }, { "text": BUTTON_HELP }],
                ],
                "resize_keyboard": true,
            }),
            Self::RefreshButtons => json!({
                "inline_keyboard": [[
                    { "text": "Refresh: Top 10", "callback_data": REFRESH_TOP_10 },
                    { "text": "Refresh: Top 20", "callback_data": REFRESH_TOP_20 },
                ]],
            }),
        }
    }
}

/// One outgoing chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Send with `parse_mode = HTML`.
    pub html: bool,
    pub markup: Option<Markup>,
}

impl Reply {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: false,
            markup: None,
        }
    }

    #[must_use]
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            html: true,
            ..Self::text(text)
        }
    }

    #[must_use]
    pub const fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = Some(markup);
        self
    }

    /// `sendMessage` parameters for `chat_id`.
    #[must_use]
    pub fn to_payload(&self, chat_id: i64) -> Value {
        let mut payload = json!({ "chat_id": chat_id, "text": self.text });
        if self.html {
            payload["parse_mode"] = json!("HTML");
        }
        if let Some(markup) = self.markup {
            payload["reply_markup"] = markup.to_json();
        }
        payload
    }
}
