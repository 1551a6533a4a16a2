// src/bot/telegram.rs
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::command::Command;
use super::handler::Handler;
use super::reply::Reply;
use super::session::Sessions;
use crate::config::BotConfig;
use crate::error::{LocError, Result};
use crate::github::RepoHost;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const RETRY_DELAY: Duration = Duration::from_secs(5);
const UNAUTHORIZED: u16 = 401;

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
}

/// An update reduced to what the handler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub chat_id: i64,
    /// `None` for input that gets no reply.
    pub command: Option<Command>,
    /// Set for button presses, which must be acknowledged.
    pub callback_id: Option<String>,
}

impl Update {
    /// Returns `None` for updates that carry no chat to answer.
    #[must_use]
    pub fn into_inbound(self) -> Option<Inbound> {
        if let Some(query) = self.callback_query {
            let chat_id = query.message.as_ref()?.chat.id;
            return Some(Inbound {
                chat_id,
                command: query.data.as_deref().and_then(Command::from_callback),
                callback_id: Some(query.id),
            });
        }

        let message = self.message?;
        let command = Command::from_text(message.text.as_deref()?);
        Some(Inbound {
            chat_id: message.chat.id,
            command,
            callback_id: None,
        })
    }
}

/// Minimal blocking Telegram Bot API client.
///
/// Errors never carry the request URL, which embeds the bot token.
pub struct TelegramApi {
    http: Client,
    base: String,
    poll_timeout: Duration,
}

impl TelegramApi {
    /// # Errors
    ///
    /// Returns [`LocError::Config`] when the HTTP client cannot be built.
    pub fn new(config: &BotConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT.max(config.poll_timeout + RETRY_DELAY))
            .build()
            .map_err(|e| LocError::Config(format!("cannot build HTTP client: {}", e.without_url())))?;

        Ok(Self {
            http,
            base: format!("{}/bot{}", config.api_url, config.token),
            poll_timeout: config.poll_timeout,
        })
    }

    fn call<T: DeserializeOwned>(&self, method: &str, payload: &Value) -> Result<T> {
        let label = format!("telegram:{method}");
        let response = self
            .http
            .post(format!("{}/{method}", self.base))
            .json(payload)
            .send()
            .map_err(|e| LocError::RemoteFetch {
                url: label.clone(),
                status: e.status().map(|s| s.as_u16()),
                message: e.without_url().to_string(),
            })?;

        let status = response.status().as_u16();
        let body: ApiResponse<T> = response.json().map_err(|e| LocError::RemoteFetch {
            url: label.clone(),
            status: Some(status),
            message: format!("unexpected response body: {}", e.without_url()),
        })?;

        match body {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                description,
                error_code,
                ..
            } => Err(LocError::RemoteFetch {
                url: label,
                status: error_code.or(Some(status)),
                message: description.unwrap_or_else(|| String::from("request failed")),
            }),
        }
    }

    /// Long-polls for updates after `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LocError::RemoteFetch`] on transport or API failures.
    pub fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        let mut payload = json!({
            "timeout": self.poll_timeout.as_secs(),
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(offset) = offset {
            payload["offset"] = json!(offset);
        }
        self.call("getUpdates", &payload)
    }

    /// # Errors
    ///
    /// Returns [`LocError::RemoteFetch`] on transport or API failures.
    pub fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        self.call::<Value>("sendMessage", &reply.to_payload(chat_id))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`LocError::RemoteFetch`] on transport or API failures.
    pub fn answer_callback_query(&self, id: &str) -> Result<()> {
        self.call::<Value>("answerCallbackQuery", &json!({ "callback_query_id": id }))?;
        Ok(())
    }
}

/// Serves updates until the API rejects the token.
///
/// Updates are handled one at a time. Transport failures are logged and
/// retried after a short pause.
///
/// # Errors
///
/// Returns the API error when Telegram answers 401 Unauthorized.
pub fn run_polling<H>(api: &TelegramApi, handler: &Handler<'_, H>) -> Result<()>
where
    H: RepoHost + ?Sized,
{
    let mut sessions = Sessions::new(handler.default_top());
    let mut offset = None;
    tracing::info!("polling for updates");

    loop {
        let updates = match api.get_updates(offset) {
            Ok(updates) => updates,
            Err(err) if err.status() == Some(UNAUTHORIZED) => return Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch updates; retrying");
                thread::sleep(RETRY_DELAY);
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            if let Some(inbound) = update.into_inbound() {
                dispatch(api, handler, &mut sessions, inbound);
            }
        }
    }
}

fn dispatch<H>(api: &TelegramApi, handler: &Handler<'_, H>, sessions: &mut Sessions, inbound: Inbound)
where
    H: RepoHost + ?Sized,
{
    let chat_id = inbound.chat_id;
    if let Some(id) = &inbound.callback_id {
        if let Err(err) = api.answer_callback_query(id) {
            tracing::warn!(chat_id, error = %err, "failed to answer callback query");
        }
    }

    let Some(command) = inbound.command else {
        return;
    };
    tracing::info!(chat_id, ?command, "handling command");
    handler.handle(sessions.get_mut(chat_id), command, &mut |reply: Reply| {
        if let Err(err) = api.send_message(chat_id, &reply) {
            tracing::warn!(chat_id, error = %err, "failed to send reply");
        }
    });
}
