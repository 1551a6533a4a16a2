// src/bot.rs
//! Telegram front end: command parsing and replies are independent of the
//! transport, which only moves updates and messages over the Bot API.
mod command;
mod handler;
mod reply;
mod session;
mod telegram;

pub use command::Command;
pub use handler::Handler;
pub use reply::{Markup, Reply};
pub use session::{Session, Sessions};
pub use telegram::{Inbound, TelegramApi, Update, run_polling};
