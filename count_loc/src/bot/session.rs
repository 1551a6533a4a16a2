// src/bot/session.rs
use std::collections::HashMap;
use std::num::NonZeroUsize;

use crate::models::SourceSpec;

/// Per-chat state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub top: NonZeroUsize,
    /// Source of the last count, reused by the refresh buttons.
    pub last_source: Option<SourceSpec>,
}

impl Session {
    #[inline]
    #[must_use]
    pub const fn new(top: NonZeroUsize) -> Self {
        Self {
            top,
            last_source: None,
        }
    }
}

/// Sessions keyed by chat id, created on first contact.
#[derive(Debug, Clone)]
pub struct Sessions {
    default_top: NonZeroUsize,
    by_chat: HashMap<i64, Session>,
}

impl Sessions {
    #[must_use]
    pub fn new(default_top: NonZeroUsize) -> Self {
        Self {
            default_top,
            by_chat: HashMap::new(),
        }
    }

    pub fn get_mut(&mut self, chat_id: i64) -> &mut Session {
        let default_top = self.default_top;
        self.by_chat
            .entry(chat_id)
            .or_insert_with(|| Session::new(default_top))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_chat.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_chat.is_empty()
    }
}
