// src/bot/handler.rs
use std::num::NonZeroUsize;

use super::command::Command;
use super::reply::{MESSAGE_LIMIT, Markup, Reply};
use super::session::Session;
use crate::core::count;
use crate::core::scanner::Filters;
use crate::core::source::parse_source;
use crate::error::{LocError, Result};
use crate::github::RepoHost;
use crate::models::SourceSpec;

const WELCOME: &str = "Send a link to a GitHub repository.\n\
Example: https://github.com/owner/repo\n\n\
Use the Top 10 / Top 20 buttons to change how many files are listed.";

const HELP: &str = "Commands:\n\
/start - start the bot\n\
/help - this help\n\n\
Buttons:\n\
Count LOC - reminder to paste a link\n\
Top 10 / Top 20 - how many files to show in the result\n\n\
You can also just send a URL and the bot counts it right away.";

const PROMPT_FOR_URL: &str = "Paste a GitHub repository URL.";
const NO_LINK: &str = "No link found. Send a GitHub URL, for example:\nhttps://github.com/owner/repo";
const NO_PREVIOUS_SOURCE: &str = "There is no previous URL. Send a new link.";
const COUNTING: &str = "Counting lines of code, please wait...";

/// Maps `(session, command)` to outgoing replies.
#[derive(Debug)]
pub struct Handler<'a, H: ?Sized> {
    host: &'a H,
    filters: Filters,
    default_top: NonZeroUsize,
}

impl<'a, H> Handler<'a, H>
where
    H: RepoHost + ?Sized,
{
    #[must_use]
    pub const fn new(host: &'a H, filters: Filters, default_top: NonZeroUsize) -> Self {
        Self {
            host,
            filters,
            default_top,
        }
    }

    #[inline]
    #[must_use]
    pub const fn default_top(&self) -> NonZeroUsize {
        self.default_top
    }

    /// Handles one command, passing every reply to `emit` as soon as it is
    /// ready. Failures become chat replies; the session stays usable.
    pub fn handle(&self, session: &mut Session, command: Command, emit: &mut dyn FnMut(Reply)) {
        match command {
            Command::Start => {
                session.top = self.default_top;
                emit(Reply::text(WELCOME).with_markup(Markup::MainKeyboard));
            }
            Command::Help => emit(Reply::text(HELP).with_markup(Markup::MainKeyboard)),
            Command::PromptForUrl => emit(Reply::text(PROMPT_FOR_URL)),
            Command::SetTop(top) => {
                session.top = top;
                emit(Reply::text(format!("Set: show the Top {top} files.")));
            }
            Command::Count(raw) => match parse_remote(&raw) {
                Ok(spec) => {
                    session.last_source = Some(spec.clone());
                    self.count(&spec, session.top, emit);
                }
                Err(err) => emit(error_reply(&err)),
            },
            Command::Refresh(top) => {
                let Some(spec) = session.last_source.clone() else {
                    emit(Reply::text(NO_PREVIOUS_SOURCE));
                    return;
                };
                session.top = top;
                emit(Reply::text(format!("Refreshing the result with Top {top}.")));
                self.count(&spec, top, emit);
            }
            Command::Unrecognized => emit(Reply::text(NO_LINK)),
        }
    }

    fn count(&self, spec: &SourceSpec, top: NonZeroUsize, emit: &mut dyn FnMut(Reply)) {
        emit(Reply::text(COUNTING));
        match count(spec, self.host, &self.filters, top) {
            Ok(report) => {
                tracing::info!(
                    source = %report.label,
                    files = report.result.files_counted,
                    lines = report.result.total_lines,
                    "count finished"
                );
                emit(
                    Reply::html(report.render_html_within(MESSAGE_LIMIT))
                        .with_markup(Markup::RefreshButtons),
                );
            }
            Err(err) => {
                tracing::warn!(source = %spec, error = %err, "count failed");
                emit(error_reply(&err));
            }
        }
    }
}

/// Chat input must be a GitHub link; local paths are never read on behalf of
/// a chat.
fn parse_remote(raw: &str) -> Result<SourceSpec> {
    let spec = parse_source(raw)?;
    if spec.is_remote() {
        Ok(spec)
    } else {
        Err(LocError::invalid_source(format!(
            "'{raw}' is not a GitHub repository link"
        )))
    }
}

fn error_reply(err: &LocError) -> Reply {
    Reply::text(match err {
        LocError::InvalidSource(_) => format!("Error: {err}"),
        LocError::RemoteFetch { .. } => format!("Could not download the repository: {err}"),
        _ => format!("Unexpected error: {err}"),
    })
}
