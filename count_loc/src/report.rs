// src/report.rs
use crate::models::CountResult;

const HTML_TITLE: &str = "<b>LOC report</b>";
const LABEL_LIMIT: usize = 200;

/// A finished count together with the identifier of what was counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub label: String,
    pub result: CountResult,
}

impl Report {
    /// Plain-text rendering used by the CLI and inside chat replies.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.lines(&self.label, self.result.top_files.len()).join("\n")
    }

    /// Telegram HTML rendering: a bold title and the text report in a `<pre>` block.
    #[must_use]
    pub fn render_html(&self) -> String {
        html_block(&self.render_text())
    }

    /// Like [`Report::render_html`], but drops rows from the end of the top
    /// list (noting how many) until the message fits in `limit` UTF-16 units.
    /// A label too long for even the header is shortened.
    #[must_use]
    pub fn render_html_within(&self, limit: usize) -> String {
        let shown = self.result.top_files.len();
        (0..=shown)
            .rev()
            .map(|rows| html_block(&self.lines(&self.label, rows).join("\n")))
            .find(|html| html.encode_utf16().count() <= limit)
            .unwrap_or_else(|| {
                let label: String = self.label.chars().take(LABEL_LIMIT).collect();
                html_block(&self.lines(&format!("{label}..."), 0).join("\n"))
            })
    }

    fn lines(&self, label: &str, rows: usize) -> Vec<String> {
        let result = &self.result;
        let mut lines = vec![
            format!("Source: {label}"),
            format!("Files counted: {}", result.files_counted),
            format!("Total non-empty LOC: {}", result.total_lines),
            String::new(),
            format!("Top {} files:", result.top_files.len()),
        ];
        lines.extend(
            result
                .top_files
                .iter()
                .take(rows)
                .map(|file| format!("{:>8}  {}", file.lines, file.path)),
        );
        let hidden = result.top_files.len().saturating_sub(rows);
        if hidden > 0 {
            lines.push(format!("... and {hidden} more (message too long)"));
        }
        lines
    }
}

fn html_block(text: &str) -> String {
    format!("{HTML_TITLE}\n<pre>{}</pre>", escape_html(text))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
