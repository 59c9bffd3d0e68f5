//! User-facing status messages.
//!
//! Messages are word-wrapped, continuation lines indented, and followed by a
//! blank line. Quiet mode drops them; the log file still gets every message.
//! Messages are logged at `info` whatever their label, so a stderr log
//! subscriber filtered at `warn` never repeats them.

use std::io::Write;

/// Column limit for wrapped status text.
pub const WRAP_WIDTH: usize = 70;
const CONTINUATION_INDENT: &str = "    ";

/// Writes `INFO:`/`WARNING:` status lines unless quiet.
pub struct StatusWriter<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> StatusWriter<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    pub fn info(&mut self, text: &str) {
        tracing::info!("{}", text);
        self.emit(&format!("INFO: {}", text));
    }

    pub fn warn(&mut self, text: &str) {
        tracing::info!(status = "warning", "{}", text);
        self.emit(&format!("WARNING: {}", text));
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if self.quiet {
            return;
        }
        let wrapped = fill(text, WRAP_WIDTH);
        if let Err(e) = write!(self.out, "{}\n\n", wrapped).and_then(|()| self.out.flush()) {
            tracing::debug!("status write failed: {}", e);
        }
    }
}

/// Greedy word wrap. Words longer than the width (URLs, paths) stay whole on
/// their own line, unlike Python's `textwrap.fill`, which breaks them at the
/// column limit. Keeping URLs intact lets them be copied from the terminal.
pub fn fill(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let indent = if lines.is_empty() { "" } else { CONTINUATION_INDENT };
        if line.is_empty() {
            line.push_str(indent);
            line.push_str(word);
        } else if line.len() + 1 + word.len() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(CONTINUATION_INDENT);
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}
