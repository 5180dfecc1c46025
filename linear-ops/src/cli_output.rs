// ABOUTME: Centralized CLI output for narrative lines, warnings, errors, and the final JSON object
// ABOUTME: Narrative and JSON go to stdout, diagnostics to stderr; a capture mode records lines for tests

use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use std::sync::Mutex;

/// Centralized CLI output utilities for consistent formatting
pub struct CliOutput {
    use_color: bool,
    captured: Option<Mutex<Vec<String>>>,
}

impl CliOutput {
    /// Create output with TTY and `NO_COLOR` detection
    pub fn new(no_color: bool) -> Self {
        let use_color = !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").unwrap_or_default() != "dumb"
            && std::io::stdout().is_terminal();
        Self::with_color(use_color)
    }

    /// Create CLI output utility with explicit color setting
    pub fn with_color(use_color: bool) -> Self {
        Self {
            use_color,
            captured: None,
        }
    }

    /// Record every line instead of printing it
    pub fn capturing() -> Self {
        Self {
            use_color: false,
            captured: Some(Mutex::new(Vec::new())),
        }
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Lines recorded so far; empty unless built with [`CliOutput::capturing`]
    pub fn captured(&self) -> Vec<String> {
        self.captured
            .as_ref()
            .and_then(|lines| lines.lock().ok().map(|lines| lines.clone()))
            .unwrap_or_default()
    }

    fn stdout(&self, line: String) {
        match &self.captured {
            Some(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
            }
            None => println!("{line}"),
        }
    }

    fn stderr(&self, line: String) {
        match &self.captured {
            Some(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
            }
            None => eprintln!("{line}"),
        }
    }

    /// Plain narrative line
    pub fn line(&self, message: &str) {
        self.stdout(message.to_string());
    }

    /// Narrative line with a bracketed outcome tag, e.g. `[UPDATED] ENG-1`
    pub fn tagged(&self, tag: &str, message: &str) {
        let tag = format!("[{tag}]");
        if self.use_color {
            let colored = match tag.as_str() {
                "[NOT FOUND]" | "[FAILED]" | "[NO STATE]" => tag.red().bold().to_string(),
                "[DRY RUN]" | "[SKIPPED]" => tag.yellow().bold().to_string(),
                _ => tag.green().bold().to_string(),
            };
            self.stdout(format!("{colored} {message}"));
        } else {
            self.stdout(format!("{tag} {message}"));
        }
    }

    /// Display a progress/status message with an icon
    pub fn status(&self, icon: &str, message: &str) {
        if self.use_color {
            self.stdout(format!("{} {}", icon.dimmed(), message));
        } else {
            self.stdout(format!("{icon} {message}"));
        }
    }

    pub fn success(&self, message: &str) {
        if self.use_color {
            self.stdout(format!("{} {}", "✓".green().bold(), message));
        } else {
            self.stdout(format!("✓ {message}"));
        }
    }

    /// Pre-rendered block such as a table
    pub fn block(&self, text: &str) {
        for line in text.lines() {
            self.stdout(line.to_string());
        }
    }

    /// Final machine-readable result
    pub fn json<T: Serialize>(&self, value: &T, pretty: bool) -> serde_json::Result<()> {
        let rendered = crate::output::format_json(value, pretty)?;
        self.stdout(rendered);
        Ok(())
    }

    /// Display an error message
    pub fn error(&self, message: &str) {
        if self.use_color {
            self.stderr(format!("{} {}", "error:".red().bold(), message));
        } else {
            self.stderr(format!("error: {message}"));
        }
    }

    /// Display a warning message
    pub fn warning(&self, message: &str) {
        if self.use_color {
            self.stderr(format!("{} {}", "warning:".yellow().bold(), message));
        } else {
            self.stderr(format!("warning: {message}"));
        }
    }

    /// Indented follow-up text under an error or warning
    pub fn hint(&self, message: &str) {
        for line in message.lines() {
            if line.is_empty() {
                self.stderr(String::new());
            } else if self.use_color {
                self.stderr(format!("  {}", line.dimmed()));
            } else {
                self.stderr(format!("  {line}"));
            }
        }
    }
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new(false)
    }
}
