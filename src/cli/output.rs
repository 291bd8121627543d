use colored::Colorize;
use std::fmt;

use crate::config::{LayoutState, Theme};
use crate::forms::{Notice, NoticeLevel};

use super::table::Table;

/// Message categories used by the shell output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
    Separator,
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("SUCCESS", "[✓]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Error => ("ERROR", "[x]"),
        MessageKind::Section | MessageKind::Separator => ("INFO", ""),
    }
}

/// Renders shell output for the current [`LayoutState`].
///
/// The layout is handed in by whoever owns it; `plain` strips colour for
/// scripted runs.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    layout: LayoutState,
    plain: bool,
}

impl Output {
    pub fn new(layout: LayoutState, plain: bool) -> Self {
        Self { layout, plain }
    }

    pub fn layout(&self) -> LayoutState {
        self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutState) {
        self.layout = layout;
    }

    pub fn is_plain(&self) -> bool {
        self.plain
    }

    pub fn format(&self, kind: MessageKind, message: impl fmt::Display) -> String {
        let text = message.to_string();
        let base = match kind {
            MessageKind::Section => format!("=== {} ===", text.trim()),
            MessageKind::Separator => "-".repeat(40),
            _ => {
                let (label, icon) = build_label(kind);
                format!("{label}: {icon} {text}")
            }
        };
        if self.plain {
            return base;
        }
        match (kind, self.layout.theme) {
            (MessageKind::Success, Theme::Light) => base.green().to_string(),
            (MessageKind::Success, Theme::Dark) => base.bright_green().to_string(),
            (MessageKind::Warning, Theme::Light) => base.yellow().to_string(),
            (MessageKind::Warning, Theme::Dark) => base.bright_yellow().to_string(),
            (MessageKind::Error, Theme::Light) => base.red().to_string(),
            (MessageKind::Error, Theme::Dark) => base.bright_red().to_string(),
            (MessageKind::Section, Theme::Light) => base.bold().to_string(),
            (MessageKind::Section, Theme::Dark) => base.bold().bright_white().to_string(),
            (MessageKind::Info, Theme::Dark) => base.white().to_string(),
            _ => base,
        }
    }

    pub fn print(&self, kind: MessageKind, message: impl fmt::Display) {
        let formatted = self.format(kind, message);
        match kind {
            MessageKind::Section | MessageKind::Separator => println!("\n{formatted}"),
            _ => println!("{formatted}"),
        }
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.print(MessageKind::Info, message);
    }

    pub fn success(&self, message: impl fmt::Display) {
        self.print(MessageKind::Success, message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.print(MessageKind::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.print(MessageKind::Error, message);
    }

    pub fn section(&self, title: impl fmt::Display) {
        self.print(MessageKind::Section, title);
    }

    pub fn line(&self, text: impl fmt::Display) {
        println!("{text}");
    }

    /// `"Title: description"` in the colour of the notice level.
    pub fn format_notice(&self, notice: &Notice) -> String {
        let kind = match notice.level {
            NoticeLevel::Success => MessageKind::Success,
            NoticeLevel::Warning => MessageKind::Warning,
            NoticeLevel::Error => MessageKind::Error,
            NoticeLevel::Info => MessageKind::Info,
        };
        let text = if notice.description.is_empty() {
            notice.title.clone()
        } else {
            format!("{}: {}", notice.title, notice.description)
        };
        self.format(kind, text)
    }

    pub fn notice(&self, notice: &Notice) {
        println!("{}", self.format_notice(notice));
    }

    pub fn table(&self, table: &Table) {
        println!("{}", table.render(self.plain));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_has_labels_only() {
        let output = Output::new(LayoutState::default(), true);
        assert_eq!(output.format(MessageKind::Success, "Saved"), "SUCCESS: [✓] Saved");
        assert_eq!(output.format(MessageKind::Section, " Members "), "=== Members ===");
    }

    #[test]
    fn notices_join_title_and_description() {
        let output = Output::new(LayoutState::default(), true);
        let notice = Notice::error("Error", "duplicate email");
        assert_eq!(output.format_notice(&notice), "ERROR: [x] Error: duplicate email");
    }
}
