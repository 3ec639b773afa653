use std::path::Path;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::Component;

/// Assistant activity summarized in the status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Running { queued: usize },
}

impl RequestState {
    fn label(self) -> String {
        match self {
            Self::Idle => "idle".to_string(),
            Self::Running { queued: 0 } => "running".to_string(),
            Self::Running { queued } => format!("running, {queued} queued"),
        }
    }
}

pub struct StatusBar<'a> {
    attachment_count: usize,
    current_dir: &'a Path,
    request_state: RequestState,
    status_message: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        current_dir: &'a Path,
        attachment_count: usize,
        request_state: RequestState,
    ) -> Self {
        Self {
            attachment_count,
            current_dir,
            request_state,
            status_message: None,
        }
    }

    /// Sets the latest status message shown after the request state.
    #[must_use]
    pub fn status_message(mut self, status_message: Option<&'a str>) -> Self {
        self.status_message = status_message;
        self
    }

    fn right_text(&self) -> String {
        let mut right_text = format!(
            "{} | {} attached | {}",
            self.current_dir.display(),
            self.attachment_count,
            self.request_state.label()
        );
        if let Some(status_message) = self.status_message {
            right_text.push_str(" | ");
            right_text.push_str(status_message);
        }
        right_text.push(' ');

        right_text
    }
}

impl Component for StatusBar<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let version = env!("CARGO_PKG_VERSION");
        let left_text = Span::styled(
            format!(" Moontrace v{version}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let right_text = self.right_text();
        let left_width = u16::try_from(left_text.width()).unwrap_or(u16::MAX);
        let right_width =
            u16::try_from(unicode_width::UnicodeWidthStr::width(right_text.as_str()))
                .unwrap_or(u16::MAX);
        let padding = area
            .width
            .saturating_sub(left_width.saturating_add(right_width));
        let status_bar = Paragraph::new(Line::from(vec![
            left_text,
            Span::raw(" ".repeat(padding as usize)),
            Span::styled(right_text, Style::default().fg(Color::Gray)),
        ]))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        f.render_widget(status_bar, area);
    }
}
