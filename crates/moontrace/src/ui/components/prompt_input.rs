use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::domain::input::InputState;
use crate::ui::Component;

/// Bordered single-line text field that scrolls to keep the cursor visible.
pub struct PromptInput<'a> {
    focused: bool,
    input: &'a InputState,
    placeholder: &'a str,
    title: &'a str,
}

impl<'a> PromptInput<'a> {
    pub fn new(title: &'a str, input: &'a InputState) -> Self {
        Self {
            focused: false,
            input,
            placeholder: "",
            title,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Sets text shown dimmed while the input is empty.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// Returns the horizontal scroll offset and the cursor column inside a field
/// `inner_width` cells wide.
pub(crate) fn cursor_viewport(text: &str, cursor: usize, inner_width: u16) -> (u16, u16) {
    let cursor_column: usize = text
        .chars()
        .take(cursor)
        .map(|ch| ch.width().unwrap_or(0))
        .sum();
    let cursor_column = u16::try_from(cursor_column).unwrap_or(u16::MAX);
    let last_visible_column = inner_width.saturating_sub(1);
    let offset = cursor_column.saturating_sub(last_visible_column);

    (offset, cursor_column - offset)
}

impl Component for PromptInput<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let border_color = if self.focused {
            Color::Cyan
        } else {
            Color::Gray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(self.title, Style::default().fg(Color::Cyan)));
        let inner = block.inner(area);

        let (offset, cursor_column) =
            cursor_viewport(self.input.text(), self.input.cursor(), inner.width);
        let line = if self.input.is_empty() {
            Line::from(Span::styled(
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(self.input.text())
        };
        let paragraph = Paragraph::new(line).block(block).scroll((0, offset));

        f.render_widget(paragraph, area);

        if self.focused && inner.width > 0 && inner.height > 0 {
            f.set_cursor_position(Position::new(inner.x + cursor_column, inner.y));
        }
    }
}
