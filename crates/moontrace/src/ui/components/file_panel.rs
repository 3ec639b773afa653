use std::path::Path;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, List, ListState};

use crate::domain::attachment::AttachmentSet;
use crate::file_list::{ListItem, SelectionMarker, item_label};
use crate::ui::Component;

/// Directory listing with a highlighted selection row.
pub struct FilePanel<'a> {
    attachments: &'a AttachmentSet,
    current_dir: &'a Path,
    focused: bool,
    items: &'a [ListItem],
    marker: SelectionMarker,
    selected: usize,
    title: &'a str,
}

impl<'a> FilePanel<'a> {
    pub fn new(
        title: &'a str,
        current_dir: &'a Path,
        items: &'a [ListItem],
        attachments: &'a AttachmentSet,
    ) -> Self {
        Self {
            attachments,
            current_dir,
            focused: false,
            items,
            marker: SelectionMarker::Asterisk,
            selected: 0,
            title,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn marker(mut self, marker: SelectionMarker) -> Self {
        self.marker = marker;
        self
    }

    #[must_use]
    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    fn labels(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item_label(item, self.current_dir, self.attachments, self.marker))
            .collect()
    }
}

impl Component for FilePanel<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let border_color = if self.focused {
            Color::Cyan
        } else {
            Color::Gray
        };
        let list = List::new(self.labels())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color))
                    .title(Span::styled(self.title, Style::default().fg(Color::Cyan))),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        if !self.items.is_empty() {
            list_state.select(Some(self.selected.min(self.items.len() - 1)));
        }

        f.render_stateful_widget(list, area, &mut list_state);
    }
}
