use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::Component;

const TITLE: &str = " ▀▄▀▄▀▄ MOONTRACE 🌝 ▄▀▄▀▄ ";
const KEY_HELP: [(&str, &str); 4] = [
    ("Ctrl+G", "testbench"),
    ("Ctrl+P", "switch page"),
    ("Ctrl+B", "back"),
    ("Ctrl+C", "quit"),
];

/// Title block with the optional ASCII banner and key help.
pub struct Header<'a> {
    banner: Option<&'a str>,
}

impl<'a> Header<'a> {
    pub fn new(banner: Option<&'a str>) -> Self {
        Self { banner }
    }

    /// Rows needed to show the whole header, borders included.
    pub fn height(&self) -> u16 {
        let banner_rows = self.banner.map_or(0, |banner| banner.lines().count());
        let help_rows = KEY_HELP.len().div_ceil(2);

        u16::try_from(banner_rows + help_rows + 2).unwrap_or(u16::MAX)
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines: Vec<Line<'a>> = self
            .banner
            .into_iter()
            .flat_map(str::lines)
            .map(|row| Line::from(Span::styled(row, Style::default().fg(Color::Yellow))))
            .collect();

        for pair in KEY_HELP.chunks(2) {
            let mut spans = Vec::new();
            for (key, action) in pair {
                spans.push(Span::styled(
                    *key,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(format!(" {action}  ")));
            }
            lines.push(Line::from(spans));
        }

        lines
    }
}

impl Component for Header<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        TITLE,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .title_alignment(Alignment::Center),
            );

        f.render_widget(header, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_without_banner_fits_key_help() {
        // Arrange
        let header = Header::new(None);

        // Act
        let height = header.height();

        // Assert
        assert_eq!(height, 4);
    }

    #[test]
    fn test_lines_put_banner_rows_before_key_help() {
        // Arrange
        let header = Header::new(Some("@@\n..\n"));

        // Act
        let lines = header.lines();

        // Assert
        assert_eq!(header.height(), 6);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].spans[0].content, "@@");
        assert_eq!(lines[2].spans[0].content, "Ctrl+G");
    }
}
