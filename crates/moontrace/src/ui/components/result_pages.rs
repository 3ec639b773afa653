use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::ui::Component;
use crate::ui::state::app_mode::ResultPage;
use crate::ui::state::text_panel::TextPanel;

/// Two read-only pages sharing one panel: file preview and assistant answer.
pub struct ResultPages<'a> {
    file_page: &'a TextPanel,
    focused: bool,
    page: ResultPage,
    response_page: &'a TextPanel,
}

impl<'a> ResultPages<'a> {
    pub fn new(
        page: ResultPage,
        file_page: &'a TextPanel,
        response_page: &'a TextPanel,
    ) -> Self {
        Self {
            file_page,
            focused: false,
            page,
            response_page,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Title listing both pages with the visible one highlighted.
    fn title(&self) -> Line<'static> {
        let spans = [ResultPage::File, ResultPage::Response]
            .into_iter()
            .map(|page| {
                if page == self.page {
                    Span::styled(
                        page.title(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                    )
                } else {
                    Span::styled(page.title(), Style::default().fg(Color::DarkGray))
                }
            })
            .collect::<Vec<_>>();

        Line::from(spans)
    }

    fn visible_panel(&self) -> &'a TextPanel {
        match self.page {
            ResultPage::File => self.file_page,
            ResultPage::Response => self.response_page,
        }
    }
}

impl Component for ResultPages<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let border_color = if self.focused {
            Color::Cyan
        } else {
            Color::Gray
        };
        let panel = self.visible_panel();
        let paragraph = Paragraph::new(panel.text())
            .wrap(Wrap { trim: false })
            .scroll((panel.scroll(), 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color))
                    .title(self.title()),
            );

        f.render_widget(paragraph, area);
    }
}
