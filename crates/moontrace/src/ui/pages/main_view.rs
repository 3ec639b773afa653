use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::ui::components::file_panel::FilePanel;
use crate::ui::components::header::Header;
use crate::ui::components::prompt_input::PromptInput;
use crate::ui::components::result_pages::ResultPages;
use crate::ui::state::app_mode::Focus;
use crate::ui::{Component, Page, RenderContext};

const PROMPT_HEIGHT: u16 = 3;

/// Browser and header on the left, prompt and result pages on the right.
pub struct MainViewPage<'a> {
    context: &'a RenderContext<'a>,
}

impl<'a> MainViewPage<'a> {
    pub fn new(context: &'a RenderContext<'a>) -> Self {
        Self { context }
    }
}

impl Page for MainViewPage<'_> {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let context = self.context;
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(area);

        let header = Header::new(context.banner);
        let [header_area, files_area] =
            Layout::vertical([Constraint::Length(header.height()), Constraint::Min(0)])
                .areas(left_area);
        header.render(f, header_area);
        FilePanel::new(
            " Files ",
            context.current_dir,
            context.items,
            context.attachments,
        )
        .selected(context.file_selected)
        .focused(context.focus == Focus::Files)
        .render(f, files_area);

        let [prompt_area, results_area] =
            Layout::vertical([Constraint::Length(PROMPT_HEIGHT), Constraint::Min(0)])
                .areas(right_area);
        PromptInput::new(" You: ", context.prompt_input)
            .placeholder("Ask about the attached files")
            .focused(context.focus == Focus::Prompt)
            .render(f, prompt_area);
        ResultPages::new(
            context.result_page,
            context.file_page,
            context.response_page,
        )
        .focused(context.focus == Focus::Results)
        .render(f, results_area);
    }
}
