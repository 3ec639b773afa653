use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::domain::verification::DEFAULT_TARGET_NAME;
use crate::file_list::SelectionMarker;
use crate::ui::components::file_panel::FilePanel;
use crate::ui::components::prompt_input::PromptInput;
use crate::ui::state::app_mode::{VerificationFocus, VerificationForm};
use crate::ui::{Component, Page, RenderContext};

const FIELD_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 14;

/// Full-screen form that collects a testbench generation request.
pub struct VerificationPage<'a> {
    context: &'a RenderContext<'a>,
    form: &'a VerificationForm,
}

impl<'a> VerificationPage<'a> {
    pub fn new(context: &'a RenderContext<'a>, form: &'a VerificationForm) -> Self {
        Self { context, form }
    }

    fn render_button(&self, f: &mut Frame, area: Rect, label: &str, focus: VerificationFocus) {
        let style = if self.form.focus == focus {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let button = Paragraph::new(Line::from(Span::styled(label.to_string(), style)))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(button, area);
    }
}

impl Page for VerificationPage<'_> {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let context = self.context;
        let form = self.form;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                " Generate Verification Testbench ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [name_area, description_area, files_area, buttons_area] = Layout::vertical([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FIELD_HEIGHT),
        ])
        .areas(inner);

        PromptInput::new(" Target file name ", &form.target_name)
            .placeholder(DEFAULT_TARGET_NAME)
            .focused(form.focus == VerificationFocus::TargetName)
            .render(f, name_area);
        PromptInput::new(" Design description ", &form.description)
            .focused(form.focus == VerificationFocus::Description)
            .render(f, description_area);
        FilePanel::new(
            " Select design files ",
            context.current_dir,
            context.items,
            context.attachments,
        )
        .marker(SelectionMarker::Check)
        .selected(form.file_selected)
        .focused(form.focus == VerificationFocus::Files)
        .render(f, files_area);

        let [_, generate_area, cancel_area, _] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Min(0),
        ])
        .areas(buttons_area);
        self.render_button(f, generate_area, "Generate", VerificationFocus::Generate);
        self.render_button(f, cancel_area, "Cancel", VerificationFocus::Cancel);
    }
}
