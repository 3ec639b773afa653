use std::path::Path;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::app::App;
use crate::domain::attachment::AttachmentSet;
use crate::domain::input::InputState;
use crate::file_list::ListItem;
use crate::ui::components::status_bar::{RequestState, StatusBar};
use crate::ui::pages;
use crate::ui::state::app_mode::{AppMode, Focus, ResultPage};
use crate::ui::state::text_panel::TextPanel;

/// A trait for UI pages that enforces a standard rendering interface.
pub trait Page {
    /// Renders a page in the provided frame and area.
    fn render(&mut self, f: &mut Frame, area: Rect);
}

/// A trait for UI components that enforces a standard rendering interface.
pub trait Component {
    /// Renders a component in the provided frame and area.
    fn render(&self, f: &mut Frame, area: Rect);
}

/// Immutable data required to draw a single UI frame.
pub struct RenderContext<'a> {
    pub attachments: &'a AttachmentSet,
    pub banner: Option<&'a str>,
    pub current_dir: &'a Path,
    pub file_page: &'a TextPanel,
    pub file_selected: usize,
    pub focus: Focus,
    pub items: &'a [ListItem],
    pub mode: &'a AppMode,
    pub prompt_input: &'a InputState,
    pub request_state: RequestState,
    pub response_page: &'a TextPanel,
    pub result_page: ResultPage,
    pub status_message: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    /// Borrows everything one frame needs from `app`.
    pub fn from_app(app: &'a App) -> Self {
        let request_state = if app.is_request_running() {
            RequestState::Running {
                queued: app.queued_request_count(),
            }
        } else {
            RequestState::Idle
        };

        Self {
            attachments: &app.attachments,
            banner: app.banner.as_deref(),
            current_dir: app.browser.current_dir(),
            file_page: &app.file_page,
            file_selected: app.file_selected,
            focus: app.focus,
            items: app.browser.items(),
            mode: &app.mode,
            prompt_input: &app.prompt_input,
            request_state,
            response_page: &app.response_page,
            result_page: app.result_page,
            status_message: app.status_message.as_deref(),
        }
    }
}

/// Renders the page for the current mode above a one-line status bar.
pub fn render(f: &mut Frame, context: &RenderContext<'_>) {
    let [content_area, status_bar_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());

    match context.mode {
        AppMode::Main => pages::main_view::MainViewPage::new(context).render(f, content_area),
        AppMode::Verification(form) => {
            pages::verification::VerificationPage::new(context, form).render(f, content_area);
        }
    }

    StatusBar::new(
        context.current_dir,
        context.attachments.selected_count(),
        context.request_state,
    )
    .status_message(context.status_message)
    .render(f, status_bar_area);
}
