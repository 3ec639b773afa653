//! App-layer composition root and shared state container.
//!
//! [`App`] owns every piece of mutable session state. Assistant tasks never
//! touch it directly; they emit [`AppEvent`]s that the runtime loop feeds
//! back through [`App::apply_app_events`].

use std::path::Path;

use tokio::sync::mpsc;

use crate::domain::attachment::AttachmentSet;
use crate::domain::history::PromptHistory;
use crate::domain::input::InputState;
use crate::domain::verification::{VERIFICATION_PROMPT, VerificationRequest};
use crate::infra::assistant::{
    AssistantEvent, AssistantRequest, AssistantRunner, ExitOutcome, LAUNCH_ERROR_MESSAGE,
};
use crate::ui::state::app_mode::{AppMode, Focus, ResultPage, VerificationForm};
use crate::ui::state::text_panel::TextPanel;

pub mod browser;
pub mod request;

use browser::{Activation, Browser, clamp_selection};
use request::{RequestId, RequestQueue, Submission};

/// Internal app events emitted by assistant request tasks.
///
/// Producers should emit events only; state mutation is centralized in
/// [`App::apply_app_events`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum AppEvent {
    /// Progress of the request identified by `request_id`.
    Assistant {
        event: AssistantEvent,
        request_id: RequestId,
    },
    /// The request identified by `request_id` has ended.
    RequestFinished {
        outcome: RequestOutcome,
        request_id: RequestId,
    },
}

/// Final result of one request task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RequestOutcome {
    Exited(ExitOutcome),
    LaunchFailed,
}

/// Stores application state and coordinates browsing and assistant requests.
pub struct App {
    pub attachments: AttachmentSet,
    /// Pre-rendered ASCII art for the header, when a banner image loaded.
    pub banner: Option<String>,
    pub browser: Browser,
    pub file_page: TextPanel,
    /// Selected row of the main file list.
    pub file_selected: usize,
    pub focus: Focus,
    pub history: PromptHistory,
    pub mode: AppMode,
    pub prompt_input: InputState,
    pub response_page: TextPanel,
    pub result_page: ResultPage,
    pub status_message: Option<String>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    requests: RequestQueue,
    runner: AssistantRunner,
}

impl App {
    /// Builds the app with the browser opened at `start_dir`.
    pub fn new(start_dir: &Path, runner: AssistantRunner, banner: Option<String>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Self {
            attachments: AttachmentSet::new(),
            banner,
            browser: Browser::new(start_dir),
            file_page: TextPanel::new(),
            file_selected: 0,
            focus: Focus::default(),
            history: PromptHistory::new(),
            mode: AppMode::default(),
            prompt_input: InputState::new(),
            response_page: TextPanel::new(),
            result_page: ResultPage::default(),
            status_message: None,
            event_rx,
            event_tx,
            requests: RequestQueue::new(),
            runner,
        }
    }

    /// Returns whether an assistant request is running.
    pub fn is_request_running(&self) -> bool {
        self.requests.is_busy()
    }

    /// Number of submissions waiting behind the running request.
    pub fn queued_request_count(&self) -> usize {
        self.requests.pending_len()
    }

    /// Returns the panel backing the visible result page.
    pub fn visible_result_panel_mut(&mut self) -> &mut TextPanel {
        match self.result_page {
            ResultPage::File => &mut self.file_page,
            ResultPage::Response => &mut self.response_page,
        }
    }

    pub fn switch_result_page(&mut self) {
        self.result_page = self.result_page.toggled();
    }

    pub fn move_file_selection_up(&mut self) {
        self.file_selected = self.file_selected.saturating_sub(1);
    }

    pub fn move_file_selection_down(&mut self) {
        self.file_selected =
            clamp_selection(self.file_selected + 1, self.browser.items().len());
    }

    /// Handles `Enter` in the main file list.
    ///
    /// A file is toggled and shown on the file page, a directory is opened,
    /// and the parent row moves up.
    pub fn activate_selected_entry(&mut self) {
        let index = self.file_selected;

        match self.browser.activate(index, &mut self.attachments) {
            Activation::Toggled { .. } => {
                self.preview_entry(index);
            }
            Activation::Entered | Activation::WentUp => self.file_selected = 0,
            Activation::Ignored => {}
        }

        self.clamp_file_selection();
    }

    /// Handles `Right` in the main file list: previews a file and moves focus
    /// to the result pages, or opens a directory.
    pub fn open_selected_entry(&mut self) {
        let index = self.file_selected;

        if self.preview_entry(index) {
            self.focus = Focus::Results;

            return;
        }

        if self.browser.enter_child(index) {
            self.file_selected = 0;
        }

        self.clamp_file_selection();
    }

    /// Handles `Left` in the main file list.
    pub fn go_to_parent(&mut self) {
        if self.browser.go_parent() {
            self.file_selected = 0;
        }

        self.clamp_file_selection();
    }

    pub fn recall_previous_prompt(&mut self) {
        if let Some(entry) = self.history.recall_previous() {
            self.prompt_input.set_text(entry);
        }
    }

    pub fn recall_next_prompt(&mut self) {
        if let Some(entry) = self.history.recall_next() {
            self.prompt_input.set_text(entry);
        }
    }

    /// Sends the prompt input, exactly as typed, with the current
    /// attachments.
    ///
    /// Blank prompts are discarded without touching history.
    pub fn submit_prompt(&mut self) {
        let prompt = self.prompt_input.take_text();
        if prompt.trim().is_empty() {
            return;
        }

        self.history.append(prompt.clone());
        self.result_page = ResultPage::Response;

        let request = AssistantRequest::prompt(prompt, self.attachments.selected_paths());
        self.enqueue_request(request);
    }

    /// Opens the verification dialog; a no-op when it is already open.
    pub fn open_verification(&mut self) {
        if matches!(self.mode, AppMode::Main) {
            self.mode = AppMode::Verification(VerificationForm::default());
        }
    }

    /// Returns to the main view, discarding the dialog inputs.
    pub fn close_verification(&mut self) {
        self.mode = AppMode::Main;
        self.clamp_file_selection();
    }

    /// Builds a testbench request from the dialog and submits it.
    pub fn generate_verification(&mut self) {
        let AppMode::Verification(form) = &self.mode else {
            return;
        };

        let verification = VerificationRequest::new(
            form.target_name.text(),
            form.description.text(),
            self.attachments.selected_paths(),
        );
        tracing::info!(
            target_name = %verification.target_name,
            attachments = verification.attached_paths.len(),
            "verification requested"
        );

        self.response_page.show(verification.summary());
        self.result_page = ResultPage::Response;
        self.close_verification();
        self.enqueue_request(AssistantRequest::verification(
            VERIFICATION_PROMPT,
            verification,
        ));
    }

    pub fn move_verification_selection_up(&mut self) {
        if let AppMode::Verification(form) = &mut self.mode {
            form.file_selected = form.file_selected.saturating_sub(1);
        }
    }

    pub fn move_verification_selection_down(&mut self) {
        if let AppMode::Verification(form) = &mut self.mode {
            form.file_selected =
                clamp_selection(form.file_selected + 1, self.browser.items().len());
        }
    }

    /// Handles `Enter` in the dialog file list: toggle only, no preview.
    pub fn activate_verification_entry(&mut self) {
        let AppMode::Verification(form) = &mut self.mode else {
            return;
        };

        let activation = self
            .browser
            .activate(form.file_selected, &mut self.attachments);
        if matches!(activation, Activation::Entered | Activation::WentUp) {
            form.file_selected = 0;
        }

        form.file_selected = clamp_selection(form.file_selected, self.browser.items().len());
    }

    /// Handles `Right` in the dialog file list.
    pub fn enter_verification_directory(&mut self) {
        let AppMode::Verification(form) = &mut self.mode else {
            return;
        };

        if self.browser.enter_child(form.file_selected) {
            form.file_selected = 0;
        }

        form.file_selected = clamp_selection(form.file_selected, self.browser.items().len());
    }

    /// Handles `Left` in the dialog file list.
    pub fn verification_go_to_parent(&mut self) {
        let AppMode::Verification(form) = &mut self.mode else {
            return;
        };

        if self.browser.go_parent() {
            form.file_selected = 0;
        }

        form.file_selected = clamp_selection(form.file_selected, self.browser.items().len());
    }

    /// Waits for the next internal app event.
    pub(crate) async fn next_app_event(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    /// Applies `first_event` and every event already queued behind it, in
    /// arrival order.
    pub(crate) fn apply_app_events(&mut self, first_event: AppEvent) {
        self.apply_app_event(first_event);

        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_app_event(event);
        }
    }

    fn apply_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Assistant { event, request_id } => {
                if !self.requests.is_active(request_id) {
                    tracing::debug!(request_id, "ignored event from inactive request");

                    return;
                }

                self.apply_assistant_event(event);
            }
            AppEvent::RequestFinished {
                outcome,
                request_id,
            } => {
                if !self.requests.is_active(request_id) {
                    tracing::debug!(request_id, "ignored finish of inactive request");

                    return;
                }

                self.finish_request(request_id, outcome);
            }
        }
    }

    fn apply_assistant_event(&mut self, event: AssistantEvent) {
        match event {
            AssistantEvent::Started { pid } => {
                self.status_message = Some(match pid {
                    Some(pid) => format!("Assistant running (pid {pid})"),
                    None => "Assistant running".to_string(),
                });
            }
            AssistantEvent::Output(buffer) => self.response_page.replace(buffer),
            AssistantEvent::OutputClosed => {
                self.browser.refresh();
                self.clamp_file_selection();
            }
        }
    }

    fn finish_request(&mut self, request_id: RequestId, outcome: RequestOutcome) {
        match outcome {
            RequestOutcome::LaunchFailed => {
                self.response_page.show(LAUNCH_ERROR_MESSAGE);
                self.status_message = Some(LAUNCH_ERROR_MESSAGE.to_string());
            }
            RequestOutcome::Exited(exit_outcome) => {
                if let Some(line) = exit_outcome.error_line() {
                    self.response_page.push_line(&line);
                    self.status_message = Some(line);
                } else {
                    self.status_message = Some("Assistant finished".to_string());
                }
            }
        }

        self.focus = Focus::Results;

        if let Some((next_id, next_request)) = self.requests.finish(request_id) {
            self.start_request(next_id, next_request);
        }
    }

    fn enqueue_request(&mut self, request: AssistantRequest) {
        match self.requests.submit(request) {
            Submission::Start(request_id, request) => self.start_request(request_id, request),
            Submission::Queued {
                id: request_id,
                position,
            } => {
                tracing::info!(request_id, position, "request queued");
                self.status_message = Some(format!("Request queued (position {position})"));
            }
        }
    }

    /// Spawns the task running `request`.
    ///
    /// Runner events are forwarded in order, and the finish event is sent
    /// only after every forwarded event.
    fn start_request(&mut self, request_id: RequestId, request: AssistantRequest) {
        let initial_text = request
            .verification
            .as_ref()
            .map(VerificationRequest::summary)
            .unwrap_or_default();
        self.response_page.show(initial_text);
        self.status_message = Some("Assistant starting".to_string());
        tracing::info!(request_id, prompt = %request.prompt, "starting request");

        let runner = self.runner.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let (assistant_tx, mut assistant_rx) = mpsc::unbounded_channel();
            let forward_tx = event_tx.clone();
            let forwarder = tokio::spawn(async move {
                while let Some(event) = assistant_rx.recv().await {
                    if forward_tx
                        .send(AppEvent::Assistant { event, request_id })
                        .is_err()
                    {
                        break;
                    }
                }
            });

            let result = runner.run(&request, &assistant_tx).await;
            drop(assistant_tx);
            let _ = forwarder.await;

            let outcome = match result {
                Ok(exit_outcome) => RequestOutcome::Exited(exit_outcome),
                Err(error) => {
                    tracing::error!(request_id, %error, "assistant launch failed");

                    RequestOutcome::LaunchFailed
                }
            };
            let _ = event_tx.send(AppEvent::RequestFinished {
                outcome,
                request_id,
            });
        });
    }

    /// Shows the file at row `index` on the file page; returns whether the
    /// row was a file.
    fn preview_entry(&mut self, index: usize) -> bool {
        let Some((path, content)) = self.browser.preview(index) else {
            return false;
        };

        tracing::debug!(path = %path.display(), "previewing file");
        self.file_page.show(content);
        self.result_page = ResultPage::File;

        true
    }

    fn clamp_file_selection(&mut self) {
        self.file_selected = clamp_selection(self.file_selected, self.browser.items().len());
    }
}
