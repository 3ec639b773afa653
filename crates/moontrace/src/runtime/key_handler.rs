use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::runtime::{EventResult, mode};
use crate::ui::state::app_mode::{AppMode, Focus};

/// Routes one key press: global shortcuts first, then the active mode.
pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                tracing::info!("quit requested");

                return EventResult::Quit;
            }
            KeyCode::Char('g') => {
                app.open_verification();

                return EventResult::Continue;
            }
            KeyCode::Char('b') => {
                app.close_verification();

                return EventResult::Continue;
            }
            KeyCode::Char('p') => {
                app.switch_result_page();

                return EventResult::Continue;
            }
            _ => {}
        }
    }

    match &app.mode {
        AppMode::Main => mode::main_view::handle(app, key),
        AppMode::Verification(_) => mode::verification::handle(app, key),
    }
}

/// Inserts pasted text into whichever text field has focus.
pub(crate) fn handle_paste(app: &mut App, text: &str) {
    match &mut app.mode {
        AppMode::Main if app.focus == Focus::Prompt => app.prompt_input.insert_text(text),
        AppMode::Main => {}
        AppMode::Verification(form) => {
            if let Some(input) = mode::verification::focused_input(form) {
                input.insert_text(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::infra::assistant::{AssistantRunner, MockAssistantBackend};
    use crate::ui::state::app_mode::{ResultPage, VerificationFocus};

    fn new_test_app() -> (App, TempDir) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let runner = AssistantRunner::new(Arc::new(MockAssistantBackend::new()));
        let app = App::new(temp_dir.path(), runner, None);

        (app, temp_dir)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_ctrl_c_quits() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();

        // Act
        let result = handle_key_event(&mut app, ctrl('c'));

        // Assert
        assert!(matches!(result, EventResult::Quit));
    }

    #[test]
    fn test_ctrl_g_opens_and_ctrl_b_closes_verification() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();

        // Act
        handle_key_event(&mut app, ctrl('g'));
        let opened = matches!(app.mode, AppMode::Verification(_));
        handle_key_event(&mut app, ctrl('b'));

        // Assert
        assert!(opened);
        assert_eq!(app.mode, AppMode::Main);
    }

    #[test]
    fn test_ctrl_p_switches_result_page() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();

        // Act
        handle_key_event(&mut app, ctrl('p'));

        // Assert
        assert_eq!(app.result_page, ResultPage::Response);
    }

    #[test]
    fn test_plain_c_is_typed_into_prompt() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();

        // Act
        let result = handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE),
        );

        // Assert
        assert!(matches!(result, EventResult::Continue));
        assert_eq!(app.prompt_input.text(), "c");
    }

    #[test]
    fn test_paste_goes_to_focused_verification_field() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();
        app.open_verification();
        if let AppMode::Verification(form) = &mut app.mode {
            form.focus = VerificationFocus::Description;
        }

        // Act
        handle_paste(&mut app, "4-bit\ncounter");

        // Assert
        let AppMode::Verification(form) = &app.mode else {
            panic!("verification dialog should stay open");
        };
        assert_eq!(form.description.text(), "4-bit counter");
        assert!(app.prompt_input.is_empty());
    }

    #[test]
    fn test_paste_is_ignored_when_file_list_has_focus() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();
        app.focus = Focus::Files;

        // Act
        handle_paste(&mut app, "ignored");

        // Assert
        assert!(app.prompt_input.is_empty());
    }
}
