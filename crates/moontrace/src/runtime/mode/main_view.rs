use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::domain::input::InputState;
use crate::runtime::EventResult;
use crate::ui::state::app_mode::Focus;

/// Lines moved by `PageUp` / `PageDown` on the result pages.
const PAGE_SCROLL_LINES: u16 = 10;

pub(crate) fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    match app.focus {
        Focus::Prompt => handle_prompt_key(app, key),
        Focus::Files => handle_file_list_key(app, key),
        Focus::Results => handle_results_key(app, key),
    }

    EventResult::Continue
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => app.focus = Focus::Files,
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Up => app.recall_previous_prompt(),
        KeyCode::Down => app.recall_next_prompt(),
        _ => {
            edit_input(&mut app.prompt_input, key);
        }
    }
}

fn handle_file_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => app.focus = Focus::Prompt,
        KeyCode::Up => app.move_file_selection_up(),
        KeyCode::Down => app.move_file_selection_down(),
        KeyCode::Left => app.go_to_parent(),
        KeyCode::Right => app.open_selected_entry(),
        KeyCode::Enter => app.activate_selected_entry(),
        _ => {}
    }
}

fn handle_results_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => app.focus = Focus::Files,
        KeyCode::Up => app.visible_result_panel_mut().scroll_up(1),
        KeyCode::Down => app.visible_result_panel_mut().scroll_down(1),
        KeyCode::PageUp => app.visible_result_panel_mut().scroll_up(PAGE_SCROLL_LINES),
        KeyCode::PageDown => app
            .visible_result_panel_mut()
            .scroll_down(PAGE_SCROLL_LINES),
        _ => {}
    }
}

/// Applies a single-line editing key to `input`.
///
/// Returns whether the key was consumed.
pub(crate) fn edit_input(input: &mut InputState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            input.insert_char(ch);
        }
        KeyCode::Backspace => input.delete_backward(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }

    true
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::infra::assistant::{AssistantRunner, MockAssistantBackend};
    use crate::ui::state::app_mode::ResultPage;

    fn new_test_app() -> (App, TempDir) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        fs::write(temp_dir.path().join("alu.v"), "module alu;").expect("failed to write file");
        let runner = AssistantRunner::new(Arc::new(MockAssistantBackend::new()));
        let app = App::new(temp_dir.path(), runner, None);

        (app, temp_dir)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_tab_cycles_prompt_files_prompt() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();

        // Act
        handle(&mut app, press(KeyCode::Tab));
        let after_first = app.focus;
        handle(&mut app, press(KeyCode::Tab));

        // Assert
        assert_eq!(after_first, Focus::Files);
        assert_eq!(app.focus, Focus::Prompt);
    }

    #[test]
    fn test_tab_from_results_moves_to_file_list() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();
        app.focus = Focus::Results;

        // Act
        handle(&mut app, press(KeyCode::Tab));

        // Assert
        assert_eq!(app.focus, Focus::Files);
    }

    #[test]
    fn test_typing_edits_prompt_input() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();

        // Act
        for code in [
            KeyCode::Char('a'),
            KeyCode::Char('b'),
            KeyCode::Left,
            KeyCode::Backspace,
            KeyCode::End,
            KeyCode::Char('c'),
        ] {
            handle(&mut app, press(code));
        }

        // Assert
        assert_eq!(app.prompt_input.text(), "bc");
    }

    #[test]
    fn test_up_key_recalls_history_into_prompt() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();
        app.history.append("why is q undefined");

        // Act
        handle(&mut app, press(KeyCode::Up));

        // Assert
        assert_eq!(app.prompt_input.text(), "why is q undefined");
    }

    #[test]
    fn test_enter_in_file_list_toggles_selected_file() {
        // Arrange
        let (mut app, temp_dir) = new_test_app();
        app.focus = Focus::Files;
        app.file_selected = 1;

        // Act
        handle(&mut app, press(KeyCode::Enter));

        // Assert
        assert!(app.attachments.is_selected(&temp_dir.path().join("alu.v")));
        assert_eq!(app.result_page, ResultPage::File);
        assert_eq!(app.focus, Focus::Files);
    }

    #[test]
    fn test_page_down_scrolls_visible_result_page() {
        // Arrange
        let (mut app, _temp_dir) = new_test_app();
        app.focus = Focus::Results;
        app.result_page = ResultPage::Response;
        app.response_page.show("line\n".repeat(30));

        // Act
        handle(&mut app, press(KeyCode::PageDown));

        // Assert
        assert_eq!(app.response_page.scroll(), PAGE_SCROLL_LINES);
        assert_eq!(app.file_page.scroll(), 0);
    }
}
