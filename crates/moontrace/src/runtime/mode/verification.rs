use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::domain::input::InputState;
use crate::runtime::EventResult;
use crate::runtime::mode::main_view::edit_input;
use crate::ui::state::app_mode::{AppMode, VerificationFocus, VerificationForm};

pub(crate) fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    let AppMode::Verification(form) = &mut app.mode else {
        return EventResult::Continue;
    };

    match key.code {
        KeyCode::Esc => {
            app.close_verification();

            return EventResult::Continue;
        }
        KeyCode::Tab => {
            form.focus = form.focus.next();

            return EventResult::Continue;
        }
        KeyCode::BackTab => {
            form.focus = form.focus.previous();

            return EventResult::Continue;
        }
        _ => {}
    }

    let focus = form.focus;
    match focus {
        VerificationFocus::TargetName | VerificationFocus::Description => {
            if key.code == KeyCode::Enter {
                form.focus = focus.next();
            } else if let Some(input) = focused_input(form) {
                edit_input(input, key);
            }
        }
        VerificationFocus::Files => handle_file_list_key(app, key),
        VerificationFocus::Generate => {
            if key.code == KeyCode::Enter {
                app.generate_verification();
            }
        }
        VerificationFocus::Cancel => {
            if key.code == KeyCode::Enter {
                app.close_verification();
            }
        }
    }

    EventResult::Continue
}

/// Returns the text field that has focus, if any.
pub(crate) fn focused_input(form: &mut VerificationForm) -> Option<&mut InputState> {
    match form.focus {
        VerificationFocus::TargetName => Some(&mut form.target_name),
        VerificationFocus::Description => Some(&mut form.description),
        VerificationFocus::Files | VerificationFocus::Generate | VerificationFocus::Cancel => None,
    }
}

fn handle_file_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.move_verification_selection_up(),
        KeyCode::Down => app.move_verification_selection_down(),
        KeyCode::Left => app.verification_go_to_parent(),
        KeyCode::Right => app.enter_verification_directory(),
        KeyCode::Enter => app.activate_verification_entry(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    use super::*;
    use crate::infra::assistant::{AssistantRunner, MockAssistantBackend};

    fn new_dialog_app() -> (App, TempDir) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir(temp_dir.path().join("rtl")).expect("failed to create dir");
        fs::write(temp_dir.path().join("rtl/fifo.sv"), "module fifo;")
            .expect("failed to write file");
        let runner = AssistantRunner::new(Arc::new(MockAssistantBackend::new()));
        let mut app = App::new(temp_dir.path(), runner, None);
        app.open_verification();

        (app, temp_dir)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn form(app: &App) -> &VerificationForm {
        let AppMode::Verification(form) = &app.mode else {
            panic!("verification dialog should be open");
        };

        form
    }

    #[test]
    fn test_typing_fills_target_name_then_enter_moves_to_description() {
        // Arrange
        let (mut app, _temp_dir) = new_dialog_app();

        // Act
        for code in [KeyCode::Char('t'), KeyCode::Char('b'), KeyCode::Enter] {
            handle(&mut app, press(code));
        }

        // Assert
        assert_eq!(form(&app).target_name.text(), "tb");
        assert_eq!(form(&app).focus, VerificationFocus::Description);
    }

    #[test]
    fn test_file_list_enter_opens_directory_then_toggles_file() {
        // Arrange
        let (mut app, temp_dir) = new_dialog_app();
        if let AppMode::Verification(form) = &mut app.mode {
            form.focus = VerificationFocus::Files;
            form.file_selected = 1;
        }

        // Act
        handle(&mut app, press(KeyCode::Enter));
        handle(&mut app, press(KeyCode::Down));
        handle(&mut app, press(KeyCode::Enter));

        // Assert
        assert_eq!(app.browser.current_dir(), temp_dir.path().join("rtl"));
        assert!(
            app.attachments
                .is_selected(&temp_dir.path().join("rtl/fifo.sv"))
        );
        assert!(app.file_page.text().is_empty());
    }

    #[test]
    fn test_file_list_left_goes_up() {
        // Arrange
        let (mut app, temp_dir) = new_dialog_app();
        app.browser.enter_child(1);
        if let AppMode::Verification(form) = &mut app.mode {
            form.focus = VerificationFocus::Files;
        }

        // Act
        handle(&mut app, press(KeyCode::Left));

        // Assert
        assert_eq!(app.browser.current_dir(), temp_dir.path());
    }

    #[test]
    fn test_esc_closes_dialog() {
        // Arrange
        let (mut app, _temp_dir) = new_dialog_app();

        // Act
        handle(&mut app, press(KeyCode::Esc));

        // Assert
        assert_eq!(app.mode, AppMode::Main);
    }

    #[test]
    fn test_enter_on_cancel_closes_dialog_without_request() {
        // Arrange
        let (mut app, _temp_dir) = new_dialog_app();
        if let AppMode::Verification(form) = &mut app.mode {
            form.focus = VerificationFocus::Cancel;
        }

        // Act
        handle(&mut app, press(KeyCode::Enter));

        // Assert
        assert_eq!(app.mode, AppMode::Main);
        assert!(!app.is_request_running());
    }

    #[test]
    fn test_shift_tab_moves_focus_backwards() {
        // Arrange
        let (mut app, _temp_dir) = new_dialog_app();

        // Act
        handle(&mut app, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));

        // Assert
        assert_eq!(form(&app).focus, VerificationFocus::Cancel);
    }
}
