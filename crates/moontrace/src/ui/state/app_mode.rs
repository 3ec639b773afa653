use crate::domain::input::InputState;

/// Top-level screen currently shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AppMode {
    /// File browser, prompt input, and result pages.
    #[default]
    Main,
    /// Full-screen testbench generation dialog.
    Verification(VerificationForm),
}

/// Panel receiving key input in [`AppMode::Main`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    Files,
    #[default]
    Prompt,
    Results,
}

/// Result page shown in the right-hand panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultPage {
    #[default]
    File,
    Response,
}

impl ResultPage {
    /// Returns the other page.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::File => Self::Response,
            Self::Response => Self::File,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::File => " File Content ",
            Self::Response => " Program Answer ",
        }
    }
}

/// Field of the verification dialog receiving key input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerificationFocus {
    #[default]
    TargetName,
    Description,
    Files,
    Generate,
    Cancel,
}

impl VerificationFocus {
    /// Returns the field reached with `Tab`.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::TargetName => Self::Description,
            Self::Description => Self::Files,
            Self::Files => Self::Generate,
            Self::Generate => Self::Cancel,
            Self::Cancel => Self::TargetName,
        }
    }

    /// Returns the field reached with `Shift+Tab`.
    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            Self::TargetName => Self::Cancel,
            Self::Description => Self::TargetName,
            Self::Files => Self::Description,
            Self::Generate => Self::Files,
            Self::Cancel => Self::Generate,
        }
    }
}

/// Input state of the verification dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerificationForm {
    pub description: InputState,
    pub file_selected: usize,
    pub focus: VerificationFocus,
    pub target_name: InputState,
}
