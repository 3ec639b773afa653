use std::path::PathBuf;

/// Target file name used when the dialog leaves the name blank.
pub const DEFAULT_TARGET_NAME: &str = "verification_tb.cpp";

/// Prompt submitted alongside every verification request.
pub const VERIFICATION_PROMPT: &str =
    "Generate a comprehensive verification testbench for this hardware design.";

const TARGET_SUFFIX: &str = "cpp";

/// Testbench generation request built from the verification dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Paths attached when the request was built.
    pub attached_paths: Vec<PathBuf>,
    /// Free-text design description; may be empty.
    pub description: String,
    /// Name of the testbench file the assistant should produce.
    pub target_name: String,
}

impl VerificationRequest {
    /// Builds a request, normalizing `target_name` to a `.cpp` file name.
    pub fn new(target_name: &str, description: &str, attached_paths: Vec<PathBuf>) -> Self {
        Self {
            attached_paths,
            description: description.to_string(),
            target_name: normalize_target_name(target_name),
        }
    }

    /// Returns the summary shown in the response panel while the testbench
    /// is generated.
    pub fn summary(&self) -> String {
        format!(
            "Generating verification testbench...\nModule: {}\nDescription: {}\nSelected Files: {}",
            self.target_name,
            self.description,
            self.attached_paths.len()
        )
    }
}

/// Applies the default name and appends `.cpp` when the suffix is missing.
pub fn normalize_target_name(target_name: &str) -> String {
    let target_name = target_name.trim();
    if target_name.is_empty() {
        return DEFAULT_TARGET_NAME.to_string();
    }

    if target_name.ends_with(TARGET_SUFFIX) {
        return target_name.to_string();
    }

    format!("{target_name}.{TARGET_SUFFIX}")
}
