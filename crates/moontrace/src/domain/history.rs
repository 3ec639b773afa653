/// Previously submitted prompts with an `Up`/`Down` recall cursor.
///
/// `cursor == entries.len()` means nothing is recalled and the user is
/// editing a fresh prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptHistory {
    cursor: usize,
    entries: Vec<String>,
}

impl PromptHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submitted prompt and resets the cursor past the end.
    pub fn append(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
        self.cursor = self.entries.len();
    }

    /// Steps back one entry, returning it, or `None` at the oldest entry.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }

        self.cursor -= 1;

        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Steps forward one entry, returning it, or `None` at the newest entry.
    pub fn recall_next(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }

        self.cursor += 1;

        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
