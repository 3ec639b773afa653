/// Read-only text shown in a result page, with a vertical scroll offset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextPanel {
    scroll: u16,
    text: String,
}

impl TextPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Top line currently visible.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Replaces the text and scrolls back to the top.
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.scroll = 0;
    }

    /// Replaces the text while keeping the scroll offset, as streamed output
    /// grows.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.clamp_scroll();
    }

    /// Appends `line` on its own line.
    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }

        self.text.push_str(line);
        self.text.push('\n');
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let line_count = self.text.lines().count();
        let last_line = u16::try_from(line_count.saturating_sub(1)).unwrap_or(u16::MAX);
        self.scroll = self.scroll.min(last_line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_down_stops_at_last_line() {
        // Arrange
        let mut panel = TextPanel::new();
        panel.show("one\ntwo\nthree\n");

        // Act
        panel.scroll_down(10);

        // Assert
        assert_eq!(panel.scroll(), 2);
    }

    #[test]
    fn test_scroll_up_saturates_at_top() {
        // Arrange
        let mut panel = TextPanel::new();
        panel.show("one\ntwo\n");
        panel.scroll_down(1);

        // Act
        panel.scroll_up(5);

        // Assert
        assert_eq!(panel.scroll(), 0);
    }

    #[test]
    fn test_replace_keeps_scroll_while_show_resets_it() {
        // Arrange
        let mut panel = TextPanel::new();
        panel.show("a\nb\nc\n");
        panel.scroll_down(2);

        // Act
        panel.replace("a\nb\nc\nd\n");
        let kept = panel.scroll();
        panel.show("fresh");

        // Assert
        assert_eq!(kept, 2);
        assert_eq!(panel.scroll(), 0);
    }

    #[test]
    fn test_push_line_starts_a_new_line() {
        // Arrange
        let mut panel = TextPanel::new();
        panel.show("partial");

        // Act
        panel.push_line("[assistant exited with status 3]");

        // Assert
        assert_eq!(panel.text(), "partial\n[assistant exited with status 3]\n");
    }
}
