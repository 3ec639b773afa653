use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Files marked for inclusion in the next assistant request.
///
/// Entries are flipped, never removed: a path toggled off stays in the map
/// with `false`, and paths outside the current directory keep their state
/// after navigation. The set lives for the whole process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    entries: BTreeMap<PathBuf, bool>,
}

impl AttachmentSet {
    /// Creates an empty attachment set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the selection flag for `path` and returns the new value.
    pub fn toggle(&mut self, path: &Path) -> bool {
        let selected = self.entries.entry(path.to_path_buf()).or_insert(false);
        *selected = !*selected;

        *selected
    }

    /// Returns whether `path` is currently attached.
    pub fn is_selected(&self, path: &Path) -> bool {
        self.entries.get(path).copied().unwrap_or(false)
    }

    /// Returns every attached path in stable (sorted) order.
    pub fn selected_paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Returns the number of attached paths.
    pub fn selected_count(&self) -> usize {
        self.entries.values().filter(|selected| **selected).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_marks_path_selected() {
        // Arrange
        let mut attachments = AttachmentSet::new();
        let path = Path::new("/a/report.txt");

        // Act
        let selected = attachments.toggle(path);

        // Assert
        assert!(selected);
        assert!(attachments.is_selected(path));
        assert_eq!(attachments.selected_paths(), vec![path.to_path_buf()]);
    }

    #[test]
    fn test_toggle_twice_restores_prior_state() {
        // Arrange
        let mut attachments = AttachmentSet::new();
        let path = Path::new("/a/report.txt");
        let before = attachments.is_selected(path);

        // Act
        attachments.toggle(path);
        attachments.toggle(path);

        // Assert
        assert_eq!(attachments.is_selected(path), before);
        assert!(attachments.selected_paths().is_empty());
        assert_eq!(attachments.selected_count(), 0);
    }

    #[test]
    fn test_selected_paths_are_sorted_and_skip_deselected_entries() {
        // Arrange
        let mut attachments = AttachmentSet::new();
        attachments.toggle(Path::new("/b/two.v"));
        attachments.toggle(Path::new("/a/one.v"));
        attachments.toggle(Path::new("/c/three.v"));
        attachments.toggle(Path::new("/c/three.v"));

        // Act
        let paths = attachments.selected_paths();

        // Assert
        assert_eq!(
            paths,
            vec![PathBuf::from("/a/one.v"), PathBuf::from("/b/two.v")]
        );
        assert_eq!(attachments.selected_count(), 2);
    }

    #[test]
    fn test_unknown_path_is_not_selected() {
        // Arrange
        let attachments = AttachmentSet::new();

        // Act
        let selected = attachments.is_selected(Path::new("/nowhere"));

        // Assert
        assert!(!selected);
    }
}
