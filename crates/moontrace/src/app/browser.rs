//! Directory navigation state shared by both file panels.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::attachment::AttachmentSet;
use crate::file_list::{self, ListItem, clean_path, is_root, list_directory};

/// Result of pressing `Enter` on a file-panel row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Moved into a child directory.
    Entered,
    /// Moved to the parent directory.
    WentUp,
    /// Flipped the attachment flag of a file.
    Toggled { path: PathBuf, selected: bool },
    /// Nothing changed.
    Ignored,
}

/// Current directory plus its latest listing.
///
/// `current_dir` only changes through [`Browser::enter_child`] and
/// [`Browser::go_parent`], and only to a directory that could be read. A
/// failed move keeps the previous directory and shows the error row in
/// place of the listing.
#[derive(Clone, Debug)]
pub struct Browser {
    current_dir: PathBuf,
    items: Vec<ListItem>,
}

impl Browser {
    /// Opens `start_dir` and lists it.
    pub fn new(start_dir: &Path) -> Self {
        let current_dir = clean_path(start_dir);
        let items = list_directory(&current_dir);

        Self { current_dir, items }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// Re-lists the current directory.
    pub fn refresh(&mut self) {
        self.items = list_directory(&self.current_dir);
    }

    /// Moves into the directory at row `index`.
    ///
    /// The parent row moves up instead. Returns whether the directory
    /// changed.
    pub fn enter_child(&mut self, index: usize) -> bool {
        match self.items.get(index) {
            Some(ListItem::Parent) => self.go_parent(),
            Some(ListItem::Entry(entry)) if entry.is_dir => {
                let target = self.current_dir.join(&entry.name);
                self.move_to(target)
            }
            Some(ListItem::Entry(entry)) => {
                // Symlinks to directories are listed as plain entries.
                let target = self.current_dir.join(&entry.name);
                if fs::metadata(&target).is_ok_and(|metadata| metadata.is_dir()) {
                    return self.move_to(target);
                }

                false
            }
            Some(ListItem::Error(_)) | None => false,
        }
    }

    /// Moves to the parent directory; a no-op at the filesystem root.
    pub fn go_parent(&mut self) -> bool {
        if is_root(&self.current_dir) {
            return false;
        }

        let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) else {
            return false;
        };

        self.move_to(parent)
    }

    /// Flips the attachment flag of the file at row `index` and re-lists so
    /// the marker updates.
    ///
    /// Returns the new flag, or `None` when the row is not a regular file.
    pub fn toggle_attachment(
        &mut self,
        index: usize,
        attachments: &mut AttachmentSet,
    ) -> Option<(PathBuf, bool)> {
        let path = self.file_path(index)?;
        let selected = attachments.toggle(&path);
        tracing::info!(path = %path.display(), selected, "toggled attachment");
        self.refresh();

        Some((path, selected))
    }

    /// Reads the file at row `index` for the preview page.
    ///
    /// Returns `None` when the row is not a regular file; read failures are
    /// returned as inline error text.
    pub fn preview(&self, index: usize) -> Option<(PathBuf, String)> {
        let path = self.file_path(index)?;
        let content = file_list::read_preview(&path);

        Some((path, content))
    }

    /// Applies the toggle-only `Enter` behavior: files toggle, directories
    /// open, and the parent row moves up.
    pub fn activate(&mut self, index: usize, attachments: &mut AttachmentSet) -> Activation {
        if matches!(self.items.get(index), Some(ListItem::Parent)) {
            return if self.go_parent() {
                Activation::WentUp
            } else {
                Activation::Ignored
            };
        }

        if let Some((path, selected)) = self.toggle_attachment(index, attachments) {
            return Activation::Toggled { path, selected };
        }

        if self.enter_child(index) {
            return Activation::Entered;
        }

        Activation::Ignored
    }

    /// Returns the path of row `index` when it names an existing non-directory.
    fn file_path(&self, index: usize) -> Option<PathBuf> {
        let item = self.items.get(index)?;
        if !matches!(item, ListItem::Entry(_)) {
            return None;
        }

        let path = item.path_in(&self.current_dir)?;
        let metadata = fs::metadata(&path).ok()?;

        (!metadata.is_dir()).then_some(path)
    }

    fn move_to(&mut self, target: PathBuf) -> bool {
        let target = clean_path(&target);

        if let Err(error) = fs::read_dir(&target) {
            tracing::warn!(dir = %target.display(), %error, "cannot open directory");
            self.items = vec![ListItem::Error(error.to_string())];

            return false;
        }

        tracing::info!(from = %self.current_dir.display(), to = %target.display(), "changed directory");
        self.current_dir = target;
        self.refresh();

        true
    }
}

/// Clamps a selection index to a list of `len` rows.
pub fn clamp_selection(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::file_list::DirectoryEntry;

    fn design_tree() -> TempDir {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        fs::write(temp_dir.path().join("report.txt"), vec![b'x'; 100])
            .expect("failed to write report");
        fs::create_dir(temp_dir.path().join("src")).expect("failed to create src");
        fs::write(temp_dir.path().join("src/counter.v"), "module counter;")
            .expect("failed to write counter");

        temp_dir
    }

    fn index_of(browser: &Browser, name: &str) -> usize {
        browser
            .items()
            .iter()
            .position(|item| matches!(item, ListItem::Entry(DirectoryEntry { name: entry_name, .. }) if entry_name == name))
            .expect("entry should be listed")
    }

    #[test]
    fn test_enter_child_moves_into_directory_and_relists() {
        // Arrange
        let temp_dir = design_tree();
        let mut browser = Browser::new(temp_dir.path());
        let src_index = index_of(&browser, "src");

        // Act
        let moved = browser.enter_child(src_index);

        // Assert
        assert!(moved);
        assert_eq!(browser.current_dir(), temp_dir.path().join("src"));
        assert_eq!(browser.items().len(), 2);
    }

    #[test]
    fn test_enter_child_on_file_keeps_directory() {
        // Arrange
        let temp_dir = design_tree();
        let mut browser = Browser::new(temp_dir.path());
        let report_index = index_of(&browser, "report.txt");

        // Act
        let moved = browser.enter_child(report_index);

        // Assert
        assert!(!moved);
        assert_eq!(browser.current_dir(), temp_dir.path());
    }

    #[test]
    fn test_enter_child_on_deleted_directory_keeps_directory_and_shows_error() {
        // Arrange
        let temp_dir = design_tree();
        let mut browser = Browser::new(temp_dir.path());
        let src_index = index_of(&browser, "src");
        fs::remove_dir_all(temp_dir.path().join("src")).expect("failed to remove src");

        // Act
        let moved = browser.enter_child(src_index);

        // Assert
        assert!(!moved);
        assert_eq!(browser.current_dir(), temp_dir.path());
        assert!(matches!(browser.items(), [ListItem::Error(_)]));
    }

    #[test]
    fn test_go_parent_moves_up_one_level() {
        // Arrange
        let temp_dir = design_tree();
        let mut browser = Browser::new(&temp_dir.path().join("src"));

        // Act
        let moved = browser.go_parent();

        // Assert
        assert!(moved);
        assert_eq!(browser.current_dir(), temp_dir.path());
    }

    #[test]
    fn test_go_parent_at_root_is_noop() {
        // Arrange
        let mut browser = Browser::new(Path::new("/"));

        // Act
        let moved = browser.go_parent();

        // Assert
        assert!(!moved);
        assert_eq!(browser.current_dir(), Path::new("/"));
    }

    #[test]
    fn test_toggle_attachment_flips_file_and_keeps_directory() {
        // Arrange
        let temp_dir = design_tree();
        let mut browser = Browser::new(temp_dir.path());
        let mut attachments = AttachmentSet::new();
        let report_index = index_of(&browser, "report.txt");

        // Act
        let first = browser.toggle_attachment(report_index, &mut attachments);
        let second = browser.toggle_attachment(report_index, &mut attachments);

        // Assert
        let report_path = temp_dir.path().join("report.txt");
        assert_eq!(first, Some((report_path.clone(), true)));
        assert_eq!(second, Some((report_path.clone(), false)));
        assert!(!attachments.is_selected(&report_path));
        assert_eq!(browser.current_dir(), temp_dir.path());
    }

    #[test]
    fn test_toggle_attachment_ignores_directories() {
        // Arrange
        let temp_dir = design_tree();
        let mut browser = Browser::new(temp_dir.path());
        let mut attachments = AttachmentSet::new();
        let src_index = index_of(&browser, "src");

        // Act
        let result = browser.toggle_attachment(src_index, &mut attachments);

        // Assert
        assert_eq!(result, None);
        assert_eq!(attachments.selected_count(), 0);
    }

    #[test]
    fn test_preview_reads_file_content() {
        // Arrange
        let temp_dir = design_tree();
        let browser = Browser::new(&temp_dir.path().join("src"));
        let counter_index = index_of(&browser, "counter.v");

        // Act
        let preview = browser.preview(counter_index);

        // Assert
        assert_eq!(
            preview,
            Some((
                temp_dir.path().join("src/counter.v"),
                "module counter;".to_string()
            ))
        );
    }

    #[test]
    fn test_preview_of_directory_is_none() {
        // Arrange
        let temp_dir = design_tree();
        let browser = Browser::new(temp_dir.path());
        let src_index = index_of(&browser, "src");

        // Act
        let preview = browser.preview(src_index);

        // Assert
        assert_eq!(preview, None);
    }

    #[test]
    fn test_activate_follows_toggle_only_flow() {
        // Arrange
        let temp_dir = design_tree();
        let mut browser = Browser::new(temp_dir.path());
        let mut attachments = AttachmentSet::new();
        let report_index = index_of(&browser, "report.txt");

        // Act
        let toggled = browser.activate(report_index, &mut attachments);
        let src_index = index_of(&browser, "src");
        let entered = browser.activate(src_index, &mut attachments);
        let went_up = browser.activate(0, &mut attachments);

        // Assert
        assert_eq!(
            toggled,
            Activation::Toggled {
                path: temp_dir.path().join("report.txt"),
                selected: true,
            }
        );
        assert_eq!(entered, Activation::Entered);
        assert_eq!(went_up, Activation::WentUp);
        assert_eq!(browser.current_dir(), temp_dir.path());
    }

    #[test]
    fn test_clamp_selection_limits_index_to_last_row() {
        // Arrange
        let index = 7;

        // Act
        let clamped = clamp_selection(index, 3);

        // Assert
        assert_eq!(clamped, 2);
        assert_eq!(clamp_selection(4, 0), 0);
    }
}
