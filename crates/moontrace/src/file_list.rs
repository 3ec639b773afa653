use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::domain::attachment::AttachmentSet;

pub const DIRECTORY_ICON: &str = "🗄️ ";
pub const FILE_ICON: &str = "📄 ";
pub const LIST_ERROR_LABEL: &str = "❌ Error loading files";
const PARENT_NAME: &str = "..";
const READ_ERROR_PREFIX: &str = "Error reading file:";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// One child of a listed directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub is_dir: bool,
    pub name: String,
    /// File size in bytes; always `0` for directories.
    pub size_bytes: u64,
}

/// One row of the file panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListItem {
    /// Synthetic row standing in for the parent directory.
    Parent,
    Entry(DirectoryEntry),
    /// Synthetic row shown instead of a listing when the read failed.
    Error(String),
}

impl ListItem {
    /// Returns the absolute path this row points at inside `dir`.
    pub fn path_in(&self, dir: &Path) -> Option<PathBuf> {
        match self {
            Self::Parent => dir.parent().map(Path::to_path_buf),
            Self::Entry(entry) => Some(dir.join(&entry.name)),
            Self::Error(_) => None,
        }
    }
}

/// Marker appended to attached files; each file panel uses its own glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMarker {
    Asterisk,
    Check,
}

impl SelectionMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asterisk => "*",
            Self::Check => "✓",
        }
    }
}

/// Lists `dir` for the file panel.
///
/// The path is cleaned lexically first. A read failure yields a single
/// [`ListItem::Error`] row. Otherwise a [`ListItem::Parent`] row leads unless
/// `dir` is the filesystem root, followed by the children sorted by name.
/// Children whose metadata cannot be read are skipped.
pub fn list_directory(dir: &Path) -> Vec<ListItem> {
    let dir = clean_path(dir);
    tracing::debug!(dir = %dir.display(), "updating file list");

    let read_dir = match fs::read_dir(&dir) {
        Ok(read_dir) => read_dir,
        Err(error) => {
            tracing::warn!(dir = %dir.display(), %error, "failed to list directory");

            return vec![ListItem::Error(error.to_string())];
        }
    };

    let mut entries: Vec<DirectoryEntry> = read_dir
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == "." || name == PARENT_NAME {
                return None;
            }

            let metadata = entry.metadata().ok()?;
            let is_dir = metadata.is_dir();

            Some(DirectoryEntry {
                is_dir,
                name,
                size_bytes: if is_dir { 0 } else { metadata.len() },
            })
        })
        .collect();
    entries.sort_by(|first, second| first.name.cmp(&second.name));

    let mut items = Vec::with_capacity(entries.len() + 1);
    if !is_root(&dir) {
        items.push(ListItem::Parent);
    }
    items.extend(entries.into_iter().map(ListItem::Entry));

    items
}

/// Formats a byte count as `B`, `KB`, or `MB` with one decimal for the
/// larger units.
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        return format!("{bytes} B");
    }

    if bytes < MIB {
        return format!("{:.1} KB", bytes as f64 / KIB as f64);
    }

    format!("{:.1} MB", bytes as f64 / MIB as f64)
}

/// Builds the display label for one row of a listing of `dir`.
pub fn item_label(
    item: &ListItem,
    dir: &Path,
    attachments: &AttachmentSet,
    marker: SelectionMarker,
) -> String {
    match item {
        ListItem::Parent => format!("{DIRECTORY_ICON}{PARENT_NAME}"),
        ListItem::Error(_) => LIST_ERROR_LABEL.to_string(),
        ListItem::Entry(entry) if entry.is_dir => format!("{DIRECTORY_ICON}{}", entry.name),
        ListItem::Entry(entry) => {
            let label = format!("{FILE_ICON}{} ({})", entry.name, format_size(entry.size_bytes));
            if attachments.is_selected(&dir.join(&entry.name)) {
                return format!("{label} {}", marker.as_str());
            }

            label
        }
    }
}

/// Reads a whole file for the preview page.
///
/// Invalid UTF-8 is replaced lossily; read failures are returned as inline
/// error text instead of an error value.
pub fn read_preview(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "failed to read file for preview");

            format!("{READ_ERROR_PREFIX} {error}")
        }
    }
}

/// Resolves `.` and `..` components without touching the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if is_root(&cleaned) {
                    continue;
                }

                if cleaned.file_name().is_some() {
                    cleaned.pop();
                } else {
                    cleaned.push(PARENT_NAME);
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }

    if cleaned.as_os_str().is_empty() {
        return PathBuf::from(".");
    }

    cleaned
}

/// Returns whether `path` is a filesystem root such as `/`.
pub fn is_root(path: &Path) -> bool {
    path.has_root() && path.parent().is_none()
}
