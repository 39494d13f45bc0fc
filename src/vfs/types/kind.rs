/*!
 * Entry Kind
 * Folder marker or file-type tag derived from the file extension
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag surfaced on every entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    Text,
    Code,
    Document,
    Spreadsheet,
    Presentation,
    Pdf,
    Image,
    Audio,
    Video,
    Archive,
    /// Anything the classifier does not recognise
    #[default]
    File,
}

impl EntryKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            EntryKind::Folder => "folder",
            EntryKind::Text => "text",
            EntryKind::Code => "code",
            EntryKind::Document => "document",
            EntryKind::Spreadsheet => "spreadsheet",
            EntryKind::Presentation => "presentation",
            EntryKind::Pdf => "pdf",
            EntryKind::Image => "image",
            EntryKind::Audio => "audio",
            EntryKind::Video => "video",
            EntryKind::Archive => "archive",
            EntryKind::File => "file",
        }
    }

    #[inline]
    pub const fn is_folder(self) -> bool {
        matches!(self, EntryKind::Folder)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a file name by its last extension, case-insensitively
///
/// Never fails: unknown or missing extensions yield `EntryKind::File`.
pub fn classify(name: &str) -> EntryKind {
    let ext = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return EntryKind::File,
    };

    match ext.as_str() {
        "txt" | "md" | "log" | "csv" | "tsv" | "ini" | "cfg" | "conf" | "rtf" => EntryKind::Text,
        "rs" | "c" | "h" | "cpp" | "hpp" | "go" | "py" | "rb" | "js" | "mjs" | "ts" | "tsx"
        | "jsx" | "java" | "kt" | "swift" | "php" | "sh" | "css" | "scss" | "less" | "html"
        | "htm" | "xml" | "json" | "yaml" | "yml" | "toml" | "sql" => EntryKind::Code,
        "doc" | "docx" | "odt" => EntryKind::Document,
        "xls" | "xlsx" | "ods" => EntryKind::Spreadsheet,
        "ppt" | "pptx" | "odp" => EntryKind::Presentation,
        "pdf" => EntryKind::Pdf,
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" | "tif" | "tiff" | "ico" => {
            EntryKind::Image
        }
        "mp3" | "wav" | "ogg" | "flac" | "aac" | "m4a" => EntryKind::Audio,
        "mp4" | "avi" | "mkv" | "mov" | "webm" | "wmv" | "mpeg" | "mpg" => EntryKind::Video,
        "zip" | "tar" | "gz" | "tgz" | "bz2" | "xz" | "7z" | "rar" | "zst" => EntryKind::Archive,
        _ => EntryKind::File,
    }
}
