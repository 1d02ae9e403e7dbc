//! Entry-file discovery for package code retrieval

use crate::api::PackageFile;

/// Entry file candidates, highest priority first
pub const ENTRY_FILE_CANDIDATES: [&str; 4] = ["index.tsx", "index.ts", "src/index.tsx", "src/index.ts"];

/// Pick the entry file from a package listing.
///
/// Priority follows `ENTRY_FILE_CANDIDATES`, independent of listing order.
pub fn select_entry_file(files: &[PackageFile]) -> Option<&PackageFile> {
    ENTRY_FILE_CANDIDATES
        .iter()
        .find_map(|candidate| files.iter().find(|file| file.file_path == *candidate))
}
