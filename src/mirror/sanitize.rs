/// Characters that cannot appear in a destination path segment
const ILLEGAL_CHARS: &[char] = &['/', '\\', '?', '<', '>', ':', '*', '|', '"'];

/// Sanitizes a folder name into a destination path segment
///
/// Path-illegal characters are stripped, and a name consisting solely of
/// dots collapses to empty (so it cannot escape or shadow the hierarchy).
/// The same function is applied when creating directories and when building
/// sub-paths, so lookup and creation always agree on the literal path.
/// Idempotent: sanitizing twice equals sanitizing once.
///
/// # Arguments
///
/// * `name` - The raw folder name from the vendor
///
/// # Returns
///
/// The sanitized path segment; empty means "stay in the current directory"
pub fn sanitize_folder_name(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .collect();

    if stripped.chars().all(|c| c == '.') {
        String::new()
    } else {
        stripped
    }
}
