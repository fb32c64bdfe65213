//! Local file naming for downloaded item images.
//!
//! Image names are built from server-supplied item names and ids, so they are
//! sanitized before touching the filesystem:
//! - path components and control characters are stripped,
//! - the resolved path must stay inside the download directory,
//! - an existing file gets a numeric suffix instead of being overwritten.

use std::path::{Path, PathBuf};

const MAX_NAME_LEN: usize = 255;

/// Reduce an arbitrary string to a single safe file name component.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = last
        .chars()
        .filter(|c| {
            !c.is_control()
                && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
        })
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.');

    if cleaned.is_empty() {
        return None;
    }

    let mut end = cleaned.len().min(MAX_NAME_LEN);
    while !cleaned.is_char_boundary(end) {
        end -= 1;
    }
    Some(cleaned[..end].to_string())
}

/// File extension for an image content type.
pub fn extension_for(content_type: Option<&str>) -> &'static str {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());
    match essence.as_deref() {
        Some("image/png") => "png",
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        Some("image/bmp") => "bmp",
        Some("image/svg+xml") => "svg",
        _ => "bin",
    }
}

/// Name for the `index`-th image of an item, e.g. `Desk_Lamp_1.png`.
pub fn image_file_name(item_name: &str, index: usize, content_type: Option<&str>) -> String {
    let stem: String = item_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let stem = if stem.is_empty() { "item".to_string() } else { stem };
    format!("{}_{}.{}", stem, index + 1, extension_for(content_type))
}

/// Resolve where `filename` should be written inside `download_dir`.
///
/// Returns `None` if the name sanitizes to nothing, escapes the directory, or
/// no free suffixed name is found.
pub fn safe_download_path(download_dir: &Path, filename: &str) -> Option<PathBuf> {
    let sanitized = sanitize_filename(filename)?;

    let canonical_dir = download_dir
        .canonicalize()
        .unwrap_or_else(|_| download_dir.to_path_buf());
    if !canonical_dir.join(&sanitized).starts_with(&canonical_dir) {
        return None;
    }

    let path = download_dir.join(&sanitized);
    if !path.exists() {
        return Some(path);
    }

    let stem = Path::new(&sanitized)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let ext = Path::new(&sanitized)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    (1..1000)
        .map(|i| {
            if ext.is_empty() {
                download_dir.join(format!("{}-{}", stem, i))
            } else {
                download_dir.join(format!("{}-{}.{}", stem, i, ext))
            }
        })
        .find(|candidate| !candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("lamp.png"), Some("lamp.png".into()));
        assert_eq!(sanitize_filename("../../etc/passwd"), Some("passwd".into()));
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), Some("boot.ini".into()));
        assert_eq!(sanitize_filename(".hidden"), Some("hidden".into()));
        assert_eq!(sanitize_filename("what?.png"), Some("what.png".into()));
        assert_eq!(sanitize_filename("..."), None);
        assert_eq!(sanitize_filename(""), None);
    }

    #[test]
    fn test_image_file_name() {
        assert_eq!(image_file_name("Desk  Lamp", 0, Some("image/png")), "Desk_Lamp_1.png");
        assert_eq!(image_file_name("", 2, Some("image/jpeg; charset=binary")), "item_3.jpg");
        assert_eq!(image_file_name("x", 0, None), "x_1.bin");
    }

    #[test]
    fn test_safe_download_path_adds_suffix_on_collision() {
        let dir = tempfile::tempdir().unwrap();
        let first = safe_download_path(dir.path(), "lamp.png").unwrap();
        assert_eq!(first, dir.path().join("lamp.png"));

        std::fs::write(&first, b"x").unwrap();
        let second = safe_download_path(dir.path(), "lamp.png").unwrap();
        assert_eq!(second, dir.path().join("lamp-1.png"));
    }

    #[test]
    fn test_safe_download_path_strips_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let path = safe_download_path(dir.path(), "../../escape.png").unwrap();
        assert_eq!(path, dir.path().join("escape.png"));
    }
}
