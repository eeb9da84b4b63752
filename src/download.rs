//! File download utilities used by the persistence sink.

use crate::error::Result;
use crate::net::fetch_bytes;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Downloads a single file from a URL to a local path.
///
/// Creates the parent directory if it does not exist. Returns the number of
/// bytes written.
///
/// # Examples
///
/// ```rust,no_run
/// use folio::download::download_file;
/// use std::path::Path;
///
/// # async fn example() -> folio::Result<()> {
/// let bytes = download_file(
///     "https://example.com/cover.jpg",
///     Path::new("./cover.jpg"),
/// ).await?;
/// println!("Downloaded {} bytes", bytes);
/// # Ok(())
/// # }
/// ```
pub async fn download_file(url: &str, output_path: &Path) -> Result<u64> {
    let bytes = fetch_bytes(url).await?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(output_path).await?;
    file.write_all(&bytes).await?;

    Ok(bytes.len() as u64)
}

/// Sanitizes a path segment by replacing characters that are invalid in
/// filenames on common filesystems.
///
/// # Examples
///
/// ```rust
/// use folio::download::sanitize_filename;
///
/// assert_eq!(sanitize_filename("who/what?"), "who_what_");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    let mut sanitized = name.to_string();

    for &ch in &invalid_chars {
        sanitized = sanitized.replace(ch, "_");
    }

    sanitized = sanitized.trim().to_string();
    if sanitized.len() > 200 {
        // Cut must land on a char boundary or truncate panics.
        let mut cut = 200;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
    }

    if sanitized.is_empty() {
        sanitized = "untitled".to_string();
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("normal_query"), "normal_query");
        assert_eq!(sanitize_filename("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_filename(""), "untitled");

        let long_name = "a".repeat(250);
        assert!(sanitize_filename(&long_name).len() <= 200);
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let name = "€".repeat(100);
        let sanitized = sanitize_filename(&name);
        assert!(sanitized.len() <= 200);
        assert!(sanitized.chars().all(|c| c == '€'));

        let name = format!("{}é", "a".repeat(199));
        let sanitized = sanitize_filename(&name);
        assert_eq!(sanitized, "a".repeat(199));
    }
}
