//! Persistence sink: delimited table file and cover images on disk.
//!
//! One query's dataset lands under `<raw_data_root>/<slug>/`:
//!
//! ```text
//! raw_data/
//!   jose_saramago/
//!     jose_saramago.csv
//!     images/
//!       9780099573586.jpg
//!       ...
//! ```
//!
//! Image filenames are derived from the cover URL, which encodes the catalog
//! id in a fixed-width suffix (positions [-17:-4], i.e. the 13 characters
//! before the `.jpg` extension).

use crate::download::{download_file, sanitize_filename};
use crate::error::Result;
use crate::types::{Dataset, COLUMNS};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// Characters before the end of an image URL where the id slice starts.
const IMAGE_ID_START: usize = 17;

/// Characters before the end of an image URL where the id slice ends
/// (the `.jpg` extension).
const IMAGE_ID_END: usize = 4;

/// Writes the dataset's table to `<root>/<slug>/<slug>.csv`.
///
/// Every field is coerced to text (absent values become `"None"`); fields
/// containing the separator, quotes, or line breaks are quoted with
/// double-quote escaping. Returns the directory the table was written into.
pub async fn write_table(dataset: &Dataset, root: &Path) -> Result<PathBuf> {
    let slug = sanitize_filename(&dataset.query);
    let dir = root.join(&slug);
    fs::create_dir_all(&dir).await?;

    let mut out = String::new();
    push_row(&mut out, &COLUMNS.map(String::from));
    for record in dataset.iter() {
        push_row(&mut out, &record.to_row());
    }

    let path = dir.join(format!("{}.csv", slug));
    fs::write(&path, out).await?;
    info!(path = %path.display(), rows = dataset.len(), "table written");
    Ok(dir)
}

/// Downloads every record's cover image into `<root>/<slug>/images/`.
///
/// Records without an image link are skipped, as are image URLs that do not
/// carry a well-formed 13-digit id suffix. Returns the number of images
/// written.
pub async fn save_cover_images(dataset: &Dataset, root: &Path) -> Result<usize> {
    let slug = sanitize_filename(&dataset.query);
    let images_dir = root.join(&slug).join("images");
    fs::create_dir_all(&images_dir).await?;

    let mut saved = 0;
    for record in dataset.iter() {
        let Some(url) = record.image_link.as_deref() else {
            continue;
        };
        let Some(id) = image_id_from_url(url) else {
            warn!(%url, "image URL does not carry an id suffix; skipped");
            continue;
        };
        download_file(url, &images_dir.join(format!("{}.jpg", id))).await?;
        saved += 1;
    }

    info!(count = saved, "cover images saved");
    Ok(saved)
}

/// Slices the catalog id out of a cover-image URL.
///
/// The convention is a fixed-width suffix: the 13 characters at positions
/// [-17:-4] of the URL, immediately before the 4-character extension. URLs
/// that are too short or whose slice is not 13 digits yield `None`.
///
/// # Examples
///
/// ```rust
/// use folio::persist::image_id_from_url;
///
/// let url = "https://cdn.example.com/images/9780099573586.jpg";
/// assert_eq!(image_id_from_url(url), Some("9780099573586".to_string()));
/// assert_eq!(image_id_from_url("https://cdn.example.com/x.jpg"), None);
/// ```
pub fn image_id_from_url(url: &str) -> Option<String> {
    let start = url.len().checked_sub(IMAGE_ID_START)?;
    let end = url.len() - IMAGE_ID_END;
    let slice = url.get(start..end)?;

    if slice.len() == 13 && slice.bytes().all(|b| b.is_ascii_digit()) {
        Some(slice.to_string())
    } else {
        None
    }
}

fn push_row(out: &mut String, row: &[String]) {
    let mut first = true;
    for cell in row {
        if !first {
            out.push(',');
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}
