//! HTML to plain text.
//!
//! Links, images and emphasis are removed from the markup before rendering,
//! so the output carries only the page's prose: link text stays, link targets
//! and footnote references do not.

use std::sync::LazyLock;

use regex::Regex;

use crate::CaptureError;

/// Wrap width for rendered text.
pub const DEFAULT_WIDTH: usize = 78;

static IMAGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("image pattern is valid"));

static INLINE_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:a|em|strong|i|b)\b[^>]*>").expect("inline markup pattern is valid")
});

/// Render `html` as plain text wrapped at `width` columns.
pub fn html_to_text(html: &str, width: usize) -> Result<String, CaptureError> {
    let without_images = IMAGES.replace_all(html, "");
    let bare = INLINE_MARKUP.replace_all(&without_images, "");
    let text = html2text::from_read(bare.as_bytes(), width)?;
    Ok(text)
}
