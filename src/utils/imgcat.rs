//! Inline terminal images using the iTerm2 image protocol

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Escape sequence that displays `image` inline.
pub fn inline_image_sequence(image: &[u8]) -> String {
    format!(
        "\x1b]1337;File=inline=1;size={}:{}\x07\n",
        image.len(),
        STANDARD.encode(image)
    )
}

/// Read an image file and write it inline to `out`.
pub fn cat_image<W: Write>(path: &Path, out: &mut W) -> Result<()> {
    let image = std::fs::read(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;

    out.write_all(inline_image_sequence(&image).as_bytes())
        .context("Failed to print image")?;
    out.flush().context("Failed to print image")?;
    Ok(())
}
