//! Integration tests for the cubelut crates.
//!
//! These tests run the path the CLI takes: `.cube` text on disk, an image
//! file on disk, the color pipeline between them, and an encoded result.

use std::path::Path;

/// Writes a size-2 LUT that inverts every channel.
pub fn write_invert_cube(path: &Path) -> std::io::Result<()> {
    let mut text = String::from("TITLE \"Invert\"\nLUT_3D_SIZE 2\n");
    for k in 0..8 {
        let (r, g, b) = (k % 2, (k / 2) % 2, k / 4);
        text.push_str(&format!("{} {} {}\n", 1 - r, 1 - g, 1 - b));
    }
    std::fs::write(path, text)
}
