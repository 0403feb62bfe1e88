//! Test fixtures and constants.

use beadmap::services::{encode_png, RgbaImage};

/// Two-color palette used across tests
pub const RED_BLUE_JSON: &str =
    r#"[{"name":"Red","r":255,"g":0,"b":0},{"name":"Blue","r":0,"g":0,"b":255}]"#;

/// Single gray entry
pub const GRAY_JSON: &str = r#"[{"name":"Gray","r":128,"g":128,"b":128}]"#;

/// Published-spreadsheet HTML in the layout the spreadsheet source expects
pub const SHEET_HTML: &str = r#"<html><body><table>
<tr><td class="s2">Name</td><td class="s2">R</td><td class="s2">G</td><td class="s2">B</td></tr>
<tr><td class="s6">Red</td><td class="s8">255</td><td class="s8">0</td><td class="s8">0</td></tr>
<tr><td class="s6">Blue</td><td class="s8">0</td><td class="s8">0</td><td class="s8">255</td></tr>
<tr><td class="s6">Notes</td><td class="s8">n/a</td><td class="s8"></td><td class="s8"></td></tr>
</table></body></html>"#;

/// Encode RGBA pixels as a PNG
pub fn png(width: u32, height: u32, pixels: Vec<u8>) -> Vec<u8> {
    encode_png(&RgbaImage::new(width, height, pixels).unwrap()).unwrap()
}

/// 2x1 image: near-blue opaque, near-red half transparent
pub fn near_red_blue_png() -> Vec<u8> {
    png(2, 1, vec![10, 10, 250, 255, 240, 5, 5, 128])
}

/// Write `contents` to a file in a fresh temp dir
pub fn temp_file(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
