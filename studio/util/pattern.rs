//! Conversions between the browser's pattern encoding and the bipolar
//! vectors the Hopfield engine works with.

/// Parses the compact pattern string posted by the grid form: one character
/// per cell, `1` for a painted (+1) cell, anything else for -1. Length must
/// be `units`.
pub fn parse_pattern(s: &str, units: usize) -> Option<Vec<i8>> {
    let cells: Vec<i8> = s
        .chars()
        .map(|c| if c == '1' { 1 } else { -1 })
        .collect();
    (cells.len() == units).then_some(cells)
}

/// Renders a bipolar vector back into the form encoding.
pub fn encode_pattern(cells: &[i8]) -> String {
    cells.iter().map(|&c| if c == 1 { '1' } else { '0' }).collect()
}

/// Decodes uploaded image bytes (PNG/JPEG/BMP/GIF), resizes to `grid`×`grid`
/// grayscale, and thresholds at mid-brightness: dark pixels become painted
/// (+1) cells.
pub fn image_to_pattern(bytes: &[u8], grid: usize) -> Result<Vec<i8>, String> {
    let img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let side = grid as u32;
    let resized = img.resize_exact(side, side, image::imageops::FilterType::Lanczos3);
    let gray = resized.to_luma8();
    Ok(gray
        .pixels()
        .map(|p| if p.0[0] < 128 { 1 } else { -1 })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_string_round_trips() {
        let cells = parse_pattern("1001", 4).unwrap();
        assert_eq!(cells, vec![1, -1, -1, 1]);
        assert_eq!(encode_pattern(&cells), "1001");
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(parse_pattern("101", 4).is_none());
    }
}
