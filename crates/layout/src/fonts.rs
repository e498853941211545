//! Metrics for the single embedded text font.
//!
//! The font is written as a composite font addressed by glyph id, so any
//! character the font covers can be shown and measured. The character map
//! and every glyph advance are extracted once at parse time; measuring text
//! afterwards never touches the font program again.

use crate::LayoutError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Glyph-space units per em used by PDF width arrays and font descriptors.
const PDF_UNITS: f32 = 1000.0;

/// The `.notdef` glyph shown for characters the font lacks.
pub const NOTDEF_GLYPH: u16 = 0;

#[derive(Clone, PartialEq)]
pub struct FontMetrics {
    pub postscript_name: String,
    /// Ascent, descent and cap height in 1/1000 em.
    pub ascent: i32,
    pub descent: i32,
    pub cap_height: i32,
    /// `[x_min, y_min, x_max, y_max]` in 1/1000 em.
    pub bbox: [i32; 4],
    pub italic: bool,
    pub monospaced: bool,
    /// Advance of every glyph in 1/1000 em, indexed by glyph id.
    advances: Vec<u16>,
    glyphs: HashMap<char, u16>,
}

impl FontMetrics {
    pub fn parse(data: &[u8]) -> Result<Self, LayoutError> {
        let face = ttf_parser::Face::parse(data, 0)
            .map_err(|e| LayoutError::Font(e.to_string()))?;

        let upem = face.units_per_em().max(1) as f32;
        let scale = |v: i16| (v as f32 * PDF_UNITS / upem).round() as i32;

        let advances = (0..face.number_of_glyphs())
            .map(|gid| {
                let advance = face.glyph_hor_advance(ttf_parser::GlyphId(gid)).unwrap_or(0);
                (advance as f32 * PDF_UNITS / upem).round() as u16
            })
            .collect();

        let mut glyphs = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
                subtable.codepoints(|cp| {
                    let Some(c) = char::from_u32(cp) else { return };
                    if let Some(gid) = subtable.glyph_index(cp) {
                        glyphs.entry(c).or_insert(gid.0);
                    }
                });
            }
        }
        if glyphs.is_empty() {
            return Err(LayoutError::Font("font has no Unicode character map".to_string()));
        }

        let bbox = face.global_bounding_box();
        let cap_height = face
            .capital_height()
            .map(scale)
            .unwrap_or_else(|| scale(face.ascender()));

        let metrics = Self {
            postscript_name: postscript_name(&face),
            ascent: scale(face.ascender()),
            descent: scale(face.descender()),
            cap_height,
            bbox: [
                scale(bbox.x_min),
                scale(bbox.y_min),
                scale(bbox.x_max),
                scale(bbox.y_max),
            ],
            italic: face.is_italic(),
            monospaced: face.is_monospaced(),
            advances,
            glyphs,
        };
        log::debug!(
            "Parsed font '{}' ({} glyphs, {} mapped characters)",
            metrics.postscript_name,
            metrics.advances.len(),
            metrics.glyphs.len()
        );
        Ok(metrics)
    }

    /// Glyph id for `c`, or [`NOTDEF_GLYPH`] when the font lacks it.
    pub fn glyph_id(&self, c: char) -> u16 {
        self.glyphs.get(&c).copied().unwrap_or(NOTDEF_GLYPH)
    }

    /// Advance width of a glyph in 1/1000 em.
    pub fn glyph_width(&self, gid: u16) -> u16 {
        self.advances.get(gid as usize).copied().unwrap_or(0)
    }

    pub fn glyph_count(&self) -> usize {
        self.advances.len()
    }

    /// Rendered width of `text` in points, measured glyph by glyph exactly as
    /// it will be shown.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| self.glyph_width(self.glyph_id(c)) as u32)
            .sum();
        units as f32 * font_size / PDF_UNITS
    }

    /// Distance from the top of a line box to the baseline.
    pub fn baseline_offset(&self, font_size: f32) -> f32 {
        self.ascent as f32 * font_size / PDF_UNITS
    }
}

impl fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontMetrics")
            .field("postscript_name", &self.postscript_name)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .field("glyphs", &self.advances.len())
            .finish_non_exhaustive()
    }
}

fn postscript_name(face: &ttf_parser::Face<'_>) -> String {
    let raw = face
        .names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
        .find_map(|name| name.to_string())
        .unwrap_or_default();
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if cleaned.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        cleaned
    }
}

/// The font program bytes together with the metrics derived from them.
#[derive(Debug, Clone)]
pub struct EmbeddedFont {
    pub data: Arc<Vec<u8>>,
    pub metrics: FontMetrics,
}

impl EmbeddedFont {
    pub fn parse(data: Arc<Vec<u8>>) -> Result<Self, LayoutError> {
        let metrics = FontMetrics::parse(&data)?;
        Ok(Self { data, metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::bundled_font;

    #[test]
    fn parses_bundled_font() {
        let font = bundled_font();
        assert_eq!(font.metrics.postscript_name, "DejaVuSans");
        assert!(font.metrics.ascent > 0);
        assert!(font.metrics.descent < 0);
        assert!(font.metrics.glyph_count() > 1000);
    }

    #[test]
    fn maps_characters_beyond_latin1() {
        let metrics = &bundled_font().metrics;
        for c in ['A', '–', '→', '•', 'Ж'] {
            let gid = metrics.glyph_id(c);
            assert_ne!(gid, NOTDEF_GLYPH, "{c}");
            assert!(metrics.glyph_width(gid) > 0, "{c}");
        }
        assert_eq!(metrics.glyph_id('\u{E000}'), NOTDEF_GLYPH);
    }

    #[test]
    fn text_width_scales_with_size_and_length() {
        let metrics = &bundled_font().metrics;
        let one = metrics.text_width("W", 10.0);
        assert!(one > 0.0);
        assert!((metrics.text_width("WW", 10.0) - 2.0 * one).abs() < 0.001);
        assert!((metrics.text_width("W", 20.0) - 2.0 * one).abs() < 0.001);
        assert_eq!(metrics.text_width("", 10.0), 0.0);
        assert!(metrics.text_width("→", 10.0) > 0.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            FontMetrics::parse(b"definitely not a font"),
            Err(LayoutError::Font(_))
        ));
    }
}
