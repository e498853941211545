//! Embedding of the text font as a composite (Type0) font.
//!
//! Content streams address glyphs directly through Identity-H, so the font
//! is written only after every page is drawn: the width array and the
//! ToUnicode map cover exactly the glyphs that were shown.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use orcas_layout::encoding::{encode_glyph_ids, to_unicode_cmap};
use orcas_layout::fonts::NOTDEF_GLYPH;
use orcas_layout::{EmbeddedFont, FontMetrics};
use std::collections::BTreeMap;

const FLAG_FIXED_PITCH: i64 = 1;
const FLAG_SYMBOLIC: i64 = 4;
const FLAG_ITALIC: i64 = 64;

/// Glyphs shown so far, with the character each one stands for.
#[derive(Debug, Default)]
pub(crate) struct GlyphUsage {
    used: BTreeMap<u16, char>,
}

impl GlyphUsage {
    /// Encodes `text` as Identity-H glyph ids and records the glyphs.
    pub(crate) fn encode(&mut self, metrics: &FontMetrics, text: &str) -> Vec<u8> {
        let gids: Vec<u16> = text
            .chars()
            .map(|c| {
                let gid = metrics.glyph_id(c);
                if gid != NOTDEF_GLYPH {
                    self.used.entry(gid).or_insert(c);
                }
                gid
            })
            .collect();
        encode_glyph_ids(&gids)
    }

    pub(crate) fn len(&self) -> usize {
        self.used.len()
    }
}

/// Writes the font program, descriptor, descendant CID font, ToUnicode map
/// and Type0 font; returns the Type0 font's id.
pub(crate) fn embed_font(doc: &mut Document, font: &EmbeddedFont, usage: &GlyphUsage) -> ObjectId {
    let metrics = &font.metrics;

    let program = Stream::new(
        dictionary! { "Length1" => font.data.len() as i64 },
        font.data.as_ref().clone(),
    );
    let program_id = doc.add_object(program);

    let mut flags = FLAG_SYMBOLIC;
    if metrics.monospaced {
        flags |= FLAG_FIXED_PITCH;
    }
    if metrics.italic {
        flags |= FLAG_ITALIC;
    }

    let base_font = Object::Name(metrics.postscript_name.clone().into_bytes());
    let descriptor = dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => base_font.clone(),
        "Flags" => flags,
        "FontBBox" => metrics.bbox.iter().map(|v| Object::Integer(*v as i64)).collect::<Vec<_>>(),
        "ItalicAngle" => if metrics.italic { -12 } else { 0 },
        "Ascent" => metrics.ascent as i64,
        "Descent" => metrics.descent as i64,
        "CapHeight" => metrics.cap_height as i64,
        "StemV" => 80,
        "FontFile2" => program_id,
    };
    let descriptor_id = doc.add_object(descriptor);

    let cid_font = dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => base_font.clone(),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => metrics.glyph_width(NOTDEF_GLYPH) as i64,
        "W" => width_array(metrics, usage),
        "CIDToGIDMap" => "Identity",
    };
    let cid_font_id = doc.add_object(cid_font);

    let to_unicode_id = doc.add_object(Stream::new(Dictionary::new(), to_unicode_cmap(&usage.used)));

    let type0 = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => base_font,
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    };
    log::debug!(
        "Embedded font '{}' ({} bytes, {} glyphs shown)",
        metrics.postscript_name,
        font.data.len(),
        usage.len()
    );
    doc.add_object(type0)
}

/// `/W` entries of the form `gid [width]` for every shown glyph.
fn width_array(metrics: &FontMetrics, usage: &GlyphUsage) -> Vec<Object> {
    usage
        .used
        .keys()
        .flat_map(|&gid| {
            [
                Object::Integer(gid as i64),
                Object::Array(vec![Object::Integer(metrics.glyph_width(gid) as i64)]),
            ]
        })
        .collect()
}
