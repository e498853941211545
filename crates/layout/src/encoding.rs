//! Byte encodings for shown text.
//!
//! Text is shown through the Identity-H CMap: every glyph is a two-byte
//! big-endian glyph id. A ToUnicode CMap maps the ids back to characters so
//! viewers can copy and search the text.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

/// `bfchar` blocks may hold at most 100 entries.
const BFCHAR_BLOCK: usize = 100;

pub fn encode_glyph_ids(gids: &[u16]) -> Vec<u8> {
    gids.iter().flat_map(|gid| gid.to_be_bytes()).collect()
}

pub fn decode_glyph_ids(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}

/// Builds a ToUnicode CMap for the glyphs in `used`.
pub fn to_unicode_cmap(used: &BTreeMap<u16, char>) -> Vec<u8> {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );
    let entries: Vec<(&u16, &char)> = used.iter().collect();
    for block in entries.chunks(BFCHAR_BLOCK) {
        let _ = writeln!(cmap, "{} beginbfchar", block.len());
        for (gid, c) in block {
            let mut units = [0u16; 2];
            let hex: String = c
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            let _ = writeln!(cmap, "<{gid:04X}> <{hex}>");
        }
        cmap.push_str("endbfchar\n");
    }
    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    cmap.into_bytes()
}

/// Reads the `bfchar` entries of a ToUnicode CMap. Ranges are not read.
pub fn parse_to_unicode_cmap(data: &[u8]) -> HashMap<u16, String> {
    let text = String::from_utf8_lossy(data);
    let mut map = HashMap::new();
    let mut in_block = false;
    for line in text.lines().map(str::trim) {
        if line.ends_with("beginbfchar") {
            in_block = true;
            continue;
        }
        if line == "endbfchar" {
            in_block = false;
            continue;
        }
        if !in_block {
            continue;
        }
        let mut fields = line
            .split(['<', '>'])
            .map(str::trim)
            .filter(|field| !field.is_empty());
        let (Some(code), Some(target)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Ok(gid) = u16::from_str_radix(code, 16) else {
            continue;
        };
        let units: Vec<u16> = (0..target.len() / 4)
            .filter_map(|i| u16::from_str_radix(&target[i * 4..i * 4 + 4], 16).ok())
            .collect();
        map.insert(gid, String::from_utf16_lossy(&units));
    }
    map
}

/// Encodes a PDF text string: ASCII stays as is, anything else becomes
/// UTF-16BE with a byte order mark.
pub fn encode_text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(|unit| unit.to_be_bytes()));
    bytes
}

pub fn decode_text_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => String::from_utf16_lossy(&decode_glyph_ids(rest)),
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_ids_are_two_bytes_big_endian() {
        assert_eq!(encode_glyph_ids(&[0x0024, 0x1A2B]), vec![0x00, 0x24, 0x1A, 0x2B]);
        assert_eq!(decode_glyph_ids(&[0x00, 0x24, 0x1A, 0x2B]), vec![0x0024, 0x1A2B]);
    }

    #[test]
    fn cmap_maps_glyphs_back_to_characters() {
        let used = BTreeMap::from([(36u16, 'A'), (1_000, '→'), (2_000, '😀')]);
        let parsed = parse_to_unicode_cmap(&to_unicode_cmap(&used));
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[&36], "A");
        assert_eq!(parsed[&1_000], "→");
        assert_eq!(parsed[&2_000], "😀");
    }

    #[test]
    fn cmap_splits_large_sets_into_blocks() {
        let used: BTreeMap<u16, char> = (0..250u16).map(|gid| (gid + 1, 'x')).collect();
        let cmap = String::from_utf8(to_unicode_cmap(&used)).unwrap();
        assert_eq!(cmap.matches("beginbfchar").count(), 3);
        assert!(cmap.contains("50 beginbfchar"));
        assert_eq!(parse_to_unicode_cmap(cmap.as_bytes()).len(), 250);
    }

    #[test]
    fn text_strings_use_utf16_only_when_needed() {
        assert_eq!(encode_text_string("Top banks"), b"Top banks".to_vec());
        let encoded = encode_text_string("Score – high");
        assert_eq!(&encoded[..2], &[0xFE, 0xFF]);
        assert_eq!(decode_text_string(&encoded), "Score – high");
    }
}
