use crate::fonts::EmbeddedFont;
use crate::{LayoutElement, PageSet};
use std::sync::{Arc, OnceLock};

static FONT_BYTES: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../assets/fonts/DejaVuSans.ttf"
));

/// The bundled text font, parsed once per test binary.
pub fn bundled_font() -> &'static EmbeddedFont {
    static FONT: OnceLock<EmbeddedFont> = OnceLock::new();
    FONT.get_or_init(|| {
        EmbeddedFont::parse(Arc::new(FONT_BYTES.to_vec())).expect("bundled font parses")
    })
}

/// Text content of every text element on `page`, in push order.
pub fn page_texts(pages: &PageSet, page: usize) -> Vec<String> {
    pages.pages()[page]
        .iter()
        .filter_map(|el| match &el.element {
            LayoutElement::Text(t) => Some(t.content.clone()),
            _ => None,
        })
        .collect()
}
