use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use orcas_layout::{EmbeddedFont, LayoutElement, PageSet};
use std::io::Cursor;
use std::sync::{Arc, OnceLock};

pub fn bundled_font() -> Arc<EmbeddedFont> {
    static FONT: OnceLock<Arc<EmbeddedFont>> = OnceLock::new();
    FONT.get_or_init(|| {
        let bytes = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/DejaVuSans.ttf"));
        Arc::new(EmbeddedFont::parse(Arc::new(bytes.to_vec())).expect("bundled font parses"))
    })
    .clone()
}

pub fn page_texts(pages: &PageSet, page: usize) -> Vec<String> {
    pages.pages()[page]
        .iter()
        .filter_map(|el| match &el.element {
            LayoutElement::Text(t) => Some(t.content.clone()),
            _ => None,
        })
        .collect()
}

/// A solid-color PNG of the given size as a `data:` URI.
pub fn png_data_uri(width: u32, height: u32) -> String {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb([30, 120, 200]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("png encodes");
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}
