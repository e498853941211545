use crate::RenderError;
use crate::font::{GlyphUsage, embed_font};
use crate::helpers::{FONT_RESOURCE, PageContext, image_resource_name};
use crate::image::embed_image;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use orcas_layout::encoding::encode_text_string;
use orcas_layout::{EmbeddedFont, PageSet};

/// Entries for the document information dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    /// PDF date string, e.g. `D:20240131120000Z`.
    pub creation_date: Option<String>,
}

/// An in-memory PDF serializer. It builds the document's object graph from a
/// finished [`PageSet`] and writes it out in one go.
pub struct LopdfRenderer<'a> {
    font: &'a EmbeddedFont,
}

impl<'a> LopdfRenderer<'a> {
    pub fn new(font: &'a EmbeddedFont) -> Self {
        Self { font }
    }

    pub fn render(&self, pages: &PageSet, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
        let geometry = pages.geometry();
        let (page_width, page_height) = (geometry.page_size.width, geometry.page_size.height);

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        // Filled in once every page is drawn and the shown glyphs are known.
        let resources_id = doc.new_object_id();

        let mut glyphs = GlyphUsage::default();
        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.page_count());
        for elements in pages.pages() {
            let mut page_ctx = PageContext::new(page_height, &self.font.metrics, &mut glyphs, pages.images().len());
            for element in elements {
                page_ctx.draw_element(element)?;
            }
            let content = page_ctx.finish();
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

            let page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            page_ids.push(doc.add_object(page_dict));
        }

        let font_id = embed_font(&mut doc, self.font, &glyphs);
        let mut xobjects = Dictionary::new();
        for (index, image) in pages.images().iter().enumerate() {
            let image_id = embed_image(&mut doc, index, image)?;
            xobjects.set(image_resource_name(index), image_id);
        }
        let mut resources = dictionary! {
            "Font" => dictionary! { FONT_RESOURCE => font_id },
        };
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        doc.objects.insert(resources_id, Object::Dictionary(resources));

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);

        let mut info_dict = dictionary! {
            "Title" => text_string(&info.title),
            "Producer" => text_string(&info.producer),
        };
        if let Some(date) = &info.creation_date {
            info_dict.set("CreationDate", Object::String(date.clone().into_bytes(), StringFormat::Literal));
        }
        let info_id = doc.add_object(info_dict);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        log::debug!("Serialized {} page(s) into {} bytes", page_ids.len(), buffer.len());
        Ok(buffer)
    }
}

fn text_string(text: &str) -> Object {
    let bytes = encode_text_string(text);
    let format = if text.is_ascii() {
        StringFormat::Literal
    } else {
        StringFormat::Hexadecimal
    };
    Object::String(bytes, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Content;
    use orcas_layout::encoding::{decode_glyph_ids, decode_text_string, parse_to_unicode_cmap};
    use orcas_layout::{PositionedElement, RasterImage, RectElement, TextElement};
    use orcas_types::{Color, PageGeometry, Rect};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn font() -> EmbeddedFont {
        let data = include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../assets/fonts/DejaVuSans.ttf"
        ));
        EmbeddedFont::parse(Arc::new(data.to_vec())).unwrap()
    }

    fn font_dict<'a>(doc: &'a Document, subtype: &[u8]) -> &'a Dictionary {
        doc.objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .find(|dict| dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(subtype))
            .expect("font dictionary")
    }

    fn to_unicode(doc: &Document) -> HashMap<u16, String> {
        let id = font_dict(doc, b"Type0").get(b"ToUnicode").unwrap().as_reference().unwrap();
        let stream = doc.get_object(id).unwrap().as_stream().unwrap();
        parse_to_unicode_cmap(&stream.content)
    }

    fn shown_text(doc: &Document, page_id: ObjectId) -> Vec<String> {
        let cmap = to_unicode(doc);
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first()?.as_str().ok())
            .map(|bytes| {
                decode_glyph_ids(bytes)
                    .iter()
                    .map(|gid| cmap.get(gid).map(String::as_str).unwrap_or("\u{FFFD}"))
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn renders_one_page_per_layout_page() {
        let font = font();
        let mut pages = PageSet::new(PageGeometry::default());
        pages
            .push(0, PositionedElement::text(40.0, 108.0, 100.0, TextElement::new("Ticker", 9.0)))
            .unwrap();
        let next = pages.break_page(pages.start_cursor());
        pages
            .push(
                next.page_index,
                PositionedElement::text(40.0, 108.0, 100.0, TextElement::new("Score – high", 9.0).bold()),
            )
            .unwrap();

        let bytes = LopdfRenderer::new(&font)
            .render(&pages, &DocumentInfo::default())
            .unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

        assert_eq!(page_ids.len(), 2);
        assert_eq!(shown_text(&doc, page_ids[0]), vec!["Ticker"]);
        assert_eq!(shown_text(&doc, page_ids[1]), vec!["Score – high"]);
    }

    #[test]
    fn text_outside_latin1_survives_extraction() {
        let font = font();
        let mut pages = PageSet::new(PageGeometry::default());
        pages
            .push(0, PositionedElement::text(40.0, 108.0, 200.0, TextElement::new("up → down • Ж", 9.0)))
            .unwrap();

        let bytes = LopdfRenderer::new(&font)
            .render(&pages, &DocumentInfo::default())
            .unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        assert_eq!(shown_text(&doc, page_id), vec!["up → down • Ж"]);
    }

    #[test]
    fn embeds_composite_font_with_widths_for_shown_glyphs() {
        let font = font();
        let mut pages = PageSet::new(PageGeometry::default());
        pages
            .push(0, PositionedElement::text(40.0, 108.0, 100.0, TextElement::new("abba", 9.0)))
            .unwrap();
        let bytes = LopdfRenderer::new(&font)
            .render(&pages, &DocumentInfo::default())
            .unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        let type0 = font_dict(&doc, b"Type0");
        assert_eq!(type0.get(b"Encoding").unwrap().as_name().unwrap(), b"Identity-H");
        let cid_font = font_dict(&doc, b"CIDFontType2");
        assert_eq!(cid_font.get(b"CIDToGIDMap").unwrap().as_name().unwrap(), b"Identity");

        // Two glyphs shown: `gid [w]` pairs.
        let widths = cid_font.get(b"W").unwrap().as_array().unwrap();
        assert_eq!(widths.len(), 4);
        let a = font.metrics.glyph_id('a');
        assert_eq!(widths[0].as_i64().unwrap(), a as i64);
        assert_eq!(
            widths[1].as_array().unwrap()[0].as_i64().unwrap(),
            font.metrics.glyph_width(a) as i64
        );
        assert_eq!(to_unicode(&doc).len(), 2);
    }

    #[test]
    fn info_title_keeps_unicode() {
        let font = font();
        let info = DocumentInfo {
            title: "Bank comparison – Q1".to_string(),
            producer: "ORCAS".to_string(),
            creation_date: None,
        };
        let bytes = LopdfRenderer::new(&font)
            .render(&PageSet::new(PageGeometry::default()), &info)
            .unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info_dict = doc.get_dictionary(info_id).unwrap();
        assert_eq!(
            decode_text_string(info_dict.get(b"Title").unwrap().as_str().unwrap()),
            "Bank comparison – Q1"
        );
        assert_eq!(info_dict.get(b"Producer").unwrap().as_str().unwrap(), b"ORCAS");
    }

    #[test]
    fn draws_images_and_rectangles() {
        let font = font();
        let mut pages = PageSet::new(PageGeometry::default());
        let index = pages.add_image(RasterImage {
            width: 2,
            height: 1,
            rgb: vec![255, 0, 0, 0, 0, 255],
        });
        pages
            .push(0, PositionedElement::image(Rect::new(40.0, 108.0, 200.0, 100.0), index))
            .unwrap();
        pages
            .push(
                0,
                PositionedElement::rect(Rect::new(40.0, 220.0, 10.0, 10.0), RectElement::filled(Color::rgb(255, 0, 0))),
            )
            .unwrap();

        let bytes = LopdfRenderer::new(&font)
            .render(&pages, &DocumentInfo::default())
            .unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let operators: Vec<&str> = content.operations.iter().map(|op| op.operator.as_str()).collect();
        assert!(operators.contains(&"Do"));
        assert!(operators.contains(&"re"));
        assert!(operators.contains(&"f"));
    }

    #[test]
    fn rejects_dangling_image_reference() {
        let font = font();
        let mut pages = PageSet::new(PageGeometry::default());
        pages
            .push(0, PositionedElement::image(Rect::new(0.0, 0.0, 1.0, 1.0), 3))
            .unwrap();
        let result = LopdfRenderer::new(&font).render(&pages, &DocumentInfo::default());
        assert!(matches!(result, Err(RenderError::MissingImage(3, 0))));
    }
}
