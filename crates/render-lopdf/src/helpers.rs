//! Content-stream drawing for one page.
//!
//! Layout coordinates grow downwards from the top-left corner; PDF user space
//! grows upwards from the bottom-left. Every operation here flips `y` against
//! the page height.

use crate::RenderError;
use crate::font::GlyphUsage;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use orcas_layout::{FontMetrics, ImageElement, LayoutElement, PositionedElement, RectElement, TextElement};
use orcas_types::Color;

pub const FONT_RESOURCE: &str = "F1";

/// Stroke width of simulated bold, as a fraction of the font size.
const BOLD_STROKE_RATIO: f32 = 0.03;

pub fn image_resource_name(index: usize) -> String {
    format!("Im{index}")
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font_size: Option<f32>,
    fill_color: Option<Color>,
    bold: Option<bool>,
}

pub(crate) struct PageContext<'a> {
    page_height: f32,
    metrics: &'a FontMetrics,
    glyphs: &'a mut GlyphUsage,
    image_count: usize,
    content: Content,
    state: PageRenderState,
}

impl<'a> PageContext<'a> {
    pub(crate) fn new(
        page_height: f32,
        metrics: &'a FontMetrics,
        glyphs: &'a mut GlyphUsage,
        image_count: usize,
    ) -> Self {
        Self {
            page_height,
            metrics,
            glyphs,
            image_count,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    pub(crate) fn draw_element(&mut self, el: &PositionedElement) -> Result<(), RenderError> {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Rectangle(rect) => {
                self.draw_rect(rect, el);
                Ok(())
            }
            LayoutElement::Image(image) => self.draw_image(image, el),
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn color_operands(color: Color) -> Vec<Object> {
        color.to_unit().into_iter().map(Object::from).collect()
    }

    fn set_font_size(&mut self, size: f32) {
        if self.state.font_size != Some(size) {
            self.push("Tf", vec![Object::Name(FONT_RESOURCE.as_bytes().to_vec()), size.into()]);
            self.state.font_size = Some(size);
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            self.push("rg", Self::color_operands(color));
            self.state.fill_color = Some(color);
            // Simulated bold strokes with the fill color.
            self.state.bold = None;
        }
    }

    fn set_weight(&mut self, bold: bool, size: f32, color: Color) {
        if self.state.bold == Some(bold) && !(bold && self.state.font_size != Some(size)) {
            return;
        }
        if bold {
            self.push("RG", Self::color_operands(color));
            self.push("w", vec![(size * BOLD_STROKE_RATIO).into()]);
            self.push("Tr", vec![2.into()]);
        } else {
            self.push("Tr", vec![0.into()]);
        }
        self.state.bold = Some(bold);
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) -> Result<(), RenderError> {
        if text.content.trim().is_empty() {
            return Ok(());
        }
        let baseline = el.y + self.metrics.baseline_offset(text.font_size);
        let pdf_y = self.page_height - baseline;

        self.push("BT", vec![]);
        self.set_fill_color(text.color);
        self.set_weight(text.bold, text.font_size, text.color);
        self.set_font_size(text.font_size);
        self.push("Td", vec![el.x.into(), pdf_y.into()]);
        let shown = self.glyphs.encode(self.metrics, &text.content);
        self.push("Tj", vec![Object::String(shown, StringFormat::Hexadecimal)]);
        self.push("ET", vec![]);
        Ok(())
    }

    fn draw_rect(&mut self, rect: &RectElement, el: &PositionedElement) {
        let y = self.page_height - (el.y + el.height);
        let bounds = vec![el.x.into(), y.into(), el.width.into(), el.height.into()];
        self.push("q", vec![]);
        if let Some(fill) = rect.fill {
            self.push("rg", Self::color_operands(fill));
        }
        if let Some(stroke) = rect.stroke {
            self.push("RG", Self::color_operands(stroke));
            self.push("w", vec![rect.line_width.into()]);
        }
        self.push("re", bounds);
        let paint = match (rect.fill.is_some(), rect.stroke.is_some()) {
            (true, true) => "B",
            (true, false) => "f",
            (false, true) => "S",
            (false, false) => "n",
        };
        self.push(paint, vec![]);
        self.push("Q", vec![]);
    }

    fn draw_image(&mut self, image: &ImageElement, el: &PositionedElement) -> Result<(), RenderError> {
        if image.image_index >= self.image_count {
            return Err(RenderError::MissingImage(image.image_index, self.image_count));
        }
        let y = self.page_height - (el.y + el.height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                el.width.into(),
                0.into(),
                0.into(),
                el.height.into(),
                el.x.into(),
                y.into(),
            ],
        );
        self.push(
            "Do",
            vec![Object::Name(image_resource_name(image.image_index).into_bytes())],
        );
        self.push("Q", vec![]);
        Ok(())
    }
}
