use orcas_types::{Color, Rect};

/// A simple, geometry-aware data structure representing a single drawable item.
/// This is the final output of the layout process for a given element: its
/// absolute position on the page and everything the renderer needs to paint it.
/// A page is simply a collection of these elements.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

impl PositionedElement {
    pub fn text(x: f32, y: f32, width: f32, text: TextElement) -> Self {
        let height = text.font_size;
        Self {
            x,
            y,
            width,
            height,
            element: LayoutElement::Text(text),
        }
    }

    pub fn rect(rect: Rect, style: RectElement) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            element: LayoutElement::Rectangle(style),
        }
    }

    pub fn image(rect: Rect, image_index: usize) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            element: LayoutElement::Image(ImageElement { image_index }),
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.element {
            LayoutElement::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// An enum representing the different types of drawable elements.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
    Image(ImageElement),
}

impl std::fmt::Display for LayoutElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutElement::Text(t) => write!(f, "Text(\"{}\")", t.content),
            LayoutElement::Rectangle(_) => write!(f, "Rectangle"),
            LayoutElement::Image(i) => write!(f, "Image(#{})", i.image_index),
        }
    }
}

/// A single line of text. `y` of the owning element is the top of the line box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub font_size: f32,
    pub bold: bool,
    pub color: Color,
}

impl TextElement {
    pub fn new(content: impl Into<String>, font_size: f32) -> Self {
        Self {
            content: content.into(),
            font_size,
            bold: false,
            color: Color::BLACK,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// A filled and/or stroked rectangle: swatches, cell backgrounds, grid rules.
#[derive(Clone, Debug, PartialEq)]
pub struct RectElement {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f32,
}

impl RectElement {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            line_width: 0.0,
        }
    }

    pub fn stroked(color: Color, line_width: f32) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            line_width,
        }
    }
}

/// A raster drawn from the owning `PageSet`'s image table.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageElement {
    pub image_index: usize,
}
