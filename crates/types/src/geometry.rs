use serde::Deserialize;

/// Layout coordinates are in PDF points with the origin at the top-left
/// corner of the page and `y` growing downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// ISO A4 portrait.
    pub fn a4() -> Self {
        Self::new(595.28, 841.89)
    }

    /// Height obtained when this size is scaled uniformly to `target_width`.
    ///
    /// Degenerate sizes (zero or non-finite sides) yield a square.
    pub fn scaled_height_for_width(&self, target_width: f32) -> f32 {
        let valid = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if !valid {
            return target_width;
        }
        target_width * (self.height / self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 36.0,
            right: 40.0,
            bottom: 40.0,
            left: 40.0,
        }
    }
}

/// Fixed page geometry shared by every renderer of a document build.
///
/// The header band sits between the top margin and the first content line;
/// it is left empty during content flow and filled by the page decorator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageGeometry {
    pub page_size: Size,
    pub margins: Margins,
    pub header_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_size: Size::a4(),
            margins: Margins::default(),
            header_height: 72.0,
        }
    }
}

impl PageGeometry {
    pub fn content_left(&self) -> f32 {
        self.margins.left
    }

    pub fn content_right(&self) -> f32 {
        self.page_size.width - self.margins.right
    }

    pub fn content_width(&self) -> f32 {
        (self.content_right() - self.content_left()).max(0.0)
    }

    /// First writable `y` on any page: just below the header band.
    pub fn content_top(&self) -> f32 {
        self.margins.top + self.header_height
    }

    /// Lowest `y` content may reach before a page break is required.
    pub fn content_bottom(&self) -> f32 {
        self.page_size.height - self.margins.bottom
    }

    /// Vertical room available on a fresh page.
    pub fn content_height(&self) -> f32 {
        (self.content_bottom() - self.content_top()).max(0.0)
    }

    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.content_left(),
            self.content_top(),
            self.content_width(),
            self.content_height(),
        )
    }
}
