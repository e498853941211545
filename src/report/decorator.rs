//! Running header and page-number footer.
//!
//! Both are stamped only once all content has been flowed, because the
//! footer needs the final page count. The header pass finishes over every
//! page before the footer pass starts.

use super::sanitize::sanitize;
use crate::config::Typography;
use orcas_layout::{FontMetrics, LayoutError, PageSet, PositionedElement, RectElement, TextElement};
use orcas_types::{Color, Rect};

const MUTED: Color = Color::gray(96);
const RULE: Color = Color::gray(200);
const ELLIPSIS: char = '…';

/// Text repeated at the top of every page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageHeader {
    pub product_label: String,
    pub kind_label: String,
    pub title: String,
    /// Already formatted, without the "Generated" prefix.
    pub generated: String,
}

impl PageHeader {
    pub fn generated_line(&self) -> String {
        format!("Generated {}", self.generated)
    }
}

pub fn footer_text(page_number: usize, page_count: usize) -> String {
    format!("Page {page_number} of {page_count}")
}

pub fn decorate_pages(
    pages: &mut PageSet,
    header: &PageHeader,
    metrics: &FontMetrics,
    typography: &Typography,
) -> Result<(), LayoutError> {
    let geometry = *pages.geometry();
    let left = geometry.content_left();
    let right = geometry.content_right();
    let width = geometry.content_width();
    let top = geometry.margins.top;

    let product = sanitize(&header.product_label);
    let kind = sanitize(&header.kind_label);
    let title = truncate_to_width(metrics, &sanitize(&header.title), typography.title_size, width);
    let generated = sanitize(&header.generated_line());
    let kind_width = metrics.text_width(&kind, typography.header_size);
    let title_y = top + typography.header_size + 6.0;
    let generated_y = title_y + typography.title_size + 6.0;
    let rule_y = top + geometry.header_height - 8.0;

    for page_index in 0..pages.page_count() {
        let stamp = [
            PositionedElement::text(
                left,
                top,
                metrics.text_width(&product, typography.header_size),
                TextElement::new(product.clone(), typography.header_size).bold().colored(MUTED),
            ),
            PositionedElement::text(
                right - kind_width,
                top,
                kind_width,
                TextElement::new(kind.clone(), typography.header_size).colored(MUTED),
            ),
            PositionedElement::text(
                left,
                title_y,
                metrics.text_width(&title, typography.title_size),
                TextElement::new(title.clone(), typography.title_size).bold(),
            ),
            PositionedElement::text(
                left,
                generated_y,
                metrics.text_width(&generated, typography.header_size),
                TextElement::new(generated.clone(), typography.header_size).colored(MUTED),
            ),
            PositionedElement::rect(Rect::new(left, rule_y, width, 0.75), RectElement::filled(RULE)),
        ];
        for element in stamp {
            pages.push(page_index, element)?;
        }
    }

    let page_count = pages.page_count();
    let footer_y = geometry.page_size.height - geometry.margins.bottom + 12.0;
    for page_index in 0..page_count {
        let text = footer_text(page_index + 1, page_count);
        let text_width = metrics.text_width(&text, typography.footer_size);
        pages.push(
            page_index,
            PositionedElement::text(
                left + (width - text_width) / 2.0,
                footer_y,
                text_width,
                TextElement::new(text, typography.footer_size).colored(MUTED),
            ),
        )?;
    }
    log::debug!("Decorated {page_count} page(s)");
    Ok(())
}

/// Shortens `text` with a trailing ellipsis until it fits `max_width`.
fn truncate_to_width(metrics: &FontMetrics, text: &str, font_size: f32, max_width: f32) -> String {
    if metrics.text_width(text, font_size) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().chain(std::iter::once(&ELLIPSIS)).collect();
        if metrics.text_width(&candidate, font_size) <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}
