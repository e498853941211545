//! Raster chart embedding.
//!
//! Decoding runs on the blocking pool. A chart that cannot be decoded is
//! dropped with a warning and never fails the build.

use super::FlowContext;
use super::input::ChartImage;
use crate::delivery::strip_data_uri;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use orcas_layout::{LayoutCursor, PositionedElement, RasterImage};
use orcas_types::{Rect, Size};
use thiserror::Error;

#[derive(Error, Debug)]
enum ChartError {
    #[error("source is empty")]
    Empty,
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("undecodable image: {0}")]
    Image(#[from] image::ImageError),
    #[error("decode task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Draws the chart at full content width below `cursor`.
///
/// Returns the cursor advanced past the chart and its gap, or `cursor`
/// unchanged if the image could not be decoded.
pub async fn render_chart(ctx: &mut FlowContext<'_>, chart: &ChartImage, cursor: LayoutCursor) -> LayoutCursor {
    let raster = match decode_chart(chart.source.clone()).await {
        Ok(raster) => raster,
        Err(e) => {
            log::warn!("Skipping chart image: {e}");
            return cursor;
        }
    };

    let geometry = *ctx.geometry();
    let content_width = geometry.content_width();
    let aspect_source = match (chart.intrinsic_width, chart.intrinsic_height) {
        (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Size::new(w, h),
        _ => Size::new(raster.width as f32, raster.height as f32),
    };
    let mut width = content_width;
    let mut height = aspect_source.scaled_height_for_width(width);

    // A chart taller than a whole page is shrunk to fit one.
    let capacity = geometry.content_height();
    if height > capacity {
        width *= capacity / height;
        height = capacity;
    }

    let cursor = ctx.ensure_room(cursor, height);
    let x = geometry.content_left() + (content_width - width) / 2.0;
    let image_index = ctx.pages.add_image(raster);
    let placed = PositionedElement::image(Rect::new(x, cursor.y, width, height), image_index);
    if let Err(e) = ctx.pages.push(cursor.page_index, placed) {
        log::warn!("Skipping chart image: {e}");
        return cursor;
    }
    log::debug!("Chart placed on page {} ({:.1} x {:.1}pt)", cursor.page_index + 1, width, height);
    cursor.advanced(height + ctx.config.spacing.section_gap)
}

async fn decode_chart(source: String) -> Result<RasterImage, ChartError> {
    tokio::task::spawn_blocking(move || decode_raster(&source)).await?
}

fn decode_raster(source: &str) -> Result<RasterImage, ChartError> {
    let payload: String = strip_data_uri(source)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if payload.is_empty() {
        return Err(ChartError::Empty);
    }
    let bytes = STANDARD.decode(payload)?;
    let decoded = image::load_from_memory(&bytes)?;
    Ok(flatten_onto_white(decoded))
}

/// Converts to 8-bit RGB, compositing any transparency over white.
fn flatten_onto_white(image: DynamicImage) -> RasterImage {
    let (width, height) = (image.width(), image.height());
    if !image.color().has_alpha() {
        return RasterImage {
            width,
            height,
            rgb: image.to_rgb8().into_raw(),
        };
    }
    let rgba = image.to_rgba8();
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        for channel in [r, g, b] {
            rgb.push(((channel as u32 * alpha + 255 * (255 - alpha)) / 255) as u8);
        }
    }
    RasterImage { width, height, rgb }
}
