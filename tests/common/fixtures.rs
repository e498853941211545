#![allow(dead_code)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, TimeZone, Utc};
use orcas_report::{ChartImage, MetadataInput, MetadataRow, ReportDocumentInput, ReportKind, Section, Value};
use std::io::Cursor;

pub fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
}

/// An empty report with a fixed creation time.
pub fn report(name: &str, kind: &str) -> ReportDocumentInput {
    let mut input = ReportDocumentInput::new(name, ReportKind::from(kind));
    input.created_at = Some(fixed_timestamp());
    input
}

pub fn metadata(rows: &[(&str, Value)]) -> MetadataInput {
    MetadataInput::Ordered(
        rows.iter()
            .map(|(label, value)| MetadataRow::new(*label, value.clone()))
            .collect(),
    )
}

/// `count` rows of `Ticker | Score`.
pub fn ranking_section(count: usize) -> Section {
    (0..count).fold(Section::new("Ranking", ["Ticker", "Score"]), |section, i| {
        section.with_row(vec![Value::from(format!("T{i:03}")), Value::from(i as f64 / 10.0)])
    })
}

pub fn png_chart(width: u32, height: u32) -> ChartImage {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    ChartImage::new(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
}
