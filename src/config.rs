//! Build configuration for report documents.
//!
//! Every field has a default matching the standard ORCAS report layout, so a
//! configuration file only needs to name the values it changes.

use crate::error::ReportError;
use orcas_layout::GridStyle;
use orcas_resource::DEFAULT_FONT_PATH;
use orcas_types::PageGeometry;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    /// Label stamped at the top-left of every page.
    pub product_label: String,
    /// Path of the text font inside the asset source.
    pub font_path: String,
    /// `strftime` pattern for the "Generated" header line.
    pub timestamp_format: String,
    pub geometry: PageGeometry,
    pub spacing: Spacing,
    pub typography: Typography,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            product_label: "ORCAS".to_string(),
            font_path: DEFAULT_FONT_PATH.to_string(),
            timestamp_format: "%Y-%m-%d %H:%M UTC".to_string(),
            geometry: PageGeometry::default(),
            spacing: Spacing::default(),
            typography: Typography::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Grid styling derived from the typography settings.
    pub fn grid_style(&self) -> GridStyle {
        GridStyle {
            font_size: self.typography.table_size,
            line_height: self.typography.table_size * 1.25,
            ..GridStyle::default()
        }
    }
}

/// Vertical rhythm and legend metrics, in points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spacing {
    pub line_height: f32,
    /// Gap left after each block (grid, chart).
    pub section_gap: f32,
    /// A section starting with less room than this begins on a new page.
    pub min_section_space: f32,
    pub legend_swatch: f32,
    pub legend_swatch_gap: f32,
    pub legend_item_gap: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            line_height: 14.0,
            section_gap: 18.0,
            min_section_space: 80.0,
            legend_swatch: 10.0,
            legend_swatch_gap: 4.0,
            legend_item_gap: 12.0,
        }
    }
}

/// Font sizes, in points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    pub body_size: f32,
    pub table_size: f32,
    pub section_title_size: f32,
    pub title_size: f32,
    pub header_size: f32,
    pub footer_size: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            body_size: 10.0,
            table_size: 9.0,
            section_title_size: 12.0,
            title_size: 16.0,
            header_size: 9.0,
            footer_size: 9.0,
        }
    }
}
