use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sunburst_core::{SunburstConfig, Theme};

pub const DEFAULT_SIZE: f64 = 932.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailOptions {
    /// Maximum line width as a fraction of the radius.
    pub width_ratio: f64,
    /// First baseline as a fraction of the radius (negative is above the center).
    pub start_y_ratio: f64,
    /// Vertical budget as a fraction of the radius.
    pub available_ratio: f64,
    pub line_height: f64,
    /// Used for the single retry when the first wrap overflows.
    pub reduced_line_height: f64,
    /// Space between the title block and the features block.
    pub title_gap: f64,
    pub title_font_size: f64,
    pub body_font_size: f64,
    pub fade_ms: f64,
}

impl Default for DetailOptions {
    fn default() -> Self {
        Self {
            width_ratio: 0.8,
            start_y_ratio: -0.5,
            available_ratio: 1.0,
            line_height: 16.0,
            reduced_line_height: 12.0,
            title_gap: 5.0,
            title_font_size: 14.0,
            body_font_size: 12.0,
            fade_ms: 650.0,
        }
    }
}

/// Resolved chart options: the `{ width, height, radius }` entry config plus presentation
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub width: f64,
    pub height: f64,
    /// Pixel size of one ring.
    pub radius: f64,
    pub theme: Theme,
    /// Outer band limit for visible arcs (root ring + two rings).
    pub max_depth: f64,
    /// Minimum `radial · angular` extent of a labelled arc.
    pub label_epsilon: f64,
    pub avg_char_width: f64,
    pub min_label_chars: usize,
    pub font_family: String,
    pub font_size: f64,
    pub pad_angle_max: f64,
    /// Pad radius as a multiple of `radius`.
    pub pad_radius_ratio: f64,
    pub zoom_duration_ms: f64,
    pub pop_out_scale: f64,
    pub pop_out_duration_ms: f64,
    pub detail: DetailOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::sized(DEFAULT_SIZE, DEFAULT_SIZE, DEFAULT_SIZE / 6.0)
    }
}

fn positive(cfg: &SunburstConfig, path: &str) -> Result<Option<f64>> {
    match cfg.get_f64(path) {
        None => Ok(None),
        Some(v) if v > 0.0 => Ok(Some(v)),
        Some(v) => Err(Error::InvalidModel {
            message: format!("`{path}` must be positive, got {v}"),
        }),
    }
}

impl ChartOptions {
    pub fn sized(width: f64, height: f64, radius: f64) -> Self {
        Self {
            width,
            height,
            radius,
            theme: Theme::default(),
            max_depth: 3.0,
            label_epsilon: 0.03,
            avg_char_width: 6.0,
            min_label_chars: 12,
            font_family: "Lato".to_string(),
            font_size: 12.0,
            pad_angle_max: 0.005,
            pad_radius_ratio: 1.5,
            zoom_duration_ms: 750.0,
            pop_out_scale: 1.08,
            pop_out_duration_ms: 200.0,
            detail: DetailOptions::default(),
        }
    }

    /// Reads the `sunburst.*` section. Missing keys keep their defaults; when only `width` /
    /// `height` are given, the radius follows as `min(width, height) / 6`.
    pub fn from_config(cfg: &SunburstConfig) -> Result<Self> {
        let width = positive(cfg, "sunburst.width")?.unwrap_or(DEFAULT_SIZE);
        let height = positive(cfg, "sunburst.height")?.unwrap_or(width);
        let radius = positive(cfg, "sunburst.radius")?.unwrap_or(width.min(height) / 6.0);

        let mut out = Self::sized(width, height, radius);
        out.theme = Theme::from_config(cfg)?;

        if let Some(v) = positive(cfg, "sunburst.maxDepth")? {
            out.max_depth = v;
        }
        if let Some(v) = cfg.get_f64("sunburst.labelEpsilon") {
            out.label_epsilon = v.max(0.0);
        }
        if let Some(v) = positive(cfg, "sunburst.avgCharWidth")? {
            out.avg_char_width = v;
        }
        if let Some(v) = cfg.get_f64("sunburst.minLabelChars") {
            out.min_label_chars = v.max(1.0) as usize;
        }
        if let Some(v) = cfg.get_str("sunburst.fontFamily") {
            out.font_family = v.to_string();
        }
        if let Some(v) = positive(cfg, "sunburst.fontSize")? {
            out.font_size = v;
        }
        if let Some(v) = cfg.get_f64("sunburst.padAngle") {
            out.pad_angle_max = v.max(0.0);
        }
        if let Some(v) = cfg.get_f64("sunburst.zoomDurationMs") {
            out.zoom_duration_ms = v.max(0.0);
        }
        if let Some(v) = positive(cfg, "sunburst.popOutScale")? {
            out.pop_out_scale = v;
        }
        if let Some(v) = cfg.get_f64("sunburst.popOutDurationMs") {
            out.pop_out_duration_ms = v.max(0.0);
        }

        let d = &mut out.detail;
        if let Some(v) = positive(cfg, "sunburst.detail.widthRatio")? {
            d.width_ratio = v;
        }
        if let Some(v) = cfg.get_f64("sunburst.detail.startYRatio") {
            d.start_y_ratio = v;
        }
        if let Some(v) = positive(cfg, "sunburst.detail.availableRatio")? {
            d.available_ratio = v;
        }
        if let Some(v) = positive(cfg, "sunburst.detail.lineHeight")? {
            d.line_height = v;
        }
        if let Some(v) = positive(cfg, "sunburst.detail.reducedLineHeight")? {
            d.reduced_line_height = v;
        }
        if let Some(v) = cfg.get_f64("sunburst.detail.titleGap") {
            d.title_gap = v.max(0.0);
        }
        if let Some(v) = positive(cfg, "sunburst.detail.titleFontSize")? {
            d.title_font_size = v;
        }
        if let Some(v) = positive(cfg, "sunburst.detail.bodyFontSize")? {
            d.body_font_size = v;
        }
        if let Some(v) = cfg.get_f64("sunburst.detail.fadeMs") {
            d.fade_ms = v.max(0.0);
        }

        Ok(out)
    }

    pub fn pad_radius(&self) -> f64 {
        self.radius * self.pad_radius_ratio
    }
}
