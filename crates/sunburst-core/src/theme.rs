//! Named presentation themes.
//!
//! A theme fixes the top-level category palette plus the handful of constants that shape how
//! descendant colors and arc opacities are derived. Every field can be overridden from config.

use crate::color::Rgb;
use crate::config::SunburstConfig;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    /// Category name (depth-1 node) to base color.
    pub categories: IndexMap<String, Rgb>,
    /// Used for categories missing from `categories`.
    pub fallback: Rgb,
    /// `k` passed to `Rgb::brighter` for the light end of a sibling gradient.
    pub brighten: f64,
    /// Interpolation fraction given to the highest-value sibling.
    pub gradient_high: f64,
    /// Interpolation fraction given to the lowest-value sibling.
    pub gradient_low: f64,
    /// Fraction used when all siblings share one value.
    pub gradient_flat: f64,
    /// Fill opacity of a visible arc that has children.
    pub branch_opacity: f64,
    /// Fill opacity of a visible leaf arc.
    pub leaf_opacity: f64,
    pub label_fill: String,
    pub detail_fill: String,
}

fn rgb(hex: &str) -> Rgb {
    // Only called on the literals below.
    Rgb::parse(hex).unwrap_or(Rgb::new(204.0, 204.0, 204.0))
}

fn categories(entries: &[(&str, &str)]) -> IndexMap<String, Rgb> {
    entries
        .iter()
        .map(|(name, hex)| ((*name).to_string(), rgb(hex)))
        .collect()
}

impl Theme {
    /// Purple-toned palette.
    pub fn default_theme() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            categories: categories(&[
                ("Skin Type", "#946dde"),
                ("Skin Concern", "#a66d96"),
                ("SPF Range", "#f08554"),
                ("Formulation Type", "#de9b59"),
                ("UVA Rating", "#eb7457"),
            ]),
            fallback: rgb("#cccccc"),
            brighten: 1.5,
            gradient_high: 0.2,
            gradient_low: 0.8,
            gradient_flat: 0.5,
            branch_opacity: 0.9,
            leaf_opacity: 0.6,
            label_fill: "#0b090a".to_string(),
            detail_fill: "#ffeccf".to_string(),
        }
    }

    /// Orange-toned palette with lighter leaf arcs.
    pub fn warm() -> Self {
        Self {
            name: "warm".to_string(),
            categories: categories(&[
                ("Skin Type", "#e35c36"),
                ("Skin Concern", "#e87c10"),
                ("SPF Range", "#fc5b21"),
                ("Formulation Type", "#fac184"),
                ("UVA Rating", "#fc5e3a"),
            ]),
            branch_opacity: 0.8,
            leaf_opacity: 0.2,
            ..Self::default_theme()
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::default_theme()),
            "warm" => Some(Self::warm()),
            _ => None,
        }
    }

    /// Resolves `sunburst.theme` and then applies per-field overrides:
    /// `sunburst.palette.<category>`, `sunburst.fallbackColor`, `sunburst.brighten`,
    /// `sunburst.branchOpacity`, `sunburst.leafOpacity`, `sunburst.labelFill`,
    /// `sunburst.detail.fill`.
    pub fn from_config(config: &SunburstConfig) -> Result<Self> {
        let mut theme = match config.get_str("sunburst.theme") {
            None => Self::default_theme(),
            Some(name) => Self::by_name(name).ok_or_else(|| Error::InvalidConfig {
                message: format!("unknown theme `{name}`"),
            })?,
        };

        if let Some(palette) = config.get_object("sunburst.palette") {
            for (category, value) in palette {
                let Some(hex) = value.as_str() else {
                    return Err(Error::InvalidConfig {
                        message: format!("palette entry `{category}` must be a color string"),
                    });
                };
                theme.categories.insert(category.clone(), Rgb::parse(hex)?);
            }
        }
        if let Some(hex) = config.get_str("sunburst.fallbackColor") {
            theme.fallback = Rgb::parse(hex)?;
        }
        if let Some(k) = config.get_f64("sunburst.brighten") {
            theme.brighten = k;
        }
        if let Some(v) = config.get_f64("sunburst.branchOpacity") {
            theme.branch_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = config.get_f64("sunburst.leafOpacity") {
            theme.leaf_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(fill) = config.get_str("sunburst.labelFill") {
            theme.label_fill = fill.to_string();
        }
        if let Some(fill) = config.get_str("sunburst.detail.fill") {
            theme.detail_fill = fill.to_string();
        }
        Ok(theme)
    }

    pub fn category_color(&self, name: &str) -> Option<Rgb> {
        self.categories.get(name).copied()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
