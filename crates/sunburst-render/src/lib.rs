#![forbid(unsafe_code)]

//! Headless sunburst engine: radial partition layout, color and label policy, the zoom/selection
//! state machine and SVG frames.
//!
//! ```no_run
//! use sunburst_core::{SunburstConfig, TreeNode};
//! use sunburst_render::{Chart, LayoutOptions};
//!
//! let tree = TreeNode::branch("Sunscreen", vec![TreeNode::leaf("Gel", 1.0)]);
//! let mut chart = Chart::new(&tree, &SunburstConfig::default(), &LayoutOptions::default())?;
//! let gel = chart.find(&["Gel"]).expect("leaf");
//! chart.select(gel, 0.0)?;
//! let svg = chart.render_svg(1_000.0);
//! # Ok::<(), sunburst_render::Error>(())
//! ```

pub mod arc;
pub mod chart;
pub mod color;
pub mod config;
pub mod detail;
pub mod model;
pub mod partition;
pub mod svg;
pub mod text;
pub mod visibility;
pub mod zoom;

use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use std::sync::Arc;
use sunburst_core::NodeId;

pub use chart::Chart;
pub use config::{ChartOptions, DetailOptions};
pub use model::{NodeView, PartitionLayout, Scene, Wedge};
pub use partition::partition;
pub use zoom::{Interaction, ZoomController, ZoomState};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] sunburst_core::Error),
    #[error("unknown node {id}")]
    UnknownNode { id: NodeId },
    #[error("invalid chart model: {message}")]
    InvalidModel { message: String },
    #[error("chart model JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}
