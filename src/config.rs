use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_NODE_WIDTH: f64 = 280.0;
const DEFAULT_NODE_HEIGHT: f64 = 200.0;
const DEFAULT_BASE_RADIUS: f64 = 340.0;
const DEFAULT_RING_SPACING: f64 = 260.0;
const DEFAULT_START_ANGLE_DEG: f64 = -90.0;
const DEFAULT_COMPACT_SCALE: f64 = 0.72;
const DEFAULT_COLLISION_PADDING: f64 = 12.0;
const DEFAULT_MAX_PASSES: u32 = 25;
const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialConfig {
    /// Ring-0 orbit radius; ring r sits at `base_radius + r * ring_spacing`.
    pub base_radius: f64,
    /// Radial distance added per ring tier.
    pub ring_spacing: f64,
    /// Angle of the first sector boundary, degrees; -90 puts the first
    /// domain straight above the center.
    pub start_angle_deg: f64,
    /// Radius multiplier applied in compact view mode.
    pub compact_scale: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            base_radius: DEFAULT_BASE_RADIUS,
            ring_spacing: DEFAULT_RING_SPACING,
            start_angle_deg: DEFAULT_START_ANGLE_DEG,
            compact_scale: DEFAULT_COMPACT_SCALE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Minimum clearance between any two node rectangles.
    pub padding: f64,
    /// Relaxation pass budget.
    pub max_passes: u32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_COLLISION_PADDING,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionConfig {
    pub default_width: f64,
    pub default_height: f64,
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_NODE_WIDTH,
            default_height: DEFAULT_NODE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum retained snapshots; the oldest is evicted past this.
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub radial: RadialConfig,
    pub collision: CollisionConfig,
    pub dimension: DimensionConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&contents)?;
    Ok(config)
}
