//! Engine configuration, loadable from JSON.

use crate::labels::{DEFAULT_LABEL_LIMIT_THRESHOLD, LabelPolicy};
use crate::layout::{DEFAULT_DECAY_2D, DEFAULT_EPSILON_3D, LayoutParams, default_decay_3d};
use crate::signal::DEFAULT_SIGNAL_TTL_SECS;
use anyhow::{Context, Result, bail};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Edge length of the root box.
    pub base_size: f64,
    pub decay_2d: f64,
    pub decay_3d: f64,
    /// Extra push of each cube along its corner direction.
    pub epsilon_3d: f64,
    pub label_limit_threshold: usize,
    /// Boxes shown when an instrument is first opened.
    pub default_visible_count: usize,
    /// Width of the grab zone at each end of the slider selection.
    pub edge_hit_zone: f64,
    pub signal_ttl_secs: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_size: 12.0,
            decay_2d: DEFAULT_DECAY_2D,
            decay_3d: default_decay_3d(),
            epsilon_3d: DEFAULT_EPSILON_3D,
            label_limit_threshold: DEFAULT_LABEL_LIMIT_THRESHOLD,
            default_visible_count: 15,
            edge_hit_zone: 16.0,
            signal_ttl_secs: DEFAULT_SIGNAL_TTL_SECS,
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read config {}", path))?;
        Self::from_json(&text).with_context(|| format!("Invalid config {}", path))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: EngineConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_size.is_finite() && self.base_size > 0.0) {
            bail!("baseSize must be a positive number, got {}", self.base_size);
        }
        for (name, d) in [("decay2d", self.decay_2d), ("decay3d", self.decay_3d)] {
            if !(d > 0.0 && d <= 1.0) {
                bail!("{} must be in (0, 1], got {}", name, d);
            }
        }
        if !(self.epsilon_3d.is_finite() && self.epsilon_3d >= 0.0) {
            bail!("epsilon3d must be non-negative, got {}", self.epsilon_3d);
        }
        if self.signal_ttl_secs <= 0 {
            bail!("signalTtlSecs must be positive, got {}", self.signal_ttl_secs);
        }
        Ok(())
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            base_size: self.base_size,
            decay_2d: self.decay_2d,
            decay_3d: self.decay_3d,
            epsilon_3d: self.epsilon_3d,
        }
    }

    pub fn label_policy(&self) -> LabelPolicy {
        LabelPolicy {
            limit_threshold: self.label_limit_threshold,
        }
    }

    pub fn signal_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.signal_ttl_secs)
    }
}
