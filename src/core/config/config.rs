use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Agent Nexus".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}
impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 1.0, max: 3.0 }
    }
}

/// Text particle field: glyph mask sampling plus pointer interaction.
/// Stride / gain / divisor are tuning constants carried as-is, not derived.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub text: String,
    /// TTF candidates, first readable wins. No font is non-fatal (empty mask).
    pub font_paths: Vec<String>,
    /// Font px = window width / font_scale_divisor, capped at max_font_px.
    pub font_scale_divisor: f32,
    pub max_font_px: f32,
    /// Grid stride (px) when sampling the rasterized coverage mask.
    pub sample_stride: u32,
    /// Coverage above this (0..1) yields a particle.
    pub coverage_threshold: f32,
    pub size_range: SizeRange,
    /// Pointer interaction radius (px).
    pub pointer_radius: f32,
    /// Displacement gain while inside the pointer radius.
    pub repel_gain: f32,
    /// Fraction of the offset recovered per frame is 1/return_divisor.
    pub return_divisor: f32,
}
impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            text: "NEXUS".into(),
            font_paths: vec![
                "assets/fonts/Orbitron-Black.ttf".into(),
                "assets/fonts/FiraSans-Bold.ttf".into(),
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf".into(),
            ],
            font_scale_divisor: 5.0,
            max_font_px: 250.0,
            sample_stride: 4,
            coverage_threshold: 0.5,
            size_range: SizeRange::default(),
            pointer_radius: 150.0,
            repel_gain: 5.0,
            return_divisor: 15.0,
        }
    }
}

/// The two orbiting agent streams.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    /// Global clock increment per frame (radians).
    pub time_step: f32,
    /// Ellipse radii as fractions of window width / height.
    pub radius_x_frac: f32,
    pub radius_y_frac: f32,
    /// Trail history capacity (positions).
    pub history_limit: usize,
    /// Particles within this distance of an agent adopt its color.
    pub proximity_radius: f32,
    pub trail_width: f32,
    pub head_radius: f32,
    /// Per-frame brightness retention along the trail (0..1); a sample aged
    /// k frames renders at retain^k.
    pub fade_retain: f32,
    /// HDR multiplier pushing glowing elements over the bloom threshold.
    pub glow_boost: f32,
}
impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            time_step: 0.02,
            radius_x_frac: 0.40,
            radius_y_frac: 0.25,
            history_limit: 40,
            proximity_radius: 150.0,
            trail_width: 3.0,
            head_radius: 6.0,
            fade_retain: 0.8,
            glow_boost: 3.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    pub openrouter_url: String,
    pub openrouter_model: String,
    pub google_url: String,
    pub google_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Prior turns forwarded to the OpenAI-compatible backend.
    pub openrouter_history: usize,
    /// Prior turns flattened into the Google prompt context.
    pub google_history: usize,
    pub referer: String,
    pub site_title: String,
    pub request_timeout_secs: u64,
}
impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            openrouter_url: "https://openrouter.ai/api/v1/chat/completions".into(),
            openrouter_model: "deepseek/deepseek-r1:free".into(),
            google_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            google_model: "gemini-2.0-flash".into(),
            temperature: 0.7,
            max_tokens: 500,
            openrouter_history: 10,
            google_history: 5,
            referer: "http://localhost:3000".into(),
            site_title: "Agent Nexus".into(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CaptionConfig {
    pub top: String,
    pub bottom: String,
}
impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            top: "AGENTS: ACTIVE".into(),
            bottom: "CONVERGENCE OF INTELLIGENCE".into(),
        }
    }
}

/// Outcome of the config load, carried into the app so it can be logged
/// once the logger exists.
#[derive(Resource, Debug, Default, Clone)]
pub struct ConfigReport {
    pub source_error: Option<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct IntroConfig {
    pub window: WindowConfig,
    pub field: FieldConfig,
    pub agents: AgentConfig,
    pub chat: ChatConfig,
    pub captions: CaptionConfig,
}

impl IntroConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Clamp out-of-range values in place; returns one warning per repair.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.window.width < 1.0 || self.window.height < 1.0 {
            warnings.push(format!(
                "window {}x{} invalid; reset to defaults",
                self.window.width, self.window.height
            ));
            self.window.width = WindowConfig::default().width;
            self.window.height = WindowConfig::default().height;
        }
        if self.field.sample_stride == 0 {
            warnings.push("field.sample_stride 0 clamped to 1".into());
            self.field.sample_stride = 1;
        }
        if !(0.0..=1.0).contains(&self.field.coverage_threshold) {
            warnings.push(format!(
                "field.coverage_threshold {} clamped to 0.5",
                self.field.coverage_threshold
            ));
            self.field.coverage_threshold = 0.5;
        }
        if self.field.return_divisor < 1.0 {
            warnings.push(format!(
                "field.return_divisor {} clamped to 1.0",
                self.field.return_divisor
            ));
            self.field.return_divisor = 1.0;
        }
        if self.field.font_scale_divisor < 1.0 {
            warnings.push(format!(
                "field.font_scale_divisor {} clamped to 1.0",
                self.field.font_scale_divisor
            ));
            self.field.font_scale_divisor = 1.0;
        }
        if self.field.size_range.min > self.field.size_range.max {
            warnings.push("field.size_range min > max; swapped".into());
            std::mem::swap(
                &mut self.field.size_range.min,
                &mut self.field.size_range.max,
            );
        }
        if self.field.pointer_radius < 0.0 {
            warnings.push("field.pointer_radius negative; clamped to 0".into());
            self.field.pointer_radius = 0.0;
        }
        if self.agents.history_limit == 0 {
            warnings.push("agents.history_limit 0 clamped to 1".into());
            self.agents.history_limit = 1;
        }
        if !(0.0..1.0).contains(&self.agents.fade_retain) {
            warnings.push(format!(
                "agents.fade_retain {} clamped to 0.8",
                self.agents.fade_retain
            ));
            self.agents.fade_retain = 0.8;
        }
        if !(0.01..=1.0).contains(&self.agents.radius_x_frac) {
            warnings.push(format!(
                "agents.radius_x_frac {} clamped to 0.01..1.0",
                self.agents.radius_x_frac
            ));
            self.agents.radius_x_frac = self.agents.radius_x_frac.clamp(0.01, 1.0);
        }
        if !(0.01..=1.0).contains(&self.agents.radius_y_frac) {
            warnings.push(format!(
                "agents.radius_y_frac {} clamped to 0.01..1.0",
                self.agents.radius_y_frac
            ));
            self.agents.radius_y_frac = self.agents.radius_y_frac.clamp(0.01, 1.0);
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_from_empty_ron() {
        let cfg: IntroConfig = ron::from_str("()").expect("empty RON should hit defaults");
        assert_eq!(cfg, IntroConfig::default());
    }

    #[test]
    fn validate_is_noop_on_defaults() {
        let mut cfg = IntroConfig::default();
        assert!(cfg.validate().is_empty());
    }
}
