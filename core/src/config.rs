use serde::Deserialize;

pub const FADE_DURATION_MS_DEFAULT: f64 = 300.0;
pub const SCALE_FACTOR_DEFAULT: f64 = 1.05;
pub const COVER_TIME_S_DEFAULT: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    #[serde(rename = "fadeDuration")]
    pub fade_duration_ms: f64,
    #[serde(rename = "scaleFactor")]
    pub scale_factor: f64,
    #[serde(rename = "coverTime")]
    pub cover_time_s: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            fade_duration_ms: FADE_DURATION_MS_DEFAULT,
            scale_factor: SCALE_FACTOR_DEFAULT,
            cover_time_s: COVER_TIME_S_DEFAULT,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fade_duration_ms.is_finite() || self.fade_duration_ms < 0.0 {
            return Err(ConfigError::FadeDuration(self.fade_duration_ms));
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(ConfigError::ScaleFactor(self.scale_factor));
        }
        if !self.cover_time_s.is_finite() || self.cover_time_s < 0.0 {
            return Err(ConfigError::CoverTime(self.cover_time_s));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("fade duration must be a finite, non-negative number of ms, got {0}")]
    FadeDuration(f64),
    #[error("scale factor must be finite and positive, got {0}")]
    ScaleFactor(f64),
    #[error("cover time must be a finite, non-negative number of seconds, got {0}")]
    CoverTime(f64),
}
