#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("image failed to load: {0}")]
    Image(String),
    #[error("video failed to load: {0}")]
    Video(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("playback rejected, muted retry rejected as well")]
    Rejected,
}

/// Failure reported by a backend while seeking or drawing. Both are absorbed
/// by the player; they only decide which source the cover frame uses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("seek failed: {0}")]
    Seek(String),
    #[error("draw failed: {0}")]
    Draw(String),
}
