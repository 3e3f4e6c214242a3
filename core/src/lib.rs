pub mod backend;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod gate;
pub mod player;
pub mod transition;

pub use backend::{FrameSource, PlayerBackend, SurfaceSize};
pub use config::{ConfigError, PlayerConfig};
pub use coordinator::{PlaybackCoordinator, PlayerId};
pub use error::{LoadError, MediaError, PlayError};
pub use gate::InteractionGate;
pub use player::{LivePhoto, LoadState, PlayAttempt, PlayRequest};
pub use transition::{frame_at, progress, Transition, TransitionFrame, TransitionKind};
