mod backend;
mod mount;
mod player;

pub use backend::CanvasBackend;
pub use mount::{
    install_interaction_listener, mount_all, parse_config, start, ConfigSourceError, PageBindings,
    CONFIG_ATTR, IMAGE_ATTR, VIDEO_ATTR,
};
pub use player::LivePhotoPlayer;
