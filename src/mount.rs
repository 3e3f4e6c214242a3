use std::cell::RefCell;

use gloo::console;
use gloo::events::EventListener;
use livephoto_core::{ConfigError, InteractionGate, PlaybackCoordinator, PlayerConfig};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlCanvasElement};

use crate::player::LivePhotoPlayer;

pub const IMAGE_ATTR: &str = "data-live-photo-image";
pub const VIDEO_ATTR: &str = "data-live-photo-video";
pub const CONFIG_ATTR: &str = "data-live-photo-config";

const CANVAS_SELECTOR: &str = "canvas[data-live-photo-image][data-live-photo-video]";

#[derive(Debug, thiserror::Error)]
pub enum ConfigSourceError {
    #[error("config is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

pub fn parse_config(raw: &str) -> Result<PlayerConfig, ConfigSourceError> {
    if raw.trim().is_empty() {
        return Ok(PlayerConfig::default());
    }
    let config: PlayerConfig = serde_json::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

/// Everything mounted on one page: the shared slot, the gesture gate and the
/// listeners that feed them.
pub struct PageBindings {
    coordinator: PlaybackCoordinator,
    gate: InteractionGate,
    players: Vec<LivePhotoPlayer>,
    listeners: Vec<EventListener>,
}

impl PageBindings {
    pub fn coordinator(&self) -> &PlaybackCoordinator {
        &self.coordinator
    }

    pub fn gate(&self) -> &InteractionGate {
        &self.gate
    }

    pub fn players(&self) -> &[LivePhotoPlayer] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn destroy(mut self) {
        self.listeners.clear();
        for player in self.players.drain(..) {
            player.destroy();
        }
    }
}

/// Registers the single document-wide listener that records the first click.
pub fn install_interaction_listener(document: &Document, gate: &InteractionGate) -> EventListener {
    let gate = gate.clone();
    EventListener::once(document, "click", move |_event: &Event| {
        if gate.observe() {
            console::log!("live photo: user gesture observed, unmuting");
        }
    })
}

pub fn mount_all(document: &Document) -> Result<PageBindings, JsValue> {
    let coordinator = PlaybackCoordinator::new();
    let gate = InteractionGate::new();
    let mut listeners = vec![install_interaction_listener(document, &gate)];
    let mut players = Vec::new();

    let nodes = document.query_selector_all(CANVAS_SELECTOR)?;
    for index in 0..nodes.length() {
        let Some(node) = nodes.item(index) else {
            continue;
        };
        let Ok(canvas) = node.dyn_into::<HtmlCanvasElement>() else {
            continue;
        };
        let (Some(image_src), Some(video_src)) =
            (canvas.get_attribute(IMAGE_ATTR), canvas.get_attribute(VIDEO_ATTR))
        else {
            continue;
        };
        let config = match canvas.get_attribute(CONFIG_ATTR) {
            Some(raw) => parse_config(&raw).unwrap_or_else(|err| {
                console::warn!("live photo: ignoring config", err.to_string());
                PlayerConfig::default()
            }),
            None => PlayerConfig::default(),
        };
        let player = LivePhotoPlayer::new(
            canvas.clone(),
            &image_src,
            &video_src,
            config,
            &coordinator,
            &gate,
        )?;
        let toggle = player.clone();
        listeners.push(EventListener::new(&canvas, "click", move |_event: &Event| {
            if toggle.is_playing() {
                toggle.stop();
            } else {
                toggle.play();
            }
        }));
        players.push(player);
    }

    Ok(PageBindings {
        coordinator,
        gate,
        players,
        listeners,
    })
}

thread_local! {
    static PAGE: RefCell<Option<PageBindings>> = RefCell::new(None);
}

/// Mounts every live photo canvas of the current document and keeps the
/// bindings for the lifetime of the page. Replaces an earlier mount.
pub fn start() -> Result<usize, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("missing document"))?;
    let page = mount_all(&document)?;
    let count = page.len();
    let previous = PAGE.with(|slot| slot.borrow_mut().replace(page));
    if let Some(previous) = previous {
        previous.destroy();
    }
    Ok(count)
}
