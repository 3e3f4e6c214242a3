use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::console;
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use livephoto_core::{
    InteractionGate, LivePhoto, LoadState, PlayRequest, PlaybackCoordinator, PlayerConfig,
    PlayerId,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Event, HtmlCanvasElement};

use crate::backend::{js_err, CanvasBackend};

/// A live photo bound to one canvas.
///
/// Cheap to clone; every clone drives the same player. DOM listeners only hold
/// weak references, dropping the last clone detaches them.
#[derive(Clone)]
pub struct LivePhotoPlayer {
    shell: Rc<PlayerShell>,
}

struct PlayerShell {
    core: RefCell<LivePhoto<CanvasBackend>>,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
    gate: InteractionGate,
    gate_hook: Cell<Option<u64>>,
}

impl LivePhotoPlayer {
    pub fn new(
        canvas: HtmlCanvasElement,
        image_src: &str,
        video_src: &str,
        config: PlayerConfig,
        coordinator: &PlaybackCoordinator,
        gate: &InteractionGate,
    ) -> Result<Self, JsValue> {
        let backend = CanvasBackend::new(canvas)?;
        let shell = Rc::new_cyclic(|weak: &Weak<PlayerShell>| {
            let weak = weak.clone();
            let preempt: Rc<dyn Fn()> = Rc::new(move || {
                if let Some(shell) = weak.upgrade() {
                    shell.stop();
                }
            });
            PlayerShell {
                core: RefCell::new(LivePhoto::new(
                    backend,
                    config,
                    coordinator.clone(),
                    gate.clone(),
                    preempt,
                )),
                frame: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                gate: gate.clone(),
                gate_hook: Cell::new(None),
            }
        });
        shell.install_listeners();
        shell.subscribe_gate();
        shell
            .core
            .borrow()
            .backend()
            .start_loading(image_src, video_src);
        console::log!("live photo: loading", image_src, video_src);
        Ok(Self { shell })
    }

    pub fn id(&self) -> PlayerId {
        self.shell.core.borrow().id()
    }

    pub fn play(&self) {
        self.shell.play();
    }

    pub fn stop(&self) {
        self.shell.stop();
    }

    pub fn destroy(&self) {
        self.shell.destroy();
    }

    pub fn is_ready(&self) -> bool {
        self.shell.core.borrow().is_ready()
    }

    pub fn is_playing(&self) -> bool {
        self.shell.core.borrow().is_playing()
    }

    pub fn has_interacted(&self) -> bool {
        self.shell.core.borrow().has_interacted()
    }

    pub fn load_state(&self) -> LoadState {
        self.shell.core.borrow().load_state().clone()
    }

    pub fn canvas(&self) -> HtmlCanvasElement {
        self.shell.core.borrow().backend().canvas().clone()
    }
}

impl PlayerShell {
    fn install_listeners(self: &Rc<Self>) {
        let (image, video) = {
            let core = self.core.borrow();
            (core.backend().image().clone(), core.backend().video().clone())
        };
        let mut listeners = Vec::new();

        let shell = Rc::downgrade(self);
        listeners.push(EventListener::new(&image, "load", move |_event: &Event| {
            let Some(shell) = shell.upgrade() else {
                return;
            };
            let mut core = shell.core.borrow_mut();
            let size = core.backend().image_size();
            core.on_image_loaded(size);
            log_load_state(core.load_state());
        }));

        let shell = Rc::downgrade(self);
        listeners.push(EventListener::new(&image, "error", move |_event: &Event| {
            let Some(shell) = shell.upgrade() else {
                return;
            };
            let mut core = shell.core.borrow_mut();
            core.on_image_error("image request failed");
            log_load_state(core.load_state());
        }));

        let shell = Rc::downgrade(self);
        listeners.push(EventListener::new(&video, "loadeddata", move |_event: &Event| {
            let Some(shell) = shell.upgrade() else {
                return;
            };
            let mut core = shell.core.borrow_mut();
            core.on_video_loaded();
            log_load_state(core.load_state());
        }));

        let shell = Rc::downgrade(self);
        listeners.push(EventListener::new(&video, "seeked", move |_event: &Event| {
            let Some(shell) = shell.upgrade() else {
                return;
            };
            let mut core = shell.core.borrow_mut();
            let was_ready = core.is_ready();
            core.on_cover_seeked();
            if !was_ready {
                log_load_state(core.load_state());
            }
        }));

        let shell = Rc::downgrade(self);
        listeners.push(EventListener::new(&video, "error", move |_event: &Event| {
            let Some(shell) = shell.upgrade() else {
                return;
            };
            let mut core = shell.core.borrow_mut();
            let message = core.backend().video_error_message();
            console::warn!("live photo: video error", message.clone());
            core.on_video_error(&message);
            log_load_state(core.load_state());
        }));

        let shell = Rc::downgrade(self);
        listeners.push(EventListener::new(&video, "ended", move |_event: &Event| {
            let Some(shell) = shell.upgrade() else {
                return;
            };
            shell.core.borrow_mut().on_video_ended();
            shell.ensure_frame();
        }));

        *self.listeners.borrow_mut() = listeners;
    }

    fn subscribe_gate(self: &Rc<Self>) {
        let shell = Rc::downgrade(self);
        let id = self.gate.subscribe(Rc::new(move || {
            if let Some(shell) = shell.upgrade() {
                shell.core.borrow_mut().on_interaction();
            }
        }));
        self.gate_hook.set(Some(id));
    }

    fn play(self: &Rc<Self>) {
        let request = self.core.borrow_mut().play();
        if let Some(request) = request {
            self.start_media(request);
        }
    }

    fn start_media(self: &Rc<Self>, request: PlayRequest) {
        let promise = self.core.borrow().backend().video().play();
        let promise = match promise {
            Ok(promise) => promise,
            Err(err) => {
                console::warn!("live photo: play threw", js_err(err));
                self.handle_rejection(request.generation);
                return;
            }
        };
        let shell = Rc::clone(self);
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => {
                    shell.core.borrow_mut().on_play_started(request.generation);
                    shell.ensure_frame();
                }
                Err(err) => {
                    console::log!("live photo: play rejected", js_err(err));
                    shell.handle_rejection(request.generation);
                }
            }
        });
    }

    fn handle_rejection(self: &Rc<Self>, generation: u64) {
        let outcome = self.core.borrow_mut().on_play_rejected(generation);
        match outcome {
            Ok(Some(retry)) => self.start_media(retry),
            Ok(None) => {}
            Err(err) => console::warn!("live photo:", err.to_string()),
        }
    }

    fn stop(self: &Rc<Self>) {
        self.core.borrow_mut().stop();
        self.ensure_frame();
    }

    fn destroy(&self) {
        self.core.borrow_mut().destroy();
        self.frame.borrow_mut().take();
        self.listeners.borrow_mut().clear();
        if let Some(id) = self.gate_hook.take() {
            self.gate.unsubscribe(id);
        }
    }

    fn ensure_frame(self: &Rc<Self>) {
        if self.frame.borrow().is_some() || !self.core.borrow().needs_frame() {
            return;
        }
        let shell = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| {
            shell.frame.borrow_mut().take();
            shell.core.borrow_mut().tick(timestamp);
            shell.ensure_frame();
        });
        *self.frame.borrow_mut() = Some(handle);
    }
}

fn log_load_state(state: &LoadState) {
    match state {
        LoadState::Loading | LoadState::SeekingCover => {}
        LoadState::Ready => console::log!("live photo: ready"),
        LoadState::Failed(err) => console::warn!("live photo: load failed", err.to_string()),
    }
}
