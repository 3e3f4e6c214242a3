use std::rc::Rc;

use crate::backend::{FrameSource, PlayerBackend, SurfaceSize};
use crate::config::PlayerConfig;
use crate::coordinator::{PlaybackCoordinator, PlayerId};
use crate::error::{LoadError, PlayError};
use crate::gate::InteractionGate;
use crate::transition::{Transition, TransitionFrame, TransitionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    SeekingCover,
    Ready,
    Failed(LoadError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAttempt {
    WithSound,
    Muted,
}

/// Asks the owner to start the media element. The result comes back through
/// `on_play_started` / `on_play_rejected` with the same generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayRequest {
    pub attempt: PlayAttempt,
    pub generation: u64,
}

pub struct LivePhoto<B: PlayerBackend> {
    id: PlayerId,
    backend: B,
    config: PlayerConfig,
    coordinator: PlaybackCoordinator,
    gate: InteractionGate,
    preempt: Rc<dyn Fn()>,
    load: LoadState,
    image_size: Option<SurfaceSize>,
    video_loaded: bool,
    cover: Option<FrameSource>,
    playing: bool,
    has_interacted: bool,
    generation: u64,
    pending: Option<PlayRequest>,
    draw_loop: bool,
    enter: Option<Transition>,
    exit: Option<Transition>,
    destroyed: bool,
}

impl<B: PlayerBackend> LivePhoto<B> {
    /// `preempt` must stop this player; the coordinator calls it when another
    /// player claims the slot.
    pub fn new(
        backend: B,
        config: PlayerConfig,
        coordinator: PlaybackCoordinator,
        gate: InteractionGate,
        preempt: Rc<dyn Fn()>,
    ) -> Self {
        let id = coordinator.allocate_id();
        let mut player = Self {
            id,
            backend,
            config,
            coordinator,
            gate,
            preempt,
            load: LoadState::Loading,
            image_size: None,
            video_loaded: false,
            cover: None,
            playing: false,
            has_interacted: false,
            generation: 0,
            pending: None,
            draw_loop: false,
            enter: None,
            exit: None,
            destroyed: false,
        };
        if player.gate.is_observed() {
            player.on_interaction();
        }
        player
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_ready(&self) -> bool {
        self.load == LoadState::Ready
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn has_interacted(&self) -> bool {
        self.has_interacted
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn cover_source(&self) -> Option<FrameSource> {
        self.cover
    }

    pub fn pending_play(&self) -> Option<PlayRequest> {
        self.pending
    }

    pub fn transition(&self, kind: TransitionKind) -> Option<&Transition> {
        match kind {
            TransitionKind::Enter => self.enter.as_ref(),
            TransitionKind::Exit => self.exit.as_ref(),
        }
    }

    pub fn is_draw_loop_running(&self) -> bool {
        self.draw_loop && self.playing
    }

    /// True while another tick would draw something.
    pub fn needs_frame(&self) -> bool {
        if self.destroyed {
            return false;
        }
        self.exit.is_some() || self.enter.is_some() || self.is_draw_loop_running()
    }

    pub fn on_image_loaded(&mut self, size: SurfaceSize) {
        if self.load != LoadState::Loading {
            return;
        }
        self.image_size = Some(size);
        self.finish_loading();
    }

    pub fn on_video_loaded(&mut self) {
        if self.load != LoadState::Loading {
            return;
        }
        self.video_loaded = true;
        self.finish_loading();
    }

    pub fn on_image_error(&mut self, message: &str) {
        if self.load == LoadState::Loading {
            self.load = LoadState::Failed(LoadError::Image(message.to_string()));
        }
    }

    /// A video error while the cover seek is pending counts as a failed seek.
    pub fn on_video_error(&mut self, message: &str) {
        match self.load {
            LoadState::Loading => {
                self.load = LoadState::Failed(LoadError::Video(message.to_string()));
            }
            LoadState::SeekingCover => self.on_cover_seek_failed(),
            LoadState::Ready | LoadState::Failed(_) => {}
        }
    }

    pub fn on_cover_seeked(&mut self) {
        if self.load != LoadState::SeekingCover {
            return;
        }
        self.draw_cover(FrameSource::Video);
    }

    pub fn on_cover_seek_failed(&mut self) {
        if self.load != LoadState::SeekingCover {
            return;
        }
        self.draw_cover(FrameSource::Image);
    }

    fn finish_loading(&mut self) {
        let Some(size) = self.image_size else {
            return;
        };
        if !self.video_loaded || self.destroyed {
            return;
        }
        self.backend.resize(size);
        match self.backend.seek(self.config.cover_time_s) {
            Ok(()) => self.load = LoadState::SeekingCover,
            Err(_) => self.draw_cover(FrameSource::Image),
        }
    }

    fn draw_cover(&mut self, preferred: FrameSource) {
        let size = self.backend.size();
        let (width, height) = (size.width as f64, size.height as f64);
        let mut source = preferred;
        if self.backend.draw(source, 0.0, 0.0, width, height).is_err()
            && source == FrameSource::Video
        {
            source = FrameSource::Image;
            let _ = self.backend.draw(source, 0.0, 0.0, width, height);
        }
        self.cover = Some(source);
        self.load = LoadState::Ready;
    }

    pub fn on_interaction(&mut self) {
        if self.destroyed {
            return;
        }
        self.has_interacted = true;
        self.backend.set_muted(false);
    }

    pub fn play(&mut self) -> Option<PlayRequest> {
        if self.destroyed || !self.is_ready() || self.playing {
            return None;
        }
        self.coordinator.acquire(self.id, Rc::clone(&self.preempt));
        self.playing = true;
        let _ = self.backend.seek(0.0);
        let attempt = if self.backend.is_muted() {
            PlayAttempt::Muted
        } else {
            PlayAttempt::WithSound
        };
        self.generation = self.generation.wrapping_add(1);
        let request = PlayRequest {
            attempt,
            generation: self.generation,
        };
        self.pending = Some(request);
        Some(request)
    }

    pub fn on_play_started(&mut self, generation: u64) {
        let current = self.pending.is_some_and(|request| request.generation == generation);
        if !current {
            // resolved after stop(); keep the element quiet
            if !self.playing && !self.destroyed {
                self.backend.pause();
            }
            return;
        }
        self.pending = None;
        self.enter = Some(Transition::new(
            TransitionKind::Enter,
            self.config.fade_duration_ms,
            self.config.scale_factor,
        ));
        self.draw_loop = true;
    }

    /// Returns the muted retry to issue, if any.
    pub fn on_play_rejected(&mut self, generation: u64) -> Result<Option<PlayRequest>, PlayError> {
        let Some(request) = self.pending else {
            return Ok(None);
        };
        if request.generation != generation {
            return Ok(None);
        }
        match request.attempt {
            PlayAttempt::WithSound => {
                self.backend.set_muted(true);
                let retry = PlayRequest {
                    attempt: PlayAttempt::Muted,
                    generation,
                };
                self.pending = Some(retry);
                Ok(Some(retry))
            }
            PlayAttempt::Muted => {
                self.pending = None;
                self.playing = false;
                self.backend.pause();
                self.coordinator.release(self.id);
                Err(PlayError::Rejected)
            }
        }
    }

    pub fn on_video_ended(&mut self) {
        self.stop();
    }

    pub fn stop(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        self.pending = None;
        self.draw_loop = false;
        self.backend.pause();
        let _ = self.backend.seek(0.0);
        self.coordinator.release(self.id);
        self.exit = Some(Transition::new(
            TransitionKind::Exit,
            self.config.fade_duration_ms,
            self.config.scale_factor,
        ));
    }

    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.stop();
        self.enter = None;
        self.exit = None;
        self.pending = None;
        self.backend.release();
        self.backend.clear();
        self.destroyed = true;
    }

    /// Advances every running animation by one display refresh.
    ///
    /// Draw order per refresh: exit frame, enter frame, plain video frame. The
    /// exit transition is never gated on `playing`; the enter transition and
    /// the draw loop stop as soon as `playing` is false.
    pub fn tick(&mut self, now_ms: f64) {
        if self.destroyed {
            return;
        }
        if let Some(frame) = self.exit.as_mut().map(|exit| exit.sample(now_ms)) {
            self.draw_transition(FrameSource::Image, frame);
            if frame.is_complete() {
                self.exit = None;
            }
        }
        if !self.playing {
            self.enter = None;
            self.draw_loop = false;
            return;
        }
        if let Some(frame) = self.enter.as_mut().map(|enter| enter.sample(now_ms)) {
            self.draw_transition(FrameSource::Video, frame);
            if frame.is_complete() {
                self.enter = None;
            }
        }
        if self.draw_loop {
            self.draw_video_frame();
        }
    }

    fn draw_video_frame(&mut self) {
        let size = self.backend.size();
        self.backend.clear();
        let _ = self.backend.draw(
            FrameSource::Video,
            0.0,
            0.0,
            size.width as f64,
            size.height as f64,
        );
    }

    fn draw_transition(&mut self, source: FrameSource, frame: TransitionFrame) {
        let size = self.backend.size();
        let (width, height) = (size.width as f64, size.height as f64);
        self.backend.save();
        self.backend.clear();
        self.backend.set_opacity(frame.opacity);
        self.backend.translate(width / 2.0, height / 2.0);
        self.backend.scale(frame.scale, frame.scale);
        let _ = self
            .backend
            .draw(source, -width / 2.0, -height / 2.0, width, height);
        self.backend.restore();
    }
}
