#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Enter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    pub progress: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl TransitionFrame {
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Fraction of `duration_ms` covered by `elapsed_ms`, saturating at 0 and 1.
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms.is_nan() || duration_ms <= 0.0 {
        return 1.0;
    }
    if elapsed_ms.is_nan() {
        return 0.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

pub fn frame_at(kind: TransitionKind, progress: f64, scale_factor: f64) -> TransitionFrame {
    let p = progress.clamp(0.0, 1.0);
    let delta = scale_factor - 1.0;
    match kind {
        TransitionKind::Enter => TransitionFrame {
            progress: p,
            opacity: p,
            scale: 1.0 + delta * p,
        },
        TransitionKind::Exit => TransitionFrame {
            progress: p,
            opacity: 1.0 - p,
            scale: scale_factor - delta * p,
        },
    }
}

/// One fade+scale run. The start time is latched by the first `sample`, so a
/// transition created between frames begins at progress 0 on the next tick.
#[derive(Debug, Clone)]
pub struct Transition {
    kind: TransitionKind,
    duration_ms: f64,
    scale_factor: f64,
    started_at: Option<f64>,
    last_progress: f64,
}

impl Transition {
    pub fn new(kind: TransitionKind, duration_ms: f64, scale_factor: f64) -> Self {
        Self {
            kind,
            duration_ms,
            scale_factor,
            started_at: None,
            last_progress: 0.0,
        }
    }

    pub fn last_progress(&self) -> f64 {
        self.last_progress
    }

    pub fn sample(&mut self, now_ms: f64) -> TransitionFrame {
        let start = *self.started_at.get_or_insert(now_ms);
        // a clock stepping backwards never rewinds the animation
        let p = progress(now_ms - start, self.duration_ms).max(self.last_progress);
        self.last_progress = p;
        frame_at(self.kind, p, self.scale_factor)
    }
}
