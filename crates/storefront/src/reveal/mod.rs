//! Intro animation gate for the browse screen.
//!
//! The home screen opens with the store title centered. After a short pause
//! the title shrinks and slides up into the header, and only then do the
//! header controls and the browse content fade in. Until that happens the
//! browse surface is not mounted.
//!
//! [`RevealSequencer`] is the bare state machine, with one transition per
//! stage and no notion of time. [`RevealDriver`] runs it on tokio timers.
//!
//! ```text
//! Idle ─mount─▶ AnimatingIntro ─intro_elapsed─▶ AnimatingToHeader ─transform_finished─▶ Revealed
//!                     │                                 │
//!                     └──────────teardown───────────────┴──▶ Cancelled
//! ```

use std::time::Duration;

mod driver;

pub use driver::{RevealDriver, RevealHandle};

/// Timing and geometry of the reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTimings {
    /// Pause before the title starts moving.
    pub intro_delay: Duration,
    /// Length of the title's move into the header.
    pub transform_duration: Duration,
    /// Fade-in of the header controls.
    pub header_fade: Duration,
    /// Fade-in of the browse content.
    pub content_fade: Duration,
    /// Height of the viewport the title travels across, in points.
    pub viewport_height: f32,
}

impl Default for RevealTimings {
    fn default() -> Self {
        Self {
            intro_delay: Duration::from_millis(2000),
            transform_duration: Duration::from_millis(800),
            header_fade: Duration::from_millis(400),
            content_fade: Duration::from_millis(600),
            viewport_height: 844.0,
        }
    }
}

/// Stage of the reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealPhase {
    /// Not mounted yet.
    Idle,
    /// Title shown centered, waiting for the intro delay.
    AnimatingIntro,
    /// Title moving into the header.
    AnimatingToHeader,
    /// Browse content visible. Terminal.
    Revealed,
    /// Host view torn down before the reveal finished. Terminal.
    Cancelled,
}

impl RevealPhase {
    /// Whether no further transition can happen.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Revealed | Self::Cancelled)
    }
}

/// Snapshot of the reveal published to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    pub phase: RevealPhase,
    /// Flips to `true` once, when the reveal completes, and never back.
    pub content_visible: bool,
}

/// Scale and offset applied to the title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl TitleTransform {
    /// Centered, full size.
    pub const CENTERED: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Docked in the header for a viewport of `viewport_height`.
    #[must_use]
    pub fn docked(viewport_height: f32) -> Self {
        Self {
            scale: 0.6,
            translate_x: 0.0,
            translate_y: -viewport_height * 0.76,
        }
    }

    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Self {
            scale: (to.scale - from.scale).mul_add(t, from.scale),
            translate_x: (to.translate_x - from.translate_x).mul_add(t, from.translate_x),
            translate_y: (to.translate_y - from.translate_y).mul_add(t, from.translate_y),
        }
    }
}

/// The title's combined move into the header. All three properties run
/// together over the same duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleAnimation {
    pub from: TitleTransform,
    pub to: TitleTransform,
    pub duration: Duration,
}

impl TitleAnimation {
    /// Transform `elapsed` into the animation (linear, clamped).
    #[must_use]
    pub fn at(&self, elapsed: Duration) -> TitleTransform {
        TitleTransform::lerp(self.from, self.to, progress(elapsed, self.duration))
    }
}

/// What a fade-in applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FadeTarget {
    HeaderControls,
    Content,
}

/// An opacity ramp from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeIn {
    pub target: FadeTarget,
    pub duration: Duration,
}

impl FadeIn {
    /// Opacity `elapsed` into the fade (linear, clamped).
    #[must_use]
    pub fn opacity_at(&self, elapsed: Duration) -> f32 {
        progress(elapsed, self.duration)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0) as f32
}

/// One-shot reveal state machine.
///
/// Each transition only fires from its own stage and returns `None` (or
/// `false`) otherwise, so completion can be observed at most once and never
/// after teardown.
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    timings: RevealTimings,
    phase: RevealPhase,
    content_visible: bool,
}

impl RevealSequencer {
    #[must_use]
    pub const fn new(timings: RevealTimings) -> Self {
        Self {
            timings,
            phase: RevealPhase::Idle,
            content_visible: false,
        }
    }

    #[must_use]
    pub const fn timings(&self) -> &RevealTimings {
        &self.timings
    }

    #[must_use]
    pub const fn phase(&self) -> RevealPhase {
        self.phase
    }

    #[must_use]
    pub const fn content_visible(&self) -> bool {
        self.content_visible
    }

    #[must_use]
    pub const fn state(&self) -> RevealState {
        RevealState {
            phase: self.phase,
            content_visible: self.content_visible,
        }
    }

    /// Show the title. Returns how long to wait before [`Self::intro_elapsed`].
    pub const fn mount(&mut self) -> Option<Duration> {
        if !matches!(self.phase, RevealPhase::Idle) {
            return None;
        }
        self.phase = RevealPhase::AnimatingIntro;
        Some(self.timings.intro_delay)
    }

    /// The intro delay passed. Returns the title animation to run before
    /// [`Self::transform_finished`].
    pub fn intro_elapsed(&mut self) -> Option<TitleAnimation> {
        if self.phase != RevealPhase::AnimatingIntro {
            return None;
        }
        self.phase = RevealPhase::AnimatingToHeader;
        Some(TitleAnimation {
            from: TitleTransform::CENTERED,
            to: TitleTransform::docked(self.timings.viewport_height),
            duration: self.timings.transform_duration,
        })
    }

    /// The title animation finished. Makes the content visible and returns
    /// the two fade-ins to start, both at once.
    pub const fn transform_finished(&mut self) -> Option<[FadeIn; 2]> {
        if !matches!(self.phase, RevealPhase::AnimatingToHeader) {
            return None;
        }
        self.phase = RevealPhase::Revealed;
        self.content_visible = true;
        Some([
            FadeIn {
                target: FadeTarget::HeaderControls,
                duration: self.timings.header_fade,
            },
            FadeIn {
                target: FadeTarget::Content,
                duration: self.timings.content_fade,
            },
        ])
    }

    /// The host view went away. Returns `true` if a pending stage was
    /// cancelled. A completed reveal is left as it is.
    pub const fn teardown(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = RevealPhase::Cancelled;
        true
    }
}
