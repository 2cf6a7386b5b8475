use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;

/// Which illustration a host asked for at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IllustrationKind {
    /// Orbiting gradient-tinted dots (the warm-up animation).
    OrbitDots,
    /// The narrated motion-blur explainer slideshow.
    MotionBlur,
}

impl IllustrationKind {
    /// Resolves a startup selector string. `None` for unrecognized values;
    /// hosts decide the fallback (see [`IllustrationKind::from_selector_lossy`]).
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "orbit" | "orbit-dots" | "orbit_dots" | "asset01" => Some(Self::OrbitDots),
            "motion-blur" | "motion_blur" | "motionblur" | "asset02" => Some(Self::MotionBlur),
            _ => None,
        }
    }

    /// Like [`IllustrationKind::from_selector`], but unrecognized selectors
    /// log a warning and fall back to the default view.
    pub fn from_selector_lossy(selector: &str) -> Self {
        Self::from_selector(selector).unwrap_or_else(|| {
            tracing::warn!(selector, "unrecognized illustration selector, using default");
            Self::default()
        })
    }
}

impl Default for IllustrationKind {
    fn default() -> Self {
        Self::OrbitDots
    }
}

/// How a scripted step enters or leaves the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    FadeIn,
    Hold,
    FadeOut,
}

/// Whether the frame-buffer shutter is letting light through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutterPose {
    Opened,
    Closed,
}

impl ShutterPose {
    pub fn target_progress(self) -> f64 {
        match self {
            Self::Opened => 1.0,
            Self::Closed => 0.0,
        }
    }
}

/// A linear sweep of scene time shown inside one panel: the panel's clock
/// runs from `start_time` to `end_time` over the wall-clock `duration`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelWindow {
    pub start_time: f64,
    pub end_time: f64,
    pub duration: Duration,
}

impl PanelWindow {
    pub fn new(start_time: f64, end_time: f64, duration: Duration) -> Self {
        Self {
            start_time,
            end_time,
            duration,
        }
    }

    /// The swept scene time after `elapsed` wall-clock time, clamped to the
    /// window. A zero `duration` jumps straight to `end_time`.
    pub fn sweep(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return self.end_time;
        }
        let frac = Ease::Linear.apply(elapsed.as_secs_f64() / self.duration.as_secs_f64());
        self.start_time + (self.end_time - self.start_time) * frac
    }
}

/// What one scripted step shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneContent {
    /// Nothing but the backdrop.
    Blank,
    /// Two panels: the live scene on the left, the accumulating frame buffer
    /// (behind the shutter) on the right, with a narration caption.
    Explainer {
        caption: String,
        scene_window: PanelWindow,
        buffer_window: PanelWindow,
        shutter: ShutterPose,
    },
    /// A single panel showing the finished blur.
    FinalResult { window: PanelWindow },
}

impl SceneContent {
    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::Explainer { caption, .. } => Some(caption),
            Self::Blank | Self::FinalResult { .. } => None,
        }
    }
}
