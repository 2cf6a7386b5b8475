use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ShutterboxError, ShutterboxResult};
use crate::scene::model::{PanelWindow, SceneContent, ShutterPose, Transition};

/// One entry of the slideshow state machine: what to show, how it appears,
/// and how long it holds before the next step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub content: SceneContent,
    pub transition: Transition,
    pub hold: Duration,
}

impl ScriptStep {
    pub fn new(content: SceneContent, transition: Transition, hold: Duration) -> Self {
        Self {
            content,
            transition,
            hold,
        }
    }
}

/// An ordered, non-empty table of steps advanced by elapsed time, wrapping
/// after the last step. Zero-length holds are rejected so a sequencer can
/// never spin in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScriptStep>", into = "Vec<ScriptStep>")]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    pub fn new(steps: Vec<ScriptStep>) -> ShutterboxResult<Self> {
        if steps.is_empty() {
            return Err(ShutterboxError::validation(
                "script needs at least one step",
            ));
        }
        if steps.iter().any(|s| s.hold.is_zero()) {
            return Err(ShutterboxError::validation(
                "script steps must hold for a non-zero duration",
            ));
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.hold).sum()
    }

    /// Maps an absolute time (wrapped modulo the script length) to the active
    /// step index and the elapsed time within that step.
    pub fn locate(&self, at: Duration) -> (usize, Duration) {
        let total = self.total_duration();
        let mut rem = Duration::from_nanos((at.as_nanos() % total.as_nanos()) as u64);
        for (index, step) in self.steps.iter().enumerate() {
            if rem < step.hold {
                return (index, rem);
            }
            rem -= step.hold;
        }
        (0, Duration::ZERO)
    }

    /// The built-in narrated explainer: a moving circle, a shutter that opens
    /// and closes over a frame buffer, and the accumulated final blur.
    pub fn motion_blur_explainer() -> Self {
        let scene_window = PanelWindow::new(-8.0, 8.0, Duration::from_secs(16));
        let buffer_closed = PanelWindow::new(-4.0, -4.0, Duration::ZERO);
        let buffer_open = PanelWindow::new(-4.0, 4.0, Duration::from_secs(8));
        let final_window = PanelWindow::new(-4.0, 4.0, Duration::from_secs(8));

        let explainer = |caption: &str, buffer_window: PanelWindow, shutter: ShutterPose| {
            SceneContent::Explainer {
                caption: caption.to_owned(),
                scene_window,
                buffer_window,
                shutter,
            }
        };

        let steps = vec![
            ScriptStep::new(SceneContent::Blank, Transition::Hold, Duration::from_millis(500)),
            ScriptStep::new(
                explainer(
                    "The scene contains a moving circle. The frame-buffer shutter is closed.",
                    buffer_closed,
                    ShutterPose::Closed,
                ),
                Transition::FadeIn,
                Duration::from_secs(4),
            ),
            ScriptStep::new(
                explainer(
                    "The circle keeps moving, and the shutter has just opened.",
                    buffer_open,
                    ShutterPose::Opened,
                ),
                Transition::Hold,
                Duration::from_secs(4),
            ),
            ScriptStep::new(
                explainer(
                    "The frame buffer keeps accumulating light from the scene.",
                    buffer_open,
                    ShutterPose::Opened,
                ),
                Transition::Hold,
                Duration::from_secs(4),
            ),
            ScriptStep::new(
                explainer(
                    "The circle keeps moving, and the frame-buffer shutter closes.",
                    buffer_open,
                    ShutterPose::Closed,
                ),
                Transition::Hold,
                Duration::from_secs(4),
            ),
            ScriptStep::new(
                explainer(
                    "The circle keeps moving, and the frame-buffer shutter closes.",
                    buffer_open,
                    ShutterPose::Closed,
                ),
                Transition::FadeOut,
                Duration::from_millis(500),
            ),
            ScriptStep::new(
                SceneContent::FinalResult {
                    window: final_window,
                },
                Transition::FadeIn,
                Duration::from_secs(8),
            ),
            ScriptStep::new(
                SceneContent::FinalResult {
                    window: final_window,
                },
                Transition::FadeOut,
                Duration::from_millis(500),
            ),
        ];

        Self::new(steps).expect("built-in script is valid")
    }
}

impl TryFrom<Vec<ScriptStep>> for Script {
    type Error = ShutterboxError;

    fn try_from(steps: Vec<ScriptStep>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<Script> for Vec<ScriptStep> {
    fn from(script: Script) -> Self {
        script.steps
    }
}

/// Live driver for a [`Script`]: feed it frame deltas, read the active step.
///
/// Steps advance on accumulated time with exact carry (a long frame can skip
/// several steps without drifting), and the sequence wraps indefinitely.
#[derive(Clone, Debug)]
pub struct Sequencer {
    script: Script,
    index: usize,
    in_step: Duration,
}

impl Sequencer {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            index: 0,
            in_step: Duration::ZERO,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn elapsed_in_step(&self) -> Duration {
        self.in_step
    }

    pub fn current(&self) -> &ScriptStep {
        &self.script.steps()[self.index]
    }

    pub fn advance(&mut self, dt: Duration) {
        self.in_step += dt;
        while self.in_step >= self.current().hold {
            self.in_step -= self.current().hold;
            self.index = (self.index + 1) % self.script.steps().len();
        }
    }
}
