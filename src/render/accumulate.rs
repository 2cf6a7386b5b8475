use kurbo::Point;

use crate::foundation::error::{ShutterboxError, ShutterboxResult};
use crate::paint::color::ColorDef;
use crate::render::surface::Surface;

/// An exposure window: the span of scene time a shutter stays open, and how
/// densely that span is sampled.
///
/// Sample times are `start + k / sampling_rate` for ascending `k`, strictly
/// below `target`; an empty window (`start >= target`) yields no samples and
/// is not an error. Each sample carries alpha `1 / sampling_rate`, so the
/// alphas of a full one-second window sum to one: the discrete analogue of a
/// real shutter integrating incoming light over the interval.
#[derive(Clone, Copy, Debug)]
pub struct Exposure {
    start: f64,
    target: f64,
    sampling_rate: f64,
}

impl Exposure {
    pub fn new(start: f64, target: f64, sampling_rate: f64) -> ShutterboxResult<Self> {
        if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
            return Err(ShutterboxError::validation(
                "exposure sampling rate must be finite and > 0",
            ));
        }
        Ok(Self {
            start,
            target,
            sampling_rate,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Opacity of one drawn sample.
    pub fn sample_alpha(&self) -> f64 {
        1.0 / self.sampling_rate
    }

    /// The sample times of this exposure, in order.
    pub fn sample_times(&self) -> impl Iterator<Item = f64> + '_ {
        let step_rate = self.sampling_rate;
        let start = self.start;
        let target = self.target;
        (0u64..)
            .map(move |k| start + k as f64 / step_rate)
            .take_while(move |&t| t < target)
    }
}

/// Composites time samples of a moving disc into `surface`.
///
/// For each sample time the disc is drawn at `position(t)` with constant
/// alpha `exposure.sample_alpha()`; over many samples the overlapping
/// low-weight discs converge to the motion-blur integral of the trajectory.
/// Low sampling rates produce visible banding, which is the expected
/// behavior of a coarsely sampled shutter, not an error.
pub fn accumulate<F>(
    surface: &mut Surface,
    exposure: &Exposure,
    position: F,
    radius: f64,
    color: ColorDef,
) where
    F: Fn(f64) -> Point,
{
    let sample_color = color.with_alpha(exposure.sample_alpha());
    for t in exposure.sample_times() {
        surface.fill_disc(position(t), radius, sample_color);
    }
}
