use std::f64::consts::{PI, TAU};

use kurbo::{Affine, BezPath, Vec2};

use crate::foundation::core::Canvas;
use crate::foundation::error::{ShutterboxError, ShutterboxResult};

/// Camera-shutter geometry: `n` identical triangular wedges rotated around a
/// shared center.
///
/// `progress` drives the aperture: 0 leaves the wedges maximally overlapped
/// (closed), 1 pulls each blade outward along its own rotated frame (open).
/// Fewer than 4 blades cannot cover the aperture and is rejected at
/// construction.
#[derive(Clone, Copy, Debug)]
pub struct ShutterBlades {
    blade_count: u32,
}

impl ShutterBlades {
    pub fn new(blade_count: u32) -> ShutterboxResult<Self> {
        if blade_count < 4 {
            return Err(ShutterboxError::validation(format!(
                "shutter needs at least 4 blades, got {blade_count}"
            )));
        }
        Ok(Self { blade_count })
    }

    pub fn blade_count(self) -> u32 {
        self.blade_count
    }

    /// Blade polygons in canvas coordinates, one path per blade.
    ///
    /// Out-of-range `progress` is clamped. Blades are staggered by a quarter
    /// step so overlapping wedges pinwheel instead of stacking.
    pub fn blade_paths(self, progress: f64, canvas: Canvas) -> Vec<BezPath> {
        let progress = progress.clamp(0.0, 1.0);
        let n = f64::from(self.blade_count);
        let m = canvas.min_dimension();

        let wedge_tan = (TAU / n).tan();
        let shift_tan = (PI / 2.0 - PI / n).tan();

        let mut wedge = BezPath::new();
        wedge.move_to((0.0, 0.0));
        wedge.line_to((m, 0.0));
        wedge.line_to((m, m * wedge_tan));
        wedge.close_path();

        let step = TAU / n;
        let shift = Vec2::new(progress * m / shift_tan, -progress * m);
        let center = canvas.center().to_vec2();

        (0..self.blade_count)
            .map(|i| {
                let rotation = step * f64::from(i) + 0.25 * step;
                let place = Affine::translate(center)
                    * Affine::rotate(rotation)
                    * Affine::translate(shift);
                place * wedge.clone()
            })
            .collect()
    }
}
