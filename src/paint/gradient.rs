use crate::foundation::error::{ShutterboxError, ShutterboxResult};
use crate::paint::color::ColorDef;

/// One-dimensional color gradient over an ordered, non-empty stop list.
///
/// Sampling takes a normalized factor: `0.0` is the first stop, `1.0` the
/// last, intermediate values interpolate linearly between adjacent stops.
/// Stateless after construction and deterministic, so it is safe to share
/// across frames.
#[derive(Clone, Debug)]
pub struct Gradient {
    stops: Vec<ColorDef>,
}

impl Gradient {
    pub fn new(stops: Vec<ColorDef>) -> ShutterboxResult<Self> {
        if stops.is_empty() {
            return Err(ShutterboxError::validation(
                "gradient needs at least one color stop",
            ));
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[ColorDef] {
        &self.stops
    }

    /// Interpolated color at `factor`; out-of-range factors are clamped.
    pub fn color_at(&self, factor: f64) -> ColorDef {
        let last = self.stops.len() - 1;
        if last == 0 {
            return self.stops[0];
        }

        let scaled = factor.clamp(0.0, 1.0) * last as f64;
        let index = scaled.floor() as usize;
        let frac = scaled - index as f64;

        let c0 = self.stops[index];
        let c1 = self.stops[(index + 1).min(last)];
        ColorDef::lerp(c0, c1, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stop_list_is_rejected() {
        let err = Gradient::new(vec![]).unwrap_err();
        assert!(matches!(err, ShutterboxError::Validation(_)));
    }

    #[test]
    fn endpoints_return_stops_exactly() {
        let c0 = ColorDef::rgba(0.1, 0.2, 0.3, 1.0);
        let c1 = ColorDef::rgba(0.9, 0.8, 0.7, 0.5);
        let g = Gradient::new(vec![c0, c1]).unwrap();
        assert_eq!(g.color_at(0.0), c0);
        assert_eq!(g.color_at(1.0), c1);
    }

    #[test]
    fn midpoint_is_channel_wise_average() {
        let c0 = ColorDef::rgba(0.0, 0.0, 0.0, 1.0);
        let c1 = ColorDef::rgba(1.0, 0.5, 0.25, 0.0);
        let g = Gradient::new(vec![c0, c1]).unwrap();
        let mid = g.color_at(0.5);
        assert!((mid.r - 0.5).abs() < 1e-12);
        assert!((mid.g - 0.25).abs() < 1e-12);
        assert!((mid.b - 0.125).abs() < 1e-12);
        assert!((mid.a - 0.5).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_factors_clamp() {
        let c0 = ColorDef::BLACK;
        let c1 = ColorDef::WHITE;
        let g = Gradient::new(vec![c0, c1]).unwrap();
        assert_eq!(g.color_at(-3.0), c0);
        assert_eq!(g.color_at(42.0), c1);
    }

    #[test]
    fn single_stop_is_constant() {
        let g = Gradient::new(vec![ColorDef::RED]).unwrap();
        assert_eq!(g.color_at(0.0), ColorDef::RED);
        assert_eq!(g.color_at(0.37), ColorDef::RED);
        assert_eq!(g.color_at(1.0), ColorDef::RED);
    }

    #[test]
    fn interior_stops_are_continuous() {
        let g = Gradient::new(vec![
            ColorDef::rgba(0.0, 0.0, 0.0, 1.0),
            ColorDef::rgba(0.5, 0.5, 0.5, 1.0),
            ColorDef::rgba(1.0, 1.0, 1.0, 1.0),
        ])
        .unwrap();

        let eps = 1e-9;
        let before = g.color_at(0.5 - eps);
        let at = g.color_at(0.5);
        assert!((before.r - at.r).abs() < 1e-6);
    }
}
