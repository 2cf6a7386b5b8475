use std::time::{Duration, Instant};

use crate::foundation::core::FrameTime;

/// Floor applied to every measured frame delta, so consumers can divide by
/// `dt` without guarding against zero.
pub const MIN_FRAME_DELTA: Duration = Duration::from_nanos(1);

const NOMINAL_FRAME_DELTA: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Monotonic per-frame clock.
///
/// The clock is not a free-running timer: the host calls [`FrameClock::tick`]
/// exactly once per display refresh, and the models read the resulting
/// [`FrameTime`]. `t` counts seconds from the first tick; `dt` is the delta
/// since the previous tick, floored to [`MIN_FRAME_DELTA`]. Before the first
/// tick, `dt` reports a configurable nominal interval (default 1/60 s) so
/// consumers that integrate by `dt` have a sane bootstrap value.
#[derive(Clone, Debug)]
pub struct FrameClock {
    nominal_dt: Duration,
    origin: Option<Instant>,
    last: Option<Instant>,
    current: FrameTime,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_nominal_dt(NOMINAL_FRAME_DELTA)
    }

    /// A clock whose pre-first-tick `dt` is `nominal` (floored to the minimum).
    pub fn with_nominal_dt(nominal: Duration) -> Self {
        let nominal_dt = nominal.max(MIN_FRAME_DELTA);
        Self {
            nominal_dt,
            origin: None,
            last: None,
            current: FrameTime {
                t: 0.0,
                dt: nominal_dt.as_secs_f64(),
            },
        }
    }

    /// Advances the clock to `now` and returns the new frame time.
    ///
    /// Host clocks occasionally report non-advancing instants; the delta is
    /// measured with saturating arithmetic and floored, never negative or
    /// zero.
    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let origin = *self.origin.get_or_insert(now);
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).max(MIN_FRAME_DELTA),
            None => MIN_FRAME_DELTA,
        };
        self.last = Some(now);
        self.current = FrameTime {
            t: now.saturating_duration_since(origin).as_secs_f64(),
            dt: dt.as_secs_f64(),
        };
        self.current
    }

    /// The most recent frame time (the nominal bootstrap value before any
    /// tick).
    pub fn current(&self) -> FrameTime {
        self.current
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_nominal_dt_before_first_tick() {
        let clock = FrameClock::new();
        assert_eq!(clock.current().t, 0.0);
        assert!((clock.current().dt - 1.0 / 60.0).abs() < 1e-9);

        let clock = FrameClock::with_nominal_dt(Duration::from_millis(8));
        assert!((clock.current().dt - 0.008).abs() < 1e-12);
    }

    #[test]
    fn dt_never_drops_below_the_floor() {
        let mut clock = FrameClock::new();
        let now = Instant::now();
        let first = clock.tick(now);
        assert!(first.dt >= MIN_FRAME_DELTA.as_secs_f64());

        // Same instant twice: raw delta is zero, floor must hold.
        let again = clock.tick(now);
        assert_eq!(again.dt, MIN_FRAME_DELTA.as_secs_f64());
        assert_eq!(again.t, 0.0);
    }

    #[test]
    fn t_tracks_elapsed_time_from_first_tick() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick(start);

        let later = start + Duration::from_millis(250);
        let frame = clock.tick(later);
        assert!((frame.t - 0.25).abs() < 1e-9);
        assert!((frame.dt - 0.25).abs() < 1e-9);
    }

    #[test]
    fn zero_nominal_dt_is_floored() {
        let clock = FrameClock::with_nominal_dt(Duration::ZERO);
        assert_eq!(clock.current().dt, MIN_FRAME_DELTA.as_secs_f64());
    }
}
