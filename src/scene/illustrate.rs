use std::time::Duration;

use kurbo::{Rect, Shape, Vec2};

use crate::animation::ease::Ease;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ShutterboxError, ShutterboxResult};
use crate::geometry::shutter::ShutterBlades;
use crate::motion::orbit::OrbitField;
use crate::paint::color::ColorDef;
use crate::paint::gradient::Gradient;
use crate::render::accumulate::{Exposure, accumulate};
use crate::render::surface::Surface;
use crate::scene::model::{IllustrationKind, PanelWindow, SceneContent, ShutterPose, Transition};
use crate::scene::script::Script;

const ORBIT_POINT_COUNT: usize = 16;
const ORBIT_DOT_RADIUS: f64 = 16.0;
const ORBIT_PADDING: f64 = 16.0;

const DISC_RADIUS: f64 = 24.0;
/// Scene-units-per-second drift of the explainer disc.
const DRIFT: Vec2 = Vec2::new(32.0, -12.0);
const SAMPLING_RATE: f64 = 60.0;
const BLADE_COUNT: u32 = 9;

const PANEL_PADDING: u32 = 32;
const PANEL_GAP: u32 = 32;
// Diagram panels keep a 13:9 frame.
const PANEL_ASPECT_NUM: u32 = 13;
const PANEL_ASPECT_DEN: u32 = 9;
const FINAL_PANEL: (u32, u32) = (592, 410);

const PANEL_BORDER_WIDTH: f64 = 1.0;
const SHUTTER_STROKE_WIDTH: f64 = 2.0;
const SHUTTER_FILL: ColorDef = ColorDef::rgba(254.0 / 255.0, 254.0 / 255.0, 254.0 / 255.0, 15.0 / 255.0);

const FADE_DURATION: Duration = Duration::from_millis(300);
const SHUTTER_ANIM_DURATION: Duration = Duration::from_millis(300);

/// Renders the demo's illustrations into offscreen surfaces.
///
/// All configuration (orbit phases, palettes, blade geometry) is computed at
/// construction; every `render_*` call is a pure function of elapsed time,
/// so any frame can be produced out of order and reproduced bit-for-bit.
pub struct IllustrationRenderer {
    canvas: Canvas,
    orbit: OrbitField,
    palette: Gradient,
    backdrop: Gradient,
    shutter: ShutterBlades,
}

impl IllustrationRenderer {
    pub fn new(canvas: Canvas) -> ShutterboxResult<Self> {
        let palette = Gradient::new(vec![
            ColorDef::rgba(0xF2 as f64 / 255.0, 0xA1 as f64 / 255.0, 0xAE as f64 / 255.0, 1.0),
            ColorDef::rgba(0xF4 as f64 / 255.0, 0xBE as f64 / 255.0, 0x82 as f64 / 255.0, 1.0),
            ColorDef::rgba(0xF2 as f64 / 255.0, 0xE3 as f64 / 255.0, 0x7A as f64 / 255.0, 1.0),
            ColorDef::rgba(0x8E as f64 / 255.0, 0xDB as f64 / 255.0, 0xC4 as f64 / 255.0, 1.0),
            ColorDef::rgba(0x9C as f64 / 255.0, 0xBF as f64 / 255.0, 0xE0 as f64 / 255.0, 1.0),
            ColorDef::rgba(0xB9 as f64 / 255.0, 0xAE as f64 / 255.0, 0xDD as f64 / 255.0, 1.0),
        ])?;
        let backdrop = Gradient::new(vec![
            ColorDef::WHITE,
            ColorDef::rgba(0xE0 as f64 / 255.0, 0xE0 as f64 / 255.0, 0xE0 as f64 / 255.0, 1.0),
        ])?;
        Ok(Self {
            canvas,
            orbit: OrbitField::new(ORBIT_POINT_COUNT)?,
            palette,
            backdrop,
            shutter: ShutterBlades::new(BLADE_COUNT)?,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Dispatches on the startup selector: the orbit warm-up animation or a
    /// frame of the scripted explainer.
    pub fn render_illustration(
        &self,
        kind: IllustrationKind,
        script: &Script,
        at: Duration,
    ) -> ShutterboxResult<Surface> {
        match kind {
            IllustrationKind::OrbitDots => self.render_orbit(at.as_secs_f64()),
            IllustrationKind::MotionBlur => self.render_script_frame(script, at),
        }
    }

    /// The orbit diagram: gradient-tinted dots on wobbling orbits.
    #[tracing::instrument(skip(self))]
    pub fn render_orbit(&self, t: f64) -> ShutterboxResult<Surface> {
        let mut frame = Surface::new(self.canvas)?;
        frame.fill_vertical_gradient(&self.backdrop);

        let center = self.canvas.center();
        let orbit_radius = (0.5 * self.canvas.min_dimension() - ORBIT_PADDING).max(0.0);

        for i in 0..self.orbit.len() {
            let factor = i as f64 / self.orbit.len() as f64;
            let color = self.palette.color_at(factor);
            let pos = center + self.orbit.position(i, t, orbit_radius);
            frame.fill_disc(pos, ORBIT_DOT_RADIUS, color);
        }
        Ok(frame)
    }

    /// One frame of the scripted explainer at an absolute time (wrapped
    /// modulo the script length).
    pub fn render_script_frame(&self, script: &Script, at: Duration) -> ShutterboxResult<Surface> {
        let (index, elapsed) = script.locate(at);
        self.render_step(script, index, elapsed)
    }

    /// Renders step `index` of `script` after `elapsed` time within the step.
    #[tracing::instrument(skip(self, script))]
    pub fn render_step(
        &self,
        script: &Script,
        index: usize,
        elapsed: Duration,
    ) -> ShutterboxResult<Surface> {
        let step = script
            .steps()
            .get(index)
            .ok_or_else(|| ShutterboxError::animation("script step index out of range"))?;

        let mut frame = Surface::new(self.canvas)?;
        frame.fill_vertical_gradient(&self.backdrop);

        let alpha = fade_alpha(step.transition, elapsed);
        if alpha <= 0.0 {
            return Ok(frame);
        }

        let overlay = match &step.content {
            SceneContent::Blank => None,
            SceneContent::Explainer {
                scene_window,
                buffer_window,
                shutter,
                ..
            } => Some(self.render_explainer(
                script,
                index,
                elapsed,
                scene_window,
                buffer_window,
                *shutter,
            )?),
            SceneContent::FinalResult { window } => Some(self.render_final_result(window)?),
        };

        if let Some(mut overlay) = overlay {
            overlay.scale_alpha(alpha);
            frame.blit_over(&overlay, 0, 0);
        }
        Ok(frame)
    }

    fn render_explainer(
        &self,
        script: &Script,
        index: usize,
        elapsed: Duration,
        scene_window: &PanelWindow,
        buffer_window: &PanelWindow,
        shutter: ShutterPose,
    ) -> ShutterboxResult<Surface> {
        let mut overlay = Surface::new(self.canvas)?;
        let (panel, left_origin, right_origin) = explainer_layout(self.canvas);
        let panel_center = panel.center();

        // Left panel: the live scene. The sweep keeps running across
        // consecutive steps that reuse the same window.
        let scene_t = scene_window.sweep(window_elapsed(script, index, elapsed, scene_window));
        let mut left = self.panel_surface(panel)?;
        left.fill_disc(panel_center + DRIFT * scene_t, DISC_RADIUS, ColorDef::RED);
        frame_panel(&mut left);
        overlay.blit_over(&left, left_origin.0, left_origin.1);

        // Right panel: the frame buffer accumulating behind the shutter.
        let buffer_t = buffer_window.sweep(window_elapsed(script, index, elapsed, buffer_window));
        let mut right = self.panel_surface(panel)?;
        let exposure = Exposure::new(buffer_window.start_time, buffer_t, SAMPLING_RATE)?;
        accumulate(
            &mut right,
            &exposure,
            |t| panel_center + DRIFT * t,
            DISC_RADIUS,
            ColorDef::RED,
        );

        let progress = shutter_progress(script, index, elapsed, shutter);
        for blade in self.shutter.blade_paths(progress, panel) {
            right.fill_path(&blade, SHUTTER_FILL);
            right.stroke_path(&blade, SHUTTER_STROKE_WIDTH, ColorDef::BLACK);
        }
        frame_panel(&mut right);
        overlay.blit_over(&right, right_origin.0, right_origin.1);

        Ok(overlay)
    }

    fn render_final_result(&self, window: &PanelWindow) -> ShutterboxResult<Surface> {
        let mut overlay = Surface::new(self.canvas)?;

        let panel = Canvas::new(
            FINAL_PANEL.0.min(self.canvas.width.max(1)),
            FINAL_PANEL.1.min(self.canvas.height.max(1)),
        );
        let origin = (
            (self.canvas.width.saturating_sub(panel.width)) / 2,
            (self.canvas.height.saturating_sub(panel.height)) / 2,
        );

        let mut surface = self.panel_surface(panel)?;
        let exposure = Exposure::new(window.start_time, window.end_time, SAMPLING_RATE)?;
        let center = panel.center();
        accumulate(
            &mut surface,
            &exposure,
            |t| center + DRIFT * t,
            DISC_RADIUS,
            ColorDef::RED,
        );
        frame_panel(&mut surface);
        overlay.blit_over(&surface, origin.0, origin.1);

        Ok(overlay)
    }

    fn panel_surface(&self, panel: Canvas) -> ShutterboxResult<Surface> {
        let mut surface = Surface::new(panel)?;
        surface.fill_solid(ColorDef::WHITE);
        Ok(surface)
    }
}

/// Panel geometry for the two-panel explainer: equal 13:9 panels side by
/// side, centered, degrading gracefully on tiny canvases.
fn explainer_layout(canvas: Canvas) -> (Canvas, (u32, u32), (u32, u32)) {
    let avail_w = canvas.width.saturating_sub(2 * PANEL_PADDING + PANEL_GAP);
    let mut panel_w = (avail_w / 2).max(8);
    let mut panel_h = (panel_w * PANEL_ASPECT_DEN / PANEL_ASPECT_NUM).max(8);

    let avail_h = canvas.height.saturating_sub(2 * PANEL_PADDING).max(8);
    if panel_h > avail_h {
        panel_h = avail_h;
        panel_w = (panel_h * PANEL_ASPECT_NUM / PANEL_ASPECT_DEN).max(8);
    }

    let pair_width = 2 * panel_w + PANEL_GAP;
    let left_x = (canvas.width.saturating_sub(pair_width)) / 2;
    let top_y = (canvas.height.saturating_sub(panel_h)) / 2;
    let right_x = left_x + panel_w + PANEL_GAP;

    (Canvas::new(panel_w, panel_h), (left_x, top_y), (right_x, top_y))
}

fn frame_panel(surface: &mut Surface) {
    let canvas = surface.canvas();
    let border = Rect::new(
        0.5,
        0.5,
        f64::from(canvas.width) - 0.5,
        f64::from(canvas.height) - 0.5,
    )
    .to_path(0.1);
    surface.stroke_path(&border, PANEL_BORDER_WIDTH, ColorDef::BLACK);
}

fn fade_alpha(transition: Transition, elapsed: Duration) -> f64 {
    let frac = Ease::Linear.apply(elapsed.as_secs_f64() / FADE_DURATION.as_secs_f64());
    match transition {
        Transition::FadeIn => frac,
        Transition::Hold => 1.0,
        Transition::FadeOut => 1.0 - frac,
    }
}

/// Wall-clock time a panel window has been animating: the elapsed time in
/// the current step plus the holds of immediately preceding steps that show
/// the same window (those steps did not restart the sweep).
fn window_elapsed(
    script: &Script,
    index: usize,
    elapsed: Duration,
    window: &PanelWindow,
) -> Duration {
    let steps = script.steps();
    let mut total = elapsed;
    let mut i = index;
    while i > 0 {
        let carried = match &steps[i - 1].content {
            SceneContent::Explainer {
                scene_window,
                buffer_window,
                ..
            } => scene_window == window || buffer_window == window,
            _ => false,
        };
        if !carried {
            break;
        }
        total += steps[i - 1].hold;
        i -= 1;
    }
    total
}

/// Current blade progress: animates toward the step's pose, starting from
/// the pose of the step where it last changed (or fully closed when the
/// shutter first appears).
fn shutter_progress(script: &Script, index: usize, elapsed: Duration, pose: ShutterPose) -> f64 {
    let to = pose.target_progress();
    let steps = script.steps();

    let mut since_change = elapsed;
    let mut i = index;
    let from = loop {
        if i == 0 {
            break ShutterPose::Closed.target_progress();
        }
        match &steps[i - 1].content {
            SceneContent::Explainer { shutter, .. } if *shutter == pose => {
                since_change += steps[i - 1].hold;
                i -= 1;
            }
            SceneContent::Explainer { shutter, .. } => break shutter.target_progress(),
            _ => break ShutterPose::Closed.target_progress(),
        }
    };

    let frac = Ease::OutCubic
        .apply(since_change.as_secs_f64() / SHUTTER_ANIM_DURATION.as_secs_f64());
    from + (to - from) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::script::ScriptStep;

    fn renderer() -> IllustrationRenderer {
        IllustrationRenderer::new(Canvas::new(260, 160)).unwrap()
    }

    #[test]
    fn orbit_frame_is_deterministic() {
        let r = renderer();
        let a = r.render_orbit(1.5).unwrap();
        let b = r.render_orbit(1.5).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn orbit_frame_draws_over_the_backdrop() {
        let r = renderer();
        let frame = r.render_orbit(0.0).unwrap();
        // The backdrop fill alone makes every pixel opaque.
        assert!(frame.data().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn explainer_layout_centers_two_equal_panels() {
        let (panel, left, right) = explainer_layout(Canvas::new(1280, 720));
        assert_eq!(panel.width, 592);
        assert_eq!(panel.height, 409);
        assert_eq!(left.1, right.1);
        assert_eq!(right.0 - (left.0 + panel.width), PANEL_GAP);
    }

    #[test]
    fn explainer_layout_survives_tiny_canvases() {
        let (panel, _, _) = explainer_layout(Canvas::new(16, 16));
        assert!(panel.width >= 8 && panel.height >= 8);
    }

    #[test]
    fn shutter_progress_tracks_pose_changes() {
        let script = Script::motion_blur_explainer();

        // Step 1: closed from the start, never moves.
        assert_eq!(
            shutter_progress(&script, 1, Duration::from_secs(2), ShutterPose::Closed),
            0.0
        );
        // Step 2 just after the pose change: part-way open.
        let early = shutter_progress(&script, 2, Duration::from_millis(100), ShutterPose::Opened);
        assert!(early > 0.0 && early < 1.0);
        // Step 3 carries the opened pose from step 2: fully open.
        assert_eq!(
            shutter_progress(&script, 3, Duration::from_secs(1), ShutterPose::Opened),
            1.0
        );
        // Step 4 closes again.
        let closing = shutter_progress(&script, 4, Duration::from_millis(100), ShutterPose::Closed);
        assert!(closing < 1.0 && closing > 0.0);
        assert_eq!(
            shutter_progress(&script, 4, Duration::from_secs(2), ShutterPose::Closed),
            0.0
        );
    }

    #[test]
    fn scene_sweep_carries_across_steps_with_the_same_window() {
        let script = Script::motion_blur_explainer();
        let SceneContent::Explainer { scene_window, .. } = &script.steps()[1].content else {
            panic!("step 1 is an explainer");
        };

        // 2 s into step 2 the scene window has been animating since step 1
        // began: 4 s + 2 s.
        let e = window_elapsed(&script, 2, Duration::from_secs(2), scene_window);
        assert_eq!(e, Duration::from_secs(6));

        // At step 1 nothing is carried.
        let e = window_elapsed(&script, 1, Duration::from_secs(2), scene_window);
        assert_eq!(e, Duration::from_secs(2));
    }

    #[test]
    fn script_frames_render_for_every_step() {
        let r = renderer();
        let script = Script::motion_blur_explainer();
        for index in 0..script.steps().len() {
            let frame = r
                .render_step(&script, index, Duration::from_millis(250))
                .unwrap();
            assert_eq!(frame.canvas(), Canvas::new(260, 160));
        }
    }

    #[test]
    fn out_of_range_step_index_is_an_error() {
        let r = renderer();
        let script = Script::motion_blur_explainer();
        let err = r
            .render_step(&script, script.steps().len(), Duration::ZERO)
            .unwrap_err();
        assert!(matches!(err, ShutterboxError::Animation(_)));
    }

    #[test]
    fn fade_out_step_ends_transparent() {
        let r = renderer();
        let script = Script::new(vec![
            ScriptStep::new(
                SceneContent::FinalResult {
                    window: PanelWindow::new(0.0, 1.0, Duration::from_secs(1)),
                },
                Transition::FadeOut,
                Duration::from_secs(1),
            ),
        ])
        .unwrap();

        let faded = r.render_step(&script, 0, Duration::from_millis(500)).unwrap();
        let backdrop_only = {
            let mut s = Surface::new(Canvas::new(260, 160)).unwrap();
            s.fill_vertical_gradient(
                &Gradient::new(vec![
                    ColorDef::WHITE,
                    ColorDef::rgba(0xE0 as f64 / 255.0, 0xE0 as f64 / 255.0, 0xE0 as f64 / 255.0, 1.0),
                ])
                .unwrap(),
            );
            s
        };
        // 500 ms is past the 300 ms fade: only the backdrop remains.
        assert_eq!(faded.data(), backdrop_only.data());
    }
}
