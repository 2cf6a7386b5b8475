use std::time::Duration;

use shutterbox::{
    Canvas, FrameClock, IllustrationKind, IllustrationRenderer, Script, Sequencer,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn small_renderer() -> IllustrationRenderer {
    IllustrationRenderer::new(Canvas::new(260, 160)).unwrap()
}

#[test]
fn every_moment_of_the_builtin_script_renders() {
    init_tracing();
    let renderer = small_renderer();
    let script = Script::motion_blur_explainer();

    // One probe inside every step, plus both ends of the cycle.
    let mut probes = vec![Duration::ZERO, script.total_duration()];
    let mut acc = Duration::ZERO;
    for step in script.steps() {
        probes.push(acc + step.hold / 2);
        acc += step.hold;
    }

    for at in probes {
        let frame = renderer
            .render_illustration(IllustrationKind::MotionBlur, &script, at)
            .unwrap();
        assert_eq!(frame.canvas(), Canvas::new(260, 160));
        // The backdrop keeps every frame fully opaque.
        assert!(frame.data().chunks_exact(4).all(|px| px[3] == 255));
    }
}

#[test]
fn frames_are_reproducible_bit_for_bit() {
    init_tracing();
    let renderer = small_renderer();
    let script = Script::motion_blur_explainer();

    for at in [Duration::from_millis(700), Duration::from_secs(6), Duration::from_secs(19)] {
        let a = renderer
            .render_illustration(IllustrationKind::MotionBlur, &script, at)
            .unwrap();
        let b = renderer
            .render_illustration(IllustrationKind::MotionBlur, &script, at)
            .unwrap();
        assert_eq!(a.data(), b.data());
    }

    let a = renderer
        .render_illustration(IllustrationKind::OrbitDots, &script, Duration::from_secs(2))
        .unwrap();
    let b = renderer
        .render_illustration(IllustrationKind::OrbitDots, &script, Duration::from_secs(2))
        .unwrap();
    assert_eq!(a.data(), b.data());
}

#[test]
fn accumulation_appears_once_the_shutter_opens() {
    init_tracing();
    let renderer = small_renderer();
    let script = Script::motion_blur_explainer();

    // Mid step 1 the buffer window is empty: no red anywhere on the right.
    let closed = renderer
        .render_illustration(
            IllustrationKind::MotionBlur,
            &script,
            Duration::from_millis(2_500),
        )
        .unwrap();
    // Deep into step 3 the buffer has accumulated seconds of samples.
    let open = renderer
        .render_illustration(
            IllustrationKind::MotionBlur,
            &script,
            Duration::from_millis(11_000),
        )
        .unwrap();

    let redness = |frame: &shutterbox::Surface| {
        frame
            .data()
            .chunks_exact(4)
            .filter(|px| px[0] > px[1].saturating_add(32) && px[0] > px[2].saturating_add(32))
            .count()
    };

    assert!(redness(&open) > redness(&closed));
}

#[test]
fn a_clock_driven_sequencer_tracks_absolute_time() {
    init_tracing();
    let script = Script::motion_blur_explainer();
    let mut seq = Sequencer::new(script.clone());
    let mut clock = FrameClock::new();

    // Drive the sequencer with a simulated 60 Hz refresh for 5 seconds.
    let start = std::time::Instant::now();
    let mut last_t = 0.0;
    for frame in 1..=300u32 {
        let now = start + Duration::from_nanos(u64::from(frame) * 16_666_667);
        let time = clock.tick(now);
        assert!(time.t >= last_t);
        last_t = time.t;
        seq.advance(Duration::from_secs_f64(time.dt));
    }

    // 5 s in: past the 0.5 s blank and the 4 s first explainer step.
    let (index, _) = script.locate(Duration::from_secs_f64(last_t));
    assert_eq!(seq.index(), index);
    assert_eq!(seq.index(), 2);
}
