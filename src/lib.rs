//! Shutterbox renders animated diagrams that explain how motion blur is
//! formed: a virtual camera shutter opens, a frame buffer accumulates
//! low-weight time samples of a moving shape, and the composite converges to
//! the familiar smear.
//!
//! # Pipeline overview
//!
//! 1. **Clock**: a host-driven [`FrameClock`] supplies `(t, dt)` once per frame
//! 2. **Script**: a [`Script`] of narrated scenes is advanced by a [`Sequencer`]
//! 3. **Evaluate**: the orbit/shutter/exposure models compute geometry for `t`
//! 4. **Render**: an [`IllustrationRenderer`] draws into a premultiplied-RGBA8
//!    [`Surface`] (the CLI writes that out as PNG)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: every model is a pure function of elapsed
//!   time and immutable configuration; rendering the same instant twice yields
//!   bit-identical pixels.
//! - **No IO in renderers**: file output lives in the binary only.
#![forbid(unsafe_code)]

pub mod animation;
pub mod foundation;
pub mod geometry;
pub mod motion;
pub mod paint;
pub mod render;
pub mod scene;
pub mod timing;

pub use animation::ease::Ease;
pub use foundation::core::{Canvas, FrameTime, Rgba8Premul};
pub use foundation::error::{ShutterboxError, ShutterboxResult};
pub use foundation::rand::random_float_from_seed;
pub use geometry::shutter::ShutterBlades;
pub use motion::orbit::OrbitField;
pub use paint::color::ColorDef;
pub use paint::gradient::Gradient;
pub use render::accumulate::{Exposure, accumulate};
pub use render::surface::Surface;
pub use scene::illustrate::IllustrationRenderer;
pub use scene::model::{IllustrationKind, PanelWindow, SceneContent, ShutterPose, Transition};
pub use scene::script::{Script, ScriptStep, Sequencer};
pub use timing::clock::{FrameClock, MIN_FRAME_DELTA};
