//! The narrated slideshow: scene data model, the scripted sequencer that
//! advances it, and the renderer that turns a scene into pixels.

pub mod illustrate;
pub mod model;
pub mod script;
