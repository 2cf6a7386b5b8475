//! CPU rasterization: an offscreen premultiplied-RGBA8 surface plus the
//! temporal accumulation pass that produces the motion-blur composite.

pub mod accumulate;
pub mod surface;
