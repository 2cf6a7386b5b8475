//! Color handling: the normalized color value and the ordered-stop gradient
//! sampler used to tint every drawable in the illustrations.

pub mod color;
pub mod gradient;
