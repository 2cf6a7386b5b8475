//! Motion models that map elapsed time to positions.

pub mod orbit;
