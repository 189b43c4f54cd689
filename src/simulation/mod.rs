pub mod atom;
pub mod bucket;
pub mod layering;
pub mod placement;
pub mod signal;
