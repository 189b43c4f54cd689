pub mod model;

pub use model::NumberAtom;
