pub mod geo;
pub mod measurement;

pub use geo::*;
pub use measurement::*;
