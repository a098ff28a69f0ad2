pub mod states;
pub mod params;
pub mod errors;
pub mod grid;
pub mod coulomb;
pub mod normalize;
pub mod engine;
pub mod scenario;
