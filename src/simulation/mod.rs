pub mod states;
pub mod params;
pub mod error;
pub mod engine;
pub mod forces;
pub mod constraints;
pub mod boundary;
pub mod integrator;
pub mod scenario;
pub mod driver;
