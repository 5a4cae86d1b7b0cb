pub mod aggregate;
pub mod batch;
pub mod engine;
pub mod error;
pub mod histogram;
pub mod logging;
pub mod params;
pub mod rng;
pub mod sampler;
pub mod scenario;
pub mod trial;
pub mod web;

pub use aggregate::SimulationSummary;
pub use engine::{Engine, EngineBuilder, EngineSettings, SimulationReport};
pub use error::SimulationError;
pub use histogram::HistogramBin;
pub use params::{SimulationParameters, ValueRange};
pub use trial::ScenarioResult;
