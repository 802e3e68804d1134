pub mod engine;
pub mod error;
pub mod frame;
pub mod stats;
pub mod step;

pub use engine::Algorithm;
pub use error::{SimResult, SimulationError};
pub use frame::FrameTable;
pub use stats::SimulationStats;
pub use step::{SimulationStep, SlotMeta, SlotSnapshot};
