pub mod accumulator;
pub mod base;

pub use accumulator::Accumulator;
pub use base::StatsCollector;
