pub mod coverage;
pub mod reads;
mod summary;
