pub mod discovery;
pub(crate) mod progress_bar_builder;
