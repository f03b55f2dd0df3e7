pub mod setup;

pub use setup::{finalize, run, run_with};
