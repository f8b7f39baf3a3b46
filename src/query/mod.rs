pub mod engine;
pub mod demo;

pub use engine::QueryEngine;
pub use demo::{DemoResults, SequenceRow, run_demo, run_demo_on_file};
