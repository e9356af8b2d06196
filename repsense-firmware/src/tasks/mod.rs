//! Embassy async tasks
//!
//! The trainer loop runs on the main task because its peripherals are only
//! known there; reporting runs as its own task.

pub mod report;
pub mod trainer;

pub use report::report_task;
pub use trainer::run_trainer;
