//! Smoking-cessation tracker. Records a cigarette count per calendar day
//! in a flat CSV log, and derives smoke-free streaks, money saved against
//! the old habit, and daily/weekly/monthly views from it. Everything runs
//! synchronously from the terminal.
//!

pub mod backup;
pub mod cli;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;
pub mod views;
