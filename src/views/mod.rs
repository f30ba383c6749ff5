//! Read-only reporting windows over the daily log. Each view derives a
//! fixed-size slice of display data and never mutates the store.

pub mod daily;
pub mod month;
pub mod weekly;
