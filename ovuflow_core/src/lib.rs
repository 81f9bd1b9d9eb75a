#![forbid(unsafe_code)]

//! Core domain model and calculations for the Ovuflow cycle calculator.
//!
//! This crate provides:
//! - Input validation (dates, cycle lengths, categories)
//! - Landmark dates (ovulation, fertile windows, next period, test and due dates)
//! - Illustrative hormone curves per health condition and exercise level
//! - Persistence (saved record text, CSV series export)

pub mod types;
pub mod error;
pub mod input;
pub mod config;
pub mod logging;
pub mod landmarks;
pub mod hormones;
pub mod record;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use input::CycleInput;
pub use config::Config;
pub use landmarks::{compute, FertileWindow, LandmarkResult};
pub use hormones::{synthesize, DayRange, HormoneSample, HormoneSeries};
pub use record::{load_record, render_record, save_record, SavedRecord};
pub use export::export_series_csv;
