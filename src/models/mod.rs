//! Data models for the dental console.
//!
//! These models mirror the clinic API's JSON representations field for field;
//! nothing here is derived locally.

mod booking;
mod contact;
mod feedback;
mod patient;
mod patient_log;
mod schedule;
mod upload;

pub use booking::*;
pub use contact::*;
pub use feedback::*;
pub use patient::*;
pub use patient_log::*;
pub use schedule::*;
pub use upload::*;
