//! # circuitbg DRC
//!
//! Clearance checking for placement plans. Bounding boxes of every planned
//! primitive go into an R-tree, then each rule queries it:
//!
//! - gutter primitives must not reach into the content column (error)
//! - nothing should be planned entirely off-screen (warning)
//! - a wide layout must end with the hero fade (warning)

pub mod check;
pub mod violation;

pub use check::{check, check_viewport};
pub use violation::{ClearanceViolation, DrcReport, Severity, ViolationType};
