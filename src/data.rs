mod detection_result;
mod filesystem_access;
mod labels;
mod orientation;
mod thresholds;
mod time_calc;
pub mod send_channels;

pub use detection_result::*;
pub use filesystem_access::FsAccess;
pub use labels::{LabelTable, UNKNOWN_LABEL};
pub use orientation::{Orientation, Rotation};
pub use thresholds::*;
pub use time_calc::*;

pub(crate) const CROSS_MARK: &str = "❌";
