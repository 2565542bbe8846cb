pub mod moisture;
pub mod report;
pub mod soil;
pub mod thresholds;
pub mod zone;

pub use moisture::*;
pub use report::*;
pub use soil::*;
pub use thresholds::*;
pub use zone::*;
