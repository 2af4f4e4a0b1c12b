pub mod error;
pub mod ids;
pub mod time;

pub use error::{ErrorCode, HazardError, HazardResult};
pub use ids::{AreaId, ReportId};
pub use time::{now_epoch_millis, EpochMillis};
