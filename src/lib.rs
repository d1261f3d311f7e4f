pub mod error;
pub mod config;
pub mod record;
pub mod normalize;
pub mod buckets;
pub mod frequency;
pub mod aggregate;
pub mod trend;
pub mod yearly;
pub mod source;
pub mod dashboard;

pub use error::{Result, SurveyError};
