pub mod form;
pub mod job;
pub mod outputs;

pub use form::{FormData, ReviewInput};
pub use job::Job;
pub use outputs::{AdCopy, ImageAd, Insights, MarketingCopy, Outputs};
