pub mod bttc;
pub mod session;
pub mod types;

pub use bttc::adjust;
pub use session::apply_session;
pub use types::{PlayedMatch, PlayerId, RatingChange, RatingSeeds};
