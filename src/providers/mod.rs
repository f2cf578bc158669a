pub mod open_er;
pub mod util;

pub use open_er::{LatestRates, OpenErProvider};
