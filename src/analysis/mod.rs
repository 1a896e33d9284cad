pub mod describe;
pub mod national;
pub mod states;

pub use describe::{describe, Summary};
pub use national::{national_trend, NationalTrend};
pub use states::{state_performance, StateAverage};
