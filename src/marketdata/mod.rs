mod currency;
mod rate;

pub use currency::*;
pub use rate::*;
