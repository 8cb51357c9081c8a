mod cost;

pub use self::cost::PeriodCost;
