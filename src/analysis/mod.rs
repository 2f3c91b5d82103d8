pub mod freshness;
pub mod streak;
