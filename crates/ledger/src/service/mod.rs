pub mod calendar;
pub mod statistics;
pub mod weight;
