pub mod completion;
pub mod day;
pub mod decimal;
pub mod errors;
pub mod goal;
pub mod migration;
pub mod statistics;
