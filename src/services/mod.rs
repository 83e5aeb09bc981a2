pub mod calculator;
pub mod host;
