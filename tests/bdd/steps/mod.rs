pub mod detail_steps;
pub mod failure_steps;
