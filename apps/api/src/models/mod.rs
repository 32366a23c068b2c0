pub mod brief;
pub mod job;
