//! Skill extraction, gap analysis and market reference data.
//! Everything here is pure apart from the one-time file load in `market`.

pub mod analysis;
pub mod extractor;
pub mod gaps;
pub mod market;
