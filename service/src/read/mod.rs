//! Read entities definitions.

pub mod job;
