//! Request / response types for the HTTP surface.

pub mod data_record;
pub mod task;
