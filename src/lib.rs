pub mod cfbd;
pub mod error;
pub mod handler;
pub mod model;
pub mod schedule;
pub mod validate;
