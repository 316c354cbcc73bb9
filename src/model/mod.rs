pub mod calendar;
pub mod game;
pub mod media;
pub mod media_type;
pub mod schedule;
pub mod season_type;
pub mod team;
