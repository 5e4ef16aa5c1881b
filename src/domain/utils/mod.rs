pub mod guards;
pub mod time;
