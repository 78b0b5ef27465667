pub mod calendar;
pub mod cursor;
pub mod grid;
pub mod streak;
