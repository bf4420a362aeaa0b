pub mod item;
pub mod review;
