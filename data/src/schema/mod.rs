pub mod atomic;
pub mod keywords;
