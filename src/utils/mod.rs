pub mod date;
pub mod fs_utils;
pub mod path;
pub mod range;
