pub mod common;
pub mod image;
pub mod menu_analysis;
pub mod prompt;
pub mod rate_limit;
