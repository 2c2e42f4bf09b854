pub mod analysis_result;
pub mod errors;

pub use analysis_result::*;
pub use errors::*;
