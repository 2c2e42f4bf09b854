pub mod template;

pub use template::build_prompt;
