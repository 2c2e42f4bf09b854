pub mod handlers;
pub mod presenters;
pub mod router;
pub mod validators;
