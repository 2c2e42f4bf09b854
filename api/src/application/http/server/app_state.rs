use std::sync::Arc;

use menuwise_core::application::MenuwiseService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MenuwiseService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MenuwiseService) -> Self {
        Self { args, service }
    }
}
