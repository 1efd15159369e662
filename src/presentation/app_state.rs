// Application state for HTTP handlers
use crate::application::page_service::PageService;
use crate::application::view_update::ViewUpdateEngine;

#[derive(Clone)]
pub struct AppState {
    pub page_service: PageService,
    pub view_engine: ViewUpdateEngine,
}
