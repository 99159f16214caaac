use crate::config::Config;
use crate::models::VisitorData;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub data: Arc<Mutex<VisitorData>>,
}

impl AppState {
    pub fn new(config: Config, data: VisitorData) -> Self {
        Self {
            config: Arc::new(config),
            data: Arc::new(Mutex::new(data)),
        }
    }
}
