use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{bridge::BridgeHandle, view::ViewController};

/// The single window's controller. Events are applied one at a time.
pub type SharedView = Arc<Mutex<ViewController<BridgeHandle>>>;

#[derive(Clone)]
pub struct AppState {
    pub bridge: BridgeHandle,
    pub view: SharedView,
    pub script_cdn: Arc<str>,
}

impl AppState {
    pub fn new(bridge: BridgeHandle, script_cdn: &str) -> Self {
        let view = ViewController::new(bridge.clone());
        Self {
            bridge,
            view: Arc::new(Mutex::new(view)),
            script_cdn: Arc::from(script_cdn),
        }
    }
}
