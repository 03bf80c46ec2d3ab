use gateway_bridge::application::bridge::GatewayBridge;
use gateway_bridge::infrastructure::simulated::SimulatedGateway;
use gateway_bridge::infrastructure::ui::SwitchableUiContext;
use std::sync::Arc;

#[allow(dead_code)]
pub struct Harness {
    pub bridge: GatewayBridge,
    pub native: Arc<SimulatedGateway>,
    pub ui: Arc<SwitchableUiContext>,
}

fn build(ui: SwitchableUiContext) -> Harness {
    let native = Arc::new(SimulatedGateway::new());
    let ui = Arc::new(ui);
    let bridge = GatewayBridge::new(native.clone(), ui.clone());
    Harness { bridge, native, ui }
}

/// Bridge with a foreground surface already attached.
#[allow(dead_code)]
pub fn foreground() -> Harness {
    build(SwitchableUiContext::foreground("main-activity"))
}

/// Bridge with no foreground surface.
#[allow(dead_code)]
pub fn headless() -> Harness {
    build(SwitchableUiContext::headless())
}
