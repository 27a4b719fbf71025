//! Roomfolio Web - 3D portfolio room frontend
//!
//! Welcome screen, simulated loading screen and an interactive room scene
//! rendered with Bevy into the `#roomfolio-canvas` element.

mod app;
mod quality;
mod room;
mod scene;
mod ui;
mod wizard;

use wasm_bindgen::prelude::*;

/// Entry point for WASM module
#[wasm_bindgen(start)]
pub fn main() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging with filtering to reduce wgpu noise
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::WARN)
            .build()
    );

    app::run();
}
