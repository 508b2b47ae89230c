#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod fragment;
pub mod geometry;
pub mod modal;
pub mod pointer;
pub mod reveal;
pub mod scene;
pub mod surface;

// Browser glue only exists when targeting wasm32; everything above also
// builds (and is tested) on the host.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod dom;
    mod page;
    mod render;

    pub use dom::DomSurface;
    pub use page::{GlooScheduler, Page};

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Debug)
            .map_err(|e| JsValue::from_str(&format!("failed to init logger: {e}")))?;

        let page = Page::mount(Default::default(), Default::default())?;
        // Listeners and the frame loop live as long as the page.
        std::mem::forget(page);
        Ok(())
    }
}
