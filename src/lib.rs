#![cfg(target_arch = "wasm32")]
use instant::Instant;
use museum_core::{ExhibitCatalog, LoadingSequencer, Museum, NavConfig, FRAME_OUTPUT_LEN};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod dom;
mod events;
mod frame;
mod keyboard;
mod overlay;

struct App {
    museum: Rc<RefCell<Museum>>,
    running: Rc<Cell<bool>>,
    _keys: events::KeyListeners,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static FRAME_CALLBACK: Rc<RefCell<Option<js_sys::Function>>> = Rc::new(RefCell::new(None));
}

async fn load_catalog() -> ExhibitCatalog {
    let text = match dom::fetch_text(constants::GALLERY_URL).await {
        Ok(t) => t,
        Err(e) => {
            log::info!("[museum] no gallery file ({e:#}); using built-in gallery");
            return ExhibitCatalog::default_gallery();
        }
    };
    match ExhibitCatalog::from_toml_str(&text) {
        Ok(c) if !c.is_empty() => c,
        Ok(_) => {
            log::warn!("[museum] {} is empty; using built-in gallery", constants::GALLERY_URL);
            ExhibitCatalog::default_gallery()
        }
        Err(e) => {
            log::warn!("[museum] {}: {e}; using built-in gallery", constants::GALLERY_URL);
            ExhibitCatalog::default_gallery()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("museum-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let catalog = load_catalog().await;
    let museum = Rc::new(RefCell::new(Museum::new(NavConfig::default(), catalog)?));

    let keys = events::wire_global_keys(museum.clone())
        .ok_or_else(|| anyhow::anyhow!("no window for key listeners"))?;
    let running = Rc::new(Cell::new(true));

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        museum: museum.clone(),
        loading: LoadingSequencer::new(),
        document,
        callback: FRAME_CALLBACK.with(Rc::clone),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx, running.clone());

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            museum,
            running,
            _keys: keys,
        });
    });
    Ok(())
}

/// Register `fn(frame: Float32Array, activeExhibitId: string | null)`,
/// called once per animation frame.
#[wasm_bindgen]
pub fn set_frame_callback(callback: Option<js_sys::Function>) {
    FRAME_CALLBACK.with(|cb| *cb.borrow_mut() = callback);
}

#[wasm_bindgen]
pub fn frame_output_len() -> usize {
    FRAME_OUTPUT_LEN
}

#[wasm_bindgen]
pub fn active_exhibit_id() -> Option<String> {
    with_museum(|m| m.flags().active_exhibit_id().map(str::to_owned)).flatten()
}

#[wasm_bindgen]
pub fn is_profile_active() -> bool {
    with_museum(|m| m.flags().is_profile_active()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn is_menu_open() -> bool {
    with_museum(|m| m.store().is_menu_open()).unwrap_or(false)
}

/// Force the phase from a label (`"MUSEUM"` or `"LOADING"`); anything else
/// is treated as loading.
#[wasm_bindgen]
pub fn set_phase(label: Option<String>) {
    with_museum(|m| m.set_phase_label(label.as_deref()));
}

#[wasm_bindgen]
pub fn restart() {
    with_museum(|m| m.restart());
}

/// Stop the frame loop and unsubscribe the key listeners.
#[wasm_bindgen]
pub fn shutdown() {
    if let Some(app) = APP.with(|app| app.borrow_mut().take()) {
        app.running.set(false);
        log::info!("[museum] shutdown");
    }
}

fn with_museum<R>(f: impl FnOnce(&mut Museum) -> R) -> Option<R> {
    APP.with(|app| {
        let app = app.borrow();
        let app = app.as_ref()?;
        let mut museum = app.museum.try_borrow_mut().ok()?;
        Some(f(&mut museum))
    })
}
