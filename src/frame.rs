use crate::constants::clamp_frame_dt;
use crate::overlay;
use instant::Instant;
use museum_core::{AppPhase, LoadingSequencer, Museum};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame state for the requestAnimationFrame loop.
pub struct FrameContext {
    pub museum: Rc<RefCell<Museum>>,
    pub loading: LoadingSequencer,
    pub document: web::Document,
    pub callback: Rc<RefCell<Option<js_sys::Function>>>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = clamp_frame_dt((now - self.last_instant).as_secs_f32());
        self.last_instant = now;

        let mut museum = self.museum.borrow_mut();
        if museum.phase() == AppPhase::Loading {
            let phase = self.loading.advance(Duration::from_secs_f32(dt));
            overlay::show_progress(&self.document, self.loading.view());
            if phase == AppPhase::Museum {
                overlay::hide(&self.document);
                museum.set_phase(phase);
            }
        }

        museum.tick(dt);
        let out = museum.frame_output();
        let active = museum.flags().active_exhibit_id().map(JsValue::from_str);
        // Released before calling out to JS, which may call back into us.
        drop(museum);

        let callback = self.callback.borrow().clone();
        if let Some(cb) = callback {
            let floats = js_sys::Float32Array::from(out.as_floats());
            let active = active.unwrap_or(JsValue::NULL);
            if let Err(e) = cb.call2(&JsValue::NULL, &floats, &active) {
                log::warn!("[museum] frame callback failed: {:?}", e);
            }
        }
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until `running` turns false.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>, running: Rc<Cell<bool>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            log::info!("[museum] frame loop stopped");
            // Break the self-reference so the closure and its context are freed.
            let _ = tick_clone.borrow_mut().take();
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
