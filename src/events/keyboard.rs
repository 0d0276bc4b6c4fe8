use crate::keyboard::{is_game_key, is_text_entry_tag, should_prevent_default};
use museum_core::Museum;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type KeyClosure = Closure<dyn FnMut(web::KeyboardEvent)>;

/// Global `keydown`/`keyup` listeners. Dropping the guard unsubscribes both.
pub struct KeyListeners {
    window: web::Window,
    down: KeyClosure,
    up: KeyClosure,
}

impl Drop for KeyListeners {
    fn drop(&mut self) {
        _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.down.as_ref().unchecked_ref());
        _ = self
            .window
            .remove_event_listener_with_callback("keyup", self.up.as_ref().unchecked_ref());
        log::info!("[input] key listeners removed");
    }
}

fn typing_in_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| is_text_entry_tag(&el.tag_name()))
        .unwrap_or(false)
}

fn handle_keydown(ev: &web::KeyboardEvent, museum: &Rc<RefCell<Museum>>) {
    let code = ev.code();
    if !is_game_key(&code) || typing_in_field(ev) {
        return;
    }
    if should_prevent_default(&code) {
        ev.prevent_default();
    }
    // Auto-repeat only re-asserts a held key.
    if ev.repeat() && code != "Escape" && code != "KeyM" {
        return;
    }
    museum.borrow_mut().key_down_code(&code);
}

fn handle_keyup(ev: &web::KeyboardEvent, museum: &Rc<RefCell<Museum>>) {
    let code = ev.code();
    if is_game_key(&code) {
        museum.borrow_mut().key_up_code(&code);
    }
}

pub fn wire_global_keys(museum: Rc<RefCell<Museum>>) -> Option<KeyListeners> {
    let window = web::window()?;

    let museum_down = museum.clone();
    let down: KeyClosure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &museum_down);
    }) as Box<dyn FnMut(_)>);
    let up: KeyClosure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keyup(&ev, &museum);
    }) as Box<dyn FnMut(_)>);

    _ = window.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref());
    _ = window.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref());
    Some(KeyListeners { window, down, up })
}
