use crate::constants::{
    FLASH_CLASS, HIDDEN_CLASS, LOADING_BAR_ID, LOADING_OVERLAY_ID, LOADING_TEXT_ID,
};
use crate::dom;
use museum_core::LoadingView;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Draw the loading progress bar and the 100 % flash.
pub fn show_progress(document: &web::Document, view: LoadingView) {
    if let Some(bar) = document.get_element_by_id(LOADING_BAR_ID) {
        if let Ok(bar) = bar.dyn_into::<web::HtmlElement>() {
            _ = bar
                .style()
                .set_property("width", &format!("{}%", view.progress));
        }
    }
    dom::set_text(document, LOADING_TEXT_ID, &format!("{}%", view.progress));
    if let Some(el) = document.get_element_by_id(LOADING_OVERLAY_ID) {
        dom::set_class(&el, FLASH_CLASS, view.flashing);
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_OVERLAY_ID) {
        dom::set_class(&el, FLASH_CLASS, false);
        dom::set_class(&el, HIDDEN_CLASS, true);
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "display:none");
    }
}
