//! Browser DOM glue
//!
//! Element geometry comes from `getBoundingClientRect` every tick. Everything
//! else here mirrors runtime state onto the page: avatar transform, card
//! highlight, overlay visibility.

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, ImageData};

use crate::atlas::SpriteAtlas;
use crate::renderer::AvatarPose;
use crate::sim::{Facing, LayoutProvider, Rect};
use crate::ui::OverlayState;

/// CSS class toggled on highlighted cards and active hotspot elements
const HIGHLIGHT_CLASS: &str = "is-highlighted";
const ACTIVE_CLASS: &str = "is-active";
const HIDDEN_CLASS: &str = "hidden";

/// Live element boxes read from the document
pub struct DomLayout {
    document: Document,
}

impl DomLayout {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl LayoutProvider for DomLayout {
    fn rect(&self, element: &str) -> Option<Rect> {
        let el = self.document.get_element_by_id(element)?;
        let r = el.get_bounding_client_rect();
        Some(Rect::from_xywh(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        ))
    }
}

fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn set_class(document: &Document, id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().toggle_with_force(class, on);
    }
}

/// Paint the atlas strip into an offscreen canvas and use it as the avatar skin
pub fn install_atlas(
    document: &Document,
    element: &str,
    atlas: &SpriteAtlas,
) -> Result<(), JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    let strip = atlas.strip();
    canvas.set_width(strip.width());
    canvas.set_height(strip.height());

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;
    let data = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(strip.as_raw().as_slice()),
        strip.width(),
        strip.height(),
    )?;
    ctx.put_image_data(&data, 0.0, 0.0)?;
    let url = canvas.to_data_url()?;

    let avatar = html_element(document, element)
        .ok_or_else(|| JsValue::from_str("avatar element missing"))?;
    let style = avatar.style();
    style.set_property("background-image", &format!("url({})", url))?;
    // Unskinned avatars only ever show frame 0
    style.set_property("background-position", "0px 0px")?;
    style.set_property("width", &format!("{}px", atlas.frame_width()))?;
    style.set_property("height", &format!("{}px", atlas.frame_height()))?;
    Ok(())
}

/// Position, flip and tilt the avatar element. The strip offset is only
/// rewritten on ticks where the walk frame changed.
pub fn apply_avatar(
    document: &Document,
    element: &str,
    pose: &AvatarPose,
    atlas: Option<&SpriteAtlas>,
    size: (f32, f32),
    frame_changed: bool,
) {
    let Some(avatar) = html_element(document, element) else {
        return;
    };
    let (w, h) = atlas.map_or(size, |a| (a.frame_width() as f32, a.frame_height() as f32));
    let flip = match pose.facing {
        Facing::Left => -1.0,
        Facing::Right => 1.0,
    };
    let style = avatar.style();
    let _ = style.set_property(
        "transform",
        &format!(
            "translate({:.1}px, {:.1}px) rotate({:.2}deg) scaleX({})",
            pose.pos.x - w / 2.0,
            pose.pos.y - h,
            pose.tilt_deg,
            flip
        ),
    );
    if let Some(atlas) = atlas.filter(|_| frame_changed) {
        let frame = atlas.frame_rect(pose.frame_index);
        let _ = style.set_property("background-position", &format!("-{}px 0px", frame.x));
    }
    let _ = avatar.class_list().toggle_with_force("walking", pose.walking);
}

/// Move the highlight class from one card to another
pub fn set_highlight(document: &Document, previous: Option<&str>, next: Option<&str>) {
    if let Some(card) = previous {
        set_class(document, card, HIGHLIGHT_CLASS, false);
    }
    if let Some(card) = next {
        set_class(document, card, HIGHLIGHT_CLASS, true);
    }
}

pub fn set_active(document: &Document, element: &str, active: bool) {
    set_class(document, element, ACTIVE_CLASS, active);
}

/// Show/hide the modal and lightbox and fill their content
pub fn sync_overlay(document: &Document, overlay: &OverlayState) {
    set_class(document, "modal", HIDDEN_CLASS, overlay.modal().is_none());
    if let Some(modal) = overlay.modal() {
        if let Some(el) = document.get_element_by_id("modal-title") {
            el.set_text_content(Some(&modal.title));
        }
        if let Some(el) = document.get_element_by_id("modal-body") {
            el.set_text_content(Some(&modal.body));
        }
    }

    set_class(document, "lightbox", HIDDEN_CLASS, overlay.lightbox().is_none());
    if let Some(lightbox) = overlay.lightbox() {
        if let Some(el) = document.get_element_by_id("lightbox-image") {
            let _ = el.set_attribute("src", &lightbox.src);
            let _ = el.set_attribute("alt", &lightbox.caption);
        }
        if let Some(el) = document.get_element_by_id("lightbox-caption") {
            el.set_text_content(Some(&lightbox.caption));
        }
    }
}
