//! DOM-backed panel
//!
//! Owns the two fixed-id containers from the hosting markup and implements
//! [`Panel`] over them. DOM failures are logged and swallowed: a failed
//! render affects that message only.

use crate::core::Panel;
use tracing::error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

/// Container shown while the connection is down.
pub const ERROR_VIEW_ID: &str = "conn_err";
/// Container shown while the connection is up.
pub const CONTENT_VIEW_ID: &str = "content";

pub struct DomPanel {
    document: Document,
    error_view: HtmlElement,
    content_view: HtmlElement,
}

impl DomPanel {
    /// Look up both containers in the hosting markup.
    ///
    /// Neither container's visibility is touched here: whatever the markup
    /// defines stays in place until the first socket event.
    pub fn new(document: Document) -> Result<Self, JsValue> {
        let error_view = lookup(&document, ERROR_VIEW_ID)?;
        let content_view = lookup(&document, CONTENT_VIEW_ID)?;
        Ok(Self {
            document,
            error_view,
            content_view,
        })
    }
}

fn lookup(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}

impl Panel for DomPanel {
    fn show_content(&mut self) {
        self.error_view.set_hidden(true);
        self.content_view.set_hidden(false);
    }

    fn show_error(&mut self) {
        self.error_view.set_hidden(false);
        self.content_view.set_hidden(true);
    }

    fn render_heading(&mut self, text: &str) {
        // Clear previous children, then append a single fresh heading
        self.content_view.set_inner_html("");
        let heading = match self.document.create_element("h1") {
            Ok(el) => el,
            Err(e) => {
                error!(?e, "Failed to create heading element");
                return;
            }
        };
        heading.set_text_content(Some(text));
        if let Err(e) = self.content_view.append_child(&heading) {
            error!(?e, "Failed to append heading");
        }
    }
}
