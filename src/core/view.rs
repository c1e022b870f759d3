//! The two-view panel abstraction
//!
//! The page has exactly two containers: one shown while the connection is
//! down, one shown while it is up. The trait is the seam between the shared
//! session logic and whatever actually owns the containers (real DOM in the
//! browser, a logger in the CLI, a recorder in tests).

/// A pair of views toggled by connection state, plus a single heading slot.
///
/// Visibility only ever changes through the two toggle methods, so the two
/// views stay complementary after the first event. Nothing touches either
/// view before the first event fires; initial visibility is whatever the
/// hosting markup defines.
pub trait Panel {
    /// Hide the error view, show the content view.
    fn show_content(&mut self);

    /// Show the error view, hide the content view.
    fn show_error(&mut self);

    /// Replace all children of the content view with one heading
    /// containing `text`.
    fn render_heading(&mut self, text: &str);
}
