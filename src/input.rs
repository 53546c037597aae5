//! View input handling.
//!
//! The host UI owns the event sources (pointer, window, settings widgets) and
//! forwards them here as [`ViewEvent`]s. [`InputState`] tracks the drag
//! gesture, applies the event to a [`Renderer`], and reports whether the
//! frame must be redrawn.

use log::trace;

use crate::error::Result;
use crate::render::Renderer;

/// Pointer buttons relevant to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left button.
    Primary,
    /// Wheel button; drags pan the view.
    Middle,
    /// Usually the right button.
    Secondary,
}

/// Input forwarded by the host UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    /// A pointer button went down over the canvas.
    PointerPressed(PointerButton),
    /// A pointer button went up anywhere.
    PointerReleased(PointerButton),
    /// The pointer moved by a screen-space delta.
    PointerMoved {
        /// Horizontal movement in screen pixels.
        dx: f32,
        /// Vertical movement in screen pixels.
        dy: f32,
    },
    /// The canvas was resized.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// The zoom setting changed.
    ZoomChanged(f32),
    /// The pixel-preview toggle changed.
    PixelPreviewChanged(bool),
}

/// Gesture state carried between events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    dragging: bool,
}

impl InputState {
    /// Fresh state, not dragging.
    #[must_use]
    pub const fn new() -> Self {
        Self { dragging: false }
    }

    /// Whether a pan drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply an event and report whether a redraw is needed.
    ///
    /// # Errors
    ///
    /// Returns an error for a zoom factor that is not finite and positive;
    /// the renderer is left unchanged.
    pub fn apply(&mut self, event: ViewEvent, renderer: &mut Renderer) -> Result<bool> {
        trace!("view event {:?} (dragging: {})", event, self.dragging);

        let redraw = match event {
            ViewEvent::PointerPressed(PointerButton::Middle) => {
                self.dragging = true;
                false
            }
            ViewEvent::PointerPressed(_) => false,
            ViewEvent::PointerReleased(_) => {
                self.dragging = false;
                false
            }
            ViewEvent::PointerMoved { dx, dy } => {
                if self.dragging {
                    renderer.viewport_mut().pan_by(dx, dy);
                }
                self.dragging
            }
            ViewEvent::Resized { .. } => true,
            ViewEvent::ZoomChanged(scale) => {
                renderer.set_scale(scale)?;
                true
            }
            ViewEvent::PixelPreviewChanged(enabled) => {
                renderer.set_pixel_preview(enabled);
                true
            }
        };

        Ok(redraw)
    }
}
