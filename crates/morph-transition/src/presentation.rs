//! Presentation lifecycle hand-off.
//!
//! When the platform's modal-presentation machinery drives the dismissal,
//! scrim and source-visibility cleanup move out of the orchestrator's batch
//! completion and into this adapter, which the platform calls at
//! dismissal-begin and dismissal-end. One owner at a time, never both.

use morph_core::Rect;
use morph_scene::{LayerId, LayerTree};

/// External owner of the scrim and the source element's re-reveal.
#[derive(Debug, Clone, Copy)]
pub struct PresentationLifecycleAdapter {
    scrim: LayerId,
    source_element: LayerId,
    destination_frame: Rect,
}

impl PresentationLifecycleAdapter {
    pub fn new(scrim: LayerId, source_element: LayerId, destination_frame: Rect) -> Self {
        Self {
            scrim,
            source_element,
            destination_frame,
        }
    }

    /// The presented screen's computed on-screen frame.
    pub fn destination_frame(&self) -> Rect {
        self.destination_frame
    }

    /// Dismissal is starting: the scrim drops out immediately while the
    /// collapse animation runs.
    pub fn dismissal_began(&self, tree: &mut LayerTree) {
        tree.layer_mut(self.scrim).hidden = true;
    }

    /// Dismissal has fully settled: tear the scrim down and re-reveal the
    /// source element.
    pub fn dismissal_ended(&self, tree: &mut LayerTree) {
        tree.remove_layer(self.scrim);
        tree.layer_mut(self.source_element).hidden = false;
    }
}
