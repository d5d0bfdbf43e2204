//! Per-run transition context.

use morph_scene::LayerId;

/// Which way the transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    /// Presentation: the destination screen grows out of the source element.
    Forward,
    /// Dismissal: the presented screen collapses back into the source element.
    Backward,
}

impl TransitionDirection {
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Everything one run needs from the outside: direction, the participating
/// layers, and the end-of-transition signal.
///
/// The end callback is `FnOnce` and consumed when it fires, so a second
/// invocation is impossible by construction.
pub struct TransitionContext {
    pub direction: TransitionDirection,
    /// The shared container both screens live under.
    pub container: LayerId,
    /// Root of the screen that hosts the source element.
    pub presenting_root: LayerId,
    /// Root of the presented screen; this is the content that gets masked.
    pub presented_root: LayerId,
    /// The control the presented screen appears to grow out of.
    pub source_element: LayerId,
    did_end: Option<Box<dyn FnOnce()>>,
}

impl TransitionContext {
    pub fn new(
        direction: TransitionDirection,
        container: LayerId,
        presenting_root: LayerId,
        presented_root: LayerId,
        source_element: LayerId,
        did_end: impl FnOnce() + 'static,
    ) -> Self {
        Self {
            direction,
            container,
            presenting_root,
            presented_root,
            source_element,
            did_end: Some(Box::new(did_end)),
        }
    }

    pub(crate) fn take_did_end(&mut self) -> Box<dyn FnOnce()> {
        self.did_end.take().expect("end callback already taken")
    }
}

impl std::fmt::Debug for TransitionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionContext")
            .field("direction", &self.direction)
            .field("container", &self.container)
            .field("presenting_root", &self.presenting_root)
            .field("presented_root", &self.presented_root)
            .field("source_element", &self.source_element)
            .finish_non_exhaustive()
    }
}
