//! The reveal transition orchestrator.
//!
//! `RevealTransition::start` sequences the whole expand/collapse
//! choreography: it computes the mask geometry, reparents the presented
//! content into a temporary mask container, installs the circular clip,
//! submits the property animations, and registers the batch completion that
//! restores the scene graph and signals the context.
//!
//! Each run is a fresh computation from the current on-screen geometry;
//! nothing persists between runs except the slide-when-collapsed latch.

use std::cell::Cell;
use std::rc::Rc;

use morph_core::{Color, Path, Point, Rect};
use morph_scene::{
    AnimateOptions, Animator, Layer, LayerCallback, LayerId, LayerProperty, LayerTree, Transaction,
};

use crate::context::TransitionContext;
use crate::geometry::{anchor_fraction, center_of, frame_centered, vector_length};
use crate::motion::{MotionSpecProvider, PhaseTimings};
use crate::presentation::PresentationLifecycleAdapter;

/// Vertical gap between the source element and an edge-aligned mask
/// container.
pub const EDGE_ALIGNED_INSET: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Running,
    Completed,
}

/// Immutable per-run geometry, computed once at transition start.
#[derive(Debug, Clone, Copy)]
pub struct RevealGeometry {
    /// Mask container frame at the collapsed end of the motion.
    pub initial_frame: Rect,
    /// Mask container frame at the expanded end (the presented screen's
    /// original frame).
    pub final_frame: Rect,
    /// Circle center in the container's own coordinate space.
    pub mask_center: Point,
    /// Scale pivot as a fraction of the container bounds.
    pub anchor: Point,
    /// The on-screen point the reveal must grow past to cover the container.
    pub growth_point: Point,
    /// Half the source element's smaller dimension.
    pub initial_radius: f32,
    pub final_radius: f32,
    pub final_scale: f32,
}

impl RevealGeometry {
    /// Compute the run geometry from the source element's on-screen frame
    /// and the presented screen's original frame.
    ///
    /// # Panics
    /// Panics when the source element has a zero extent, which would make
    /// the scale factor non-finite.
    pub fn compute(source_frame: Rect, final_frame: Rect, is_centered: bool) -> Self {
        assert!(
            source_frame.w > 0.0 && source_frame.h > 0.0,
            "source element must have a non-zero extent"
        );

        let source_center = center_of(source_frame);
        let size = final_frame.size();

        let initial_frame = if is_centered {
            frame_centered(source_center, size)
        } else {
            // Below the source element, flush to the container edge the
            // element sits nearer to.
            let x = if source_center.x < final_frame.mid_x() {
                final_frame.min_x()
            } else {
                final_frame.max_x() - size.w
            };
            Rect::new(x, source_frame.max_y() + EDGE_ALIGNED_INSET, size.w, size.h)
        };

        let growth_point = if is_centered {
            // Farthest corner from the circle center; an exactly centered
            // circle resolves toward the bottom-right.
            Point::new(
                if source_center.x <= initial_frame.mid_x() {
                    initial_frame.max_x()
                } else {
                    initial_frame.min_x()
                },
                if source_center.y <= initial_frame.mid_y() {
                    initial_frame.max_y()
                } else {
                    initial_frame.min_y()
                },
            )
        } else {
            // Midpoint of the nearer vertical edge.
            let x = if source_center.x < final_frame.mid_x() {
                initial_frame.min_x()
            } else {
                initial_frame.max_x()
            };
            Point::new(x, initial_frame.mid_y())
        };

        let initial_radius = source_frame.size().min_dimension() / 2.0;
        let final_radius = vector_length(
            growth_point.x - source_center.x,
            growth_point.y - source_center.y,
        );
        let mask_center = Point::new(
            source_center.x - initial_frame.min_x(),
            source_center.y - initial_frame.min_y(),
        );

        Self {
            initial_frame,
            final_frame,
            mask_center,
            anchor: anchor_fraction(mask_center, Rect::new(0.0, 0.0, size.w, size.h)),
            growth_point,
            initial_radius,
            final_radius,
            final_scale: final_radius / initial_radius,
        }
    }
}

/// The masked reveal transition.
///
/// One instance serves repeated forward/backward runs; `start` is the only
/// entry point and must not be re-entered while a run is in flight.
pub struct RevealTransition {
    provider: Box<dyn MotionSpecProvider>,
    animator: Animator,
    state: Rc<Cell<RunState>>,
    should_slide_when_collapsed: bool,
    adapter: Option<PresentationLifecycleAdapter>,
}

impl RevealTransition {
    pub fn new(provider: impl MotionSpecProvider + 'static) -> Self {
        Self::with_animator(provider, Animator::new())
    }

    pub fn with_animator(provider: impl MotionSpecProvider + 'static, animator: Animator) -> Self {
        Self {
            provider: Box::new(provider),
            animator,
            state: Rc::new(Cell::new(RunState::Idle)),
            should_slide_when_collapsed: false,
            adapter: None,
        }
    }

    /// Hand scrim and source-visibility cleanup over to an external
    /// presentation adapter. With an adapter attached the orchestrator
    /// creates no scrim of its own and leaves the source hidden at batch
    /// completion; the adapter's dismissal callbacks own both from then on.
    pub fn attach_adapter(&mut self, adapter: PresentationLifecycleAdapter) {
        self.adapter = Some(adapter);
    }

    pub fn adapter(&self) -> Option<&PresentationLifecycleAdapter> {
        self.adapter.as_ref()
    }

    /// Whether the next backward run should delegate to a plain slide.
    /// Latched from the motion description during the last forward run.
    pub fn should_slide_when_collapsed(&self) -> bool {
        self.should_slide_when_collapsed
    }

    pub fn is_running(&self) -> bool {
        self.state.get() == RunState::Running
    }

    /// Run the transition. Returns the animation batch; the caller drives it
    /// with [`Transaction::tick`] until it reports completion.
    ///
    /// # Panics
    /// Panics on a re-entrant call while a run is in flight, or when the
    /// source element has a zero extent.
    pub fn start(&mut self, tree: &mut LayerTree, mut ctx: TransitionContext) -> Transaction {
        assert!(
            self.state.get() != RunState::Running,
            "transition already running"
        );
        self.state.set(RunState::Running);

        assert!(
            is_descendant(tree, ctx.source_element, ctx.presenting_root),
            "source element must live under the presenting root"
        );

        let spec = self.provider.spec_for(&ctx);
        let forward = ctx.direction.is_forward();
        if forward {
            self.should_slide_when_collapsed = spec.should_slide_when_collapsed;
        }
        let phase: &PhaseTimings = if forward {
            &spec.expansion
        } else {
            &spec.collapse
        };
        tracing::debug!(direction = ?ctx.direction, is_centered = spec.is_centered, "starting reveal run");

        // Snapshot before any restructuring; the completion restores from
        // these values.
        let content = ctx.presented_root;
        let content_parent = tree
            .parent_of(content)
            .expect("presented screen must have a superview");
        let content_frame = tree.layer(content).frame;
        let source_frame = tree.layer(ctx.source_element).frame;

        let geo = RevealGeometry::compute(source_frame, content_frame, spec.is_centered);

        // Reparent the content into the mask container, preserving its
        // on-screen position via the container's own frame.
        let mask_id = tree.add_sublayer(
            ctx.container,
            Layer::new("mask-container").with_frame(geo.initial_frame),
        );
        tree.reparent(content, mask_id);
        tree.layer_mut(content).frame = Rect::new(0.0, 0.0, content_frame.w, content_frame.h);

        // Flood fill bridges the source color to the destination background.
        let source_fill = tree
            .layer(ctx.source_element)
            .background
            .unwrap_or(Color::TRANSPARENT);
        let content_background = tree.layer(content).background.unwrap_or(Color::WHITE);
        let flood_id = tree.insert_below(
            mask_id,
            content,
            Layer::new("flood-fill")
                .with_frame(Rect::new(0.0, 0.0, content_frame.w, content_frame.h))
                .with_background(source_fill),
        );

        {
            let mask = tree.layer_mut(mask_id);
            mask.anchor = geo.anchor;
            mask.mask = Some(Path::circle(geo.mask_center, geo.initial_radius));
        }

        tree.layer_mut(ctx.source_element).hidden = true;

        // Without an external adapter the orchestrator owns the scrim and
        // the source re-reveal.
        let owns_cleanup = self.adapter.is_none();
        let scrim_id = if owns_cleanup {
            let container_frame = tree.layer(ctx.container).frame;
            Some(tree.insert_below(
                ctx.container,
                mask_id,
                Layer::new("scrim")
                    .with_frame(Rect::new(0.0, 0.0, container_frame.w, container_frame.h))
                    .with_background(Color::rgba(0, 0, 0, 153))
                    .with_opacity(0.0),
            ))
        } else {
            None
        };

        let mut txn = Transaction::new();

        let state = Rc::clone(&self.state);
        let did_end = ctx.take_did_end();
        let source_element = ctx.source_element;
        txn.on_complete(move |tree: &mut LayerTree| {
            tree.reparent(content, content_parent);
            tree.layer_mut(content).frame = content_frame;
            tree.remove_layer(mask_id);
            if let Some(scrim) = scrim_id {
                tree.remove_layer(scrim);
                tree.layer_mut(source_element).hidden = false;
            }
            state.set(RunState::Completed);
            tracing::debug!("reveal run completed");
            did_end();
        });

        // A forward run ends with the circle slightly short of the corners
        // if scale drift accumulates; snap the clip to the full bounds once
        // the scale animation lands.
        let mask_snap: Option<LayerCallback> = if forward {
            let bounds = Rect::new(0.0, 0.0, content_frame.w, content_frame.h);
            Some(Box::new(move |tree: &mut LayerTree| {
                let mask = tree.layer_mut(mask_id);
                mask.mask = Some(Path::rect(bounds));
                mask.scale = 1.0;
            }))
        } else {
            None
        };

        let reversed = !forward;
        let initial_center = center_of(geo.initial_frame);
        let final_center = center_of(geo.final_frame);

        self.animator.animate(
            tree,
            &mut txn,
            content,
            LayerProperty::Opacity,
            &phase.content_fade,
            [0.0.into(), 1.0.into()],
            AnimateOptions::reversed(reversed),
        );
        self.animator.animate(
            tree,
            &mut txn,
            flood_id,
            LayerProperty::BackgroundColor,
            &phase.fill_fade,
            [source_fill.into(), content_background.into()],
            AnimateOptions::reversed(reversed),
        );
        self.animator.animate(
            tree,
            &mut txn,
            mask_id,
            LayerProperty::Scale,
            &phase.mask_scale,
            [1.0.into(), geo.final_scale.into()],
            AnimateOptions {
                reversed,
                completion: mask_snap,
                ..Default::default()
            },
        );
        self.animator.animate(
            tree,
            &mut txn,
            mask_id,
            LayerProperty::PositionX,
            &phase.horizontal_move,
            [initial_center.x.into(), final_center.x.into()],
            AnimateOptions::reversed(reversed),
        );
        self.animator.animate(
            tree,
            &mut txn,
            mask_id,
            LayerProperty::PositionY,
            &phase.vertical_move,
            [initial_center.y.into(), final_center.y.into()],
            AnimateOptions::reversed(reversed),
        );
        if let Some(scrim) = scrim_id {
            self.animator.animate(
                tree,
                &mut txn,
                scrim,
                LayerProperty::Opacity,
                &phase.scrim_fade,
                [0.0.into(), 1.0.into()],
                AnimateOptions::reversed(reversed),
            );
        }

        txn
    }
}

fn is_descendant(tree: &LayerTree, node: LayerId, ancestor: LayerId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = tree.parent_of(id);
    }
    false
}
