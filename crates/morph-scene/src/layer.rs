//! Retained layer tree.
//!
//! Layers are the render-node abstraction the motion engine animates: plain
//! model state plus parent/child structure, with a presentation table holding
//! the currently rendered value of any property that is mid-animation.
//! `presentation_value` falls back to the model when nothing is in flight,
//! which is exactly the sampling rule the animator relies on.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use morph_core::{Color, Path, Point, Rect, Transform2D};

use crate::animation::types::{AnimatableValue, ValueKind};

/// Unique identifier for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u64);

impl LayerId {
    /// Generate a new unique layer ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Animatable layer properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerProperty {
    Opacity,
    BackgroundColor,
    /// Horizontal position of the frame center.
    PositionX,
    /// Vertical position of the frame center.
    PositionY,
    /// Uniform scale transform.
    Scale,
    MaskPath,
}

impl LayerProperty {
    /// The value kind this property stores.
    pub fn expected_kind(&self) -> ValueKind {
        match self {
            Self::Opacity | Self::PositionX | Self::PositionY | Self::Scale => ValueKind::Scalar,
            Self::BackgroundColor => ValueKind::Color,
            Self::MaskPath => ValueKind::Path,
        }
    }
}

/// Model state of a single render node.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    /// Position and extent in the parent's coordinate space.
    pub frame: Rect,
    /// Transform pivot in unit coordinates of the frame.
    pub anchor: Point,
    /// Uniform scale applied about the anchor.
    pub scale: f32,
    pub opacity: f32,
    pub background: Option<Color>,
    /// Clip shape in the layer's own coordinate space.
    pub mask: Option<Path>,
    pub hidden: bool,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame: Rect::ZERO,
            anchor: Point::new(0.5, 0.5),
            scale: 1.0,
            opacity: 1.0,
            background: None,
            mask: None,
            hidden: false,
        }
    }

    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// The layer's render transform: a uniform scale about the anchor point,
    /// expressed in frame-local coordinates. Points at the pivot are fixed
    /// under any scale.
    pub fn transform(&self) -> Transform2D {
        let pivot = Point::new(self.anchor.x * self.frame.w, self.anchor.y * self.frame.h);
        Transform2D::scale_about(self.scale, pivot)
    }
}

/// Arena of layers with parent/child structure and presentation overrides.
#[derive(Debug, Default)]
pub struct LayerTree {
    layers: HashMap<LayerId, Layer>,
    parents: HashMap<LayerId, LayerId>,
    children: HashMap<LayerId, Vec<LayerId>>,
    presentation: HashMap<(LayerId, LayerProperty), AnimatableValue>,
}

impl LayerTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root layer (no parent).
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId::new();
        self.layers.insert(id, layer);
        id
    }

    /// Add a layer as the last child of `parent`.
    ///
    /// # Panics
    /// Panics if `parent` is not in the tree.
    pub fn add_sublayer(&mut self, parent: LayerId, layer: Layer) -> LayerId {
        assert!(self.layers.contains_key(&parent), "unknown parent layer");
        let id = LayerId::new();
        self.layers.insert(id, layer);
        self.parents.insert(id, parent);
        self.children.entry(parent).or_default().push(id);
        id
    }

    /// Add a layer as a child of `parent`, ordered just below `sibling`.
    ///
    /// # Panics
    /// Panics if `sibling` is not a child of `parent`.
    pub fn insert_below(&mut self, parent: LayerId, sibling: LayerId, layer: Layer) -> LayerId {
        let id = LayerId::new();
        self.layers.insert(id, layer);
        self.parents.insert(id, parent);
        let siblings = self.children.entry(parent).or_default();
        let index = siblings
            .iter()
            .position(|&c| c == sibling)
            .expect("sibling is not a child of parent");
        siblings.insert(index, id);
        id
    }

    /// Move `child` under `new_parent`, appended as the last child.
    ///
    /// Structure only: the frame is left untouched, so on-screen position
    /// bookkeeping belongs to the caller.
    pub fn reparent(&mut self, child: LayerId, new_parent: LayerId) {
        assert!(self.layers.contains_key(&child), "unknown child layer");
        assert!(self.layers.contains_key(&new_parent), "unknown parent layer");
        if let Some(old_parent) = self.parents.get(&child).copied() {
            if let Some(siblings) = self.children.get_mut(&old_parent) {
                siblings.retain(|&c| c != child);
            }
        }
        self.parents.insert(child, new_parent);
        self.children.entry(new_parent).or_default().push(child);
    }

    /// Remove a layer and its whole subtree, including presentation entries.
    pub fn remove_layer(&mut self, id: LayerId) {
        if let Some(parent) = self.parents.remove(&id) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|&c| c != id);
            }
        }
        let subtree = self.children.remove(&id).unwrap_or_default();
        for child in subtree {
            self.parents.remove(&child);
            self.remove_layer(child);
        }
        self.layers.remove(&id);
        self.presentation.retain(|(layer, _), _| *layer != id);
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    pub fn parent_of(&self, id: LayerId) -> Option<LayerId> {
        self.parents.get(&id).copied()
    }

    pub fn children_of(&self, id: LayerId) -> &[LayerId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// # Panics
    /// Panics if the layer does not exist.
    pub fn layer(&self, id: LayerId) -> &Layer {
        self.layers.get(&id).expect("unknown layer")
    }

    /// # Panics
    /// Panics if the layer does not exist.
    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        self.layers.get_mut(&id).expect("unknown layer")
    }

    /// The committed model value of a property.
    pub fn model_value(&self, id: LayerId, property: LayerProperty) -> AnimatableValue {
        let layer = self.layer(id);
        match property {
            LayerProperty::Opacity => layer.opacity.into(),
            LayerProperty::BackgroundColor => {
                layer.background.unwrap_or(Color::TRANSPARENT).into()
            }
            LayerProperty::PositionX => layer.frame.mid_x().into(),
            LayerProperty::PositionY => layer.frame.mid_y().into(),
            LayerProperty::Scale => layer.scale.into(),
            LayerProperty::MaskPath => layer.mask.clone().unwrap_or_default().into(),
        }
    }

    /// Write a value through to the layer's model fields.
    ///
    /// # Panics
    /// Panics if the value kind does not match the property.
    pub fn set_model_value(&mut self, id: LayerId, property: LayerProperty, value: AnimatableValue) {
        assert_eq!(
            value.kind(),
            property.expected_kind(),
            "value kind does not match property {:?}",
            property
        );
        let layer = self.layer_mut(id);
        match (property, value) {
            (LayerProperty::Opacity, AnimatableValue::Scalar { value }) => layer.opacity = value,
            (LayerProperty::BackgroundColor, AnimatableValue::Color { rgba }) => {
                layer.background = Some(Color::from_components(rgba));
            }
            (LayerProperty::PositionX, AnimatableValue::Scalar { value }) => {
                layer.frame.x = value - layer.frame.w / 2.0;
            }
            (LayerProperty::PositionY, AnimatableValue::Scalar { value }) => {
                layer.frame.y = value - layer.frame.h / 2.0;
            }
            (LayerProperty::Scale, AnimatableValue::Scalar { value }) => layer.scale = value,
            (LayerProperty::MaskPath, AnimatableValue::Path { path }) => layer.mask = Some(path),
            // Kind was asserted above.
            _ => unreachable!(),
        }
    }

    /// The currently rendered value: the in-flight presentation override if
    /// an animation is active, else the model value.
    pub fn presentation_value(&self, id: LayerId, property: LayerProperty) -> AnimatableValue {
        self.presentation
            .get(&(id, property))
            .cloned()
            .unwrap_or_else(|| self.model_value(id, property))
    }

    pub fn set_presentation_value(
        &mut self,
        id: LayerId,
        property: LayerProperty,
        value: AnimatableValue,
    ) {
        self.presentation.insert((id, property), value);
    }

    pub fn clear_presentation_value(&mut self, id: LayerId, property: LayerProperty) {
        self.presentation.remove(&(id, property));
    }

    /// True when any property of any layer has an in-flight override.
    pub fn has_in_flight_values(&self) -> bool {
        !self.presentation.is_empty()
    }
}
