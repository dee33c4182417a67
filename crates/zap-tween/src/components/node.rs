use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use glam::Vec3;

use crate::api::error::TweenError;
use crate::api::types::TargetId;
use crate::components::binding::{
    Animatable, Binding, PropertyKind, ScalarChannel, Target, TweenValue, VectorProperty,
};
use crate::core::tween::Tween;

/// Fat scene node: a single struct with every property a tween can drive.
/// Reference host object for the binding traits; real hosts implement the
/// traits on their own types.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: TargetId,
    /// Position in world space.
    pub pos: Vec3,
    /// Euler rotation in degrees.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl Node {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: TargetId) -> Self {
        Self {
            id,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            alpha: 1.0,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Owning handle to a node shared with the tweens that animate it.
/// Dropping the last handle destroys the node; its tweens are reclaimed on the next tick.
/// The id is fixed when the handle is created.
#[derive(Debug, Clone)]
pub struct NodeHandle {
    id: TargetId,
    node: Rc<RefCell<Node>>,
}

impl NodeHandle {
    pub fn new(node: Node) -> Self {
        Self {
            id: node.id,
            node: Rc::new(RefCell::new(node)),
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn borrow(&self) -> Ref<'_, Node> {
        self.node.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Node> {
        self.node.borrow_mut()
    }

    /// Non-owning reference, usable as a by-target query key after the node is gone.
    pub fn downgrade(&self) -> WeakNode {
        WeakNode {
            id: self.id,
            node: Rc::downgrade(&self.node),
        }
    }

    /// Adapter for one property of this node.
    pub fn bind(&self, kind: PropertyKind) -> Binding {
        let node = self.downgrade();
        match kind {
            PropertyKind::Move => Binding::Move(Box::new(NodeVector {
                node,
                field: VectorField::Position,
            })),
            PropertyKind::Scale => Binding::Scale(Box::new(NodeVector {
                node,
                field: VectorField::Scale,
            })),
            PropertyKind::Rotate => Binding::Rotate(Box::new(NodeVector {
                node,
                field: VectorField::Rotation,
            })),
            PropertyKind::Fade => Binding::Fade(Box::new(NodeAlpha { node })),
        }
    }

    // -- Tween shorthands --
    //
    // Shorthands without an explicit start value read the current one, and
    // fail with `InvalidTarget` while the host holds a mutable borrow of the node.

    /// Tween the position to `to`, starting from the current position.
    pub fn move_to(&self, to: Vec3, duration: f32) -> Result<Tween, TweenError> {
        Tween::new(self.bind(PropertyKind::Move), to.into(), duration)
    }

    /// Tween the scale to `to`.
    pub fn scale_to(&self, to: Vec3, duration: f32) -> Result<Tween, TweenError> {
        Tween::new(self.bind(PropertyKind::Scale), to.into(), duration)
    }

    /// Tween the rotation (degrees) to `to`.
    pub fn rotate_to(&self, to: Vec3, duration: f32) -> Result<Tween, TweenError> {
        Tween::new(self.bind(PropertyKind::Rotate), to.into(), duration)
    }

    /// Tween the alpha to `to`, which must lie in [0, 1].
    pub fn fade_to(&self, to: f32, duration: f32) -> Result<Tween, TweenError> {
        Tween::new(self.bind(PropertyKind::Fade), to.into(), duration)
    }

    /// Fade in from transparent.
    pub fn fade_in(&self, duration: f32) -> Result<Tween, TweenError> {
        Tween::from_to(
            self.bind(PropertyKind::Fade),
            TweenValue::Scalar(0.0),
            TweenValue::Scalar(1.0),
            duration,
        )
    }

    /// Fade out to transparent.
    pub fn fade_out(&self, duration: f32) -> Result<Tween, TweenError> {
        Tween::from_to(
            self.bind(PropertyKind::Fade),
            TweenValue::Scalar(1.0),
            TweenValue::Scalar(0.0),
            duration,
        )
    }
}

impl Target for NodeHandle {
    fn target_id(&self) -> TargetId {
        self.id()
    }

    fn is_live(&self) -> bool {
        true
    }
}

impl Animatable for NodeHandle {
    fn binding(&self, kind: PropertyKind) -> Option<Binding> {
        Some(self.bind(kind))
    }
}

/// Weak reference to a node. Live while any [`NodeHandle`] to it exists.
#[derive(Debug, Clone)]
pub struct WeakNode {
    id: TargetId,
    node: Weak<RefCell<Node>>,
}

impl WeakNode {
    fn with<R>(&self, f: impl FnOnce(&Node) -> R) -> Option<R> {
        let node = self.node.upgrade()?;
        let node = node.try_borrow().ok()?;
        Some(f(&node))
    }

    fn with_mut(&self, f: impl FnOnce(&mut Node)) {
        if let Some(node) = self.node.upgrade() {
            // A host-held borrow skips this frame's write rather than panicking.
            if let Ok(mut node) = node.try_borrow_mut() {
                f(&mut node);
            }
        }
    }
}

impl Target for WeakNode {
    fn target_id(&self) -> TargetId {
        self.id
    }

    fn is_live(&self) -> bool {
        self.node.strong_count() > 0
    }
}

#[derive(Debug, Clone, Copy)]
enum VectorField {
    Position,
    Rotation,
    Scale,
}

struct NodeVector {
    node: WeakNode,
    field: VectorField,
}

impl Target for NodeVector {
    fn target_id(&self) -> TargetId {
        self.node.target_id()
    }

    fn is_live(&self) -> bool {
        self.node.is_live()
    }
}

impl VectorProperty for NodeVector {
    fn read(&self) -> Option<Vec3> {
        let field = self.field;
        self.node.with(|n| match field {
            VectorField::Position => n.pos,
            VectorField::Rotation => n.rotation,
            VectorField::Scale => n.scale,
        })
    }

    fn write(&mut self, value: Vec3) {
        let field = self.field;
        self.node.with_mut(|n| match field {
            VectorField::Position => n.pos = value,
            VectorField::Rotation => n.rotation = value,
            VectorField::Scale => n.scale = value,
        });
    }
}

struct NodeAlpha {
    node: WeakNode,
}

impl Target for NodeAlpha {
    fn target_id(&self) -> TargetId {
        self.node.target_id()
    }

    fn is_live(&self) -> bool {
        self.node.is_live()
    }
}

impl ScalarChannel for NodeAlpha {
    fn read(&self) -> Option<f32> {
        self.node.with(|n| n.alpha)
    }

    fn write(&mut self, value: f32) {
        self.node.with_mut(|n| n.alpha = value);
    }
}
