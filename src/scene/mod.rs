//! Decorative scene: one group per page section, stacked along -Y.
//!
//! The scene is plain data. [`builder::SceneBuilder`] populates it once,
//! [`crate::animation::frame::update`] mutates transforms every
//! frame, and the renderer reads it.

pub mod builder;
mod transform;

use glam::Vec3;
pub use transform::Transform;

use crate::options::LightingOptions;

// ---------------------------------------------------------------------------
// Group identity
// ---------------------------------------------------------------------------

/// The section groups, top of the page first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupId {
    /// Drifting rocks behind the hero banner.
    Hero,
    /// Tilted neon grid.
    Arena,
    /// Green spores.
    Forest,
    /// Rising bubbles.
    Water,
    /// Blue embers.
    Fire,
    /// Star field at the bottom of the page.
    Universe,
}

impl GroupId {
    /// All groups in page order.
    pub const ALL: [Self; 6] = [
        Self::Hero,
        Self::Arena,
        Self::Forest,
        Self::Water,
        Self::Fire,
        Self::Universe,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Arena => "arena",
            Self::Forest => "forest",
            Self::Water => "water",
            Self::Fire => "fire",
            Self::Universe => "universe",
        }
    }

    /// World-space vertical offset of the group.
    #[must_use]
    pub fn depth(self) -> f32 {
        match self {
            Self::Hero => 0.0,
            Self::Arena => -30.0,
            Self::Forest => -60.0,
            Self::Water => -90.0,
            Self::Fire => -120.0,
            Self::Universe => -200.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// A named collection of primitives with its own transform.
#[derive(Debug, Clone)]
pub struct Group<C> {
    /// Which section this group decorates.
    pub id: GroupId,
    /// Group transform; children are relative to it.
    pub transform: Transform,
    /// The primitives.
    pub content: C,
}

impl<C> Group<C> {
    /// Group at its section depth.
    pub fn new(id: GroupId, content: C) -> Self {
        Self {
            id,
            transform: Transform::from_position(Vec3::new(0.0, id.depth(), 0.0)),
            content,
        }
    }
}

/// Surface colour and opacity of a lit mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshMaterial {
    /// Linear RGB.
    pub color: [f32; 3],
    /// 1.0 = opaque.
    pub opacity: f32,
}

/// Flat-shaded dodecahedra.
#[derive(Debug, Clone)]
pub struct Rocks {
    /// One transform per rock.
    pub rocks: Vec<Transform>,
    /// Shared material.
    pub material: MeshMaterial,
}

/// Square line grid in the local XZ plane.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Grid transform inside its group.
    pub transform: Transform,
    /// Edge length.
    pub size: f32,
    /// Cells per side.
    pub divisions: u32,
    /// Colour of the two centre lines (linear RGB).
    pub center_color: [f32; 3],
    /// Colour of every other line (linear RGB).
    pub line_color: [f32; 3],
}

/// Point sprite appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMaterial {
    /// World-space sprite size.
    pub size: f32,
    /// Linear RGB.
    pub color: [f32; 3],
    /// Sprite opacity.
    pub opacity: f32,
    /// Additive blending instead of alpha blending.
    pub additive: bool,
}

/// A static cloud of points that moves as one object.
#[derive(Debug, Clone)]
pub struct PointField {
    /// Field transform inside its group.
    pub transform: Transform,
    /// Local point positions, fixed after construction.
    pub positions: Vec<Vec3>,
    /// Sprite appearance.
    pub material: PointMaterial,
}

/// One rising bubble.
#[derive(Debug, Clone, Copy)]
pub struct Bubble {
    /// Bubble transform inside its group.
    pub transform: Transform,
    /// Rise per reference frame (1/60 s).
    pub speed: f32,
}

/// Bubbles that rise and wrap between `-bound` and `+bound`.
#[derive(Debug, Clone)]
pub struct Bubbles {
    /// The bubbles.
    pub bubbles: Vec<Bubble>,
    /// Vertical travel bound.
    pub bound: f32,
    /// Shared material.
    pub material: MeshMaterial,
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The whole decorative scene.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Rocks behind the hero.
    pub hero: Group<Rocks>,
    /// Arena grid.
    pub arena: Group<Grid>,
    /// Forest spores.
    pub forest: Group<PointField>,
    /// Water bubbles.
    pub water: Group<Bubbles>,
    /// Fire embers.
    pub fire: Group<PointField>,
    /// Universe stars.
    pub universe: Group<PointField>,
    /// Lights and fog.
    pub lighting: LightingOptions,
}

impl Scene {
    /// Visit every transform in the scene: each group's, then its
    /// children's.
    pub fn for_each_transform(&self, mut f: impl FnMut(GroupId, &Transform)) {
        f(GroupId::Hero, &self.hero.transform);
        for rock in &self.hero.content.rocks {
            f(GroupId::Hero, rock);
        }
        f(GroupId::Arena, &self.arena.transform);
        f(GroupId::Arena, &self.arena.content.transform);
        for field in self.point_fields() {
            f(field.id, &field.transform);
            f(field.id, &field.content.transform);
        }
        f(GroupId::Water, &self.water.transform);
        for bubble in &self.water.content.bubbles {
            f(GroupId::Water, &bubble.transform);
        }
    }

    /// Whether every transform in the scene is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        let mut finite = true;
        self.for_each_transform(|_, t| finite &= t.is_finite());
        finite
    }

    /// The three particle groups, in page order.
    #[must_use]
    pub fn point_fields(&self) -> [&Group<PointField>; 3] {
        [&self.forest, &self.fire, &self.universe]
    }
}
