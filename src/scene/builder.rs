//! Populates the decorative scene from [`SceneOptions`].

use std::f32::consts::PI;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    Bubble, Bubbles, Grid, Group, GroupId, MeshMaterial, PointField,
    PointMaterial, Rocks, Scene, Transform,
};
use crate::options::SceneOptions;
use crate::util::color::hex_linear;

/// Tilt of the arena grid about X, so it reads as a floor receding into
/// the fog.
pub const GRID_TILT: f32 = PI / 2.5;

/// Builds a [`Scene`] with seeded random placement.
pub struct SceneBuilder<'a> {
    options: &'a SceneOptions,
}

impl<'a> SceneBuilder<'a> {
    /// Builder over the given options.
    #[must_use]
    pub fn new(options: &'a SceneOptions) -> Self {
        Self { options }
    }

    /// Build the scene. Equal seeds produce equal scenes.
    #[must_use]
    pub fn build(&self) -> Scene {
        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let opts = self.options;

        let hero = Group::new(GroupId::Hero, Self::rocks(&mut rng, opts.rock_count));

        let arena = Group::new(
            GroupId::Arena,
            Grid {
                transform: Transform {
                    rotation: Vec3::new(GRID_TILT, 0.0, 0.0),
                    ..Transform::IDENTITY
                },
                size: opts.grid_size,
                divisions: opts.grid_divisions.max(1),
                center_color: hex_linear(0xbd00ff),
                line_color: hex_linear(0x222222),
            },
        );

        let forest = Group::new(
            GroupId::Forest,
            Self::point_field(
                &mut rng,
                opts.spore_count,
                opts.spore_spread,
                PointMaterial {
                    size: 0.08,
                    color: hex_linear(0x00ffaa),
                    opacity: 1.0,
                    additive: true,
                },
            ),
        );

        let water = Group::new(
            GroupId::Water,
            Self::bubbles(&mut rng, opts.bubble_count, opts.bubble_bound),
        );

        let fire = Group::new(
            GroupId::Fire,
            Self::point_field(
                &mut rng,
                opts.ember_count,
                opts.ember_spread,
                PointMaterial {
                    size: 0.1,
                    color: hex_linear(0x00f0ff),
                    opacity: 1.0,
                    additive: true,
                },
            ),
        );

        let universe = Group::new(
            GroupId::Universe,
            Self::point_field(
                &mut rng,
                opts.star_count,
                opts.star_spread,
                PointMaterial {
                    size: 0.05,
                    color: [1.0, 1.0, 1.0],
                    opacity: 0.6,
                    additive: false,
                },
            ),
        );

        log::debug!(
            "scene built: {} rocks, {} bubbles, {} points",
            hero.content.rocks.len(),
            water.content.bubbles.len(),
            forest.content.positions.len()
                + fire.content.positions.len()
                + universe.content.positions.len()
        );

        Scene {
            hero,
            arena,
            forest,
            water,
            fire,
            universe,
            lighting: opts.lighting.clone(),
        }
    }

    fn rocks(rng: &mut StdRng, count: usize) -> Rocks {
        let rocks = (0..count)
            .map(|_| Transform {
                position: Vec3::new(
                    centered(rng, 15.0),
                    centered(rng, 10.0),
                    centered(rng, 10.0) - 2.0,
                ),
                rotation: Vec3::new(
                    rng.random::<f32>() * PI,
                    rng.random::<f32>() * PI,
                    0.0,
                ),
                scale: Vec3::splat(rng.random::<f32>() * 0.8 + 0.2),
            })
            .collect();
        Rocks {
            rocks,
            material: MeshMaterial {
                color: hex_linear(0x223344),
                opacity: 1.0,
            },
        }
    }

    fn bubbles(rng: &mut StdRng, count: usize, bound: f32) -> Bubbles {
        let bound = bound.abs();
        let y_spread = (bound * 2.0).min(15.0);
        let bubbles = (0..count)
            .map(|_| Bubble {
                transform: Transform {
                    position: Vec3::new(
                        centered(rng, 20.0),
                        centered(rng, y_spread),
                        centered(rng, 10.0),
                    ),
                    scale: Vec3::splat(rng.random::<f32>() + 0.5),
                    ..Transform::IDENTITY
                },
                speed: rng.random::<f32>() * 0.03 + 0.01,
            })
            .collect();
        Bubbles {
            bubbles,
            bound,
            material: MeshMaterial {
                color: hex_linear(0x00f0ff),
                opacity: 0.35,
            },
        }
    }

    fn point_field(
        rng: &mut StdRng,
        count: usize,
        spread: f32,
        material: PointMaterial,
    ) -> PointField {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    centered(rng, spread),
                    centered(rng, spread),
                    centered(rng, spread),
                )
            })
            .collect();
        PointField {
            transform: Transform::IDENTITY,
            positions,
            material,
        }
    }
}

/// Uniform sample in `[-spread/2, spread/2)`.
fn centered(rng: &mut StdRng, spread: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * spread
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts() {
        let scene = SceneBuilder::new(&SceneOptions::default()).build();
        assert_eq!(scene.hero.content.rocks.len(), 8);
        assert_eq!(scene.forest.content.positions.len(), 1500);
        assert_eq!(scene.water.content.bubbles.len(), 40);
        assert_eq!(scene.fire.content.positions.len(), 1000);
        assert_eq!(scene.universe.content.positions.len(), 3000);
    }

    #[test]
    fn groups_sit_at_section_depths() {
        let scene = SceneBuilder::new(&SceneOptions::default()).build();
        assert_eq!(scene.hero.transform.position.y, 0.0);
        assert_eq!(scene.arena.transform.position.y, -30.0);
        assert_eq!(scene.forest.transform.position.y, -60.0);
        assert_eq!(scene.water.transform.position.y, -90.0);
        assert_eq!(scene.fire.transform.position.y, -120.0);
        assert_eq!(scene.universe.transform.position.y, -200.0);
    }

    #[test]
    fn same_seed_same_scene() {
        let opts = SceneOptions::default();
        let a = SceneBuilder::new(&opts).build();
        let b = SceneBuilder::new(&opts).build();
        assert_eq!(a.hero.content.rocks, b.hero.content.rocks);
        assert_eq!(a.universe.content.positions, b.universe.content.positions);

        let other = SceneOptions {
            seed: opts.seed + 1,
            ..opts
        };
        let c = SceneBuilder::new(&other).build();
        assert_ne!(a.hero.content.rocks, c.hero.content.rocks);
    }

    #[test]
    fn placements_respect_spreads() {
        let scene = SceneBuilder::new(&SceneOptions::default()).build();
        for rock in &scene.hero.content.rocks {
            assert!(rock.position.x.abs() <= 7.5);
            assert!(rock.position.y.abs() <= 5.0);
            assert!((-7.0..=3.0).contains(&rock.position.z));
            assert!((0.2..=1.0).contains(&rock.scale.x));
        }
        for p in &scene.forest.content.positions {
            assert!(p.abs().max_element() <= 15.0);
        }
        for b in &scene.water.content.bubbles {
            assert!(b.transform.position.y.abs() <= scene.water.content.bound);
            assert!((0.01..=0.04).contains(&b.speed));
        }
    }

    #[test]
    fn built_scene_is_finite() {
        let scene = SceneBuilder::new(&SceneOptions::default()).build();
        assert!(scene.is_finite());
    }
}
