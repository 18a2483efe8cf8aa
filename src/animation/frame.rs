//! Per-frame drift of the decorative groups.
//!
//! Absolute animations (spins, bobbing) are pure functions of elapsed time.
//! Incremental ones (rock drift, bubble rise) are authored per 60 Hz frame
//! and scaled by the real frame delta.

use super::tween::AnimatedValues;
use crate::scene::Scene;

/// Frame rate the incremental drift constants are tuned for.
pub const REFERENCE_FPS: f32 = 60.0;

/// Advance every group to `elapsed` seconds. `dt` is the frame delta in
/// seconds; `values` carries the pointer-parallax tilts layered on top.
pub fn update(scene: &mut Scene, values: &AnimatedValues, elapsed: f32, dt: f32) {
    let t = elapsed.max(0.0);
    let frames = dt.max(0.0) * REFERENCE_FPS;

    // Hero: slow spin plus parallax tilt; each rock bobs and tumbles.
    let hero = &mut scene.hero;
    hero.transform.rotation.x = values.hero_tilt_x;
    hero.transform.rotation.y = t * 0.05 + values.hero_tilt_y;
    for (i, rock) in hero.content.rocks.iter_mut().enumerate() {
        rock.position.y += (t + i as f32).sin() * 0.002 * frames;
        rock.rotation.x = (rock.rotation.x + 0.002 * frames) % std::f32::consts::TAU;
    }

    // Arena: grid scrolls towards the camera and sways.
    scene.arena.transform.rotation.x = values.arena_tilt_x;
    let grid = &mut scene.arena.content.transform;
    grid.position.z = (t * 2.0).rem_euclid(5.0);
    grid.rotation.z = (t * 0.1).sin() * 0.1;

    // Forest
    let spores = &mut scene.forest.content.transform;
    spores.rotation.y = t * 0.03;
    spores.position.y = (t * 0.2).sin() * 0.5;

    // Water: bubbles rise and wrap to the bottom.
    let water = &mut scene.water;
    water.transform.rotation.y = (t * 0.1).sin() * 0.1;
    let bound = water.content.bound;
    for bubble in &mut water.content.bubbles {
        bubble.transform.position.y += bubble.speed * frames;
        if bubble.transform.position.y > bound {
            bubble.transform.position.y = -bound;
        }
    }

    // Fire
    let embers = &mut scene.fire.content.transform;
    embers.rotation.x = t * 0.05;
    embers.position.y = (t * 0.3).cos() * 0.5;

    // Universe
    scene.universe.content.transform.rotation.y = -t * 0.02;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SceneOptions;
    use crate::scene::builder::SceneBuilder;

    const DT: f32 = 1.0 / 60.0;

    fn scene() -> Scene {
        SceneBuilder::new(&SceneOptions::default()).build()
    }

    #[test]
    fn transforms_stay_finite() {
        let mut scene = scene();
        let values = AnimatedValues::default();
        for t in [0.0, 0.016, 1.0, 60.0, 3600.0, 86_400.0, 1.0e6] {
            update(&mut scene, &values, t, DT);
            assert!(scene.is_finite(), "non-finite transform at t={t}");
        }
    }

    #[test]
    fn absolute_formulas() {
        let mut scene = scene();
        update(&mut scene, &AnimatedValues::default(), 10.0, DT);
        assert!((scene.hero.transform.rotation.y - 0.5).abs() < 1e-6);
        assert!((scene.arena.content.transform.position.z - 0.0).abs() < 1e-4);
        assert!((scene.forest.content.transform.rotation.y - 0.3).abs() < 1e-6);
        assert!((scene.fire.content.transform.rotation.x - 0.5).abs() < 1e-6);
        assert!((scene.universe.content.transform.rotation.y + 0.2).abs() < 1e-6);
        assert!(
            (scene.fire.content.transform.position.y - 3.0_f32.cos() * 0.5).abs()
                < 1e-6
        );
    }

    #[test]
    fn grid_offset_wraps_within_five() {
        let mut scene = scene();
        for i in 0..500 {
            update(&mut scene, &AnimatedValues::default(), i as f32 * 0.37, DT);
            let z = scene.arena.content.transform.position.z;
            assert!((0.0..5.0).contains(&z));
        }
    }

    #[test]
    fn parallax_tilts_layer_on_spin() {
        let mut scene = scene();
        let values = AnimatedValues {
            hero_tilt_x: 0.05,
            hero_tilt_y: -0.1,
            arena_tilt_x: 1.3,
            ..AnimatedValues::default()
        };
        update(&mut scene, &values, 2.0, DT);
        assert_eq!(scene.hero.transform.rotation.x, 0.05);
        assert!((scene.hero.transform.rotation.y - (0.1 - 0.1)).abs() < 1e-6);
        assert_eq!(scene.arena.transform.rotation.x, 1.3);
    }

    #[test]
    fn bubbles_stay_within_bound_and_wrap() {
        let mut scene = scene();
        let bound = scene.water.content.bound;
        let values = AnimatedValues::default();
        let mut wrapped = false;
        for frame in 0..2000 {
            let before: Vec<f32> = scene
                .water
                .content
                .bubbles
                .iter()
                .map(|b| b.transform.position.y)
                .collect();
            update(&mut scene, &values, frame as f32 * DT, DT);
            for (b, y0) in scene.water.content.bubbles.iter().zip(before) {
                let y = b.transform.position.y;
                assert!((-bound..=bound).contains(&y), "bubble escaped: {y}");
                if y < y0 {
                    assert_eq!(y, -bound);
                    wrapped = true;
                }
            }
        }
        assert!(wrapped, "no bubble reached the top in 2000 frames");
    }

    #[test]
    fn drift_scales_with_frame_delta() {
        let mut a = scene();
        let mut b = scene();
        let values = AnimatedValues::default();
        // Two 60 Hz frames vs one 30 Hz frame at the same elapsed time.
        update(&mut a, &values, 0.0, DT);
        update(&mut a, &values, 0.0, DT);
        update(&mut b, &values, 0.0, 2.0 * DT);
        let ya = a.water.content.bubbles[0].transform.position.y;
        let yb = b.water.content.bubbles[0].transform.position.y;
        assert!((ya - yb).abs() < 1e-5);
    }
}
