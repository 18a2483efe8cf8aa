use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::hex_linear;

/// Scene population: seed, counts and spreads for each section group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
pub struct SceneOptions {
    /// Seed for the placement RNG. Equal seeds build identical scenes.
    #[schemars(skip)]
    pub seed: u64,
    /// Number of hero rocks.
    #[schemars(title = "Rocks", range(min = 0, max = 64))]
    pub rock_count: usize,
    /// Number of forest spores.
    #[schemars(title = "Spores", range(min = 0, max = 10000))]
    pub spore_count: usize,
    /// Edge length of the cube spores are scattered in.
    #[schemars(skip)]
    pub spore_spread: f32,
    /// Number of water bubbles.
    #[schemars(title = "Bubbles", range(min = 0, max = 200))]
    pub bubble_count: usize,
    /// Bubbles rising past `+bubble_bound` restart at `-bubble_bound`.
    #[schemars(skip)]
    pub bubble_bound: f32,
    /// Number of fire embers.
    #[schemars(title = "Embers", range(min = 0, max = 10000))]
    pub ember_count: usize,
    /// Edge length of the ember cube.
    #[schemars(skip)]
    pub ember_spread: f32,
    /// Number of universe stars.
    #[schemars(title = "Stars", range(min = 0, max = 20000))]
    pub star_count: usize,
    /// Edge length of the star cube.
    #[schemars(skip)]
    pub star_spread: f32,
    /// Arena grid edge length.
    #[schemars(skip)]
    pub grid_size: f32,
    /// Arena grid cell count per side.
    #[schemars(skip)]
    pub grid_divisions: u32,
    /// Lights and fog.
    pub lighting: LightingOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            rock_count: 8,
            spore_count: 1500,
            spore_spread: 30.0,
            bubble_count: 40,
            bubble_bound: 8.0,
            ember_count: 1000,
            ember_spread: 25.0,
            star_count: 3000,
            star_spread: 60.0,
            grid_size: 40.0,
            grid_divisions: 40,
            lighting: LightingOptions::default(),
        }
    }
}

/// Light rig and fog. Colours are linear RGB.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
pub struct LightingOptions {
    /// Ambient light intensity (white).
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient: f32,
    /// Directional light intensity (white).
    #[schemars(title = "Key Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub key_intensity: f32,
    /// Position the directional light shines from (towards the origin).
    #[schemars(skip)]
    pub key_position: [f32; 3],
    /// Point light colour.
    #[schemars(skip)]
    pub point_color: [f32; 3],
    /// Point light intensity.
    #[schemars(title = "Point Light", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub point_intensity: f32,
    /// Point light range; contribution falls to zero at this distance.
    #[schemars(skip)]
    pub point_range: f32,
    /// Point light position.
    #[schemars(skip)]
    pub point_position: [f32; 3],
    /// Fog colour.
    #[schemars(skip)]
    pub fog_color: [f32; 3],
    /// Exponential-squared fog density.
    #[schemars(title = "Fog Density", range(min = 0.0, max = 0.1), extend("step" = 0.005))]
    pub fog_density: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.1,
            key_intensity: 1.0,
            key_position: [5.0, 10.0, 7.0],
            point_color: hex_linear(0x00f0ff),
            point_intensity: 2.0,
            point_range: 20.0,
            point_position: [0.0, 5.0, 0.0],
            fog_color: hex_linear(0x00050a),
            fog_density: 0.02,
        }
    }
}
