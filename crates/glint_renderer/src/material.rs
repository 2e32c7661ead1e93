//! Surface material parameters for Phong shading.

use crate::{Pattern, ShapeArena, ShapeId};
use glam::DVec3;
use glint_math::Tuple;
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// Phong reflectance parameters plus reflection and refraction controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub color: Color,
    /// Overrides `color` when set
    pub pattern: Option<Pattern>,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ONE,
            pattern: None,
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    /// Fully transparent glass with a refractive index of 1.5.
    pub fn glass() -> Self {
        Self {
            transparency: 1.0,
            refractive_index: 1.5,
            ..Self::default()
        }
    }

    /// Surface color at `world_point` on `object`, resolving the pattern if
    /// there is one.
    pub fn color_at(&self, shapes: &ShapeArena, object: ShapeId, world_point: Tuple) -> Color {
        match &self.pattern {
            Some(pattern) => pattern.at_shape(shapes, object, world_point),
            None => self.color,
        }
    }
}
