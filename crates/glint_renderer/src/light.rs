//! Point and area lights, and Phong shading against them.

use crate::{Color, Material, SceneError, SceneResult};
use glint_math::Tuple;
use serde::{Deserialize, Serialize};

/// A light with no size, so it casts hard shadows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Tuple,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Tuple, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// A rectangular light sampled on a `usteps x vsteps` grid of cells.
///
/// Each cell is sampled at its center, or at a random point inside it when
/// jitter is on, which trades banding in soft shadows for noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AreaLightDesc", into = "AreaLightDesc")]
pub struct AreaLight {
    corner: Tuple,
    uvec: Tuple,
    usteps: u32,
    vvec: Tuple,
    vsteps: u32,
    position: Tuple,
    intensity: Color,
    jitter: bool,
}

impl AreaLight {
    /// Create an area light spanning `full_uvec` and `full_vvec` from
    /// `corner`.
    ///
    /// # Panics
    ///
    /// Panics if either step count is zero.
    pub fn new(
        corner: Tuple,
        full_uvec: Tuple,
        usteps: u32,
        full_vvec: Tuple,
        vsteps: u32,
        intensity: Color,
    ) -> Self {
        match Self::try_new(corner, full_uvec, usteps, full_vvec, vsteps, intensity) {
            Ok(light) => light,
            Err(err) => panic!("invalid area light: {err}"),
        }
    }

    pub fn try_new(
        corner: Tuple,
        full_uvec: Tuple,
        usteps: u32,
        full_vvec: Tuple,
        vsteps: u32,
        intensity: Color,
    ) -> SceneResult<Self> {
        if usteps == 0 || vsteps == 0 {
            return Err(SceneError::EmptyLightGrid);
        }

        Ok(Self {
            corner,
            uvec: full_uvec / usteps as f64,
            usteps,
            vvec: full_vvec / vsteps as f64,
            vsteps,
            position: corner + full_uvec / 2.0 + full_vvec / 2.0,
            intensity,
            jitter: false,
        })
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn corner(&self) -> Tuple {
        self.corner
    }

    /// Edge of a single cell along u.
    pub fn uvec(&self) -> Tuple {
        self.uvec
    }

    pub fn usteps(&self) -> u32 {
        self.usteps
    }

    /// Edge of a single cell along v.
    pub fn vvec(&self) -> Tuple {
        self.vvec
    }

    pub fn vsteps(&self) -> u32 {
        self.vsteps
    }

    pub fn samples(&self) -> u32 {
        self.usteps * self.vsteps
    }

    /// Center of the light.
    pub fn position(&self) -> Tuple {
        self.position
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }

    pub fn jitter(&self) -> bool {
        self.jitter
    }

    /// Sample point in cell `(u, v)`.
    pub fn point_on_light(&self, u: u32, v: u32) -> Tuple {
        let (du, dv) = if self.jitter {
            (rand::random::<f64>(), rand::random::<f64>())
        } else {
            (0.5, 0.5)
        };
        self.corner + self.uvec * (u as f64 + du) + self.vvec * (v as f64 + dv)
    }
}

/// Serialized form of an [`AreaLight`]: full edges, as passed to
/// [`AreaLight::new`].
#[derive(Serialize, Deserialize)]
struct AreaLightDesc {
    corner: Tuple,
    full_uvec: Tuple,
    usteps: u32,
    full_vvec: Tuple,
    vsteps: u32,
    intensity: Color,
    #[serde(default)]
    jitter: bool,
}

impl TryFrom<AreaLightDesc> for AreaLight {
    type Error = SceneError;

    fn try_from(desc: AreaLightDesc) -> SceneResult<Self> {
        let light = AreaLight::try_new(
            desc.corner,
            desc.full_uvec,
            desc.usteps,
            desc.full_vvec,
            desc.vsteps,
            desc.intensity,
        )?;
        Ok(light.with_jitter(desc.jitter))
    }
}

impl From<AreaLight> for AreaLightDesc {
    fn from(light: AreaLight) -> Self {
        Self {
            corner: light.corner,
            full_uvec: light.uvec * light.usteps as f64,
            usteps: light.usteps,
            full_vvec: light.vvec * light.vsteps as f64,
            vsteps: light.vsteps,
            intensity: light.intensity,
            jitter: light.jitter,
        }
    }
}

/// Every light kind the renderer can shade against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    Point(PointLight),
    Area(AreaLight),
}

impl Light {
    pub fn point(position: Tuple, intensity: Color) -> Self {
        Light::Point(PointLight::new(position, intensity))
    }

    pub fn intensity(&self) -> Color {
        match self {
            Light::Point(l) => l.intensity,
            Light::Area(l) => l.intensity,
        }
    }

    /// The point shadow rays aim at for a point light, or the center of an
    /// area light.
    pub fn position(&self) -> Tuple {
        match self {
            Light::Point(l) => l.position,
            Light::Area(l) => l.position,
        }
    }

    /// Number of points returned by [`Light::sample_points`].
    pub fn samples(&self) -> u32 {
        match self {
            Light::Point(_) => 1,
            Light::Area(l) => l.samples(),
        }
    }

    /// Every sample point, row by row in v then u.
    pub fn sample_points(&self) -> impl Iterator<Item = Tuple> + '_ {
        let (usteps, vsteps) = match self {
            Light::Point(_) => (1, 1),
            Light::Area(l) => (l.usteps, l.vsteps),
        };
        (0..vsteps).flat_map(move |v| (0..usteps).map(move |u| self.sample(u, v)))
    }

    fn sample(&self, u: u32, v: u32) -> Tuple {
        match self {
            Light::Point(l) => l.position,
            Light::Area(l) => l.point_on_light(u, v),
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<AreaLight> for Light {
    fn from(light: AreaLight) -> Self {
        Light::Area(light)
    }
}

/// Phong shading of one light at `point`.
///
/// `surface` is the material or pattern color at the point. `intensity` is
/// the unoccluded fraction of the light from [`crate::World::intensity_at`];
/// it scales diffuse and specular but never ambient. The contribution is
/// averaged over every sample point of the light.
pub fn lighting(
    material: &Material,
    surface: Color,
    light: &Light,
    point: Tuple,
    eyev: Tuple,
    normalv: Tuple,
    intensity: f64,
) -> Color {
    let effective = surface * light.intensity();
    let ambient = effective * material.ambient;

    let mut sum = Color::ZERO;
    for sample in light.sample_points() {
        let lightv = (sample - point).normalize();
        let light_dot_normal = lightv.dot(normalv);

        // Light behind or level with the surface
        if light_dot_normal <= 0.0 {
            continue;
        }
        sum += effective * material.diffuse * light_dot_normal;

        let reflectv = (-lightv).reflect(normalv);
        let reflect_dot_eye = reflectv.dot(eyev);
        if reflect_dot_eye > 0.0 {
            let factor = reflect_dot_eye.powf(material.shininess);
            sum += light.intensity() * material.specular * factor;
        }
    }

    ambient + sum / light.samples() as f64 * intensity
}
