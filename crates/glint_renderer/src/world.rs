//! Scene container and the recursive shading pipeline.

use crate::{
    bvh, lighting, prepare_computations, Color, Computations, Intersections, Light, SceneError,
    SceneResult, Shape, ShapeArena, ShapeId, TraceConfig,
};
use glint_math::{Ray, Tuple};

/// Shapes, lights and trace settings.
///
/// `objects` lists the root shapes that rays are tested against; their
/// descendants are reached through the arena.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub shapes: ShapeArena,
    objects: Vec<ShapeId>,
    pub lights: Vec<Light>,
    pub config: TraceConfig,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TraceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Insert `shape` and make it a root object.
    pub fn add_object(&mut self, shape: Shape) -> ShapeId {
        let id = self.shapes.insert(shape);
        self.objects.push(id);
        id
    }

    /// Make a shape already in the arena a root object.
    ///
    /// Shapes inside a group or CSG node are reached through their
    /// container and cannot also be roots.
    pub fn add_root(&mut self, id: ShapeId) -> SceneResult<()> {
        let shape = self.shapes.get(id).ok_or(SceneError::UnknownShape(id))?;
        if shape.parent().is_some() {
            return Err(SceneError::AlreadyParented(id));
        }
        if !self.objects.contains(&id) {
            self.objects.push(id);
        }
        Ok(())
    }

    pub fn objects(&self) -> &[ShapeId] {
        &self.objects
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    /// Every intersection of `ray` with the scene, sorted by `t`.
    pub fn intersect(&self, ray: &Ray) -> Intersections {
        let mut xs = Vec::new();
        for &id in &self.objects {
            self.shapes.intersect_into(id, ray, &mut xs);
        }
        Intersections::new(xs)
    }

    /// Color seen along `ray` with the configured recursion budget.
    pub fn trace(&self, ray: &Ray) -> Color {
        self.color_at(ray, self.config.max_depth)
    }

    /// Color seen along `ray`, allowing `remaining` more bounces.
    pub fn color_at(&self, ray: &Ray, remaining: u32) -> Color {
        let xs = self.intersect(ray);
        match xs.hit() {
            Some(hit) => {
                let comps = prepare_computations(hit, ray, &xs, &self.shapes);
                self.shade_hit(&comps, remaining)
            }
            None => self.config.background,
        }
    }

    /// Direct lighting from every light plus reflected and refracted
    /// contributions.
    pub fn shade_hit(&self, comps: &Computations, remaining: u32) -> Color {
        let material = self.shapes[comps.object].material();
        let surface_color = material.color_at(&self.shapes, comps.object, comps.over_point);

        let mut surface = Color::ZERO;
        for light in &self.lights {
            let intensity = self.intensity_at(light, comps.over_point);
            surface += lighting(
                material,
                surface_color,
                light,
                comps.over_point,
                comps.eyev,
                comps.normalv,
                intensity,
            );
        }

        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    pub fn reflected_color(&self, comps: &Computations, remaining: u32) -> Color {
        let reflective = self.shapes[comps.object].material().reflective;
        if reflective == 0.0 {
            return Color::ZERO;
        }
        if remaining == 0 {
            log::trace!("recursion budget exhausted reflecting off {:?}", comps.object);
            return Color::ZERO;
        }

        let reflect_ray = Ray::new(comps.over_point, comps.reflectv);
        self.color_at(&reflect_ray, remaining - 1) * reflective
    }

    pub fn refracted_color(&self, comps: &Computations, remaining: u32) -> Color {
        let transparency = self.shapes[comps.object].material().transparency;
        if transparency == 0.0 {
            return Color::ZERO;
        }
        if remaining == 0 {
            log::trace!("recursion budget exhausted refracting through {:?}", comps.object);
            return Color::ZERO;
        }

        // Snell's law
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(comps.normalv);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            // Total internal reflection
            return Color::ZERO;
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t) - comps.eyev * n_ratio;
        let refract_ray = Ray::new(comps.under_point, direction);
        self.color_at(&refract_ray, remaining - 1) * transparency
    }

    /// True if something between `point` and `light_position` blocks it.
    pub fn is_shadowed(&self, light_position: Tuple, point: Tuple) -> bool {
        let v = light_position - point;
        let distance = v.length();
        let ray = Ray::new(point, v.normalize());

        self.intersect(&ray)
            .iter()
            .find(|i| i.t >= 0.0 && self.casts_shadow(i.object))
            .is_some_and(|i| i.t < distance)
    }

    /// Fraction of `light` that reaches `point`: 0 or 1 for a point
    /// light, the share of unblocked samples for an area light.
    pub fn intensity_at(&self, light: &Light, point: Tuple) -> f64 {
        match light {
            Light::Point(l) => {
                if self.is_shadowed(l.position, point) {
                    0.0
                } else {
                    1.0
                }
            }
            Light::Area(l) => {
                let lit = light
                    .sample_points()
                    .filter(|&sample| !self.is_shadowed(sample, point))
                    .count();
                lit as f64 / l.samples() as f64
            }
        }
    }

    /// A shape occludes only if it and every ancestor cast shadows.
    fn casts_shadow(&self, id: ShapeId) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            let shape = &self.shapes[id];
            if !shape.casts_shadow() {
                return false;
            }
            current = shape.parent();
        }
        true
    }

    /// Build bounding volume hierarchies under every root object.
    pub fn divide(&mut self, threshold: usize) -> SceneResult<()> {
        let before = self.shapes.len();
        for &id in &self.objects {
            bvh::divide(&mut self.shapes, id, threshold)?;
        }
        log::info!(
            "Divided {} root objects (threshold {}): {} -> {} shapes",
            self.objects.len(),
            threshold,
            before,
            self.shapes.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AreaLight, Intersection, Material, Pattern, PointLight};
    use glint_math::{point, scaling, translation, vector};
    use std::f64::consts::SQRT_2;

    /// Two concentric spheres lit from the upper left.
    fn default_world() -> (World, ShapeId, ShapeId) {
        let mut world = World::new();
        world.add_light(PointLight::new(point(-10.0, 10.0, -10.0), Color::ONE));

        let outer = world.add_object(Shape::sphere().with_material(Material {
            color: Color::new(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Material::default()
        }));
        let inner = world.add_object(Shape::sphere().with_transform(scaling(0.5, 0.5, 0.5)));
        (world, outer, inner)
    }

    fn assert_color(actual: Color, expected: Color) {
        assert!(
            actual.abs_diff_eq(expected, 1e-4),
            "expected {expected}, got {actual}"
        );
    }

    fn comps_for(world: &World, ray: &Ray, xs: Vec<Intersection>, index: usize) -> Computations {
        let xs = Intersections::new(xs);
        prepare_computations(&xs[index], ray, &xs, &world.shapes)
    }

    #[test]
    fn test_intersect_default_world() {
        let (world, _, _) = default_world();
        let xs = world.intersect(&Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0)));
        let ts: Vec<f64> = xs.iter().map(|i| i.t).collect();
        assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
    }

    #[test]
    fn test_add_root_rejects_children() {
        let mut world = World::new();
        let g = world.add_object(Shape::group());
        let s = world.shapes.insert(Shape::sphere());
        world.shapes.add_child(g, s).unwrap();

        assert_eq!(world.add_root(s), Err(SceneError::AlreadyParented(s)));
        world.add_root(g).unwrap();
        assert_eq!(world.objects(), &[g]);
    }

    #[test]
    fn test_shade_hit() {
        let (world, outer, _) = default_world();
        let r = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0));
        let comps = comps_for(&world, &r, vec![Intersection::new(4.0, outer)], 0);
        assert_color(world.shade_hit(&comps, 5), Color::new(0.38066, 0.47583, 0.2855));
    }

    #[test]
    fn test_shade_hit_from_inside() {
        let (mut world, _, inner) = default_world();
        world.lights = vec![Light::point(point(0.0, 0.25, 0.0), Color::ONE)];
        let r = Ray::new(point(0.0, 0.0, 0.0), vector(0.0, 0.0, 1.0));
        let comps = comps_for(&world, &r, vec![Intersection::new(0.5, inner)], 0);
        assert_color(world.shade_hit(&comps, 5), Color::new(0.90498, 0.90498, 0.90498));
    }

    #[test]
    fn test_shade_hit_in_shadow() {
        let mut world = World::new();
        world.add_light(PointLight::new(point(0.0, 0.0, -10.0), Color::ONE));
        world.add_object(Shape::sphere());
        let s2 = world.add_object(Shape::sphere().with_transform(translation(0.0, 0.0, 10.0)));

        let r = Ray::new(point(0.0, 0.0, 5.0), vector(0.0, 0.0, 1.0));
        let comps = comps_for(&world, &r, vec![Intersection::new(4.0, s2)], 0);
        assert_color(world.shade_hit(&comps, 5), Color::splat(0.1));
    }

    #[test]
    fn test_shade_hit_sums_lights() {
        let (mut world, outer, _) = default_world();
        let single = {
            let r = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0));
            let comps = comps_for(&world, &r, vec![Intersection::new(4.0, outer)], 0);
            world.shade_hit(&comps, 5)
        };

        world.add_light(PointLight::new(point(-10.0, 10.0, -10.0), Color::ONE));
        let r = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0));
        let comps = comps_for(&world, &r, vec![Intersection::new(4.0, outer)], 0);
        assert_color(world.shade_hit(&comps, 5), single * 2.0);
    }

    #[test]
    fn test_color_at_miss() {
        let (world, _, _) = default_world();
        let c = world.color_at(&Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 1.0, 0.0)), 5);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_color_at_miss_uses_background() {
        let mut world = World::with_config(TraceConfig {
            background: Color::splat(0.2),
            ..TraceConfig::default()
        });
        world.add_object(Shape::sphere());
        let c = world.trace(&Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 1.0, 0.0)));
        assert_eq!(c, Color::splat(0.2));
    }

    #[test]
    fn test_color_at_hit() {
        let (world, _, _) = default_world();
        let c = world.color_at(&Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0)), 5);
        assert_color(c, Color::new(0.38066, 0.47583, 0.2855));
    }

    #[test]
    fn test_color_at_hit_behind_ray() {
        let (mut world, outer, inner) = default_world();
        for id in [outer, inner] {
            let material = Material {
                ambient: 1.0,
                ..world.shapes[id].material().clone()
            };
            world.shapes.set_material(id, material);
        }

        let c = world.color_at(&Ray::new(point(0.0, 0.0, 0.75), vector(0.0, 0.0, -1.0)), 5);
        assert_eq!(c, world.shapes[inner].material().color);
    }

    #[test]
    fn test_is_shadowed() {
        let (world, _, _) = default_world();
        let light_position = point(-10.0, 10.0, -10.0);
        let cases = [
            (point(-10.0, -10.0, 10.0), false),
            (point(10.0, -10.0, 10.0), true),
            (point(-20.0, 20.0, -20.0), false),
            (point(-5.0, 5.0, -5.0), false),
        ];
        for (p, expected) in cases {
            assert_eq!(world.is_shadowed(light_position, p), expected, "at {p}");
        }
    }

    #[test]
    fn test_shapes_without_shadows_do_not_occlude() {
        let (mut world, outer, inner) = default_world();
        let light_position = point(-10.0, 10.0, -10.0);
        let p = point(10.0, -10.0, 10.0);

        world.shapes.set_casts_shadow(outer, false);
        assert!(world.is_shadowed(light_position, p));
        world.shapes.set_casts_shadow(inner, false);
        assert!(!world.is_shadowed(light_position, p));
    }

    #[test]
    fn test_group_without_shadows_hides_children() {
        let mut world = World::new();
        let g = world.add_object(Shape::group().with_shadow(false));
        let s = world.shapes.insert(Shape::sphere());
        world.shapes.add_child(g, s).unwrap();

        assert!(!world.is_shadowed(point(0.0, 10.0, 0.0), point(0.0, -10.0, 0.0)));
        world.shapes.set_casts_shadow(g, true);
        assert!(world.is_shadowed(point(0.0, 10.0, 0.0), point(0.0, -10.0, 0.0)));
    }

    #[test]
    fn test_point_light_intensity_at() {
        let (world, _, _) = default_world();
        let light = world.lights[0];
        let cases = [
            (point(0.0, 1.0001, 0.0), 1.0),
            (point(-1.0001, 0.0, 0.0), 1.0),
            (point(0.0, 0.0, -1.0001), 1.0),
            (point(0.0, 0.0, 1.0001), 0.0),
            (point(1.0001, 0.0, 0.0), 0.0),
            (point(0.0, -1.0001, 0.0), 0.0),
            (point(0.0, 0.0, 0.0), 0.0),
        ];
        for (p, expected) in cases {
            assert_eq!(world.intensity_at(&light, p), expected, "at {p}");
        }
    }

    #[test]
    fn test_area_light_intensity_at() {
        let (world, _, _) = default_world();
        let light: Light = AreaLight::new(
            point(-0.5, -0.5, -5.0),
            vector(1.0, 0.0, 0.0),
            2,
            vector(0.0, 1.0, 0.0),
            2,
            Color::ONE,
        )
        .into();
        let cases = [
            (point(0.0, 0.0, 2.0), 0.0),
            (point(1.0, -1.0, 2.0), 0.25),
            (point(1.5, 0.0, 2.0), 0.5),
            (point(1.25, 1.25, 3.0), 0.75),
            (point(0.0, 0.0, -2.0), 1.0),
        ];
        for (p, expected) in cases {
            assert!((world.intensity_at(&light, p) - expected).abs() < 1e-9, "at {p}");
        }
    }

    #[test]
    fn test_reflected_color_nonreflective() {
        let (mut world, _, inner) = default_world();
        let material = Material {
            ambient: 1.0,
            ..Material::default()
        };
        world.shapes.set_material(inner, material);

        let r = Ray::new(point(0.0, 0.0, 0.0), vector(0.0, 0.0, 1.0));
        let comps = comps_for(&world, &r, vec![Intersection::new(1.0, inner)], 0);
        assert_eq!(world.reflected_color(&comps, 5), Color::ZERO);
    }

    fn with_reflective_floor() -> (World, ShapeId) {
        let (mut world, _, _) = default_world();
        let floor = world.add_object(
            Shape::plane()
                .with_transform(translation(0.0, -1.0, 0.0))
                .with_material(Material {
                    reflective: 0.5,
                    ..Material::default()
                }),
        );
        (world, floor)
    }

    #[test]
    fn test_reflected_color() {
        let (world, floor) = with_reflective_floor();
        let r = Ray::new(point(0.0, 0.0, -3.0), vector(0.0, -SQRT_2 / 2.0, SQRT_2 / 2.0));
        let comps = comps_for(&world, &r, vec![Intersection::new(SQRT_2, floor)], 0);
        assert_color(world.reflected_color(&comps, 5), Color::new(0.19032, 0.2379, 0.14274));
    }

    #[test]
    fn test_shade_hit_reflective() {
        let (world, floor) = with_reflective_floor();
        let r = Ray::new(point(0.0, 0.0, -3.0), vector(0.0, -SQRT_2 / 2.0, SQRT_2 / 2.0));
        let comps = comps_for(&world, &r, vec![Intersection::new(SQRT_2, floor)], 0);
        assert_color(world.shade_hit(&comps, 5), Color::new(0.87677, 0.92436, 0.82918));
    }

    #[test]
    fn test_reflected_color_at_max_depth() {
        let (world, floor) = with_reflective_floor();
        let r = Ray::new(point(0.0, 0.0, -3.0), vector(0.0, -SQRT_2 / 2.0, SQRT_2 / 2.0));
        let comps = comps_for(&world, &r, vec![Intersection::new(SQRT_2, floor)], 0);
        assert_eq!(world.reflected_color(&comps, 0), Color::ZERO);
    }

    #[test]
    fn test_mutually_reflective_surfaces_terminate() {
        let mut world = World::new();
        world.add_light(PointLight::new(point(0.0, 0.0, 0.0), Color::ONE));
        let mirror = Material {
            reflective: 1.0,
            ..Material::default()
        };
        world.add_object(
            Shape::plane()
                .with_transform(translation(0.0, -1.0, 0.0))
                .with_material(mirror.clone()),
        );
        world.add_object(
            Shape::plane()
                .with_transform(translation(0.0, 1.0, 0.0))
                .with_material(mirror),
        );

        let c = world.trace(&Ray::new(point(0.0, 0.0, 0.0), vector(0.0, 1.0, 0.0)));
        assert!(c.is_finite());
    }

    #[test]
    fn test_refracted_color_opaque() {
        let (world, outer, _) = default_world();
        let r = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0));
        let xs = vec![Intersection::new(4.0, outer), Intersection::new(6.0, outer)];
        let comps = comps_for(&world, &r, xs, 0);
        assert_eq!(world.refracted_color(&comps, 5), Color::ZERO);
    }

    fn make_glass(world: &mut World, id: ShapeId) {
        let material = Material {
            transparency: 1.0,
            refractive_index: 1.5,
            ..world.shapes[id].material().clone()
        };
        world.shapes.set_material(id, material);
    }

    #[test]
    fn test_refracted_color_at_max_depth() {
        let (mut world, outer, _) = default_world();
        make_glass(&mut world, outer);
        let r = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0));
        let xs = vec![Intersection::new(4.0, outer), Intersection::new(6.0, outer)];
        let comps = comps_for(&world, &r, xs, 0);
        assert_eq!(world.refracted_color(&comps, 0), Color::ZERO);
    }

    #[test]
    fn test_refracted_color_total_internal_reflection() {
        let (mut world, outer, _) = default_world();
        make_glass(&mut world, outer);
        let r = Ray::new(point(0.0, 0.0, SQRT_2 / 2.0), vector(0.0, 1.0, 0.0));
        let xs = vec![
            Intersection::new(-SQRT_2 / 2.0, outer),
            Intersection::new(SQRT_2 / 2.0, outer),
        ];
        // Inside the sphere, so look at the second hit
        let comps = comps_for(&world, &r, xs, 1);
        assert_eq!(world.refracted_color(&comps, 5), Color::ZERO);
    }

    #[test]
    fn test_refracted_color() {
        let (mut world, outer, inner) = default_world();
        let a = Material {
            ambient: 1.0,
            pattern: Some(Pattern::coordinates()),
            ..world.shapes[outer].material().clone()
        };
        world.shapes.set_material(outer, a);
        make_glass(&mut world, inner);

        let r = Ray::new(point(0.0, 0.0, 0.1), vector(0.0, 1.0, 0.0));
        let xs = vec![
            Intersection::new(-0.9899, outer),
            Intersection::new(-0.4899, inner),
            Intersection::new(0.4899, inner),
            Intersection::new(0.9899, outer),
        ];
        let comps = comps_for(&world, &r, xs, 2);
        assert_color(world.refracted_color(&comps, 5), Color::new(0.0, 0.99888, 0.04725));
    }

    fn with_glass_floor(reflective: f64) -> (World, ShapeId) {
        let (mut world, _, _) = default_world();
        let floor = world.add_object(
            Shape::plane()
                .with_transform(translation(0.0, -1.0, 0.0))
                .with_material(Material {
                    reflective,
                    transparency: 0.5,
                    refractive_index: 1.5,
                    ..Material::default()
                }),
        );
        world.add_object(
            Shape::sphere()
                .with_transform(translation(0.0, -3.5, -0.5))
                .with_material(Material {
                    color: Color::new(1.0, 0.0, 0.0),
                    ambient: 0.5,
                    ..Material::default()
                }),
        );
        (world, floor)
    }

    #[test]
    fn test_shade_hit_transparent() {
        let (world, floor) = with_glass_floor(0.0);
        let r = Ray::new(point(0.0, 0.0, -3.0), vector(0.0, -SQRT_2 / 2.0, SQRT_2 / 2.0));
        let comps = comps_for(&world, &r, vec![Intersection::new(SQRT_2, floor)], 0);
        assert_color(world.shade_hit(&comps, 5), Color::new(0.93642, 0.68642, 0.68642));
    }

    #[test]
    fn test_shade_hit_blends_with_schlick() {
        let (world, floor) = with_glass_floor(0.5);
        let r = Ray::new(point(0.0, 0.0, -3.0), vector(0.0, -SQRT_2 / 2.0, SQRT_2 / 2.0));
        let comps = comps_for(&world, &r, vec![Intersection::new(SQRT_2, floor)], 0);
        assert_color(world.shade_hit(&comps, 5), Color::new(0.93391, 0.69643, 0.69243));
    }

    #[test]
    fn test_divide_keeps_hits() {
        let mut world = World::new();
        let g = world.add_object(Shape::group());
        for x in [-4.0, -2.0, 0.0, 2.0, 4.0] {
            let s = world.shapes.insert(Shape::sphere().with_transform(translation(x, 0.0, 0.0)));
            world.shapes.add_child(g, s).unwrap();
        }
        let r = Ray::new(point(-10.0, 0.0, 0.0), vector(1.0, 0.0, 0.0));
        let before: Vec<f64> = world.intersect(&r).iter().map(|i| i.t).collect();

        world.divide(1).unwrap();
        let after: Vec<f64> = world.intersect(&r).iter().map(|i| i.t).collect();

        assert!(world.shapes.len() > 6);
        assert_eq!(before.len(), 10);
        assert_eq!(before, after);
    }
}
