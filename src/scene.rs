//! The rendered scene: a blended creature with a layered eye, standing on a
//! red ground plane.
//!
//! The body is one smooth surface built by folding primitives together with
//! [`smooth_min`]; the eye layers and the ground use hard nearest-wins
//! unions so their color boundaries stay crisp. All layout is constant; the
//! only dynamic input is the frame time carried by [`Scene`].

use glam::Vec3A;

use crate::animation::lazy_oscillate;
use crate::material::{self, Color};
use crate::sdf::{smooth_min, DistanceField, DistanceSample, Primitive, FAR};

/// Vertical placement of the whole creature above its modelling origin.
pub const CREATURE_OFFSET: Vec3A = Vec3A::new(0.0, 0.05, 0.0);

const HEAD: Primitive = Primitive::Sphere {
    center: Vec3A::new(0.0, 0.85, -1.0),
    radius: 0.22,
};

const TORSO: Primitive = Primitive::Sphere {
    center: Vec3A::new(0.0, 0.45, -1.0),
    radius: 0.3,
};

const LEFT_ARM: Primitive = Primitive::Ellipsoid {
    center: Vec3A::new(-0.33, 0.45, -1.0),
    radii: Vec3A::new(0.18, 0.06, 0.06),
};

const RIGHT_ARM: Primitive = Primitive::Ellipsoid {
    center: Vec3A::new(0.33, 0.45, -1.0),
    radii: Vec3A::new(0.18, 0.06, 0.06),
};

const LEFT_LEG: Primitive = Primitive::Ellipsoid {
    center: Vec3A::new(-0.13, 0.12, -1.0),
    radii: Vec3A::new(0.07, 0.15, 0.07),
};

const RIGHT_LEG: Primitive = Primitive::Ellipsoid {
    center: Vec3A::new(0.13, 0.12, -1.0),
    radii: Vec3A::new(0.07, 0.15, 0.07),
};

/// Eye layers from the outside in. Each layer sits a little further forward
/// than the one around it so it pokes through.
const EYE_LAYERS: [(Primitive, Color); 3] = [
    (
        Primitive::Sphere {
            center: Vec3A::new(0.0, 0.9, -0.82),
            radius: 0.1,
        },
        material::SCLERA,
    ),
    (
        Primitive::Sphere {
            center: Vec3A::new(0.0, 0.9, -0.745),
            radius: 0.045,
        },
        material::IRIS,
    ),
    (
        Primitive::Sphere {
            center: Vec3A::new(0.0, 0.9, -0.71),
            radius: 0.02,
        },
        material::PUPIL,
    ),
];

/// Blend radius fusing the head onto the torso.
pub const TORSO_BLEND: f32 = 0.25;
/// Blend radius for the shoulders.
pub const ARM_BLEND: f32 = 0.06;
/// Blend radius for the hips.
pub const LEG_BLEND: f32 = 0.04;

/// How far the arms travel up or down at full swing.
pub const ARM_SWING: f32 = 0.06;
/// Angular speed of the arm swing, radians per second.
pub const ARM_SPEED: f32 = 5.0;

/// The scene frozen at one instant.
///
/// Cheap to copy; build one per frame with [`Scene::at`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    /// Animation time in seconds.
    pub time: f32,
}

impl Scene {
    /// Snapshot of the scene at `time`.
    pub fn at(time: f32) -> Self {
        Self { time }
    }

    /// Arm ellipsoids for the current frame, left then right.
    ///
    /// Both arms follow the same lazy oscillation with opposite signs.
    pub fn arms(&self) -> [Primitive; 2] {
        let swing = ARM_SWING * lazy_oscillate(self.time * ARM_SPEED);
        [
            LEFT_ARM.translated(Vec3A::new(0.0, swing, 0.0)),
            RIGHT_ARM.translated(Vec3A::new(0.0, -swing, 0.0)),
        ]
    }

    /// Smoothly blended body, in creature space.
    pub fn body(&self, p: Vec3A) -> DistanceSample {
        let [left_arm, right_arm] = self.arms();

        let mut d = FAR;
        d = smooth_min(d, HEAD.distance(p), TORSO_BLEND);
        d = smooth_min(d, TORSO.distance(p), TORSO_BLEND);
        d = smooth_min(d, left_arm.distance(p), ARM_BLEND);
        d = smooth_min(d, right_arm.distance(p), ARM_BLEND);
        d = smooth_min(d, LEFT_LEG.distance(p), LEG_BLEND);
        d = smooth_min(d, RIGHT_LEG.distance(p), LEG_BLEND);

        DistanceSample::new(d, material::BODY)
    }

    /// Layered eye, in creature space. The nearest layer wins outright.
    ///
    /// The layers are deliberately not concentric: with a shared center the
    /// outer sclera would always be nearest and hide the iris and pupil.
    pub fn eyes(&self, p: Vec3A) -> DistanceSample {
        EYE_LAYERS
            .iter()
            .map(|(shape, color)| DistanceSample::new(shape.distance(p), *color))
            .fold(DistanceSample::FAR, DistanceSample::nearest)
    }

    /// Body and eye, shifted into world space by [`CREATURE_OFFSET`].
    pub fn creature(&self, p: Vec3A) -> DistanceSample {
        let local = p - CREATURE_OFFSET;
        self.body(local).nearest(self.eyes(local))
    }

    /// Flat red ground.
    pub fn ground(&self, p: Vec3A) -> DistanceSample {
        DistanceSample::new(Primitive::Plane.distance(p), material::GROUND)
    }
}

impl DistanceField for Scene {
    fn sample(&self, p: Vec3A) -> DistanceSample {
        self.creature(p).nearest(self.ground(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torso_center() -> Vec3A {
        Vec3A::new(0.0, 0.45, -1.0) + CREATURE_OFFSET
    }

    #[test]
    fn sampling_is_deterministic() {
        let scene = Scene::at(3.7);
        for p in [
            Vec3A::new(0.1, 0.6, -0.9),
            Vec3A::new(-2.0, 0.3, 4.0),
            Vec3A::new(0.33, 0.5, -1.0),
        ] {
            let a = scene.sample(p);
            let b = scene.sample(p);
            assert_eq!(a.distance.to_bits(), b.distance.to_bits());
            assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn far_from_creature_the_ground_wins() {
        let s = Scene::at(0.0).sample(Vec3A::new(5.0, 0.2, 5.0));
        assert!((s.distance - 0.2).abs() < 1e-6);
        assert_eq!(s.color, material::GROUND);
    }

    #[test]
    fn torso_interior_is_body() {
        let s = Scene::at(0.0).sample(torso_center());
        assert!(s.distance < -0.25);
        assert_eq!(s.color, material::BODY);
    }

    #[test]
    fn body_blend_is_never_above_hard_union() {
        let scene = Scene::at(1.0);
        let [left_arm, right_arm] = scene.arms();
        let parts = [HEAD, TORSO, left_arm, right_arm, LEFT_LEG, RIGHT_LEG];
        for p in [
            Vec3A::new(0.0, 0.68, -1.0),
            Vec3A::new(0.2, 0.45, -0.9),
            Vec3A::new(-0.1, 0.2, -1.0),
            Vec3A::new(1.0, 1.0, 1.0),
        ] {
            let hard = parts
                .iter()
                .map(|part| part.distance(p))
                .fold(FAR, f32::min);
            assert!(scene.body(p).distance <= hard);
        }
    }

    #[test]
    fn arms_swing_in_opposite_directions() {
        // time * ARM_SPEED = π is inside the first active period, cos = -1.
        let scene = Scene::at(std::f32::consts::PI / ARM_SPEED);
        let [left, right] = scene.arms();
        let (Primitive::Ellipsoid { center: l, .. }, Primitive::Ellipsoid { center: r, .. }) =
            (left, right)
        else {
            panic!("arms must be ellipsoids");
        };
        assert!((l.y - (0.45 - ARM_SWING)).abs() < 1e-5);
        assert!((r.y - (0.45 + ARM_SWING)).abs() < 1e-5);
    }

    #[test]
    fn arms_rest_while_asleep() {
        // Period index 5 of the sleep cycle.
        let phase = 5.5 * std::f32::consts::TAU;
        let a = Scene::at(phase / ARM_SPEED).arms();
        let b = Scene::at(0.0).arms();
        assert_eq!(a, b);
    }

    #[test]
    fn eye_layers_show_through_front_to_back() {
        let scene = Scene::at(0.0);
        // Straight ahead only the pupil is visible.
        let pupil = scene.eyes(Vec3A::new(0.0, 0.9, -0.68));
        assert_eq!(pupil.color, material::PUPIL);

        // The iris shows as a ring around it.
        let iris = scene.eyes(Vec3A::new(0.0, 0.94, -0.715));
        assert_eq!(iris.color, material::IRIS);

        let sclera = scene.eyes(Vec3A::new(0.0, 1.005, -0.82));
        assert_eq!(sclera.color, material::SCLERA);
    }

    #[test]
    fn eye_sits_outside_the_head() {
        let scene = Scene::at(0.0);
        let front = Vec3A::new(0.0, 0.9, -0.69) + CREATURE_OFFSET;
        let s = scene.sample(front);
        assert!(s.distance.abs() < 0.01);
        assert_eq!(s.color, material::PUPIL);
    }
}
