//! The hero's distorted sphere.
//!
//! [`SceneGraph`] declares the scene (one sphere, three lights, an orbiting
//! camera). [`SceneRenderer`] turns it into a shaded wireframe on an egui
//! painter. The only per-frame input is elapsed time.

use eframe::egui::{self, Color32, Pos2, Rect, Stroke};
use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn dot(self, o: Vec3) -> f32 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    fn scale(self, k: f32) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }

    fn normalized(self) -> Vec3 {
        let len = self.dot(self).sqrt();
        if len == 0.0 {
            self
        } else {
            self.scale(1.0 / len)
        }
    }

    /// Direction halfway between two normals.
    fn mid_normal(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z).normalized()
    }

    fn rotate_x(self, a: f32) -> Vec3 {
        let (s, c) = a.sin_cos();
        Vec3::new(self.x, self.y * c - self.z * s, self.y * s + self.z * c)
    }

    fn rotate_y(self, a: f32) -> Vec3 {
        let (s, c) = a.sin_cos();
        Vec3::new(self.x * c + self.z * s, self.y, -self.x * s + self.z * c)
    }

    fn rotate_z(self, a: f32) -> Vec3 {
        let (s, c) = a.sin_cos();
        Vec3::new(self.x * c - self.y * s, self.x * s + self.y * c, self.z)
    }
}

#[derive(Debug, Clone)]
pub struct SphereNode {
    pub radius: f32,
    pub scale: f32,
    pub lat_segments: usize,
    pub lon_segments: usize,
    pub color: Color32,
    /// Surface displacement strength.
    pub distort: f32,
    /// Speed of the displacement wobble.
    pub speed: f32,
    pub float_speed: f32,
    pub float_intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
}

#[derive(Debug, Clone)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    pub intensity: f32,
    pub color: Color32,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub fov_degrees: f32,
    /// Orbit speed; 2.0 is one revolution every 30 seconds.
    pub auto_rotate_speed: f32,
}

#[derive(Debug, Clone)]
pub struct SceneGraph {
    pub sphere: SphereNode,
    pub lights: Vec<Light>,
    pub camera: Camera,
}

impl SceneGraph {
    pub fn hero() -> Self {
        let accent = Color32::from_rgb(0x4a, 0x9e, 0xff);
        Self {
            sphere: SphereNode {
                radius: 1.0,
                scale: 2.5,
                lat_segments: 18,
                lon_segments: 36,
                color: accent,
                distort: 0.4,
                speed: 2.0,
                float_speed: 2.0,
                float_intensity: 1.0,
            },
            lights: vec![
                Light {
                    kind: LightKind::Ambient,
                    position: Vec3::new(0.0, 0.0, 0.0),
                    intensity: 0.5,
                    color: Color32::WHITE,
                },
                Light {
                    kind: LightKind::Directional,
                    position: Vec3::new(10.0, 10.0, 5.0),
                    intensity: 1.0,
                    color: Color32::WHITE,
                },
                Light {
                    kind: LightKind::Point,
                    position: Vec3::new(-10.0, -10.0, -5.0),
                    intensity: 0.5,
                    color: accent,
                },
            ],
            camera: Camera {
                position: Vec3::new(0.0, 0.0, 5.0),
                fov_degrees: 45.0,
                auto_rotate_speed: 0.5,
            },
        }
    }
}

/// Sphere orientation in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Wobble applied to the sphere at `t` seconds.
pub fn sphere_rotation(t: f32) -> Rotation {
    Rotation {
        x: (t / 4.0).sin() * 0.2,
        y: (t / 2.0).sin() * 0.3,
        z: (t / 3.0).cos() * 0.1,
    }
}

/// One projected wire with its light level in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct WireSegment {
    pub a: Pos2,
    pub b: Pos2,
    pub shade: f32,
}

pub struct SceneRenderer {
    scene: SceneGraph,
}

impl SceneRenderer {
    pub fn new(scene: SceneGraph) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Orbit angle of the camera around the y axis at `t` seconds.
    pub fn orbit_angle(&self, t: f32) -> f32 {
        let seconds_per_turn = 60.0 / self.scene.camera.auto_rotate_speed.max(f32::EPSILON);
        (t / seconds_per_turn) * TAU
    }

    /// Camera-facing wireframe of the sphere at `t` seconds inside `rect`.
    pub fn wireframe(&self, t: f32, rect: Rect) -> Vec<WireSegment> {
        let sphere = &self.scene.sphere;
        let lat_n = sphere.lat_segments.max(2);
        let lon_n = sphere.lon_segments.max(3);

        // grid[lat][lon] = (world position, normal)
        let grid: Vec<Vec<(Vec3, Vec3)>> = (0..=lat_n)
            .map(|i| {
                let theta = -FRAC_PI_2 + i as f32 / lat_n as f32 * std::f32::consts::PI;
                (0..lon_n)
                    .map(|j| {
                        let phi = j as f32 / lon_n as f32 * TAU;
                        self.surface_point(theta, phi, t)
                    })
                    .collect()
            })
            .collect();

        let light_dir = self
            .scene
            .lights
            .iter()
            .find(|l| l.kind == LightKind::Directional)
            .map(|l| l.position.normalized())
            .unwrap_or(Vec3::new(0.0, 0.0, 1.0));
        let ambient: f32 = self
            .scene
            .lights
            .iter()
            .filter(|l| l.kind == LightKind::Ambient)
            .map(|l| l.intensity)
            .sum();

        let mut segments = Vec::new();
        let mut push = |p: (Vec3, Vec3), q: (Vec3, Vec3)| {
            let normal = p.1.mid_normal(q.1);
            // Skip wires on the far side of the sphere.
            if normal.z < -0.1 {
                return;
            }
            if let (Some(a), Some(b)) = (self.project(p.0, rect), self.project(q.0, rect)) {
                let shade = (ambient * 0.5 + normal.dot(light_dir).max(0.0)).clamp(0.0, 1.0);
                segments.push(WireSegment { a, b, shade });
            }
        };

        for (i, ring) in grid.iter().enumerate() {
            for j in 0..lon_n {
                let next = (j + 1) % lon_n;
                if i > 0 && i < lat_n {
                    push(ring[j], ring[next]);
                }
                if i < lat_n {
                    push(ring[j], grid[i + 1][j]);
                }
            }
        }
        segments
    }

    pub fn paint(&self, painter: &egui::Painter, rect: Rect, t: f32) {
        let painter = painter.with_clip_rect(rect);
        let base = self.scene.sphere.color;
        for seg in self.wireframe(t, rect) {
            let k = 0.35 + 0.65 * seg.shade;
            let color = Color32::from_rgba_unmultiplied(
                (base.r() as f32 * k) as u8,
                (base.g() as f32 * k) as u8,
                (base.b() as f32 * k) as u8,
                (40.0 + 110.0 * seg.shade) as u8,
            );
            painter.line_segment([seg.a, seg.b], Stroke::new(1.0, color));
        }
    }

    /// Displaced, rotated surface point and its normal.
    fn surface_point(&self, theta: f32, phi: f32, t: f32) -> (Vec3, Vec3) {
        let sphere = &self.scene.sphere;
        let unit = Vec3::new(theta.cos() * phi.cos(), theta.sin(), theta.cos() * phi.sin());
        let wobble = (3.0 * phi + t * sphere.speed).sin() * (2.0 * theta + t * sphere.speed * 0.5).cos();
        let r = sphere.radius * sphere.scale * (1.0 + sphere.distort * 0.25 * wobble);

        let rot = sphere_rotation(t);
        let orient = |v: Vec3| {
            v.rotate_x(rot.x)
                .rotate_y(rot.y - self.orbit_angle(t))
                .rotate_z(rot.z)
        };
        let bob = (t * sphere.float_speed).sin() * 0.1 * sphere.float_intensity;

        let mut p = orient(unit.scale(r));
        p.y += bob;
        (p, orient(unit))
    }

    /// Perspective projection through the scene camera.
    fn project(&self, p: Vec3, rect: Rect) -> Option<Pos2> {
        let cam = &self.scene.camera;
        let depth = cam.position.z - p.z;
        if depth <= 0.1 {
            return None;
        }
        let focal = 1.0 / (cam.fov_degrees.to_radians() / 2.0).tan();
        let half_h = rect.height() / 2.0;
        let c = rect.center();
        Some(Pos2::new(
            c.x + (p.x - cam.position.x) * focal / depth * half_h,
            c.y - (p.y - cam.position.y) * focal / depth * half_h,
        ))
    }
}
