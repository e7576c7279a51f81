//! Decorative node graph drawn behind the hero.
//!
//! A ring of nodes drifts around fixed base positions; nodes closer than
//! [`LINK_DISTANCE`] are joined by faint lines. Per-node radius and phase are
//! derived from the node index once, so the field has no state beyond its
//! current size.

use eframe::egui::{self, Color32, Pos2, Rect, Stroke, Vec2};
use std::f32::consts::TAU;

pub const NODE_COUNT: usize = 28;
pub const LINK_DISTANCE: f32 = 140.0;
const RING_FRACTION: f32 = 0.22;
const LINK_DRIFT: f32 = 8.0;
const DOT_DRIFT: f32 = 6.0;
const GOLDEN_ANGLE: f32 = 2.399_963;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ParticleNode {
    angle: f32,
    radius: f32,
    phase: f32,
}

/// Geometry of one frame, relative to the top-left of the canvas.
#[derive(Debug, Default)]
pub struct ParticleFrame {
    pub links: Vec<[Pos2; 2]>,
    pub dots: Vec<(Pos2, f32)>,
}

pub struct ParticleField {
    nodes: Vec<ParticleNode>,
    size: Vec2,
    bases: Vec<Pos2>,
}

impl ParticleField {
    pub fn new(size: Vec2) -> Self {
        let nodes = (0..NODE_COUNT)
            .map(|i| ParticleNode {
                angle: i as f32 / NODE_COUNT as f32 * TAU,
                radius: 2.0 + 3.0 * unit_noise(i),
                phase: (i as f32 * GOLDEN_ANGLE) % TAU,
            })
            .collect();
        let mut field = Self {
            nodes,
            size: Vec2::ZERO,
            bases: Vec::new(),
        };
        field.resize(size);
        field
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Re-derive base positions for a new canvas size. Returns whether
    /// anything changed.
    pub fn resize(&mut self, size: Vec2) -> bool {
        if size == self.size && !self.bases.is_empty() {
            return false;
        }
        self.size = size;
        let center = Pos2::new(size.x / 2.0, size.y / 2.0);
        let ring = size.x.min(size.y) * RING_FRACTION;
        self.bases = self
            .nodes
            .iter()
            .map(|n| center + Vec2::angled(n.angle) * ring)
            .collect();
        true
    }

    /// Node geometry at `t_ms` milliseconds.
    pub fn frame(&self, t_ms: f64) -> ParticleFrame {
        let drift = |base: Pos2, phase: f32, amount: f32| {
            let dx = ((t_ms / 900.0) as f32 + phase).sin() * amount;
            let dy = ((t_ms / 700.0) as f32 + phase).cos() * amount;
            base + Vec2::new(dx, dy)
        };

        let linked: Vec<Pos2> = self
            .nodes
            .iter()
            .zip(&self.bases)
            .map(|(n, &b)| drift(b, n.phase, LINK_DRIFT))
            .collect();

        let mut frame = ParticleFrame::default();
        for (i, &a) in linked.iter().enumerate() {
            for &b in &linked[i + 1..] {
                if a.distance(b) < LINK_DISTANCE {
                    frame.links.push([a, b]);
                }
            }
        }

        frame.dots = self
            .nodes
            .iter()
            .zip(&self.bases)
            .map(|(n, &b)| {
                let r = n.radius + ((t_ms / 400.0) as f32 + n.phase).sin() * 0.8;
                (drift(b, n.phase, DOT_DRIFT), r)
            })
            .collect();
        frame
    }

    /// Draw the field into `rect`, resizing first if the canvas changed.
    pub fn paint(&mut self, painter: &egui::Painter, rect: Rect, t_ms: f64) {
        if self.resize(rect.size()) {
            tracing::trace!(w = rect.width(), h = rect.height(), "particle field resized");
        }

        // Soft radial glow, approximated with stacked translucent discs.
        let glow_radius = rect.width().max(rect.height()) / 2.0;
        for step in 0..6 {
            let k = 1.0 - step as f32 / 6.0;
            painter.circle_filled(
                rect.center(),
                glow_radius * k,
                Color32::from_rgba_unmultiplied(60, 130, 240, 5),
            );
        }

        let frame = self.frame(t_ms);
        let offset = rect.min.to_vec2();
        let link_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(80, 180, 255, 20));
        for [a, b] in frame.links {
            painter.line_segment([a + offset, b + offset], link_stroke);
        }
        let dot = Color32::from_rgba_unmultiplied(120, 200, 255, 242);
        for (p, r) in frame.dots {
            painter.circle_filled(p + offset, r.max(0.5), dot);
        }
    }
}

/// Deterministic value in [0, 1) for node `i`.
fn unit_noise(i: usize) -> f32 {
    let x = ((i as f32 + 1.0) * 12.9898).sin() * 43_758.547;
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_are_derived_from_index() {
        let a = ParticleField::new(Vec2::new(800.0, 400.0));
        let b = ParticleField::new(Vec2::new(300.0, 300.0));
        assert_eq!(a.nodes, b.nodes);
        for n in &a.nodes {
            assert!((0.0..TAU).contains(&n.phase));
            assert!((2.0..5.0).contains(&n.radius));
        }
    }

    #[test]
    fn test_frame_has_one_dot_per_node() {
        let field = ParticleField::new(Vec2::new(640.0, 360.0));
        let frame = field.frame(1234.0);
        assert_eq!(frame.dots.len(), NODE_COUNT);
    }

    #[test]
    fn test_links_respect_distance_threshold() {
        let field = ParticleField::new(Vec2::new(900.0, 600.0));
        let frame = field.frame(5000.0);
        assert!(!frame.links.is_empty());
        for [a, b] in &frame.links {
            assert!(a.distance(*b) < LINK_DISTANCE);
        }
    }

    #[test]
    fn test_resize_recenters_ring() {
        let mut field = ParticleField::new(Vec2::new(200.0, 200.0));
        assert!(!field.resize(Vec2::new(200.0, 200.0)));
        assert!(field.resize(Vec2::new(1000.0, 500.0)));
        assert_eq!(field.size(), Vec2::new(1000.0, 500.0));

        let n = field.bases.len() as f32;
        let cx = field.bases.iter().map(|p| p.x).sum::<f32>() / n;
        let cy = field.bases.iter().map(|p| p.y).sum::<f32>() / n;
        assert!((cx - 500.0).abs() < 0.5);
        assert!((cy - 250.0).abs() < 0.5);
    }

    #[test]
    fn test_dots_stay_near_their_base() {
        let field = ParticleField::new(Vec2::new(600.0, 600.0));
        for t in [0.0, 250.0, 10_000.0] {
            let frame = field.frame(t);
            for ((p, _), base) in frame.dots.iter().zip(&field.bases) {
                assert!(p.distance(*base) <= DOT_DRIFT * 2.0_f32.sqrt() + 0.01);
            }
        }
    }
}
