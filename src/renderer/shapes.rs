//! Shape generation for the backdrop
//!
//! Everything is emitted in screen pixels (y down). The pipeline maps pixels
//! to NDC right before upload.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::f32::consts::PI;

use super::scene::{SceneFrame, Viewport};
use super::vertex::{Vertex, colors};

/// Vertical field of view (degrees)
const FOV_Y_DEG: f32 = 75.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;
/// Camera sits on +z looking at the origin
const EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// World-space portal radius
const PORTAL_RADIUS: f32 = 1.2;
/// World-space length of a shooting star's tail
const STREAK_LENGTH: f32 = 4.0;
/// Star point size in pixels
const STAR_SIZE: f32 = 1.5;
const SPARKLE_SIZE: f32 = 2.5;

/// Perspective camera mapping world space to viewport pixels
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    view_proj: Mat4,
    /// Projection y scale, used to size objects by depth
    focal: f32,
    viewport: Viewport,
}

impl Camera {
    pub fn new(viewport: Viewport) -> Self {
        let proj = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), viewport.aspect(), Z_NEAR, Z_FAR);
        let view = Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y);
        Self {
            view_proj: proj * view,
            focal: proj.y_axis.y,
            viewport,
        }
    }

    /// Project to pixels; also returns pixels per world unit at that depth.
    /// `None` when the point is behind the camera.
    pub fn project(&self, p: Vec3) -> Option<(Vec2, f32)> {
        let clip = self.view_proj * p.extend(1.0);
        if clip.w <= Z_NEAR {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let w = self.viewport.width as f32;
        let h = self.viewport.height as f32;
        let pixel = Vec2::new((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h);
        let scale = self.focal / clip.w * h * 0.5;
        Some((pixel, scale))
    }
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Axis-aligned square point sprite
pub fn point(center: Vec2, size: f32, color: [f32; 4]) -> [Vertex; 6] {
    let h = size / 2.0;
    let (x0, y0, x1, y1) = (center.x - h, center.y - h, center.x + h, center.y + h);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Tapered quad from `head` (full width) to `tail` (zero width)
pub fn streak(
    head: Vec2,
    tail: Vec2,
    width: f32,
    head_color: [f32; 4],
    tail_color: [f32; 4],
) -> Vec<Vertex> {
    let dir = (tail - head).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let a = head + perp;
    let b = head - perp;
    vec![
        Vertex::new(a.x, a.y, head_color),
        Vertex::new(b.x, b.y, head_color),
        Vertex::new(tail.x, tail.y, tail_color),
    ]
}

/// Build the full backdrop: stars, sparkles, light glow, portals, shooting stars
pub fn scene(frame: &SceneFrame, stars: &[Vec3], sparkles: &[Vec3]) -> Vec<Vertex> {
    let camera = Camera::new(frame.viewport);
    let mut vertices = Vec::with_capacity((stars.len() + sparkles.len()) * 6 + 1024);

    let field = Quat::from_euler(
        EulerRot::XYZ,
        frame.starfield_rotation.x,
        frame.starfield_rotation.y,
        0.0,
    );
    for star in stars {
        if let Some((p, _)) = camera.project(field * *star) {
            vertices.extend_from_slice(&point(p, STAR_SIZE, colors::STAR));
        }
    }

    let sparkle_rot = Quat::from_rotation_y(frame.sparkle_rotation);
    for sparkle in sparkles {
        if let Some((p, _)) = camera.project(sparkle_rot * *sparkle) {
            vertices.extend_from_slice(&point(p, SPARKLE_SIZE, colors::SPARKLE));
        }
    }

    if let Some((p, scale)) = camera.project(frame.light) {
        vertices.extend(circle(p, 3.0 * scale, colors::LIGHT_GLOW, 32));
    }

    for portal in &frame.portals {
        let Some((p, scale)) = camera.project(portal.pos) else {
            continue;
        };
        let r = PORTAL_RADIUS * scale;
        vertices.extend(circle(p, r * 0.85, colors::PORTAL_CORE, 32));
        vertices.extend(ring(p, r * 0.85, r, colors::PORTAL_RING, 32));
        // Orbiting marker makes the spin visible
        let marker = p + Vec2::new(portal.spin.cos(), -portal.spin.sin()) * r * 0.92;
        vertices.extend(circle(marker, (r * 0.1).max(1.5), colors::PORTAL_MARKER, 8));
    }

    for star in &frame.shooting_stars {
        let head = camera.project(star.pos);
        let tail = camera.project(star.pos - star.dir * STREAK_LENGTH);
        if let (Some((h, scale)), Some((t, _))) = (head, tail) {
            vertices.extend(streak(
                h,
                t,
                (0.15 * scale).max(1.0),
                with_alpha(colors::SHOOTING_STAR, star.opacity),
                with_alpha(colors::SHOOTING_STAR, 0.0),
            ));
        }
    }

    vertices
}
