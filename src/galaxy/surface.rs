//! Render-independent state of the particle surface: rotation, the entry
//! animation, and target hit-testing.

use bevy::math::{Quat, Vec3};

use super::geometry::ParticleField;

/// Field rotation in radians per second.
pub const ROTATION_SPEED: f32 = 0.03;
pub const ENTRY_DURATION_SECS: f32 = 2.0;
/// Pick radius around the target star, in world units at full scale.
pub const TARGET_PICK_RADIUS: f32 = 0.35;

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Scale-in animation played when the galaxy scene appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryAnimation {
    elapsed: f32,
    duration: f32,
}

impl Default for EntryAnimation {
    fn default() -> Self {
        Self::new(ENTRY_DURATION_SECS)
    }
}

impl EntryAnimation {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn scale(&self) -> f32 {
        ease_out_cubic(self.progress())
    }

    pub fn is_settled(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Outcome of a pointer event against the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceHit {
    /// Entry animation still running; picking is disabled.
    Unsettled,
    Miss,
    Target,
}

/// Transform and interaction state for one particle field.
#[derive(Debug, Clone)]
pub struct ParticleSurface {
    rotation: f32,
    auto_rotate: bool,
    entry: EntryAnimation,
    hovered: bool,
    target: Option<Vec3>,
}

impl ParticleSurface {
    /// Bind the surface to the target particle registered under `target_id`.
    pub fn new(field: &ParticleField, target_id: &str) -> Self {
        Self {
            rotation: 0.0,
            auto_rotate: true,
            entry: EntryAnimation::default(),
            hovered: false,
            target: field.target_position(target_id),
        }
    }

    /// Point the surface at a regenerated field. Rotation and the entry
    /// animation carry over; hover is cleared.
    pub fn rebind(&mut self, field: &ParticleField, target_id: &str) {
        self.target = field.target_position(target_id);
        self.hovered = false;
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn advance(&mut self, dt: f32) {
        if self.auto_rotate && dt.is_finite() && dt > 0.0 {
            self.rotation = (self.rotation + ROTATION_SPEED * dt) % std::f32::consts::TAU;
        }
        self.entry.advance(dt);
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.entry.scale()
    }

    pub fn interactive(&self) -> bool {
        self.entry.is_settled()
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Map a field-local position into world space.
    pub fn world_position(&self, local: Vec3) -> Vec3 {
        Quat::from_rotation_y(self.rotation) * (local * self.scale())
    }

    pub fn target_world_position(&self) -> Option<Vec3> {
        self.target.map(|local| self.world_position(local))
    }

    fn pick(&self, origin: Vec3, direction: Vec3) -> SurfaceHit {
        if !self.interactive() {
            return SurfaceHit::Unsettled;
        }
        match self.target_world_position() {
            Some(center) if ray_hits_sphere(origin, direction, center, TARGET_PICK_RADIUS) => {
                SurfaceHit::Target
            }
            _ => SurfaceHit::Miss,
        }
    }

    /// Update the hover flag from a pointer ray. Returns true when it changed.
    pub fn update_hover(&mut self, origin: Vec3, direction: Vec3) -> bool {
        let hovered = self.pick(origin, direction) == SurfaceHit::Target;
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    pub fn clear_hover(&mut self) {
        self.hovered = false;
    }

    pub fn click(&self, origin: Vec3, direction: Vec3) -> SurfaceHit {
        self.pick(origin, direction)
    }
}

/// Closest-approach test between a ray and a sphere.
pub fn ray_hits_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> bool {
    let Some(dir) = direction.try_normalize() else {
        return false;
    };
    let t = (center - origin).dot(dir);
    if t < 0.0 {
        return false;
    }
    let closest = origin + dir * t;
    closest.distance(center) <= radius
}
