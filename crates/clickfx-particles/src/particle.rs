//! Particle record and the ordered store that owns them

use clickfx_core::{Color, Size, Vec2};

/// Per-frame motion constants shared by every particle of an effect
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    /// Radius lost per frame
    pub radius_decay: f32,
    /// Velocity multiplier per frame, below 1
    pub damping: f32,
    /// Scale of the angle-dependent drift
    pub drift: f32,
}

/// A transient circle advanced once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Spawn angle in radians; also steers the drift
    pub angle: f32,
}

impl Particle {
    /// Drift subtracted from the velocity each frame.
    ///
    /// Scaled by the surface so the wander looks the same at any window size.
    pub fn drift(&self, bounds: Size, strength: f32) -> Vec2 {
        if bounds.is_empty() {
            return Vec2::ZERO;
        }
        Vec2::new(
            -strength / bounds.width * self.angle.sin(),
            -strength / bounds.height * self.angle.cos(),
        )
    }

    /// Advance one frame: integrate, shrink, damp
    pub fn step(&mut self, bounds: Size, params: &StepParams) {
        let drift = self.drift(bounds, params.drift);
        self.position += self.velocity - drift;
        self.radius -= params.radius_decay;
        self.velocity *= params.damping;
    }

    /// Spent, or entirely off-surface
    pub fn is_expired(&self, bounds: Size) -> bool {
        self.radius <= 0.0 || bounds.circle_outside(self.position, self.radius)
    }
}

/// Ordered particle collection with a hard capacity
#[derive(Debug)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    max_particles: usize,
}

impl ParticleStore {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Append a particle. Returns false (and drops it) when the store is full.
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.max_particles {
            return false;
        }
        self.particles.push(particle);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    /// Drop expired particles in one stable pass, keeping survivor order.
    /// Returns how many were removed.
    pub fn retain_live(&mut self, bounds: Size) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired(bounds));
        before - self.particles.len()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
