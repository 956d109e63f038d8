//! Particle system for consumption bursts.
//!
//! Purely decorative: particles never affect gameplay. The pool has a fixed
//! number of slots; a particle dies by clearing its `active` flag and its slot
//! is reused by later bursts.

use std::f32::consts::PI;

use snek_types::{Cell, Rgb, MAX_PARTICLES};

use crate::rng::SimpleRng;

/// Lifetime in frames is drawn from `LIFETIME_MIN..LIFETIME_MIN + LIFETIME_SPREAD`.
pub const LIFETIME_MIN: i32 = 30;
pub const LIFETIME_SPREAD: u32 = 30;
/// Speed in pixels per frame is drawn from `SPEED_MIN..=SPEED_MIN + SPEED_SPREAD`.
pub const SPEED_MIN: f32 = 0.5;
pub const SPEED_SPREAD: f32 = 1.5;
/// Lifetime that maps to full brightness when fading.
const FADE_SPAN: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining frames
    pub lifetime: i32,
    pub color: Rgb,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticlePool {
    slots: [Particle; MAX_PARTICLES],
}

impl ParticlePool {
    pub fn new() -> Self {
        Self {
            slots: [Particle::default(); MAX_PARTICLES],
        }
    }

    /// Deactivate every slot
    pub fn clear(&mut self) {
        for p in &mut self.slots {
            p.active = false;
        }
    }

    pub fn slots(&self) -> &[Particle] {
        &self.slots
    }

    pub fn active(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Fill free slots with particles flying out of the centre of `cell`.
    ///
    /// After each particle a coin flip decides whether to stop, so a burst holds
    /// one or more particles. A full pool places none. Returns the number spawned.
    pub fn spawn_burst(&mut self, cell: Cell, color: Rgb, rng: &mut SimpleRng) -> usize {
        let (px, py) = cell.pixel_center();
        let mut spawned = 0;

        for p in self.slots.iter_mut().filter(|p| !p.active) {
            let angle = rng.next_unit() * 2.0 * PI;
            let speed = SPEED_MIN + rng.next_unit() * SPEED_SPREAD;
            *p = Particle {
                x: px,
                y: py,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                lifetime: LIFETIME_MIN + rng.next_range(LIFETIME_SPREAD) as i32,
                color,
                active: true,
            };
            spawned += 1;

            if rng.next_range(2) == 0 {
                break;
            }
        }

        spawned
    }

    /// One frame of Euler integration, ageing and fading.
    ///
    /// The color is scaled by `lifetime / 60` every frame, compounding on the
    /// already-faded value.
    pub fn age_all(&mut self) {
        for p in self.slots.iter_mut().filter(|p| p.active) {
            p.x += p.vx;
            p.y += p.vy;
            p.lifetime -= 1;
            if p.lifetime <= 0 {
                p.active = false;
                continue;
            }
            p.color = p.color.scale(p.lifetime as f32 / FADE_SPAN);
        }
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}
