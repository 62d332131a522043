//! Simple-motion agents

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ArenaConfig, SpeedRange};
use crate::geometry::dist2;
use crate::{heading_to_unit, heading_toward};

/// A holonomic agent: constant speed, heading changes instantly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub pos: DVec2,
    /// Radians from +x
    pub heading: f64,
    pub speed: f64,
}

impl Agent {
    pub fn new(pos: DVec2, speed: f64) -> Self {
        Self {
            pos,
            heading: 0.0,
            speed,
        }
    }

    /// Random position inside the arena, random speed from `speed`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, arena: &ArenaConfig, speed: &SpeedRange) -> Self {
        let pos = DVec2::new(
            rng.random_range(0.0..arena.width),
            rng.random_range(0.0..arena.height),
        );
        Self::new(pos, speed.sample(rng))
    }

    /// Move along the current heading for `dt` seconds
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.pos += heading_to_unit(self.heading) * (dt * self.speed);
    }

    /// Turn to face `point`
    #[inline]
    pub fn face(&mut self, point: DVec2) {
        self.heading = heading_toward(self.pos, point);
    }

    #[inline]
    pub fn distance_to(&self, other: &Agent) -> f64 {
        dist2(self.pos, other.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_advance_along_heading() {
        let mut agent = Agent::new(DVec2::new(1.0, 1.0), 10.0);
        agent.advance(0.5);
        assert!((agent.pos - DVec2::new(6.0, 1.0)).length() < 1e-12);

        agent.heading = FRAC_PI_2;
        agent.advance(0.1);
        assert!((agent.pos - DVec2::new(6.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_face_then_advance_closes_distance() {
        let target = Agent::new(DVec2::new(30.0, -40.0), 0.0);
        let mut chaser = Agent::new(DVec2::ZERO, 5.0);
        chaser.face(target.pos);
        chaser.advance(1.0);
        assert!((chaser.distance_to(&target) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_random_agents_are_seeded() {
        let arena = ArenaConfig::default();
        let speed = SpeedRange::new(30.0, 40.0);
        let a = Agent::random(&mut Pcg32::seed_from_u64(3), &arena, &speed);
        let b = Agent::random(&mut Pcg32::seed_from_u64(3), &arena, &speed);
        assert_eq!(a, b);
        assert!(a.pos.x >= 0.0 && a.pos.x < arena.width);
        assert!(a.pos.y >= 0.0 && a.pos.y < arena.height);
        assert!((30.0..40.0).contains(&a.speed));
    }
}
