//! Closed-form pursuit/evasion law for a single pursuer-evader pair
//!
//! Under simple motion the optimal play is for both agents to run in a
//! straight line to the same aim point on the Apollonius circle of the pair,
//! arriving together. With `a = v_e / v_p`, pursuer `P`, evader `E` and
//! `d = |P - E|`:
//!
//! ```text
//! x_aim = (x_e - a² x_p) / (1 - a²)
//! y_aim = (y_e - a² y_p - a d) / (1 - a²)
//! ```
//!
//! The formula only makes sense for `a < 1`, which [`VelocityRatio`]
//! enforces at construction.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use crate::error::{GameError, Role};
use crate::geometry::dist2;
use crate::heading_toward;

/// Evader speed over pursuer speed, guaranteed in `(0, 1)`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct VelocityRatio(f64);

impl VelocityRatio {
    /// `None` unless both speeds are positive and the evader is strictly slower
    pub fn new(pursuer_speed: f64, evader_speed: f64) -> Option<Self> {
        if !(pursuer_speed.is_finite() && evader_speed.is_finite()) {
            return None;
        }
        if pursuer_speed <= 0.0 || evader_speed <= 0.0 {
            return None;
        }
        Self::from_value(evader_speed / pursuer_speed)
    }

    pub fn from_value(a: f64) -> Option<Self> {
        (a > 0.0 && a < 1.0).then_some(Self(a))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn squared(self) -> f64 {
        self.0 * self.0
    }
}

impl TryFrom<f64> for VelocityRatio {
    type Error = String;

    fn try_from(a: f64) -> Result<Self, Self::Error> {
        Self::from_value(a).ok_or_else(|| format!("velocity ratio {a} outside (0, 1)"))
    }
}

impl From<VelocityRatio> for f64 {
    fn from(ratio: VelocityRatio) -> f64 {
        ratio.0
    }
}

/// Velocity ratios for every pursuer/evader combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioTable {
    pursuers: usize,
    evaders: usize,
    /// Row-major: `ratios[i * evaders + j]` is pursuer i vs evader j
    ratios: Vec<VelocityRatio>,
}

impl RatioTable {
    /// Fails if any speed is non-positive or any evader is not strictly
    /// slower than any pursuer it could be paired with.
    pub fn new(pursuer_speeds: &[f64], evader_speeds: &[f64]) -> Result<Self, GameError> {
        check_speeds(Role::Pursuer, pursuer_speeds)?;
        check_speeds(Role::Evader, evader_speeds)?;

        let mut ratios = Vec::with_capacity(pursuer_speeds.len() * evader_speeds.len());
        for (i, &vp) in pursuer_speeds.iter().enumerate() {
            for (j, &ve) in evader_speeds.iter().enumerate() {
                let ratio = VelocityRatio::new(vp, ve).ok_or(GameError::DegenerateRatio {
                    pursuer: i,
                    evader: j,
                    ratio: ve / vp,
                })?;
                ratios.push(ratio);
            }
        }

        Ok(Self {
            pursuers: pursuer_speeds.len(),
            evaders: evader_speeds.len(),
            ratios,
        })
    }

    /// Ratio table for the speeds carried by the agents themselves
    pub fn for_agents(pursuers: &[Agent], evaders: &[Agent]) -> Result<Self, GameError> {
        let vp: Vec<f64> = pursuers.iter().map(|a| a.speed).collect();
        let ve: Vec<f64> = evaders.iter().map(|a| a.speed).collect();
        Self::new(&vp, &ve)
    }

    #[inline]
    pub fn get(&self, pursuer: usize, evader: usize) -> VelocityRatio {
        assert!(pursuer < self.pursuers && evader < self.evaders);
        self.ratios[pursuer * self.evaders + evader]
    }
}

fn check_speeds(role: Role, speeds: &[f64]) -> Result<(), GameError> {
    for (index, &speed) in speeds.iter().enumerate() {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(GameError::NonPositiveSpeed { role, index, speed });
        }
    }
    Ok(())
}

/// Point both agents of the pair run toward
pub fn aim_point(pursuer: DVec2, evader: DVec2, a: VelocityRatio) -> DVec2 {
    let a2 = a.squared();
    let den = 1.0 - a2;
    let d = dist2(pursuer, evader);
    DVec2::new(
        (evader.x - a2 * pursuer.x) / den,
        (evader.y - a2 * pursuer.y - a.value() * d) / den,
    )
}

/// `y_ij`: the y coordinate of the pair's aim point, the pair's share of the
/// assignment value.
#[inline]
pub fn aim_value(pursuer: DVec2, evader: DVec2, a: VelocityRatio) -> f64 {
    aim_point(pursuer, evader, a).y
}

/// Optimal headings of a pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Headings {
    pub pursuer: f64,
    pub evader: f64,
    pub aim: DVec2,
}

pub fn optimal_headings(pursuer: DVec2, evader: DVec2, a: VelocityRatio) -> Headings {
    let aim = aim_point(pursuer, evader, a);
    Headings {
        pursuer: heading_toward(pursuer, aim),
        evader: heading_toward(evader, aim),
        aim,
    }
}

/// Point both agents of a pair at their common aim point
pub fn engage(pursuer: &mut Agent, evader: &mut Agent, a: VelocityRatio) -> DVec2 {
    let headings = optimal_headings(pursuer.pos, evader.pos, a);
    pursuer.heading = headings.pursuer;
    evader.heading = headings.evader;
    headings.aim
}
