//! Capture (termination) predicate
//!
//! A game ends when every pair of the assignment used for control is within
//! the capture radius. Callers must pass the same assignment that was just
//! used to steer, so "who chases whom" and "who must be caught" agree.

use super::agent::Agent;
use super::assignment::Assignment;

/// `distance <= radius`, allowing `tolerance` of slack
#[inline]
pub fn within_capture(distance: f64, radius: f64, tolerance: f64) -> bool {
    distance <= radius + tolerance
}

pub fn all_captured(
    pursuers: &[Agent],
    evaders: &[Agent],
    assignment: &Assignment,
    radius: f64,
    tolerance: f64,
) -> bool {
    assignment.pairs().iter().all(|pair| {
        let d = pursuers[pair.pursuer].distance_to(&evaders[pair.evader]);
        within_capture(d, radius, tolerance)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    const TOL: f64 = 0.08;

    #[test]
    fn test_boundary() {
        assert!(within_capture(10.0, 10.0, TOL));
        assert!(within_capture(9.0, 10.0, TOL));
        assert!(within_capture(10.0 + TOL / 2.0, 10.0, TOL));
        assert!(!within_capture(10.0 + 2.0 * TOL, 10.0, TOL));
        assert!(!within_capture(10.5, 10.0, 0.0));
    }

    #[test]
    fn test_zero_radius() {
        assert!(within_capture(0.0, 0.0, 0.0));
        assert!(within_capture(0.05, 0.0, TOL));
        assert!(!within_capture(0.1, 0.0, TOL));
    }

    fn at(x: f64, y: f64) -> Agent {
        Agent::new(DVec2::new(x, y), 1.0)
    }

    #[test]
    fn test_all_pairs_must_be_caught() {
        let pursuers = [at(0.0, 0.0), at(100.0, 0.0)];
        let evaders = [at(5.0, 0.0), at(100.0, 50.0)];
        let straight = Assignment::identity(2);
        let crossed = Assignment::from_evaders(&[1, 0]);

        assert!(!all_captured(&pursuers, &evaders, &straight, 10.0, TOL));
        assert!(!all_captured(&pursuers, &evaders, &crossed, 10.0, TOL));

        let evaders = [at(5.0, 0.0), at(100.0, 10.0)];
        assert!(all_captured(&pursuers, &evaders, &straight, 10.0, TOL));
        // Same positions, but the crossed pairs are far apart
        assert!(!all_captured(&pursuers, &evaders, &crossed, 10.0, TOL));
    }
}
