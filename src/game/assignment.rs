//! Pursuer-to-evader assignments for the N = M game
//!
//! An assignment is a bijection from pursuers to evaders. All N! of them are
//! enumerated once per game, in lexicographic order of the evader sequence,
//! and the search picks the one maximizing the summed aim values. Each
//! evaluation costs O(N! * N), so N stays small.

use serde::{Deserialize, Serialize};

/// Pursuer `pursuer` chases evader `evader`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub pursuer: usize,
    pub evader: usize,
}

/// One pair per pursuer, pair `p` always belonging to pursuer `p`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pairs: Vec<Pair>,
}

impl Assignment {
    /// Pursuer `p` chases `evaders[p]`
    pub fn from_evaders(evaders: &[usize]) -> Self {
        let pairs = evaders
            .iter()
            .enumerate()
            .map(|(pursuer, &evader)| Pair { pursuer, evader })
            .collect();
        Self { pairs }
    }

    pub fn identity(n: usize) -> Self {
        Self::from_evaders(&(0..n).collect::<Vec<_>>())
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn evader_for(&self, pursuer: usize) -> Option<usize> {
        self.pairs.get(pursuer).map(|pair| pair.evader)
    }

    /// Every pursuer appears once and every evader appears once
    pub fn is_bijection(&self) -> bool {
        let n = self.pairs.len();
        let mut seen = vec![false; n];
        for (p, pair) in self.pairs.iter().enumerate() {
            if pair.pursuer != p || pair.evader >= n || seen[pair.evader] {
                return false;
            }
            seen[pair.evader] = true;
        }
        true
    }

    /// `Y`: sum of the pairwise values
    pub fn value(&self, mut y: impl FnMut(Pair) -> f64) -> f64 {
        self.pairs.iter().map(|&pair| y(pair)).sum()
    }
}

/// All N! assignments for a game with N pursuers and N evaders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSet {
    n: usize,
    assignments: Vec<Assignment>,
}

impl AssignmentSet {
    /// Enumerate every bijection, identity first.
    pub fn enumerate(n: usize) -> Self {
        let mut assignments = Vec::with_capacity(factorial(n));
        let mut evaders: Vec<usize> = (0..n).collect();
        loop {
            assignments.push(Assignment::from_evaders(&evaders));
            if !next_permutation(&mut evaders) {
                break;
            }
        }
        log::debug!("Enumerated {} assignments for N = {}", assignments.len(), n);
        Self { n, assignments }
    }

    /// Agents per side
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn get(&self, index: usize) -> &Assignment {
        &self.assignments[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.assignments.iter()
    }

    /// Index and value of the assignment maximizing `Y`.
    ///
    /// The first maximum in enumeration order wins ties. If no value compares
    /// greater than `-inf` (all NaN), index 0 is returned.
    pub fn best_with_value(&self, mut y: impl FnMut(Pair) -> f64) -> (usize, f64) {
        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (index, assignment) in self.assignments.iter().enumerate() {
            let value = assignment.value(&mut y);
            if value > best_value {
                best = index;
                best_value = value;
            }
        }
        (best, best_value)
    }

    pub fn best(&self, y: impl FnMut(Pair) -> f64) -> usize {
        self.best_with_value(y).0
    }
}

impl<'a> IntoIterator for &'a AssignmentSet {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub fn factorial(n: usize) -> usize {
    (1..=n).product()
}

/// Rearrange into the next lexicographic permutation; false after the last
fn next_permutation(v: &mut [usize]) -> bool {
    if v.len() < 2 {
        return false;
    }
    let Some(i) = (0..v.len() - 1).rev().find(|&i| v[i] < v[i + 1]) else {
        return false;
    };
    let j = (i + 1..v.len())
        .rev()
        .find(|&j| v[j] > v[i])
        .unwrap_or(i + 1);
    v.swap(i, j);
    v[i + 1..].reverse();
    true
}
