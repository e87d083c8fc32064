//! Enumeration of every 3x3 pattern that can occur on a real board.
//!
//! Each symmetry orbit is represented by its smallest code. A representative
//! is kept only if all eight reorientations pass the edge check, and both
//! colourings pass the common-fate check. The result is the reference set
//! against which authored tables are audited.

use std::collections::BTreeSet;
use std::fmt;

use log::info;

use crate::constants::{ATOM_EMPTY, ATOM_FIRST, ATOM_FIRST_ATARI, ATOM_OUTSIDE};
use crate::pattern3::{Pattern3, Pattern3Table};
use crate::wildcard::is_atari_atom;

/// Whether the edge cells of a ring (`N NE E SE S SW W NW`) can be a real
/// board boundary as seen from the bottom side.
pub fn check_bottom_edge(ring: &[u8; 8]) -> bool {
    let edge = |c: u8| c == ATOM_OUTSIDE;
    let [n, ne, e, se, s, sw, w, _nw] = *ring;

    // An edge below runs the whole width
    if edge(s) && !(edge(se) && edge(sw)) {
        return false;
    }
    if !edge(s) && edge(se) && edge(sw) {
        return false;
    }
    // The board is at least two lines tall
    if edge(s) && edge(n) {
        return false;
    }
    // A dot on the first line next to the move point has a liberty there
    if edge(s) && (is_atari_atom(e) || is_atari_atom(w)) {
        return false;
    }
    // A corner edge cell belongs to a straight edge below or to the right
    if edge(se) && (!edge(e) || !edge(ne)) && (!edge(s) || !edge(sw)) {
        return false;
    }
    true
}

/// Whether first-player dots chained to the bottom neighbour agree with it
/// on being in atari.
///
/// Walking from SW round to E, empty cells are skipped and the walk stops at
/// anything else that is not a first-player dot.
pub fn check_common_fate(ring: &[u8; 8]) -> bool {
    let first = |c: u8| c == ATOM_FIRST || c == ATOM_FIRST_ATARI;
    let bottom = ring[4];
    if !first(bottom) {
        return true;
    }
    for i in 5..=10 {
        let c = ring[i % 8];
        if c == ATOM_EMPTY {
            continue;
        }
        if !first(c) {
            break;
        }
        if i % 2 == 0 && c != bottom {
            return false;
        }
    }
    true
}

/// Whether `p` is the smallest code of its orbit and the orbit is realizable.
pub fn is_realizable_representative(p: Pattern3) -> bool {
    if p.shows_impossible() {
        return false;
    }
    let orbit = p.orbit();
    if orbit[1..].iter().any(|&q| q < p) {
        return false;
    }
    let rings = orbit.map(Pattern3::ring);
    if !rings.iter().all(check_bottom_edge) || !rings.iter().all(check_common_fate) {
        return false;
    }
    orbit
        .map(|q| q.reverse_colour().ring())
        .iter()
        .all(check_common_fate)
}

/// The canonical representative of every realizable orbit.
pub fn canonical_patterns() -> BTreeSet<Pattern3> {
    let all: BTreeSet<Pattern3> = Pattern3::all()
        .filter(|&p| is_realizable_representative(p))
        .collect();
    info!("{} canonical realizable 3x3 patterns", all.len());
    all
}

/// How an authored table covers the realizable patterns.
#[derive(Debug, Clone, Default)]
pub struct Coverage {
    /// Realizable representatives with a non-zero value somewhere in their orbit.
    pub covered: BTreeSet<Pattern3>,
    /// Realizable representatives the table leaves at zero.
    pub uncovered: Vec<Pattern3>,
    /// Representatives of non-zero entries that cannot occur on a board.
    pub spurious: BTreeSet<Pattern3>,
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "covered {}, uncovered {}, spurious {}",
            self.covered.len(),
            self.uncovered.len(),
            self.spurious.len()
        )
    }
}

/// Compare the non-zero entries of `table` with the realizable set.
pub fn audit(table: &Pattern3Table, realizable: &BTreeSet<Pattern3>) -> Coverage {
    let mut coverage = Coverage::default();
    for p in Pattern3::all().filter(|&p| table.get(p) != 0) {
        let c = p.canonical();
        if realizable.contains(&c) {
            coverage.covered.insert(c);
        } else {
            coverage.spurious.insert(c);
        }
    }
    coverage.uncovered = realizable.difference(&coverage.covered).copied().collect();
    info!("coverage: {coverage}");
    coverage
}
