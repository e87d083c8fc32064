//! Edge band pattern codes: the 5x2 strip along a board edge.
//!
//! The move point sits in the middle column of either row; the other nine
//! points are encoded with 2 bits each and no atari flags:
//!
//! ```text
//! 0 2 * 7 5        0 2 4 7 5
//! 1 3 4 8 6   or   1 3 * 8 6
//! ```
//!
//! Both placements of the move point give the same code, which is why the
//! engine keeps separate tables for points on the edge line and next to it.
//! The band only has a left/right mirror symmetry.

use std::fmt;

use crate::constants::{
    ATOM_EMPTY, ATOM_FIRST, ATOM_FIRST_ATARI, ATOM_OUTSIDE, ATOM_SECOND, ATOM_SECOND_ATARI,
    DECODE_SYMBOLS, FIELD_EMPTY, FIELD_FIRST, FIELD_MASK, FIELD_OUTSIDE, FIELD_SECOND,
    MOVE_POINT, PATTERN52_FIELD_BIT, PATTERN52_FIELDS, PATTERN52_LEN, PATTERN52_MOVE_POINTS,
    PATTERN52_ROW, PATTERN52_SIZE,
};
use crate::error::{PatternError, Result};
use crate::table::{Field, PatternCode, PatternTable};

/// Table of edge band pattern values.
pub type Pattern52Table = PatternTable<Pattern52, f32>;

/// An 18-bit edge band code.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern52(u32);

impl Pattern52 {
    pub const EMPTY: Pattern52 = Pattern52(0);

    pub fn from_raw(raw: u32) -> Option<Self> {
        ((raw as usize) < PATTERN52_SIZE).then_some(Self(raw))
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Pattern52> {
        (0..PATTERN52_SIZE as u32).map(Pattern52)
    }

    /// Build a code from the nine band fields in field order.
    pub fn from_neighbours(fields: [Field; PATTERN52_FIELDS]) -> Self {
        let p = fields
            .iter()
            .enumerate()
            .fold(0, |p, (i, field)| p | field.bits() << (2 * i));
        Self(p)
    }

    /// Mirror left/right.
    #[inline]
    pub fn reflect(self) -> Self {
        let p = self.0;
        Self(((p >> 10) & 0xff) | ((p & 0xff) << 10) | (p & 0x300))
    }

    #[inline]
    pub fn reverse_colour(self) -> Self {
        let p = self.0;
        Self(((p >> 1) & 0x1_5555) | ((p & 0x1_5555) << 1))
    }

    /// Encode a 10-character atomic string with `H` in the middle column.
    pub fn from_atoms(atoms: &str) -> Result<Self> {
        let bytes = atoms.as_bytes();
        if bytes.len() != PATTERN52_LEN {
            return Err(PatternError::TemplateLength {
                template: atoms.to_string(),
                expected: PATTERN52_LEN,
                found: bytes.len(),
            });
        }
        let move_point = find_move_point(bytes).ok_or_else(|| PatternError::MovePoint {
            template: atoms.to_string(),
        })?;
        let mut p = 0;
        for (position, &atom) in bytes.iter().enumerate() {
            if position == move_point {
                continue;
            }
            let field = match atom {
                ATOM_EMPTY => FIELD_EMPTY,
                ATOM_FIRST => FIELD_FIRST,
                ATOM_SECOND => FIELD_SECOND,
                ATOM_OUTSIDE => FIELD_OUTSIDE,
                ATOM_FIRST_ATARI | ATOM_SECOND_ATARI => {
                    return Err(PatternError::AtariNotTracked {
                        template: atoms.to_string(),
                        position,
                    });
                }
                _ => {
                    return Err(PatternError::NotAnAtom {
                        atoms: atoms.to_string(),
                        symbol: atom as char,
                        position,
                    });
                }
            };
            p |= field << PATTERN52_FIELD_BIT[position];
        }
        Ok(Self(p))
    }

    /// Decode with the move point in the top row.
    pub fn atoms(self) -> String {
        self.atom_bytes().iter().map(|&b| b as char).collect()
    }

    fn atom_bytes(self) -> [u8; PATTERN52_LEN] {
        let mut out = [MOVE_POINT; PATTERN52_LEN];
        for (position, slot) in out.iter_mut().enumerate() {
            if position == PATTERN52_MOVE_POINTS[0] {
                continue;
            }
            let field = (self.0 >> PATTERN52_FIELD_BIT[position]) & FIELD_MASK;
            *slot = DECODE_SYMBOLS[field as usize];
        }
        out
    }
}

/// Position of the single `H` of a template, if it is in the middle column.
fn find_move_point(bytes: &[u8]) -> Option<usize> {
    let mut found = bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == MOVE_POINT)
        .map(|(i, _)| i);
    match (found.next(), found.next()) {
        (Some(i), None) if PATTERN52_MOVE_POINTS.contains(&i) => Some(i),
        _ => None,
    }
}

impl PatternCode for Pattern52 {
    const SIZE: usize = PATTERN52_SIZE;
    const TEMPLATE_LEN: usize = PATTERN52_LEN;

    fn normalize_template(body: &str) -> Result<String> {
        match find_move_point(body.as_bytes()) {
            Some(_) => Ok(body.to_string()),
            None => Err(PatternError::MovePoint {
                template: body.to_string(),
            }),
        }
    }

    fn tracks_atari(_position: usize) -> bool {
        false
    }

    fn from_atoms(atoms: &str) -> Result<Self> {
        Pattern52::from_atoms(atoms)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    fn reverse_colour(self) -> Self {
        Pattern52::reverse_colour(self)
    }

    fn for_each_symmetry(self, mut f: impl FnMut(Self)) {
        f(self);
        f(self.reflect());
    }
}

impl fmt::Display for Pattern52 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.atom_bytes().chunks(PATTERN52_ROW) {
            for &b in row {
                let symbol = if b == MOVE_POINT { '-' } else { b as char };
                write!(f, "{symbol:>2}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p52(atoms: &str) -> Pattern52 {
        Pattern52::from_atoms(atoms).unwrap()
    }

    #[test]
    fn test_field_layout() {
        assert_eq!(p52("Y.H......."), Pattern52(1));
        assert_eq!(p52("..H..Y....").raw(), 1 << 2);
        assert_eq!(p52("..H....Q..").raw(), 2 << 8);
        assert_eq!(p52("..H......#").raw(), 3 << 12);
        assert_eq!(p52("..H.Y.....").raw(), 1 << 10);
    }

    #[test]
    fn test_move_point_row_does_not_matter() {
        assert_eq!(p52("Y.H.Q..#.."), p52("Y.#.Q..H.."));
    }

    #[test]
    fn test_reflect_mirrors() {
        assert_eq!(p52("Y#H..Q...."), p52("..H#Y....Q").reflect());
        assert_eq!(p52("..H....Q..").reflect(), p52("..H....Q.."));
    }

    #[test]
    fn test_involutions_everywhere() {
        for p in Pattern52::all() {
            assert_eq!(p.reflect().reflect(), p);
            assert_eq!(p.reverse_colour().reverse_colour(), p);
            assert_eq!(p.reflect().reverse_colour(), p.reverse_colour().reflect());
        }
    }

    #[test]
    fn test_decode_encode_roundtrip() {
        for p in Pattern52::all() {
            assert_eq!(p52(&p.atoms()), p);
        }
    }

    #[test]
    fn test_from_neighbours() {
        use Field::*;
        let fields = [First, Empty, Empty, Second, Outside, Empty, Empty, Empty, First];
        let p = Pattern52::from_neighbours(fields);
        assert_eq!(p.atoms(), "Y.H...Q#Y.");
    }

    #[test]
    fn test_encode_errors() {
        assert!(matches!(
            Pattern52::from_atoms(".........."),
            Err(PatternError::MovePoint { .. })
        ));
        assert!(matches!(
            Pattern52::from_atoms("H........."),
            Err(PatternError::MovePoint { .. })
        ));
        assert!(matches!(
            Pattern52::from_atoms("..H....H.."),
            Err(PatternError::MovePoint { .. })
        ));
        assert!(matches!(
            Pattern52::from_atoms("|.H......."),
            Err(PatternError::AtariNotTracked { position: 0, .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(p52("Y.H.Q....#").to_string(), " Y . - . Q\n . . . . #\n");
    }
}
