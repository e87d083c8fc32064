//! 3x3 pattern codes and their symmetry algebra.
//!
//! A code packs the 8 neighbours of a move point, 2 bits each, clockwise from
//! the NE corner, plus an atari flag for each cardinal neighbour:
//!
//! ```text
//! fields:  6 7 0     atari:    19
//!          5 . 1            18    16
//!          4 3 2               17
//! ```
//!
//! Field values are `0` empty, `1` first player, `2` second player and `3`
//! off-board. An atari flag may only be set over a dot.
//!
//! Symmetries are pure bit permutations: [`Pattern3::rotate`] and
//! [`Pattern3::reflect`] generate the dihedral group of the square, and
//! [`Pattern3::reverse_colour`] is an independent involution.

use std::fmt;

use crate::constants::{
    ATOM_EMPTY, ATOM_FIRST, ATOM_FIRST_ATARI, ATOM_OUTSIDE, ATOM_SECOND, ATOM_SECOND_ATARI,
    DECODE_SYMBOLS, FIELD_EMPTY, FIELD_FIRST, FIELD_MASK, FIELD_OUTSIDE, FIELD_SECOND,
    IMPOSSIBLE_EMPTY, IMPOSSIBLE_OUTSIDE, MOVE_POINT, PATTERN3_ATARI_BIT, PATTERN3_ATARI_MASK,
    PATTERN3_ATARI_OF_FIELD, PATTERN3_CENTRE, PATTERN3_FIELD_BIT, PATTERN3_FIELDS_MASK,
    PATTERN3_LEN, PATTERN3_SIZE,
};
use crate::error::{PatternError, Result};
use crate::table::{Field, PatternCode, PatternTable};

/// Table of 3x3 pattern values.
pub type Pattern3Table = PatternTable<Pattern3, i16>;

/// Template positions of the ring, in the order `N NE E SE S SW W NW`.
const RING_POSITIONS: [usize; 8] = [1, 2, 5, 8, 7, 6, 3, 0];

/// A 20-bit 3x3 neighbourhood code.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern3(u32);

impl Pattern3 {
    /// All eight neighbours empty.
    pub const EMPTY: Pattern3 = Pattern3(0);

    /// Wrap a raw code, or `None` if it lies outside the code space.
    pub fn from_raw(raw: u32) -> Option<Self> {
        ((raw as usize) < PATTERN3_SIZE).then_some(Self(raw))
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    /// Every code of the space, well-formed or not, in increasing order.
    pub fn all() -> impl Iterator<Item = Pattern3> {
        (0..PATTERN3_SIZE as u32).map(Pattern3)
    }

    /// Build the code of a point from its classified neighbours.
    ///
    /// `fields` runs clockwise from NE (NE, E, SE, S, SW, W, NW, N); `atari`
    /// flags the cardinal neighbours E, S, W, N. A flag over a field that
    /// holds no dot is ignored.
    pub fn from_neighbours(fields: [Field; 8], atari: [bool; 4]) -> Self {
        let mut p = 0;
        for (i, field) in fields.iter().enumerate() {
            p |= field.bits() << (2 * i);
        }
        for (k, &flag) in PATTERN3_ATARI_OF_FIELD.iter().enumerate() {
            if atari[k] && fields[2 * k + 1].is_dot() {
                p |= flag;
            }
        }
        Self(p)
    }

    /// Whether every atari flag sits over a dot.
    pub fn is_well_formed(self) -> bool {
        PATTERN3_ATARI_OF_FIELD.iter().enumerate().all(|(k, &flag)| {
            let field = (self.0 >> (2 * (2 * k + 1))) & FIELD_MASK;
            self.0 & flag == 0 || field == FIELD_FIRST || field == FIELD_SECOND
        })
    }

    /// Rotate clockwise by a quarter turn.
    #[inline]
    pub fn rotate(self) -> Self {
        let p = self.0;
        Self(
            ((p & 0xfff) << 4)
                | ((p & 0xf000) >> 12)
                | ((p & 0x7_0000) << 1)
                | ((p & 0x8_0000) >> 3),
        )
    }

    /// Reflect about the horizontal axis (N and S swap places).
    #[inline]
    pub fn reflect(self) -> Self {
        let p = self.0;
        Self(
            (p & 0x5_0c0c)
                | ((p & 0x3) << 4)
                | ((p & 0x30) >> 4)
                | ((p & 0xc0) << 8)
                | ((p & 0xc000) >> 8)
                | ((p & 0x300) << 4)
                | ((p & 0x3000) >> 4)
                | ((p & 0x2_0000) << 2)
                | ((p & 0x8_0000) >> 2),
        )
    }

    /// Swap the players' dots; atari flags stay with their fields.
    #[inline]
    pub fn reverse_colour(self) -> Self {
        let fields = self.0 & PATTERN3_FIELDS_MASK;
        Self(
            ((fields >> 1) & 0x5555) | ((fields & 0x5555) << 1) | (self.0 & PATTERN3_ATARI_MASK),
        )
    }

    /// The geometric orbit: `p`, its reflection, and both rotated three times.
    pub fn orbit(self) -> [Pattern3; 8] {
        let mut orbit = [self; 8];
        orbit[1] = self.reflect();
        for i in (2..8).step_by(2) {
            orbit[i] = orbit[i - 2].rotate();
            orbit[i + 1] = orbit[i - 1].rotate();
        }
        orbit
    }

    /// The numerically smallest code of the orbit.
    pub fn canonical(self) -> Self {
        self.orbit().into_iter().min().unwrap_or(self)
    }

    pub fn is_canonical(self) -> bool {
        self.orbit().iter().all(|&q| q >= self)
    }

    /// Encode a 9-character atomic string, row-major from the NW corner.
    ///
    /// The centre must be `H`, `.` or `-` and contributes no bits. Atari atoms
    /// are only accepted on cardinal neighbours.
    pub fn from_atoms(atoms: &str) -> Result<Self> {
        let bytes = atoms.as_bytes();
        if bytes.len() != PATTERN3_LEN {
            return Err(PatternError::TemplateLength {
                template: atoms.to_string(),
                expected: PATTERN3_LEN,
                found: bytes.len(),
            });
        }
        let mut p = 0;
        for (position, &atom) in bytes.iter().enumerate() {
            let Some(bit) = PATTERN3_FIELD_BIT[position] else {
                if !is_centre_symbol(atom) {
                    return Err(PatternError::MovePoint {
                        template: atoms.to_string(),
                    });
                }
                continue;
            };
            let (field, atari) = match atom {
                ATOM_EMPTY => (FIELD_EMPTY, false),
                ATOM_FIRST => (FIELD_FIRST, false),
                ATOM_SECOND => (FIELD_SECOND, false),
                ATOM_OUTSIDE => (FIELD_OUTSIDE, false),
                ATOM_FIRST_ATARI => (FIELD_FIRST, true),
                ATOM_SECOND_ATARI => (FIELD_SECOND, true),
                _ => {
                    return Err(PatternError::NotAnAtom {
                        atoms: atoms.to_string(),
                        symbol: atom as char,
                        position,
                    });
                }
            };
            p |= field << bit;
            if atari {
                let Some(atari_bit) = PATTERN3_ATARI_BIT[position] else {
                    return Err(PatternError::AtariNotTracked {
                        template: atoms.to_string(),
                        position,
                    });
                };
                p |= 1 << atari_bit;
            }
        }
        Ok(Self(p))
    }

    /// Decode into the 9-character row-major form with `H` in the centre.
    ///
    /// Ill-formed codes show `E` (atari over empty) or `F` (atari over edge).
    pub fn atoms(self) -> String {
        self.atom_bytes().iter().map(|&b| b as char).collect()
    }

    fn atom_bytes(self) -> [u8; PATTERN3_LEN] {
        let mut out = [MOVE_POINT; PATTERN3_LEN];
        for (position, slot) in out.iter_mut().enumerate() {
            let Some(bit) = PATTERN3_FIELD_BIT[position] else {
                continue;
            };
            let mut symbol = (self.0 >> bit) & FIELD_MASK;
            if let Some(atari_bit) = PATTERN3_ATARI_BIT[position] {
                symbol |= ((self.0 >> atari_bit) & 1) << 2;
            }
            *slot = DECODE_SYMBOLS[symbol as usize];
        }
        out
    }

    /// The neighbours as a ring `N NE E SE S SW W NW`, index 4 at the bottom.
    pub fn ring(self) -> [u8; 8] {
        let atoms = self.atom_bytes();
        RING_POSITIONS.map(|position| atoms[position])
    }

    /// Whether the decoded form contains an impossible symbol.
    pub fn shows_impossible(self) -> bool {
        self.atom_bytes()
            .iter()
            .any(|&b| b == IMPOSSIBLE_EMPTY || b == IMPOSSIBLE_OUTSIDE)
    }
}

#[inline]
fn is_centre_symbol(symbol: u8) -> bool {
    matches!(symbol, MOVE_POINT | ATOM_EMPTY | b'-')
}

impl PatternCode for Pattern3 {
    const SIZE: usize = PATTERN3_SIZE;
    const TEMPLATE_LEN: usize = PATTERN3_LEN;

    fn normalize_template(body: &str) -> Result<String> {
        let mut bytes = body.as_bytes().to_vec();
        let misplaced = bytes
            .iter()
            .enumerate()
            .any(|(i, &b)| b == MOVE_POINT && i != PATTERN3_CENTRE);
        if misplaced || !is_centre_symbol(bytes[PATTERN3_CENTRE]) {
            return Err(PatternError::MovePoint {
                template: body.to_string(),
            });
        }
        bytes[PATTERN3_CENTRE] = MOVE_POINT;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    fn tracks_atari(position: usize) -> bool {
        PATTERN3_ATARI_BIT[position].is_some()
    }

    fn from_atoms(atoms: &str) -> Result<Self> {
        Pattern3::from_atoms(atoms)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    fn reverse_colour(self) -> Self {
        Pattern3::reverse_colour(self)
    }

    fn for_each_symmetry(self, mut f: impl FnMut(Self)) {
        let mut p = self;
        for _ in 0..2 {
            for _ in 0..4 {
                f(p);
                p = p.rotate();
            }
            p = p.reflect();
        }
    }
}

impl fmt::Display for Pattern3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.atom_bytes().chunks(3) {
            for &b in row {
                let symbol = if b == MOVE_POINT { '-' } else { b as char };
                write!(f, "{symbol:>2}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
