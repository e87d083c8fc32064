//! Wildcard atom sets and the odometer that expands a template into atoms.
//!
//! Template notation follows Pachi (playout/moggy.c):
//!
//! - `.`, `Y`, `Q`, `#`, `|`, `@`: atoms (empty, first player, second player,
//!   edge, first player in atari, second player in atari)
//! - `?`: any; `*`: any but edge
//! - `X`/`O`: first/second player dot, in atari or not
//! - `x`/`o`: not first/second player
//! - `y`/`q`: anything but first/second player not in atari
//! - `=`/`0`: anything but first/second player in atari
//! - `H`: the move point

use crate::constants::{ATOM_FIRST_ATARI, ATOM_SECOND_ATARI, MOVE_POINT};
use crate::error::{PatternError, Result};

/// The six concrete atoms.
pub const ATOMS: [u8; 6] = *b".YQ#|@";

/// Atom set denoted by a template symbol, or `None` if the symbol is unknown.
///
/// The move point maps to itself.
pub fn atom_set(symbol: u8) -> Option<&'static [u8]> {
    let set: &'static [u8] = match symbol {
        b'?' => b".YQ#|@",
        b'*' => b".YQ|@",
        b'x' => b".Q#@",
        b'o' => b".Y#|",
        b'X' => b"Y|",
        b'O' => b"Q@",
        b'y' => b".Q#|@",
        b'q' => b".Y#|@",
        b'=' => b".YQ#@",
        b'0' => b".YQ#|",
        b'.' => b".",
        b'Y' => b"Y",
        b'Q' => b"Q",
        b'#' => b"#",
        b'|' => b"|",
        b'@' => b"@",
        b'H' => b"H",
        _ => return None,
    };
    Some(set)
}

/// Whether an atom marks a dot in atari.
#[inline]
pub fn is_atari_atom(atom: u8) -> bool {
    atom == ATOM_FIRST_ATARI || atom == ATOM_SECOND_ATARI
}

/// Restartable enumerator over every atomic string a template denotes.
///
/// Works like an odometer over the per-position atom sets: the last position
/// varies fastest, and the enumerator is exhausted once the first position
/// rolls over.
#[derive(Debug, Clone)]
pub struct Expansion {
    choices: Vec<Vec<u8>>,
    counter: Vec<usize>,
    exhausted: bool,
}

impl Expansion {
    /// Prepare the expansion of `template`.
    ///
    /// Atari atoms are dropped from positions where `tracks_atari` is false;
    /// a position left without atoms is an error.
    pub fn new(template: &str, tracks_atari: impl Fn(usize) -> bool) -> Result<Self> {
        let mut choices = Vec::with_capacity(template.len());
        for (position, symbol) in template.bytes().enumerate() {
            let set = atom_set(symbol).ok_or_else(|| PatternError::UnknownSymbol {
                template: template.to_string(),
                symbol: symbol as char,
                position,
            })?;
            let atoms: Vec<u8> = if symbol == MOVE_POINT || tracks_atari(position) {
                set.to_vec()
            } else {
                set.iter().copied().filter(|&a| !is_atari_atom(a)).collect()
            };
            if atoms.is_empty() {
                return Err(PatternError::AtariNotTracked {
                    template: template.to_string(),
                    position,
                });
            }
            choices.push(atoms);
        }
        let counter = vec![0; choices.len()];
        Ok(Self {
            choices,
            counter,
            exhausted: false,
        })
    }

    /// True once every combination has been produced.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Rewind to the first combination.
    pub fn restart(&mut self) {
        self.counter.fill(0);
        self.exhausted = false;
    }

    /// Number of atomic strings in a full pass.
    pub fn total(&self) -> usize {
        self.choices.iter().map(Vec::len).product()
    }

    /// The combination the counter currently points at.
    fn current(&self) -> String {
        self.choices
            .iter()
            .zip(&self.counter)
            .map(|(atoms, &i)| atoms[i] as char)
            .collect()
    }

    fn advance(&mut self) {
        for (i, atoms) in self.choices.iter().enumerate().rev() {
            self.counter[i] += 1;
            if self.counter[i] < atoms.len() {
                return;
            }
            self.counter[i] = 0;
        }
        self.exhausted = true;
    }

    fn remaining(&self) -> usize {
        if self.exhausted {
            return 0;
        }
        let done = self
            .choices
            .iter()
            .zip(&self.counter)
            .fold(0, |acc, (atoms, &i)| acc * atoms.len() + i);
        self.total() - done
    }
}

impl Iterator for Expansion {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let atoms = self.current();
        self.advance();
        Some(atoms)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Expansion {}
