//! Built-in pattern catalogs.
//!
//! The engine scores candidate moves with five tables compiled from the
//! templates below (3x3 shapes are taken from Pachi's playout/moggy.c and
//! extended for Kropki):
//!
//! ## 3x3 tables
//! - [`MOVES`]: good shapes and dame points (replace merge)
//! - [`SYMMETRIC_CUTS`]: cutting shapes that matter to both sides (replace merge)
//! - [`COST`]: cost of the opponent's reply, first player only (max merge)
//!
//! ## Edge band tables
//! - [`EDGE_INNER`]: move point on the second line
//! - [`EDGE`]: move point on the first line
//!
//! Templates are authored from the first player's view; `X`, `O` etc. follow
//! the notation in [`crate::wildcard`]. Under replace merge the first
//! positive value written to a slot wins and negative (dame) values always
//! win, so overlapping templates must be ordered with that in mind.

use log::info;

use crate::error::Result;
use crate::pattern3::Pattern3Table;
use crate::pattern52::Pattern52Table;
use crate::table::MergePolicy;

/// Good moves and dame points.
#[rustfmt::skip]
pub const MOVES: &[&str] = &[
    // hane pattern - enclosing hane
    concat!("XOX", ".H.", "???"), "52",
    // hane pattern - non-cutting hane
    concat!("YO.", ".H.", "?.?"), "53",
    // hane pattern - magari
    concat!("XO?", "XH.", "x.?"), "32",
    // hane pattern - thin hane
    concat!("XOO", ".H.", "?.?", "X"), "22",
    // generic pattern - katatsuke or diagonal attachment
    concat!(".Q.", "YH.", "..."), "37",
    // cut1 pattern (kiri) - unprotected cut
    concat!("XOo", "OHo", "###"), "28",
    concat!("XO?", "OHo", "*o*"), "28",
    // cut1 pattern (kiri) - peeped cut
    concat!("XO?", "OHX", "???"), "21",
    // cut2 pattern (de)
    concat!("?X?", "OHO", "ooo"), "19",
    // cut keima
    concat!("OX?", "oHO", "?o?"), "52",
    // side pattern - block side cut
    concat!("OX?", "XHO", "###"), "20",
    // dame
    concat!("X?O", "XH?", "XXX"), "-2000",
    concat!("?OO", "XHO", "XX?"), "-2000",
    concat!("X?O", "XHO", "X?O"), "-2000",
    concat!("XX?", "XHO", "XX?"), "-2000",
    // edge dame
    concat!("X?O", "XHO", "###"), "-2000",
    concat!("XX?", "XH?", "###"), "-2000",
    // corner, always dame
    concat!("#??", "#H?", "###"), "-2000",
];

/// Cuts and keima shapes, valuable whoever plays them.
#[rustfmt::skip]
pub const SYMMETRIC_CUTS: &[&str] = &[
    // enclosing hane (?O? is covered elsewhere)
    concat!("XOX", ".H.", "?o?"), "6",
    // keima cut
    concat!("?XO", "OHX", "???"), "5",
    // keima cut with two dots O on E and W
    concat!("?XO", "OHO", "..."), "6",
    concat!("?XO", "OHO", "O.."), "4",
    concat!("?XO", "OHO", "..O"), "4",
    concat!("?XO", "OHO", ".O."), "4",
    concat!("?X?", "OHO", "?X?"), "7",
    concat!("?X?", "OHO", "X??"), "7",
    // keima or one space jump on the edge
    concat!("?XO", "OHx", "###"), "6",
    concat!("?X?", "OHO", "###"), "6",
    // keima cut with empty at E
    concat!("?XO", "OH.", "..."), "5",
    concat!("?XO", "OH.", "X.?"), "7",
    concat!("?XO", "OH.", "?XX"), "5",
    concat!("?XO", "OH.", "?XO"), "7",
    concat!("?XO", "OH.", "?X."), "6",
    concat!("?XO", "OH.", "XO?"), "6",
    concat!("?XO", "OH.", ".OX"), "2",
    // cut between diagonal jump
    concat!("?.O", ".H.", "O.?"), "5",
    concat!("?XO", ".H.", "O.?"), "6",
    concat!("?XO", "XH.", "O.O"), "4",
    // two keimas
    concat!("X.O", "OHX", "???"), "2",
    // cut
    concat!("oOo", ".H.", "oOo"), "4",
    concat!("?Oo", "XH.", "?O?"), "6",
    concat!("?O?", "XHX", "?O?"), "7",
    concat!("?Oo", "XHO", "?Oo"), "5",
    // diagonal cut
    concat!("XO?", "OH?", "???"), "3",
];

/// Cost for the first player of letting the opponent play here.
#[rustfmt::skip]
pub const COST: &[&str] = &[
    // our bamboo
    concat!("X.X", "XHX", "???", "X"), "0",
    concat!("X..", "XHX", "?.?", "X"), "2",
    concat!("Ox?", "xH?", "???", "X"), "40",
    concat!("O??", "xH?", "?x?", "X"), "40",
    concat!("O??", "?Hx", "?x?", "X"), "40",
    concat!("?Q?", "xH?", "???", "X"), "100",
    // attacker's bamboo
    concat!("O.O", "OHO", "???", "X"), "10000",
    concat!("O..", "OHO", "?.?", "X"), "2000",
    // keima
    concat!("O.?", "?HQ", "???", "X"), "500",
    concat!("OX?", "xHQ", "?x?", "X"), "270",
    // one-point jump
    concat!("?.?", "QHQ", "?.?", "X"), "600",
    concat!("?.?", "QHQ", "?X?", "X"), "400",
    concat!("?.?", "QHQ", "?Q?", "X"), "700",
    // diagonal
    concat!("O..", ".H.", "..O", "X"), "250",
    concat!("O..", "XH.", "??O", "X"), "200",
    concat!("OX?", "XHx", "??O", "X"), "10",
    concat!("Oxx", "XHX", "??O", "X"), "10",
];

/// Move point on the second line; the edge is below the bottom row.
#[rustfmt::skip]
pub const EDGE_INNER: &[&str] = &[
    // locally bad moves (may be good with X above)
    concat!("?OH.O", "?x..x", "X"), "-0.1",
    concat!("?OHO?", "?x.x?", "X"), "-0.1",
    concat!("O.H.O", "x...x", "X"), "-0.1",
    // locally good moves (usually reductions)
    concat!("O.H..", "x...."), "0.02",
    concat!("O.H.X", "x...o"), "0.1",
    concat!("?OH.X", "?x..o", "X"), "0.1",
    // connecting moves (usually anti-reductions)
    concat!("o.H.o", "X.O.X"), "0.5",
    concat!("?oH.o", "?XO.X"), "0.5",
    concat!("?oHo?", "?XOX?"), "0.5",
    concat!("O.H.o", "X.O.X"), "0.1",
    concat!("?oH.O", "?XO.X"), "0.1",
    concat!("?OHo?", "?XOX?"), "0.02",
    // other connecting moves
    concat!("X.H.?", "O..x?"), "0.1",
    concat!("X.H.?", "o..x?", "X"), "0.3",
    concat!("?XHX?", "??O??"), "0.3",
    concat!("?XH.X", "??O??"), "0.3",
    concat!("X.H.X", "?.O.?"), "0.4",
    concat!("X.H.X", "?XO??"), "0.4",
    concat!("?OHXO", "??..?", "X"), "0.7",
];

/// Move point on the first line.
#[rustfmt::skip]
pub const EDGE: &[&str] = &[
    // locally good moves (usually reductions)
    concat!("?X.X?", "?xHx?"), "0.2",
    concat!("?X..X", "??H.?"), "0.2",
    concat!("X...X", "?.H.?"), "0.2",
    // connecting moves
    concat!("X.O.X", "?.H.?"), "0.6",
    concat!("?XO.X", "??H.?", "X"), "0.6",
    concat!("?XOX?", "??H??"), "0.6",
];

/// The 3x3 catalogs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Catalog {
    Moves,
    SymmetricCuts,
    Cost,
}

impl Catalog {
    pub fn literals(self) -> &'static [&'static str] {
        match self {
            Catalog::Moves => MOVES,
            Catalog::SymmetricCuts => SYMMETRIC_CUTS,
            Catalog::Cost => COST,
        }
    }

    pub fn policy(self) -> MergePolicy {
        match self {
            Catalog::Moves | Catalog::SymmetricCuts => MergePolicy::Replace,
            Catalog::Cost => MergePolicy::Max,
        }
    }

    pub fn build(self) -> Result<Pattern3Table> {
        Pattern3Table::from_literals(self.literals(), self.policy())
    }
}

/// The edge band catalogs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeCatalog {
    Inner,
    Edge,
}

impl EdgeCatalog {
    pub fn literals(self) -> &'static [&'static str] {
        match self {
            EdgeCatalog::Inner => EDGE_INNER,
            EdgeCatalog::Edge => EDGE,
        }
    }

    pub fn build(self) -> Result<Pattern52Table> {
        Pattern52Table::from_literals(self.literals(), MergePolicy::MaxKeepNegative)
    }
}

/// Every table the move heuristics read, built once at startup.
///
/// Read-only after construction; share it by reference or behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Patterns {
    pub moves: Pattern3Table,
    pub symmetric_cuts: Pattern3Table,
    pub cost: Pattern3Table,
    pub edge_inner: Pattern52Table,
    pub edge: Pattern52Table,
}

impl Patterns {
    /// Compile all built-in catalogs.
    pub fn build() -> Result<Self> {
        let patterns = Self {
            moves: Catalog::Moves.build()?,
            symmetric_cuts: Catalog::SymmetricCuts.build()?,
            cost: Catalog::Cost.build()?,
            edge_inner: EdgeCatalog::Inner.build()?,
            edge: EdgeCatalog::Edge.build()?,
        };
        info!("pattern tables ready");
        Ok(patterns)
    }
}
