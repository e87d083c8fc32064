//! Constants for code spaces, bit layouts and template symbols.
//!
//! Both neighbourhood codecs pack 2 bits per neighbour. The 3x3 codec adds
//! four atari flags for the cardinal neighbours; the 5x2 edge band has none.
//!
//! # 3x3 layout
//!
//! ```text
//! fields:  6 7 0     atari:    19
//!          5 . 1            18    16
//!          4 3 2               17
//! ```
//!
//! # 5x2 edge band layout
//!
//! ```text
//! 0 2 * 7 5        0 2 4 7 5
//! 1 3 4 8 6   or   1 3 * 8 6
//! ```
//!
//! `*` is the move point; the other middle cell is always field 4.

// =============================================================================
// Field States
// =============================================================================

/// Empty point.
pub const FIELD_EMPTY: u32 = 0;

/// Dot of the first player.
pub const FIELD_FIRST: u32 = 1;

/// Dot of the second player.
pub const FIELD_SECOND: u32 = 2;

/// Outside the board.
pub const FIELD_OUTSIDE: u32 = 3;

/// Mask of a single 2-bit field.
pub const FIELD_MASK: u32 = 3;

// =============================================================================
// 3x3 Pattern Codes
// =============================================================================

/// Number of distinct 3x3 codes (20 bits).
pub const PATTERN3_SIZE: usize = 0x10_0000;

/// Length of a 3x3 template without the one-side marker.
pub const PATTERN3_LEN: usize = 9;

/// Index of the move point in a 3x3 template.
pub const PATTERN3_CENTRE: usize = 4;

/// Bit offset of each template position's field, row-major. `None` is the centre.
pub const PATTERN3_FIELD_BIT: [Option<u32>; PATTERN3_LEN] = [
    Some(12), // NW
    Some(14), // N
    Some(0),  // NE
    Some(10), // W
    None,     // move point
    Some(2),  // E
    Some(8),  // SW
    Some(6),  // S
    Some(4),  // SE
];

/// Atari bit of each template position. Only cardinal neighbours have one.
pub const PATTERN3_ATARI_BIT: [Option<u32>; PATTERN3_LEN] = [
    None,
    Some(19), // N
    None,
    Some(18), // W
    None,
    Some(16), // E
    None,
    Some(17), // S
    None,
];

/// All 16 neighbour field bits.
pub const PATTERN3_FIELDS_MASK: u32 = 0xffff;

/// The four atari flags.
pub const PATTERN3_ATARI_MASK: u32 = 0xf_0000;

/// Atari flag for each odd (cardinal) field in clockwise order: E, S, W, N.
pub const PATTERN3_ATARI_OF_FIELD: [u32; 4] = [0x1_0000, 0x2_0000, 0x4_0000, 0x8_0000];

// =============================================================================
// 5x2 Edge Band Pattern Codes
// =============================================================================

/// Number of distinct edge band codes (18 bits).
pub const PATTERN52_SIZE: usize = 0x4_0000;

/// Length of an edge band template without the one-side marker.
pub const PATTERN52_LEN: usize = 10;

/// Width of one template row.
pub const PATTERN52_ROW: usize = 5;

/// Template positions that may hold the move point (middle column).
pub const PATTERN52_MOVE_POINTS: [usize; 2] = [2, 7];

/// Bit offset of each template position's field, row-major.
///
/// Positions 2 and 7 share field 4: whichever is not the move point owns it.
pub const PATTERN52_FIELD_BIT: [u32; PATTERN52_LEN] = [0, 4, 8, 14, 10, 2, 6, 8, 16, 12];

/// Number of neighbour fields in the edge band.
pub const PATTERN52_FIELDS: usize = 9;

// =============================================================================
// Template Symbols
// =============================================================================

/// Empty point atom.
pub const ATOM_EMPTY: u8 = b'.';

/// First player dot, not in atari.
pub const ATOM_FIRST: u8 = b'Y';

/// Second player dot, not in atari.
pub const ATOM_SECOND: u8 = b'Q';

/// Off-board atom.
pub const ATOM_OUTSIDE: u8 = b'#';

/// First player dot in atari.
pub const ATOM_FIRST_ATARI: u8 = b'|';

/// Second player dot in atari.
pub const ATOM_SECOND_ATARI: u8 = b'@';

/// Where to play.
pub const MOVE_POINT: u8 = b'H';

/// Trailing marker restricting a template to the first player.
pub const ONE_SIDE_MARKER: u8 = b'X';

/// Decoded atari flag on an empty field (never produced by a valid code).
pub const IMPOSSIBLE_EMPTY: u8 = b'E';

/// Decoded atari flag on an off-board field (never produced by a valid code).
pub const IMPOSSIBLE_OUTSIDE: u8 = b'F';

/// Decode symbol indexed by `field | atari << 2`.
pub const DECODE_SYMBOLS: [u8; 8] = [
    ATOM_EMPTY,
    ATOM_FIRST,
    ATOM_SECOND,
    ATOM_OUTSIDE,
    IMPOSSIBLE_EMPTY,
    ATOM_FIRST_ATARI,
    ATOM_SECOND_ATARI,
    IMPOSSIBLE_OUTSIDE,
];
