//! Error types for template compilation and table I/O.

/// Errors raised while compiling templates or loading tables.
#[derive(thiserror::Error, Debug)]
pub enum PatternError {
    /// Template is not the fixed neighbourhood size
    #[error("template {template:?} has {found} symbols, expected {expected}")]
    TemplateLength {
        template: String,
        expected: usize,
        found: usize,
    },

    /// Symbol outside the atom/wildcard alphabet
    #[error("template {template:?}: unknown symbol {symbol:?} at position {position}")]
    UnknownSymbol {
        template: String,
        symbol: char,
        position: usize,
    },

    /// Atari atom at a position that has no atari bit
    #[error("template {template:?}: atari atom at position {position}, which tracks no atari")]
    AtariNotTracked { template: String, position: usize },

    /// Move point missing or misplaced
    #[error("template {template:?}: move point 'H' missing or misplaced")]
    MovePoint { template: String },

    /// Trailing character is not the one-side marker
    #[error("template {template:?}: trailing marker {marker:?} is not 'X'")]
    SideMarker { template: String, marker: char },

    /// Value text does not parse
    #[error("template {template:?}: cannot parse value {text:?}")]
    Value { template: String, text: String },

    /// Template list ends without a value
    #[error("template {template:?} has no value")]
    MissingValue { template: String },

    /// A value pair given for a template restricted to one side
    #[error("template {template:?} is restricted to one side but has a value pair")]
    ValuePairOneSide { template: String },

    /// Non-atom passed to the encoder
    #[error("{atoms:?}: {symbol:?} at position {position} is not an atom")]
    NotAnAtom {
        atoms: String,
        symbol: char,
        position: usize,
    },

    /// Table file has the wrong length
    #[error("table file size mismatch: expected {expected} bytes, got {actual}")]
    TableSize { expected: usize, actual: usize },

    /// File I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for pattern operations
pub type Result<T> = std::result::Result<T, PatternError>;
