//! Kropki-Patterns: local shape heuristics for a Kropki (dots) engine.
//!
//! This crate encodes the neighbourhood of a candidate move into a compact
//! code, expands human-authored wildcard templates into every concrete code
//! they denote, and stores the resulting values in dense lookup tables.
//!
//! ## Modules
//!
//! - [`constants`] - Code-space sizes, bit layouts and atom symbols
//! - [`error`] - Error type shared by every fallible operation
//! - [`wildcard`] - Wildcard atom sets and the template expansion odometer
//! - [`pattern3`] - 3x3 codes and their symmetry algebra
//! - [`pattern52`] - 5x2 edge band codes
//! - [`template`] - Parsing of template literals and values
//! - [`table`] - Dense tables, merge policies, binary dumps
//! - [`enumerate`] - Realizable canonical patterns and coverage audits
//! - [`patterns`] - The built-in catalogs
//!
//! ## Example
//!
//! ```
//! use kropki_patterns::pattern3::{Pattern3, Pattern3Table};
//! use kropki_patterns::table::{MergePolicy, Player};
//!
//! // An enclosing hane, valid for both players in every orientation
//! let table = Pattern3Table::from_literals(&["XOX.H.???", "52"], MergePolicy::Replace).unwrap();
//!
//! let p = Pattern3::from_atoms("YQY.H....").unwrap();
//! assert_eq!(table.lookup(p, Player::First), 52);
//! assert_eq!(table.lookup(p.rotate(), Player::First), 52);
//! assert_eq!(table.lookup(p.reverse_colour(), Player::Second), 52);
//! ```

pub mod constants;
pub mod enumerate;
pub mod error;
pub mod pattern3;
pub mod pattern52;
pub mod patterns;
pub mod table;
pub mod template;
pub mod wildcard;

pub use error::{PatternError, Result};
pub use pattern3::{Pattern3, Pattern3Table};
pub use pattern52::{Pattern52, Pattern52Table};
pub use patterns::Patterns;
pub use table::{Field, MergePolicy, Player};
