//! Parsing of authored templates and their values.
//!
//! A template literal is the neighbourhood written row by row, optionally
//! followed by `X` when it applies to the first player only. Its value text
//! is a decimal number, or two numbers separated by a comma when the
//! colour-inverted expansion should get a different value:
//!
//! ```text
//! "XOX.H.???"   "52"       both colours, same value
//! "O.?.HQ???X"  "500"      first player only
//! "?X?OHO???"   "7,3"      7 as authored, 3 for the inverted colours
//! ```

use std::fmt;

use crate::constants::ONE_SIDE_MARKER;
use crate::error::{PatternError, Result};
use crate::table::{PatternCode, PatternValue};

/// Which colour orientations a template is expanded into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Sides {
    /// As authored, and with colours swapped.
    #[default]
    Both,
    /// As authored only.
    FirstOnly,
}

/// A parsed template.
#[derive(Clone, Debug, PartialEq)]
pub struct Template<V> {
    /// The neighbourhood, move point spelled `H`, without the side marker.
    pub body: String,
    pub value: V,
    /// Value for the colour-inverted expansion, if it differs.
    pub inverted: Option<V>,
    pub sides: Sides,
}

impl<V: PatternValue> Template<V> {
    /// Parse a template literal and its value text for code type `C`.
    pub fn parse<C: PatternCode>(text: &str, value: &str) -> Result<Self> {
        if let Some((position, symbol)) = text.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
            return Err(PatternError::UnknownSymbol {
                template: text.to_string(),
                symbol,
                position,
            });
        }

        let (body, sides) = if text.len() == C::TEMPLATE_LEN + 1 {
            let marker = text.as_bytes()[C::TEMPLATE_LEN];
            if marker != ONE_SIDE_MARKER {
                return Err(PatternError::SideMarker {
                    template: text.to_string(),
                    marker: marker as char,
                });
            }
            (&text[..C::TEMPLATE_LEN], Sides::FirstOnly)
        } else if text.len() == C::TEMPLATE_LEN {
            (text, Sides::Both)
        } else {
            return Err(PatternError::TemplateLength {
                template: text.to_string(),
                expected: C::TEMPLATE_LEN,
                found: text.len(),
            });
        };
        let body = C::normalize_template(body)?;

        let bad_value = || PatternError::Value {
            template: text.to_string(),
            text: value.to_string(),
        };
        let mut parts = value.split(',').map(|part| part.trim().parse::<V>());
        let first = parts.next().and_then(|v| v.ok()).ok_or_else(bad_value)?;
        let inverted = match parts.next() {
            None => None,
            Some(v) => Some(v.map_err(|_| bad_value())?),
        };
        if parts.next().is_some() {
            return Err(bad_value());
        }
        if inverted.is_some() && sides == Sides::FirstOnly {
            return Err(PatternError::ValuePairOneSide {
                template: text.to_string(),
            });
        }

        Ok(Self {
            body,
            value: first,
            inverted,
            sides,
        })
    }

    /// Parse a list of template literals interleaved with their values.
    pub fn parse_list<C: PatternCode>(literals: &[&str]) -> Result<Vec<Self>> {
        let mut chunks = literals.chunks_exact(2);
        let templates = chunks
            .by_ref()
            .map(|pair| Self::parse::<C>(pair[0], pair[1]))
            .collect::<Result<Vec<_>>>()?;
        if let [template] = chunks.remainder() {
            return Err(PatternError::MissingValue {
                template: template.to_string(),
            });
        }
        Ok(templates)
    }

    /// Value written for the colour-inverted expansion.
    pub fn inverted_value(&self) -> V {
        self.inverted.unwrap_or(self.value)
    }
}

impl<V: PatternValue> fmt::Display for Template<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body)?;
        if self.sides == Sides::FirstOnly {
            write!(f, "{}", ONE_SIDE_MARKER as char)?;
        }
        write!(f, " = {}", self.value)?;
        if let Some(inverted) = self.inverted {
            write!(f, ",{inverted}")?;
        }
        Ok(())
    }
}
