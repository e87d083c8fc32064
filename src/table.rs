//! Dense pattern tables indexed by the full code space.
//!
//! A table is filled once from templates (or loaded from a flat binary dump)
//! and read-only afterwards, so a built table can be shared between threads.
//!
//! Tables are always authored from the first player's perspective; looking a
//! code up for the second player reads the colour-inverted slot.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::marker::PhantomData;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use crate::error::{PatternError, Result};
use crate::template::{Sides, Template};
use crate::wildcard::Expansion;

/// State of one neighbour field as classified by the board model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Empty = 0,
    First = 1,
    Second = 2,
    Outside = 3,
}

impl Field {
    /// The 2-bit encoding of this state.
    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Whether the field holds a dot of either player.
    #[inline]
    pub fn is_dot(self) -> bool {
        matches!(self, Field::First | Field::Second)
    }
}

/// Side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

/// A bit-packed neighbourhood code usable as a table index.
pub trait PatternCode: Copy + Eq + Ord + fmt::Debug {
    /// Number of codes; the table is sized for all of them.
    const SIZE: usize;

    /// Template length, not counting the one-side marker.
    const TEMPLATE_LEN: usize;

    /// Check the move point of a template body and return it with the move
    /// point spelled as `H`.
    fn normalize_template(body: &str) -> Result<String>;

    /// Whether the template position carries an atari flag.
    fn tracks_atari(position: usize) -> bool;

    /// Encode an atomic string.
    fn from_atoms(atoms: &str) -> Result<Self>;

    /// Position of the code in the table.
    fn index(self) -> usize;

    /// Swap the two players' dots.
    fn reverse_colour(self) -> Self;

    /// Call `f` for every geometric symmetry of the code, identity included.
    ///
    /// Codes fixed by a symmetry are visited more than once.
    fn for_each_symmetry(self, f: impl FnMut(Self));
}

/// A value stored per table slot.
pub trait PatternValue:
    Copy + PartialOrd + Default + FromStr + fmt::Display + fmt::Debug
{
    /// Bytes per value in the binary dump.
    const WIDTH: usize;

    fn write_le(self, out: &mut Vec<u8>);

    /// Decode from exactly `WIDTH` little-endian bytes.
    fn read_le(bytes: &[u8]) -> Self;
}

impl PatternValue for i16 {
    const WIDTH: usize = 2;

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        i16::from_le_bytes([bytes[0], bytes[1]])
    }
}

impl PatternValue for f32 {
    const WIDTH: usize = 4;

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// How a new value combines with the one already in a slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// A positive value fills an empty slot only; a negative value always
    /// overwrites (forbidden moves take precedence).
    #[default]
    Replace,
    /// The larger value wins.
    Max,
    /// The larger value wins, a negative value always overwrites, and a
    /// negative slot never changes again.
    MaxKeepNegative,
}

impl MergePolicy {
    pub fn merge<V: PatternValue>(self, slot: &mut V, value: V) {
        let zero = V::default();
        match self {
            MergePolicy::Replace => {
                if value > zero {
                    if *slot == zero {
                        *slot = value;
                    }
                } else if value < zero {
                    *slot = value;
                }
            }
            MergePolicy::Max => {
                if value > *slot {
                    *slot = value;
                }
            }
            MergePolicy::MaxKeepNegative => {
                if *slot >= zero && (value < zero || value > *slot) {
                    *slot = value;
                }
            }
        }
    }
}

/// One value slot per code of `C`.
#[derive(Clone)]
pub struct PatternTable<C, V> {
    values: Vec<V>,
    policy: MergePolicy,
    code: PhantomData<C>,
}

impl<C: PatternCode, V: PatternValue> PatternTable<C, V> {
    /// An all-zero table that merges with `policy`.
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            values: vec![V::default(); C::SIZE],
            policy,
            code: PhantomData,
        }
    }

    /// Compile `templates` in order.
    pub fn build(templates: &[Template<V>], policy: MergePolicy) -> Result<Self> {
        let mut table = Self::new(policy);
        let mut atomic = 0;
        for template in templates {
            atomic += table.add(template)?;
        }
        info!(
            "built {} table from {} templates ({} atomic patterns)",
            std::any::type_name::<C>(),
            templates.len(),
            atomic
        );
        Ok(table)
    }

    /// Compile a literal list of templates interleaved with their values.
    pub fn from_literals(literals: &[&str], policy: MergePolicy) -> Result<Self> {
        let templates = Template::parse_list::<C>(literals)?;
        Self::build(&templates, policy)
    }

    /// Compile one template into the table.
    ///
    /// Every atomic string is written with its whole geometric orbit, then,
    /// unless the template is restricted to one side, the orbit of its
    /// colour inversion. Returns the number of atomic strings.
    pub fn add(&mut self, template: &Template<V>) -> Result<usize> {
        let expansion = Expansion::new(&template.body, C::tracks_atari)?;
        let mut count = 0;
        for atoms in expansion {
            let code = C::from_atoms(&atoms)?;
            self.add_symmetries(code, template.value);
            if template.sides == Sides::Both {
                self.add_symmetries(code.reverse_colour(), template.inverted_value());
            }
            count += 1;
        }
        debug!("{template}: {count} atomic patterns");
        Ok(count)
    }

    fn add_symmetries(&mut self, code: C, value: V) {
        let policy = self.policy;
        let values = &mut self.values;
        code.for_each_symmetry(|q| policy.merge(&mut values[q.index()], value));
    }

    /// Value of `code` for the side to move.
    #[inline]
    pub fn lookup(&self, code: C, player: Player) -> V {
        match player {
            Player::First => self.get(code),
            Player::Second => self.get(code.reverse_colour()),
        }
    }

    /// Raw slot of `code`, from the first player's perspective.
    #[inline]
    pub fn get(&self, code: C) -> V {
        let index = code.index();
        debug_assert!(index < self.values.len(), "pattern code {index:#x} out of range");
        self.values[index]
    }

    /// Overwrite the slot of the all-empty neighbourhood.
    pub fn set_empty_value(&mut self, value: V) {
        self.values[0] = value;
    }

    /// All slots in code order.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Number of slots holding a non-zero value.
    pub fn count_nonzero(&self) -> usize {
        let zero = V::default();
        self.values.iter().filter(|&&v| v != zero).count()
    }

    /// Dump every value, little-endian, in code order.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let mut bytes = Vec::with_capacity(C::SIZE * V::WIDTH);
        for &v in &self.values {
            v.write_le(&mut bytes);
        }
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a dump written by [`write_to`](Self::write_to).
    ///
    /// The input must hold exactly one value per code; at most one byte past
    /// the expected size is read before a longer input is rejected.
    pub fn read_from<R: Read>(reader: R, policy: MergePolicy) -> Result<Self> {
        let expected = C::SIZE * V::WIDTH;
        let mut bytes = Vec::with_capacity(expected + 1);
        reader.take((expected + 1) as u64).read_to_end(&mut bytes)?;
        if bytes.len() != expected {
            return Err(PatternError::TableSize {
                expected,
                actual: bytes.len(),
            });
        }
        let values = bytes.chunks_exact(V::WIDTH).map(V::read_le).collect();
        Ok(Self {
            values,
            policy,
            code: PhantomData,
        })
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.write_to(BufWriter::new(File::create(path)?))?;
        info!("saved pattern table to {}", path.display());
        Ok(())
    }

    /// Load a table dumped by [`save_to_file`](Self::save_to_file).
    ///
    /// The loaded table merges with [`MergePolicy::Replace`] if extended.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::read_from(BufReader::new(File::open(path)?), MergePolicy::default())?;
        info!(
            "loaded pattern table from {} ({} non-zero entries)",
            path.display(),
            table.count_nonzero()
        );
        Ok(table)
    }
}

impl<C: PatternCode, V: PatternValue> fmt::Debug for PatternTable<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternTable")
            .field("size", &self.values.len())
            .field("policy", &self.policy)
            .field("nonzero", &self.count_nonzero())
            .finish()
    }
}
