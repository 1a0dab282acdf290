//! Value types shared between the bridge and its host capabilities.
//!
//! - [`Field`]: the configuration fields a generator module may export
//! - [`FieldValue`]: a host-side copy of one field's value
//! - [`Span`]: a `(ptr, len)` reference into guest memory
//! - [`DrawCommand`]: one drawing instruction issued by the guest

use std::fmt;
use std::str::FromStr;

use crate::error::HostError;

/// Whether a field is a toggle or a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Int,
}

/// A generation parameter whose authoritative value lives in the guest.
///
/// Each field is reached through a pair of exports, `get<Name>` and
/// `set<Name>` (for example `getSeed` / `setSeed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Seed,
    Width,
    Height,
    Scale,
    Walls,
    Braid,
    Inset,
    Fill,
}

impl Field {
    /// Every field, in the order controls are synchronized.
    pub const ALL: [Field; 8] = [
        Field::Seed,
        Field::Width,
        Field::Height,
        Field::Scale,
        Field::Walls,
        Field::Braid,
        Field::Inset,
        Field::Fill,
    ];

    /// Lower-case name used by controls and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            Field::Seed => "seed",
            Field::Width => "width",
            Field::Height => "height",
            Field::Scale => "scale",
            Field::Walls => "walls",
            Field::Braid => "braid",
            Field::Inset => "inset",
            Field::Fill => "fill",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Walls | Field::Fill => FieldKind::Bool,
            _ => FieldKind::Int,
        }
    }

    /// Name of the guest export that reads this field.
    pub fn getter(self) -> &'static str {
        match self {
            Field::Seed => "getSeed",
            Field::Width => "getWidth",
            Field::Height => "getHeight",
            Field::Scale => "getScale",
            Field::Walls => "getWalls",
            Field::Braid => "getBraid",
            Field::Inset => "getInset",
            Field::Fill => "getFill",
        }
    }

    /// Name of the guest export that writes this field.
    pub fn setter(self) -> &'static str {
        match self {
            Field::Seed => "setSeed",
            Field::Width => "setWidth",
            Field::Height => "setHeight",
            Field::Scale => "setScale",
            Field::Walls => "setWalls",
            Field::Braid => "setBraid",
            Field::Inset => "setInset",
            Field::Fill => "setFill",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HostError::invalid_value(format!("unknown field '{}'", wanted)))
    }
}

/// Host-side copy of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
}

impl FieldValue {
    pub fn as_bool(self) -> bool {
        match self {
            FieldValue::Bool(b) => b,
            FieldValue::Int(v) => v != 0,
        }
    }

    pub fn as_int(self) -> i64 {
        match self {
            FieldValue::Bool(b) => b as i64,
            FieldValue::Int(v) => v,
        }
    }

    /// Convert to the representation a field of `kind` carries.
    pub fn coerce(self, kind: FieldKind) -> FieldValue {
        match kind {
            FieldKind::Bool => FieldValue::Bool(self.as_bool()),
            FieldKind::Int => FieldValue::Int(self.as_int()),
        }
    }

    /// Parse user input for a field of the given kind.
    ///
    /// Booleans accept `true/false`, `on/off`, `yes/no` and `1/0`.
    pub fn parse(kind: FieldKind, input: &str) -> Result<FieldValue, HostError> {
        let s = input.trim();
        match kind {
            FieldKind::Bool => match s.to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(FieldValue::Bool(true)),
                "false" | "off" | "no" | "0" => Ok(FieldValue::Bool(false)),
                _ => Err(HostError::invalid_value(format!("expected a boolean, got '{}'", s))),
            },
            FieldKind::Int => s
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| HostError::invalid_value(format!("expected an integer, got '{}'", s))),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(v) => write!(f, "{}", v),
        }
    }
}

/// A `(ptr, len)` reference into guest linear memory.
///
/// Only valid for the duration of the import call that received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub ptr: u32,
    pub len: u32,
}

impl Span {
    pub const fn new(ptr: u32, len: u32) -> Self {
        Self { ptr, len }
    }

    /// One past the last byte, computed without overflow.
    pub const fn end(&self) -> u64 {
        self.ptr as u64 + self.len as u64
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A single drawing instruction issued by the guest during generation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetFillStyle(String),
    SetStrokeStyle(String),
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    FillAll,
    DrawLine { x1: f64, y1: f64, x2: f64, y2: f64 },
    Resize { width: u32, height: u32 },
}
