//! Fixed mapping from schema type names to on-disk element types.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

/// On-disk element type of a variable or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Signed 8-bit integer (`byte`).
    I8,
    /// Unsigned 8-bit integer (`ubyte`).
    U8,
    /// Signed 16-bit integer (`short`).
    I16,
    /// Unsigned 16-bit integer (`ushort`).
    U16,
    /// Signed 32-bit integer (`int`).
    I32,
    /// Unsigned 32-bit integer (`uint`).
    U32,
    /// Signed 64-bit integer (`int64`).
    I64,
    /// Unsigned 64-bit integer (`uint64`).
    U64,
    /// 32-bit IEEE float (`float`).
    F32,
    /// 64-bit IEEE float (`double`).
    F64,
    /// Variable-length text (`string`).
    Str,
}

/// Schema type names in table order. One name per tag.
const TYPE_TABLE: &[(&str, TypeTag)] = &[
    ("byte", TypeTag::I8),
    ("ubyte", TypeTag::U8),
    ("short", TypeTag::I16),
    ("ushort", TypeTag::U16),
    ("int", TypeTag::I32),
    ("uint", TypeTag::U32),
    ("int64", TypeTag::I64),
    ("uint64", TypeTag::U64),
    ("float", TypeTag::F32),
    ("double", TypeTag::F64),
    ("string", TypeTag::Str),
];

/// Resolve a schema type name to its [`TypeTag`].
///
/// Matching is exact and case-sensitive.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownType`] if `name` is not in the type table.
pub fn resolve(name: &str) -> Result<TypeTag, SchemaError> {
    TYPE_TABLE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, tag)| tag)
        .ok_or_else(|| SchemaError::UnknownType {
            name: name.to_string(),
        })
}

impl TypeTag {
    /// All tags in table order.
    pub const ALL: [TypeTag; 11] = [
        TypeTag::I8,
        TypeTag::U8,
        TypeTag::I16,
        TypeTag::U16,
        TypeTag::I32,
        TypeTag::U32,
        TypeTag::I64,
        TypeTag::U64,
        TypeTag::F32,
        TypeTag::F64,
        TypeTag::Str,
    ];

    /// Canonical schema name of this tag.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::I8 => "byte",
            TypeTag::U8 => "ubyte",
            TypeTag::I16 => "short",
            TypeTag::U16 => "ushort",
            TypeTag::I32 => "int",
            TypeTag::U32 => "uint",
            TypeTag::I64 => "int64",
            TypeTag::U64 => "uint64",
            TypeTag::F32 => "float",
            TypeTag::F64 => "double",
            TypeTag::Str => "string",
        }
    }

    /// Returns `true` for the eight integer tags.
    pub fn is_integer(self) -> bool {
        !matches!(self, TypeTag::F32 | TypeTag::F64 | TypeTag::Str)
    }

    /// Convert raw attribute text into a value of this type.
    ///
    /// Numeric text is trimmed before parsing; string text is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::AttributeValueParse`] if the text is not a valid
    /// literal for this type, including out-of-range integers.
    pub fn parse_value(self, text: &str) -> Result<AttrValue, SchemaError> {
        let t = text.trim();
        let fail = |reason: String| SchemaError::AttributeValueParse {
            value: text.to_string(),
            type_name: self.name(),
            reason,
        };
        Ok(match self {
            TypeTag::I8 => AttrValue::I8(t.parse().map_err(|e| fail(format!("{e}")))?),
            TypeTag::U8 => AttrValue::U8(t.parse().map_err(|e| fail(format!("{e}")))?),
            TypeTag::I16 => AttrValue::I16(t.parse().map_err(|e| fail(format!("{e}")))?),
            TypeTag::U16 => AttrValue::U16(t.parse().map_err(|e| fail(format!("{e}")))?),
            TypeTag::I32 => AttrValue::I32(t.parse().map_err(|e| fail(format!("{e}")))?),
            TypeTag::U32 => AttrValue::U32(t.parse().map_err(|e| fail(format!("{e}")))?),
            TypeTag::I64 => AttrValue::I64(t.parse().map_err(|e| fail(format!("{e}")))?),
            TypeTag::U64 => AttrValue::U64(t.parse().map_err(|e| fail(format!("{e}")))?),
            TypeTag::F32 => AttrValue::F32(t.parse().map_err(|e| fail(format!("{e}")))?),
            TypeTag::F64 => AttrValue::F64(t.parse().map_err(|e| fail(format!("{e}")))?),
            TypeTag::Str => AttrValue::Str(text.to_string()),
        })
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeTag {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// A typed attribute value, produced by [`TypeTag::parse_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// `byte` value.
    I8(i8),
    /// `ubyte` value.
    U8(u8),
    /// `short` value.
    I16(i16),
    /// `ushort` value.
    U16(u16),
    /// `int` value.
    I32(i32),
    /// `uint` value.
    U32(u32),
    /// `int64` value.
    I64(i64),
    /// `uint64` value.
    U64(u64),
    /// `float` value.
    F32(f32),
    /// `double` value.
    F64(f64),
    /// `string` value.
    Str(String),
}

impl AttrValue {
    /// The tag this value was parsed under.
    pub fn tag(&self) -> TypeTag {
        match self {
            AttrValue::I8(_) => TypeTag::I8,
            AttrValue::U8(_) => TypeTag::U8,
            AttrValue::I16(_) => TypeTag::I16,
            AttrValue::U16(_) => TypeTag::U16,
            AttrValue::I32(_) => TypeTag::I32,
            AttrValue::U32(_) => TypeTag::U32,
            AttrValue::I64(_) => TypeTag::I64,
            AttrValue::U64(_) => TypeTag::U64,
            AttrValue::F32(_) => TypeTag::F32,
            AttrValue::F64(_) => TypeTag::F64,
            AttrValue::Str(_) => TypeTag::Str,
        }
    }
}
