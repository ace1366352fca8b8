//! Typed data buffers handed to the container.
//!
//! Each write goes through one [`TypedSlice`] whose variant names the element
//! type. Rust element types are tied to their [`TypeTag`] by [`NcElement`], so
//! a buffer can only be bound to a variable declared with the same tag.

use geonc_schema::TypeTag;

/// A borrowed buffer tagged with its element type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedSlice<'a> {
    /// `byte` values.
    I8(&'a [i8]),
    /// `ubyte` values.
    U8(&'a [u8]),
    /// `short` values.
    I16(&'a [i16]),
    /// `ushort` values.
    U16(&'a [u16]),
    /// `int` values.
    I32(&'a [i32]),
    /// `uint` values.
    U32(&'a [u32]),
    /// `int64` values.
    I64(&'a [i64]),
    /// `uint64` values.
    U64(&'a [u64]),
    /// `float` values.
    F32(&'a [f32]),
    /// `double` values.
    F64(&'a [f64]),
    /// `string` values.
    Str(&'a [&'a str]),
}

impl TypedSlice<'_> {
    /// Element type of the buffer.
    pub fn tag(&self) -> TypeTag {
        match self {
            TypedSlice::I8(_) => TypeTag::I8,
            TypedSlice::U8(_) => TypeTag::U8,
            TypedSlice::I16(_) => TypeTag::I16,
            TypedSlice::U16(_) => TypeTag::U16,
            TypedSlice::I32(_) => TypeTag::I32,
            TypedSlice::U32(_) => TypeTag::U32,
            TypedSlice::I64(_) => TypeTag::I64,
            TypedSlice::U64(_) => TypeTag::U64,
            TypedSlice::F32(_) => TypeTag::F32,
            TypedSlice::F64(_) => TypeTag::F64,
            TypedSlice::Str(_) => TypeTag::Str,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            TypedSlice::I8(v) => v.len(),
            TypedSlice::U8(v) => v.len(),
            TypedSlice::I16(v) => v.len(),
            TypedSlice::U16(v) => v.len(),
            TypedSlice::I32(v) => v.len(),
            TypedSlice::U32(v) => v.len(),
            TypedSlice::I64(v) => v.len(),
            TypedSlice::U64(v) => v.len(),
            TypedSlice::F32(v) => v.len(),
            TypedSlice::F64(v) => v.len(),
            TypedSlice::Str(v) => v.len(),
        }
    }

    /// Returns `true` if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A numeric element type with a fixed on-disk [`TypeTag`].
pub trait NcElement: Copy + std::fmt::Debug {
    /// The tag this type is stored as.
    const TAG: TypeTag;

    /// Wrap a slice of this type.
    fn typed(values: &[Self]) -> TypedSlice<'_>;
}

macro_rules! impl_nc_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl NcElement for $ty {
                const TAG: TypeTag = TypeTag::$variant;

                fn typed(values: &[Self]) -> TypedSlice<'_> {
                    TypedSlice::$variant(values)
                }
            }
        )*
    };
}

impl_nc_element!(
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_follow_rust_types() {
        assert_eq!(<i8 as NcElement>::TAG, TypeTag::I8);
        assert_eq!(<u16 as NcElement>::TAG, TypeTag::U16);
        assert_eq!(<i32 as NcElement>::TAG, TypeTag::I32);
        assert_eq!(<u64 as NcElement>::TAG, TypeTag::U64);
        assert_eq!(<f32 as NcElement>::TAG, TypeTag::F32);
        assert_eq!(<f64 as NcElement>::TAG, TypeTag::F64);
    }

    #[test]
    fn typed_slice_reports_tag_and_len() {
        let data = [1.0f64, 2.0, 3.0];
        let s = f64::typed(&data);
        assert_eq!(s.tag(), TypeTag::F64);
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
    }

    #[test]
    fn string_slice() {
        let names = ["a", "bc"];
        let s = TypedSlice::Str(&names);
        assert_eq!(s.tag(), TypeTag::Str);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn empty_slice() {
        let s = i16::typed(&[]);
        assert!(s.is_empty());
    }
}
