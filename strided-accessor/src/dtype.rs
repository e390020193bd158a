//! Data type tags for runtime buffer dispatch.

use crate::{Result, StridedError};
use std::fmt;
use std::str::FromStr;

/// Element data type of a dtype-tagged buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Float64,
    Float32,
    Int32,
    Int16,
    Int8,
    Uint32,
    Uint16,
    Uint8,
    /// Unsigned 8-bit integers with clamped writes.
    Uint8c,
    Bool,
    /// Complex numbers with 64-bit real and imaginary components.
    Complex128,
    /// Complex numbers with 32-bit real and imaginary components.
    Complex64,
    /// Accessor-protocol object with no fixed memory layout.
    Generic,
}

impl DType {
    /// All recognized dtypes.
    pub const ALL: [DType; 13] = [
        DType::Float64,
        DType::Float32,
        DType::Int32,
        DType::Int16,
        DType::Int8,
        DType::Uint32,
        DType::Uint16,
        DType::Uint8,
        DType::Uint8c,
        DType::Bool,
        DType::Complex128,
        DType::Complex64,
        DType::Generic,
    ];

    /// Canonical dtype name.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::Float64 => "float64",
            DType::Float32 => "float32",
            DType::Int32 => "int32",
            DType::Int16 => "int16",
            DType::Int8 => "int8",
            DType::Uint32 => "uint32",
            DType::Uint16 => "uint16",
            DType::Uint8 => "uint8",
            DType::Uint8c => "uint8c",
            DType::Bool => "bool",
            DType::Complex128 => "complex128",
            DType::Complex64 => "complex64",
            DType::Generic => "generic",
        }
    }

    /// Size in bytes of one logical element, or `None` for `Generic`.
    pub fn byte_size(self) -> Option<usize> {
        match self {
            DType::Float64 => Some(8),
            DType::Float32 => Some(4),
            DType::Int32 | DType::Uint32 => Some(4),
            DType::Int16 | DType::Uint16 => Some(2),
            DType::Int8 | DType::Uint8 | DType::Uint8c | DType::Bool => Some(1),
            DType::Complex128 => Some(16),
            DType::Complex64 => Some(8),
            DType::Generic => None,
        }
    }

    /// Returns true for complex dtypes.
    pub fn is_complex(self) -> bool {
        matches!(self, DType::Complex128 | DType::Complex64)
    }

    /// Returns true for real floating-point dtypes.
    pub fn is_floating_point(self) -> bool {
        matches!(self, DType::Float64 | DType::Float32)
    }

    /// Returns true for integer dtypes (including `uint8c`).
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DType::Int32
                | DType::Int16
                | DType::Int8
                | DType::Uint32
                | DType::Uint16
                | DType::Uint8
                | DType::Uint8c
        )
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = StridedError;

    fn from_str(s: &str) -> Result<Self> {
        DType::ALL
            .iter()
            .copied()
            .find(|dt| dt.as_str() == s)
            .ok_or_else(|| StridedError::UnknownDType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_names() {
        for dt in DType::ALL {
            assert_eq!(dt.as_str().parse::<DType>().unwrap(), dt);
            assert_eq!(dt.to_string(), dt.as_str());
        }
    }

    #[test]
    fn test_parse_unknown_fails() {
        let err = "float16".parse::<DType>().unwrap_err();
        assert_eq!(err, StridedError::UnknownDType("float16".to_string()));
    }

    #[test]
    fn test_byte_sizes() {
        assert_eq!(DType::Complex128.byte_size(), Some(16));
        assert_eq!(DType::Uint8c.byte_size(), Some(1));
        assert_eq!(DType::Generic.byte_size(), None);
    }

    #[test]
    fn test_categories() {
        assert!(DType::Complex64.is_complex());
        assert!(!DType::Float32.is_complex());
        assert!(DType::Uint8c.is_integer());
        assert!(DType::Float64.is_floating_point());
        assert!(!DType::Bool.is_integer());
    }
}
