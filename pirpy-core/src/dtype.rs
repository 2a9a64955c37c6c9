use crate::types::Type;

/// DType of tensor elements and scalar constants
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DType {
    /// 16 bit brain floating point type
    BF16,
    /// 16 bit floating point type
    F16,
    /// 32 bit floating point type
    F32,
    /// 64 bit floating point type
    F64,
    /// 8 bit integer type
    I8,
    /// 8 bit unsigned integer type
    U8,
    /// 16 bit integer type
    I16,
    /// 32 bit integer type
    I32,
    /// 64 bit integer type
    I64,
    /// Boolean type
    Bool,
    /// Complex number made of two 32 bit floats
    CF32,
    /// Complex number made of two 64 bit floats
    CF64,
}

impl DType {
    /// Name used by the framework, e.g. `float32`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BF16 => "bfloat16",
            Self::F16 => "float16",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::I8 => "int8",
            Self::U8 => "uint8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::Bool => "bool",
            Self::CF32 => "complex64",
            Self::CF64 => "complex128",
        }
    }

    /// Scalar IR type with the same kind as this dtype
    #[must_use]
    pub const fn ir_type(self) -> Type {
        match self {
            Self::BF16 => Type::BFloat16,
            Self::F16 => Type::Float16,
            Self::F32 => Type::Float32,
            Self::F64 => Type::Float64,
            Self::I8 => Type::Int8,
            Self::U8 => Type::UInt8,
            Self::I16 => Type::Int16,
            Self::I32 => Type::Int32,
            Self::I64 => Type::Int64,
            Self::Bool => Type::Bool,
            Self::CF32 => Type::Complex64,
            Self::CF64 => Type::Complex128,
        }
    }
}

impl core::fmt::Display for DType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
