use alloc::{boxed::Box, string::String, vec::Vec};
use core::fmt::{Display, Formatter};

/// Type of a value in the IR
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    /// Ordered list of types
    Vector(Vec<Type>),
    /// Dense tensor, -1 marks dynamic dimension
    DenseTensor {
        /// Dimensions
        dims: Vec<i64>,
        /// Element type
        dtype: Box<Type>,
    },
    /// 16 bit brain float
    BFloat16,
    /// 16 bit float
    Float16,
    /// 32 bit float
    Float32,
    /// 64 bit float
    Float64,
    /// 8 bit integer
    Int8,
    /// 8 bit unsigned integer
    UInt8,
    /// 16 bit integer
    Int16,
    /// 32 bit integer
    Int32,
    /// 64 bit integer
    Int64,
    /// Index integer
    Index,
    /// Boolean
    Bool,
    /// Complex of two 32 bit floats
    Complex64,
    /// Complex of two 64 bit floats
    Complex128,
    /// Type unknown to pirpy, holds its printed form
    Unclassified(String),
}

impl Type {
    /// Dense tensor with given dimensions and element type
    #[must_use]
    pub fn tensor(dims: &[i64], dtype: Type) -> Type {
        Type::DenseTensor { dims: dims.to_vec(), dtype: Box::new(dtype) }
    }

    /// Declared name of the type kind
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Type::Vector(_) => "VectorType",
            Type::DenseTensor { .. } => "DenseTensorType",
            Type::BFloat16 => "BFloat16Type",
            Type::Float16 => "Float16Type",
            Type::Float32 => "Float32Type",
            Type::Float64 => "Float64Type",
            Type::Int8 => "Int8Type",
            Type::UInt8 => "UInt8Type",
            Type::Int16 => "Int16Type",
            Type::Int32 => "Int32Type",
            Type::Int64 => "Int64Type",
            Type::Index => "IndexType",
            Type::Bool => "BoolType",
            Type::Complex64 => "Complex64Type",
            Type::Complex128 => "Complex128Type",
            Type::Unclassified(_) => "UnclassifiedType",
        }
    }
}

// Canonical IR printer for types
impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Type::Vector(types) => {
                f.write_str("vec[")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    ty.fmt(f)?;
                }
                f.write_str("]")
            }
            Type::DenseTensor { dims, dtype } => {
                f.write_str("tensor<")?;
                for dim in dims {
                    f.write_fmt(format_args!("{dim}x"))?;
                }
                f.write_fmt(format_args!("{dtype}>"))
            }
            Type::BFloat16 => f.write_str("bf16"),
            Type::Float16 => f.write_str("f16"),
            Type::Float32 => f.write_str("f32"),
            Type::Float64 => f.write_str("f64"),
            Type::Int8 => f.write_str("i8"),
            Type::UInt8 => f.write_str("u8"),
            Type::Int16 => f.write_str("i16"),
            Type::Int32 => f.write_str("i32"),
            Type::Int64 => f.write_str("i64"),
            Type::Index => f.write_str("index"),
            Type::Bool => f.write_str("b"),
            Type::Complex64 => f.write_str("c64"),
            Type::Complex128 => f.write_str("c128"),
            Type::Unclassified(printed) => f.write_str(printed),
        }
    }
}

#[test]
fn print_types() {
    use alloc::string::ToString;
    use alloc::vec;
    assert_eq!(Type::Float32.to_string(), "f32");
    assert_eq!(Type::tensor(&[2, -1], Type::Float32).to_string(), "tensor<2x-1xf32>");
    assert_eq!(Type::tensor(&[], Type::Int64).to_string(), "tensor<i64>");
    assert_eq!(
        Type::Vector(vec![Type::tensor(&[4], Type::BFloat16), Type::Bool]).to_string(),
        "vec[tensor<4xbf16>,b]"
    );
    assert_eq!(Type::Unclassified("pd_op.tensor_array<f32>".into()).to_string(), "pd_op.tensor_array<f32>");
}
