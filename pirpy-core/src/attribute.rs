use crate::dtype::DType;
use crate::place::{DataLayout, Place};
use crate::scalar::Scalar;
use crate::types::Type;
use alloc::{string::String, vec::Vec};
use core::fmt::{Display, Formatter};

/// Attribute attached to a node
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    /// Boolean
    Bool(bool),
    /// 32 bit integer
    Int32(i32),
    /// 64 bit integer
    Int64(i64),
    /// Index integer
    Index(i64),
    /// 32 bit float
    Float(f32),
    /// 64 bit float
    Double(f64),
    /// Complex of two 32 bit floats, real and imaginary part
    Complex64(f32, f32),
    /// Complex of two 64 bit floats, real and imaginary part
    Complex128(f64, f64),
    /// String
    Str(String),
    /// Raw pointer address
    Pointer(usize),
    /// Type used as a value
    Type(Type),
    /// Array of attributes of the same kind
    Array(Vec<Attribute>),
    /// Name of tensor
    TensorName(String),
    /// Symbolic shape marker
    Symbol,
    /// Kernel descriptor
    Kernel,
    /// Array of integers
    IntArray(Vec<i64>),
    /// Scalar constant with dtype
    Scalar(Scalar),
    /// DType marker
    DataType(DType),
    /// Memory place
    Place(Place),
    /// Data layout marker
    DataLayout(DataLayout),
    /// Fusion group info marker
    GroupInfo,
    /// Compiled kernel info marker
    CinnKernelInfo,
    /// Attribute of kind unknown to pirpy
    Unclassified {
        /// Dialect name of the kind
        kind: String,
    },
}

impl Attribute {
    /// Declared name of the attribute kind
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Attribute::Bool(_) => "BoolAttribute",
            Attribute::Int32(_) => "Int32Attribute",
            Attribute::Int64(_) => "Int64Attribute",
            Attribute::Index(_) => "IndexAttribute",
            Attribute::Float(_) => "FloatAttribute",
            Attribute::Double(_) => "DoubleAttribute",
            Attribute::Complex64(..) => "Complex64Attribute",
            Attribute::Complex128(..) => "Complex128Attribute",
            Attribute::Str(_) => "StrAttribute",
            Attribute::Pointer(_) => "PointerAttribute",
            Attribute::Type(_) => "TypeAttribute",
            Attribute::Array(_) => "ArrayAttribute",
            Attribute::TensorName(_) => "TensorNameAttribute",
            Attribute::Symbol => "SymbolAttribute",
            Attribute::Kernel => "KernelAttribute",
            Attribute::IntArray(_) => "IntArrayAttribute",
            Attribute::Scalar(_) => "ScalarAttribute",
            Attribute::DataType(_) => "DataTypeAttribute",
            Attribute::Place(_) => "PlaceAttribute",
            Attribute::DataLayout(_) => "DataLayoutAttribute",
            Attribute::GroupInfo => "GroupInfoAttribute",
            Attribute::CinnKernelInfo => "CinnKernelInfoAttribute",
            Attribute::Unclassified { .. } => "UnclassifiedAttribute",
        }
    }
}

// Canonical IR printer for attributes
impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Attribute::Bool(x) => f.write_fmt(format_args!("{x}")),
            Attribute::Int32(x) => f.write_fmt(format_args!("(Int32){x}")),
            Attribute::Int64(x) => f.write_fmt(format_args!("(Int64){x}")),
            Attribute::Index(x) => f.write_fmt(format_args!("(Index){x}")),
            Attribute::Float(x) => f.write_fmt(format_args!("(Float){x:?}")),
            Attribute::Double(x) => f.write_fmt(format_args!("(Double){x:?}")),
            Attribute::Complex64(re, im) => f.write_fmt(format_args!("(Complex64){re:?}+{im:?}i")),
            Attribute::Complex128(re, im) => f.write_fmt(format_args!("(Complex128){re:?}+{im:?}i")),
            Attribute::Str(x) => f.write_fmt(format_args!("{x:?}")),
            Attribute::Pointer(x) => f.write_fmt(format_args!("(Pointer){x:#x}")),
            Attribute::Type(x) => f.write_fmt(format_args!("{x}")),
            Attribute::Array(xs) => {
                f.write_str("[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    x.fmt(f)?;
                }
                f.write_str("]")
            }
            Attribute::TensorName(x) => f.write_fmt(format_args!("(TensorName){x:?}")),
            Attribute::IntArray(xs) => f.write_fmt(format_args!("IntArray{xs:?}")),
            Attribute::Scalar(x) => f.write_fmt(format_args!("({}){x}", x.dtype())),
            Attribute::DataType(x) => f.write_fmt(format_args!("{x}")),
            Attribute::Place(x) => f.write_fmt(format_args!("{x}")),
            Attribute::DataLayout(x) => f.write_fmt(format_args!("{x}")),
            Attribute::Symbol
            | Attribute::Kernel
            | Attribute::GroupInfo
            | Attribute::CinnKernelInfo => f.write_str(self.name()),
            Attribute::Unclassified { kind } => f.write_fmt(format_args!("<{kind}>")),
        }
    }
}

impl From<bool> for Attribute {
    fn from(value: bool) -> Self {
        Attribute::Bool(value)
    }
}

impl From<i32> for Attribute {
    fn from(value: i32) -> Self {
        Attribute::Int32(value)
    }
}

impl From<i64> for Attribute {
    fn from(value: i64) -> Self {
        Attribute::Int64(value)
    }
}

impl From<f32> for Attribute {
    fn from(value: f32) -> Self {
        Attribute::Float(value)
    }
}

impl From<f64> for Attribute {
    fn from(value: f64) -> Self {
        Attribute::Double(value)
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::Str(value.into())
    }
}

impl From<Type> for Attribute {
    fn from(value: Type) -> Self {
        Attribute::Type(value)
    }
}

impl From<Place> for Attribute {
    fn from(value: Place) -> Self {
        Attribute::Place(value)
    }
}

impl From<DType> for Attribute {
    fn from(value: DType) -> Self {
        Attribute::DataType(value)
    }
}

impl From<Scalar> for Attribute {
    fn from(value: Scalar) -> Self {
        Attribute::Scalar(value)
    }
}

#[test]
fn print_attributes() {
    use alloc::string::ToString;
    use alloc::vec;
    assert_eq!(Attribute::Int32(-1).to_string(), "(Int32)-1");
    assert_eq!(Attribute::from(Type::Float32).to_string(), "f32");
    assert_eq!(
        Attribute::Array(vec![Attribute::Bool(true), Attribute::Bool(false)]).to_string(),
        "[true,false]"
    );
    assert_eq!(Attribute::Scalar(Scalar::F32(1.5)).to_string(), "(float32)1.5");
    assert_eq!(Attribute::Symbol.to_string(), "SymbolAttribute");
}
