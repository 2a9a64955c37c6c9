use crate::dtype::DType;
use core::fmt::Display;
use half::{bf16, f16};

/// Typed scalar constant, payload of scalar attributes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Scalar {
    /// Brain float 16 constant
    BF16(bf16),
    /// Float 16 constant
    F16(f16),
    /// Float 32 constant
    F32(f32),
    /// Float 64 constant
    F64(f64),
    /// Int 8 constant
    I8(i8),
    /// Unsigned int 8 constant
    U8(u8),
    /// Int 16 constant
    I16(i16),
    /// Int 32 constant
    I32(i32),
    /// Int 64 constant
    I64(i64),
    /// Boolean constant
    Bool(bool),
    /// Complex constant, real and imaginary f32 parts
    CF32(f32, f32),
    /// Complex constant, real and imaginary f64 parts
    CF64(f64, f64),
}

impl Scalar {
    /// DType of this constant
    #[must_use]
    pub const fn dtype(&self) -> DType {
        match self {
            Scalar::BF16(_) => DType::BF16,
            Scalar::F16(_) => DType::F16,
            Scalar::F32(_) => DType::F32,
            Scalar::F64(_) => DType::F64,
            Scalar::I8(_) => DType::I8,
            Scalar::U8(_) => DType::U8,
            Scalar::I16(_) => DType::I16,
            Scalar::I32(_) => DType::I32,
            Scalar::I64(_) => DType::I64,
            Scalar::Bool(_) => DType::Bool,
            Scalar::CF32(..) => DType::CF32,
            Scalar::CF64(..) => DType::CF64,
        }
    }
}

/// Shortest decimal of a widened half float which narrows back to the same
/// half float, e.g. `0.1` instead of `0.099975586` for `f16` 0.1.
fn shortest_half(widened: f32, narrows_back: impl Fn(f32) -> bool) -> f32 {
    if !widened.is_finite() {
        return widened;
    }
    // Half floats never need more than 5 significant digits
    for precision in 0..9 {
        if let Ok(decimal) = alloc::format!("{widened:.precision$e}").parse::<f32>() {
            if narrows_back(decimal) {
                return decimal;
            }
        }
    }
    widened
}

// Raw string form, floats use the shortest representation which round trips
// at their own precision.
impl Display for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Scalar::BF16(value) => {
                let decimal = shortest_half(value.to_f32(), |x| bf16::from_f32(x) == *value);
                f.write_fmt(format_args!("{decimal:?}"))
            }
            Scalar::F16(value) => {
                let decimal = shortest_half(value.to_f32(), |x| f16::from_f32(x) == *value);
                f.write_fmt(format_args!("{decimal:?}"))
            }
            Scalar::F32(value) => f.write_fmt(format_args!("{value:?}")),
            Scalar::F64(value) => f.write_fmt(format_args!("{value:?}")),
            Scalar::I8(value) => f.write_fmt(format_args!("{value}")),
            Scalar::U8(value) => f.write_fmt(format_args!("{value}")),
            Scalar::I16(value) => f.write_fmt(format_args!("{value}")),
            Scalar::I32(value) => f.write_fmt(format_args!("{value}")),
            Scalar::I64(value) => f.write_fmt(format_args!("{value}")),
            Scalar::Bool(value) => f.write_fmt(format_args!("{value}")),
            Scalar::CF32(re, im) => f.write_fmt(format_args!("({re:?},{im:?})")),
            Scalar::CF64(re, im) => f.write_fmt(format_args!("({re:?},{im:?})")),
        }
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::F32(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::F64(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::I32(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::I64(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<f16> for Scalar {
    fn from(value: f16) -> Self {
        Scalar::F16(value)
    }
}

impl From<bf16> for Scalar {
    fn from(value: bf16) -> Self {
        Scalar::BF16(value)
    }
}

#[test]
fn scalar_raw_string() {
    use alloc::string::ToString;
    assert_eq!(Scalar::F32(1.5).to_string(), "1.5");
    assert_eq!(Scalar::F64(2.0).to_string(), "2.0");
    assert_eq!(Scalar::I64(-3).to_string(), "-3");
    assert_eq!(Scalar::Bool(true).to_string(), "true");
    assert_eq!(Scalar::F16(f16::from_f32(0.5)).to_string(), "0.5");
    assert_eq!(Scalar::CF32(1.0, -2.0).to_string(), "(1.0,-2.0)");
    assert_eq!(Scalar::from(bf16::ONE).dtype(), DType::BF16);
}

#[test]
fn half_raw_string_is_shortest() {
    use alloc::string::ToString;
    // Widened values are 0.099975586 and 0.30078125
    assert_eq!(Scalar::F16(f16::from_f32(0.1)).to_string(), "0.1");
    assert_eq!(Scalar::BF16(bf16::from_f32(0.3)).to_string(), "0.3");
    assert_eq!(Scalar::BF16(bf16::ONE).to_string(), "1.0");
    assert_eq!(Scalar::F16(f16::MAX).to_string(), "65500.0");
    assert_eq!(Scalar::F16(f16::NEG_INFINITY).to_string(), "-inf");
    for bits in (0..u16::MAX).step_by(7) {
        let value = f16::from_bits(bits);
        if value.is_finite() {
            let text = Scalar::F16(value).to_string();
            assert_eq!(text.parse::<f32>().map(f16::from_f32), Ok(value), "{text}");
        }
    }
}
