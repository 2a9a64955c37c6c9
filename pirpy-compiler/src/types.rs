//! Types as python literals, e.g. `self.DenseTensorType([2, 3], self.Float32Type())`.

use crate::attribute::quote;
use alloc::{format, string::String};
use itertools::Itertools;
use pirpy_core::types::Type;

/// Python literal of type
#[must_use]
pub fn ir_type(ty: &Type) -> String {
    let name = ty.name();
    match ty {
        Type::Vector(types) => format!("self.{name}({})", types.iter().map(ir_type).join(", ")),
        Type::DenseTensor { dims, dtype } => {
            format!("self.{name}([{}], {})", dims.iter().join(", "), ir_type(dtype))
        }
        Type::BFloat16
        | Type::Float16
        | Type::Float32
        | Type::Float64
        | Type::Int8
        | Type::UInt8
        | Type::Int16
        | Type::Int32
        | Type::Int64
        | Type::Index
        | Type::Bool
        | Type::Complex64
        | Type::Complex128 => format!("self.{name}()"),
        // Printed form keeps kinds pirpy does not understand
        Type::Unclassified(printed) => format!("self.{name}({})", quote(printed)),
    }
}

/// Python list of type literals
#[must_use]
pub fn type_list<'a>(types: impl IntoIterator<Item = &'a Type>) -> String {
    format!("[{}]", types.into_iter().map(ir_type).join(", "))
}
