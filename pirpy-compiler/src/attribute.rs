//! Attributes as python literals. Every attribute kind becomes a call
//! on the generated class, named after the kind, e.g. `self.Int32Attribute(-1)`.

use crate::types::ir_type;
use alloc::{collections::BTreeMap, format, string::String, vec::Vec};
use itertools::Itertools;
use pirpy_core::attribute::Attribute;

/// Diagnostic attributes that are never written
pub const SKIPPED_ATTRIBUTES: [&str; 2] = ["op_callstack", "sym_shape_str"];

/// Literal used for attribute kinds without dedicated conversion
pub const UNCLASSIFIED_ATTRIBUTE: &str = "self.UnclassifiedAttribute()";

const PY_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Quoted and escaped python string literal
#[must_use]
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => out.push_str(&format!("\\x{:02x}", ch as u32)),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn non_finite(is_nan: bool, is_negative: bool) -> String {
    match (is_nan, is_negative) {
        (true, _) => String::from("float(\"nan\")"),
        (false, true) => String::from("float(\"-inf\")"),
        (false, false) => String::from("float(\"inf\")"),
    }
}

/// Shortest decimal that round trips
pub(crate) fn float32(x: f32) -> String {
    if x.is_finite() {
        format!("{x:?}")
    } else {
        non_finite(x.is_nan(), x.is_sign_negative())
    }
}

pub(crate) fn float64(x: f64) -> String {
    if x.is_finite() {
        format!("{x:?}")
    } else {
        non_finite(x.is_nan(), x.is_sign_negative())
    }
}

/// Can name be used as keyword argument?
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') && !PY_KEYWORDS.contains(&name)
}

/// Python literal of attribute
#[must_use]
pub fn attribute(attr: &Attribute) -> String {
    let name = attr.name();
    match attr {
        Attribute::Bool(x) => format!("self.{name}({})", if *x { "True" } else { "False" }),
        Attribute::Int32(x) => format!("self.{name}({x})"),
        Attribute::Int64(x) | Attribute::Index(x) => format!("self.{name}({x})"),
        Attribute::Float(x) => format!("self.{name}({})", float32(*x)),
        Attribute::Double(x) => format!("self.{name}({})", float64(*x)),
        Attribute::Complex64(re, im) => format!("self.{name}(\"{re:?}\", \"{im:?}\")"),
        Attribute::Complex128(re, im) => format!("self.{name}(\"{re:?}\", \"{im:?}\")"),
        Attribute::Str(x) | Attribute::TensorName(x) => format!("self.{name}({})", quote(x)),
        Attribute::Pointer(address) => format!("self.{name}(\"{address:#x}\")"),
        // Payload is printed by the IR printer, not converted as schema type
        Attribute::Type(ty) => format!("self.{name}({})", quote(&format!("{ty}"))),
        Attribute::Array(xs) => format!("self.{name}({})", xs.iter().map(attribute).join(", ")),
        Attribute::IntArray(xs) => format!("self.{name}({})", xs.iter().join(", ")),
        Attribute::Scalar(x) => format!(
            "self.{name}({}, {})",
            quote(&format!("{x}")),
            ir_type(&x.dtype().ir_type())
        ),
        Attribute::DataType(dtype) => format!("self.{name}({})", quote(dtype.name())),
        Attribute::Place(place) => {
            if place.kind().is_host() {
                format!("self.{name}({})", quote(place.device_type()))
            } else {
                format!("self.{name}({}, {})", quote(place.device_type()), place.device_id())
            }
        }
        Attribute::DataLayout(layout) => format!("self.{name}({})", quote(layout.name())),
        Attribute::Symbol | Attribute::Kernel | Attribute::GroupInfo | Attribute::CinnKernelInfo => {
            format!("self.{name}()")
        }
        Attribute::Unclassified { .. } => String::from(UNCLASSIFIED_ATTRIBUTE),
    }
}

/// Attributes as keyword arguments of `dict(...)`. Names that are not valid
/// identifiers are passed through a trailing `**{...}`.
#[must_use]
pub fn attributes_as_args(attrs: &BTreeMap<String, Attribute>) -> String {
    let mut args = Vec::new();
    let mut quoted = Vec::new();
    for (name, attr) in attrs {
        if SKIPPED_ATTRIBUTES.contains(&name.as_str()) {
            continue;
        }
        if is_identifier(name) {
            args.push(format!("{name}={}", attribute(attr)));
        } else {
            quoted.push(format!("{}: {}", quote(name), attribute(attr)));
        }
    }
    if !quoted.is_empty() {
        args.push(format!("**{{{}}}", quoted.join(", ")));
    }
    args.join(", ")
}
