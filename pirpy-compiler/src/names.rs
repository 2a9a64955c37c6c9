//! Identifiers of nodes, values and generated classes.

use alloc::{format, string::String};
use core::hash::{Hash, Hasher};
use pirpy_core::program::{Node, Program, Value};

/// Prefix of the generated class name
pub const CLASS_NAME_PREFIX: &str = "PirProgram_";

/// Fnv hasher, used to name free values
pub(crate) struct FnvHasher(u64);

impl Default for FnvHasher {
    fn default() -> FnvHasher {
        FnvHasher(0xcbf2_9ce4_8422_2325)
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        let FnvHasher(mut hash) = *self;
        for byte in bytes.iter() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x100_0000_01b3);
        }
        *self = FnvHasher(hash);
    }
}

const fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Longest suffix of name made only of ascii letters, digits and underscores
#[must_use]
pub fn identifier_suffix(name: &str) -> &str {
    let start = name
        .char_indices()
        .rev()
        .find(|(_, ch)| !is_identifier_char(*ch))
        .map_or(0, |(i, ch)| i + ch.len_utf8());
    &name[start..]
}

/// Identifier of node, sanitized qualified name followed by its numeric id
#[must_use]
pub fn node_name(node: &Node) -> String {
    let suffix = identifier_suffix(node.name());
    // Identifiers can not start with a digit
    if suffix.starts_with(|ch: char| ch.is_ascii_digit()) {
        format!("_{suffix}_{}", node.id())
    } else {
        format!("{suffix}_{}", node.id())
    }
}

/// Name of value. Results are named after their node and index,
/// free values after the hash of their identity.
#[must_use]
pub fn value_name(program: &Program, value: Value) -> String {
    match program.producer(value) {
        Some((nid, index)) => format!("{}_r{index}", node_name(program.node(nid))),
        None => {
            let mut hasher = FnvHasher::default();
            value.hash(&mut hasher);
            format!("arg_{}", hasher.finish())
        }
    }
}

/// Name of the generated class
#[must_use]
pub fn class_name(seq_no: u64) -> String {
    format!("{CLASS_NAME_PREFIX}{seq_no}")
}
