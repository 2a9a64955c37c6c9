//! Pirpy compiler from IR program graph into python source.
//!
//! The generated class rebuilds the graph when executed together with a shim
//! providing `Op`, `call` and the attribute and type constructors.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(rustdoc::broken_intra_doc_links)]
#![forbid(rustdoc::private_intra_doc_links)]
#![forbid(missing_docs)]
#![forbid(rustdoc::missing_crate_level_docs)]
#![forbid(rustdoc::private_doc_tests)]
#![forbid(rustdoc::invalid_codeblock_attributes)]
#![forbid(rustdoc::invalid_html_tags)]
#![forbid(rustdoc::invalid_rust_codeblocks)]
#![forbid(rustdoc::bare_urls)]
#![forbid(rustdoc::unescaped_backticks)]
#![forbid(rustdoc::redundant_explicit_links)]

extern crate alloc;

/// See [attribute](attribute::attribute)
pub mod attribute;
/// See [Converter](converter::Converter)
pub mod converter;
/// See [Fragment](fragment::Fragment)
pub mod fragment;
/// See [node_name](names::node_name)
pub mod names;
/// See [ir_type](types::ir_type)
pub mod types;

use alloc::string::String;
use pirpy_core::program::Program;

pub use converter::{free_values, Converter};
pub use fragment::Fragment;

/// Number of spaces per level of indentation
pub const DEFAULT_INDENT_SIZE: usize = 2;

/// Convert program into python class named after seq_no,
/// indented with [`DEFAULT_INDENT_SIZE`] spaces.
#[must_use]
pub fn convert(program: &Program, seq_no: u64) -> String {
    Converter::new(program, seq_no).convert()
}
