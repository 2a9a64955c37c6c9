//! # pirpy
//!
//! pirpy dumps IR program graphs as python source, which rebuilds the graph
//! when executed. Dumps are meant for debugging of compiler passes.
//!
//! Use [`convert`] to get the source of one program, or [`DumpSink`]
//! to append programs into per tag files in a configured directory.
//!
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

/// See [DumpConfig](config::DumpConfig)
pub mod config;
mod error;
mod sink;

pub use config::DumpConfig;
pub use error::DumpError;
pub use sink::DumpSink;

pub use pirpy_compiler::{
    convert, free_values,
    names::{node_name, value_name},
    Converter, DEFAULT_INDENT_SIZE,
};
pub use pirpy_core::{
    attribute::Attribute,
    dtype::DType,
    error::IrError,
    place::{AllocationType, DataLayout, Place},
    program::{Block, BlockRef, Node, NodeDesc, NodeId, Program, Region, Value},
    scalar::Scalar,
    types::Type,
};
