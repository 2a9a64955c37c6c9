#![no_std]
//! # pirpy-core
//!
//! pirpy-core is the IR part of pirpy.
//! It contains definitions of program graph (program, node, region, block, value),
//! attributes, types, dtypes, scalars and places, together with the canonical
//! IR printer used by diagnostics.
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

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// See [Attribute](attribute::Attribute)
pub mod attribute;
/// See [DType](dtype::DType)
pub mod dtype;
/// See [IrError](error::IrError)
pub mod error;
/// See [Place](place::Place)
pub mod place;
/// See [Program](program::Program)
pub mod program;
/// See [Scalar](scalar::Scalar)
pub mod scalar;
/// See [Type](types::Type)
pub mod types;
