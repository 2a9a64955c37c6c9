use crate::program::{NodeId, Value};
use core::fmt::{Display, Formatter};

/// IrError
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrError {
    /// Node does not exist in this program
    UnknownNode(NodeId),
    /// Value does not exist in this program
    UnknownValue(Value),
    /// Node does not have region with this index
    UnknownRegion {
        /// Owner of the region
        node: NodeId,
        /// Index of the region
        region: usize,
    },
    /// Region does not have block with this index
    UnknownBlock {
        /// Owner of the region
        node: NodeId,
        /// Index of the region
        region: usize,
        /// Index of the block
        block: usize,
    },
}

impl Display for IrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            IrError::UnknownNode(id) => f.write_fmt(format_args!("Node {id} is not part of this program")),
            IrError::UnknownValue(value) => {
                f.write_fmt(format_args!("Value {value:?} is not part of this program"))
            }
            IrError::UnknownRegion { node, region } => {
                f.write_fmt(format_args!("Node {node} does not have region {region}"))
            }
            IrError::UnknownBlock { node, region, block } => f.write_fmt(format_args!(
                "Region {region} of node {node} does not have block {block}"
            )),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IrError {}
