//! Program graph. Nodes and values live in arenas owned by [`Program`],
//! regions and blocks are owned by their node.

use crate::attribute::Attribute;
use crate::error::IrError;
use crate::types::Type;
use alloc::{collections::BTreeMap, string::String, vec, vec::Vec};
use core::fmt::{Display, Formatter};

/// Qualified name of the module node
pub const MODULE_NODE_NAME: &str = "builtin.module";

/// Qualified name of the structural terminator of blocks
pub const YIELD_NODE_NAME: &str = "cf.yield";

/// Id of node, unique within one program
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Numeric identity of the node
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Index into the node arena
    #[must_use]
    pub const fn i(self) -> usize {
        self.0 as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("{}", self.0))
    }
}

/// Reference to a value, either produced by a node or free
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value(u32);

impl Value {
    /// Identity of the value within its program
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    const fn i(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Result { node: NodeId, index: usize },
    Free,
}

#[derive(Clone, Debug, PartialEq)]
struct ValueInfo {
    source: Source,
    ty: Type,
}

/// Address of a block inside a program
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockRef {
    /// Node owning the region
    pub node: NodeId,
    /// Index of region in node
    pub region: usize,
    /// Index of block in region
    pub block: usize,
}

/// Ordered list of nodes with positional and keyword arguments
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    nodes: Vec<NodeId>,
    args: Vec<Value>,
    kwargs: BTreeMap<String, Value>,
}

impl Block {
    /// Nodes in this block, in order
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Positional arguments of this block
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Keyword arguments of this block, sorted by keyword
    #[must_use]
    pub const fn kwargs(&self) -> &BTreeMap<String, Value> {
        &self.kwargs
    }
}

/// Ordered list of blocks
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    blocks: Vec<Block>,
}

impl Region {
    /// Blocks in this region, in order
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

/// Single operation in the IR
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    name: String,
    operands: Vec<Value>,
    results: Vec<Value>,
    attributes: BTreeMap<String, Attribute>,
    regions: Vec<Region>,
}

impl Node {
    /// Id of this node
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Qualified name, e.g. `pd_op.add`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operands of this node, in order
    #[must_use]
    pub fn operands(&self) -> &[Value] {
        &self.operands
    }

    /// Results of this node, in order
    #[must_use]
    pub fn results(&self) -> &[Value] {
        &self.results
    }

    /// Attributes of this node, sorted by name
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, Attribute> {
        &self.attributes
    }

    /// Regions of this node, in order
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Is this node the structural terminator of its block?
    #[must_use]
    pub fn is_yield(&self) -> bool {
        self.name == YIELD_NODE_NAME
    }
}

/// Description of node to append to a block
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDesc {
    name: String,
    operands: Vec<Value>,
    result_types: Vec<Type>,
    attributes: BTreeMap<String, Attribute>,
    num_regions: usize,
}

impl NodeDesc {
    /// Node with given qualified name and nothing else
    #[must_use]
    pub fn new(name: impl Into<String>) -> NodeDesc {
        NodeDesc {
            name: name.into(),
            operands: Vec::new(),
            result_types: Vec::new(),
            attributes: BTreeMap::new(),
            num_regions: 0,
        }
    }

    /// Set operands
    #[must_use]
    pub fn operands(mut self, operands: &[Value]) -> NodeDesc {
        self.operands = operands.to_vec();
        self
    }

    /// Set types of results
    #[must_use]
    pub fn results(mut self, result_types: impl IntoIterator<Item = Type>) -> NodeDesc {
        self.result_types = result_types.into_iter().collect();
        self
    }

    /// Add attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, attribute: impl Into<Attribute>) -> NodeDesc {
        self.attributes.insert(name.into(), attribute.into());
        self
    }

    /// Set number of (initially empty) regions
    #[must_use]
    pub const fn regions(mut self, num_regions: usize) -> NodeDesc {
        self.num_regions = num_regions;
        self
    }
}

/// Program, root of the graph. Owns exactly one module node,
/// which has one region with one block.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    nodes: Vec<Node>,
    values: Vec<ValueInfo>,
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    /// Empty program with module node
    #[must_use]
    pub fn new() -> Program {
        let module = Node {
            id: NodeId(0),
            name: MODULE_NODE_NAME.into(),
            operands: Vec::new(),
            results: Vec::new(),
            attributes: BTreeMap::new(),
            regions: vec![Region { blocks: vec![Block::default()] }],
        };
        Program { nodes: vec![module], values: Vec::new() }
    }

    /// Module node
    #[must_use]
    pub fn module(&self) -> &Node {
        &self.nodes[0]
    }

    /// Body block of module
    #[must_use]
    pub const fn module_block(&self) -> BlockRef {
        BlockRef { node: NodeId(0), region: 0, block: 0 }
    }

    /// Number of nodes, including the module
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Get node
    /// # Panics
    /// Panics if node is not part of this program.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.i()]
    }

    /// Get node, returns error if node is not part of this program
    pub fn get_node(&self, id: NodeId) -> Result<&Node, IrError> {
        self.nodes.get(id.i()).ok_or(IrError::UnknownNode(id))
    }

    /// Get block
    pub fn block(&self, block: BlockRef) -> Result<&Block, IrError> {
        let node = self.get_node(block.node)?;
        node.regions
            .get(block.region)
            .ok_or(IrError::UnknownRegion { node: block.node, region: block.region })?
            .blocks
            .get(block.block)
            .ok_or(IrError::UnknownBlock { node: block.node, region: block.region, block: block.block })
    }

    fn block_mut(&mut self, block: BlockRef) -> Result<&mut Block, IrError> {
        let node = self.nodes.get_mut(block.node.i()).ok_or(IrError::UnknownNode(block.node))?;
        node.regions
            .get_mut(block.region)
            .ok_or(IrError::UnknownRegion { node: block.node, region: block.region })?
            .blocks
            .get_mut(block.block)
            .ok_or(IrError::UnknownBlock { node: block.node, region: block.region, block: block.block })
    }

    /// Type of value
    /// # Panics
    /// Panics if value is not part of this program.
    #[must_use]
    pub fn value_type(&self, value: Value) -> &Type {
        &self.values[value.i()].ty
    }

    /// Node producing value and index of value in its results.
    /// Returns None for free values (including block arguments).
    #[must_use]
    pub fn producer(&self, value: Value) -> Option<(NodeId, usize)> {
        match self.values.get(value.i())?.source {
            Source::Result { node, index } => Some((node, index)),
            Source::Free => None,
        }
    }

    fn push_value(&mut self, source: Source, ty: Type) -> Value {
        let value = Value(self.values.len() as u32);
        self.values.push(ValueInfo { source, ty });
        value
    }

    /// New free value, not produced by any node
    pub fn free_value(&mut self, ty: Type) -> Value {
        self.push_value(Source::Free, ty)
    }

    /// Add empty region to node, returns index of the new region
    pub fn add_region(&mut self, node: NodeId) -> Result<usize, IrError> {
        let node = self.nodes.get_mut(node.i()).ok_or(IrError::UnknownNode(node))?;
        node.regions.push(Region::default());
        Ok(node.regions.len() - 1)
    }

    /// Add empty block to region of node
    pub fn add_block(&mut self, node: NodeId, region: usize) -> Result<BlockRef, IrError> {
        let blocks = &mut self
            .nodes
            .get_mut(node.i())
            .ok_or(IrError::UnknownNode(node))?
            .regions
            .get_mut(region)
            .ok_or(IrError::UnknownRegion { node, region })?
            .blocks;
        blocks.push(Block::default());
        Ok(BlockRef { node, region, block: blocks.len() - 1 })
    }

    /// Add positional argument to block
    pub fn add_block_arg(&mut self, block: BlockRef, ty: Type) -> Result<Value, IrError> {
        self.block(block)?;
        let value = self.free_value(ty);
        self.block_mut(block)?.args.push(value);
        Ok(value)
    }

    /// Add keyword argument to block, replaces argument with the same keyword
    pub fn add_block_kwarg(
        &mut self,
        block: BlockRef,
        key: impl Into<String>,
        ty: Type,
    ) -> Result<Value, IrError> {
        self.block(block)?;
        let value = self.free_value(ty);
        self.block_mut(block)?.kwargs.insert(key.into(), value);
        Ok(value)
    }

    /// Append node at the end of block
    pub fn append(&mut self, block: BlockRef, desc: NodeDesc) -> Result<NodeId, IrError> {
        self.block(block)?;
        if let Some(operand) = desc.operands.iter().find(|v| v.i() >= self.values.len()) {
            return Err(IrError::UnknownValue(*operand));
        }
        let id = NodeId(self.nodes.len() as u32);
        let results = desc
            .result_types
            .into_iter()
            .enumerate()
            .map(|(index, ty)| self.push_value(Source::Result { node: id, index }, ty))
            .collect();
        self.nodes.push(Node {
            id,
            name: desc.name,
            operands: desc.operands,
            results,
            attributes: desc.attributes,
            regions: vec![Region::default(); desc.num_regions],
        });
        self.block_mut(block)?.nodes.push(id);
        Ok(id)
    }

    /// All nodes in pre-order. Module comes first, nested regions are visited
    /// before the next node of the enclosing block.
    #[must_use]
    pub fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut params = vec![NodeId(0)];
        while let Some(nid) = params.pop() {
            order.push(nid);
            for region in self.nodes[nid.i()].regions.iter().rev() {
                for block in region.blocks.iter().rev() {
                    params.extend(block.nodes.iter().rev());
                }
            }
        }
        order
    }
}
