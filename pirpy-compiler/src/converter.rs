//! Conversion of program graph into a python class.
//!
//! Every node gets one definition statement in `__init__` and one call
//! expression. Blocks become pairs of nested functions: the outer one takes
//! values captured from enclosing blocks, the inner one takes the block's own
//! arguments and evaluates its nodes.

use crate::attribute::{attributes_as_args, quote};
use crate::fragment::{indent_all, render_all, Fragment};
use crate::names::{class_name, node_name, value_name};
use crate::types::type_list;
use crate::DEFAULT_INDENT_SIZE;
use alloc::{collections::BTreeSet, format, string::String, vec, vec::Vec};
use itertools::Itertools;
use pirpy_core::program::{Block, Node, Program, Region, Value};

const RET_LAMBDA: &str = "ret_lambda";

/// Definitions produced by a node together with its call expression
#[derive(Debug, Default)]
struct NodeCode {
    defines: Vec<Fragment>,
    expr: String,
}

/// Values used inside block, but not bound by it.
///
/// Block binds its positional and keyword arguments and results of its own
/// nodes. Values captured by nested blocks count as used at the node owning
/// them. Returned in order of first use, without duplicates.
#[must_use]
pub fn free_values(program: &Program, block: &Block) -> Vec<Value> {
    let mut bound: BTreeSet<Value> = block.args().iter().chain(block.kwargs().values()).copied().collect();
    for nid in block.nodes() {
        bound.extend(program.node(*nid).results());
    }
    let mut free = Vec::new();
    for nid in block.nodes() {
        let node = program.node(*nid);
        let nested = node
            .regions()
            .iter()
            .flat_map(Region::blocks)
            .flat_map(|nested| free_values(program, nested));
        for value in node.operands().iter().copied().chain(nested) {
            // Inserting marks value as seen
            if bound.insert(value) {
                free.push(value);
            }
        }
    }
    free
}

/// Converter of one program into python source
#[derive(Debug, Clone, Copy)]
pub struct Converter<'p> {
    program: &'p Program,
    indent_size: usize,
    seq_no: u64,
}

impl<'p> Converter<'p> {
    /// Converter of program, seq_no seeds the name of the generated class
    #[must_use]
    pub const fn new(program: &'p Program, seq_no: u64) -> Converter<'p> {
        Converter { program, indent_size: DEFAULT_INDENT_SIZE, seq_no }
    }

    /// Number of spaces per level of indentation
    #[must_use]
    pub const fn with_indent_size(mut self, indent_size: usize) -> Converter<'p> {
        self.indent_size = indent_size;
        self
    }

    /// Name of the generated class
    #[must_use]
    pub fn class_name(&self) -> String {
        class_name(self.seq_no)
    }

    /// Convert program into python source
    #[must_use]
    pub fn convert(&self) -> String {
        let lines = self.to_fragments();
        log::trace!(
            "Converted {} with {} nodes into {} lines",
            self.class_name(),
            self.program.num_nodes(),
            lines.len()
        );
        render_all(&lines, self.indent_size)
    }

    /// Lines of the generated class, before rendering
    #[must_use]
    pub fn to_fragments(&self) -> Vec<Fragment> {
        let module = self.convert_node_call(self.program.module());
        let mut body = self.define_init();
        body.extend(module.defines);
        body.extend(define_call(&module.expr));
        let mut lines = vec![Fragment::line(format!("class {}:", self.class_name()))];
        lines.extend(indent_all(body));
        lines
    }

    fn define_init(&self) -> Vec<Fragment> {
        let mut lines = vec![Fragment::line("def __init__(self):")];
        for nid in self.program.walk() {
            lines.push(Fragment::line(self.define_node(self.program.node(nid))).indent());
        }
        lines.push(Fragment::line(""));
        lines
    }

    fn define_node(&self, node: &Node) -> String {
        let input_types = type_list(node.operands().iter().map(|v| self.program.value_type(*v)));
        let output_types = type_list(node.results().iter().map(|v| self.program.value_type(*v)));
        let mut line = format!(
            "self.{} = self.Op({}, {}, input_types={input_types}, output_types={output_types}, attrs=dict({})",
            node_name(node),
            quote(node.name()),
            node.id(),
            attributes_as_args(node.attributes()),
        );
        if !node.regions().is_empty() {
            line.push_str(", ");
            line.push_str(&self.block_signature(node));
        }
        line.push(')');
        line
    }

    /// Names of positional and keyword arguments of every block of node,
    /// as region by block nested lists.
    fn block_signature(&self, node: &Node) -> String {
        let positional = node
            .regions()
            .iter()
            .map(|region| {
                let blocks = region.blocks().iter().map(|block| {
                    let names = block.args().iter().map(|v| quote(&value_name(self.program, *v)));
                    format!("[{}]", names.format(", "))
                });
                format!("[{}]", blocks.format(","))
            })
            .join(",");
        let keyword = node
            .regions()
            .iter()
            .map(|region| {
                let blocks = region.blocks().iter().map(|block| {
                    let names = block
                        .kwargs()
                        .iter()
                        .map(|(key, v)| format!("{}: {}", quote(key), quote(&value_name(self.program, *v))));
                    format!("{{{}}}", names.format(", "))
                });
                format!("[{}]", blocks.format(","))
            })
            .join(",");
        format!("block_positional_arg_names=[{positional}], block_keyword_arg_names=[{keyword}]")
    }

    fn convert_node_call(&self, node: &Node) -> NodeCode {
        let NodeCode { defines, expr: regions } = self.convert_regions(node);
        let mut expr = String::new();
        if !node.results().is_empty() {
            expr.push_str(&self.value_names(node.results()));
            expr.push_str(", = ");
        }
        expr.push_str(&format!("call(self.{}", node_name(node)));
        if !node.operands().is_empty() {
            expr.push_str(", ");
            expr.push_str(&self.value_names(node.operands()));
        }
        if !node.regions().is_empty() {
            expr.push_str(", blocks=");
            expr.push_str(&regions);
        }
        expr.push(')');
        NodeCode { defines, expr }
    }

    fn convert_regions(&self, node: &Node) -> NodeCode {
        let name = node_name(node);
        let mut defines = Vec::new();
        let mut regions = Vec::with_capacity(node.regions().len());
        for (i, region) in node.regions().iter().enumerate() {
            let mut blocks = Vec::with_capacity(region.blocks().len());
            for (j, block) in region.blocks().iter().enumerate() {
                // Node identifiers end in a digit, so the suffix keeps these apart
                let code = self.convert_block(block, &format!("{name}_block{i}_{j}_fn"));
                defines.extend(code.defines);
                blocks.push(code.expr);
            }
            regions.push(format!("[{}]", blocks.join(",")));
        }
        NodeCode { defines, expr: format!("[{}]", regions.join(",")) }
    }

    /// Defines function for block, expression is the tuple
    /// of function reference and captured values.
    fn convert_block(&self, block: &Block, func_name: &str) -> NodeCode {
        let mut defines = Vec::new();
        let mut body = Vec::with_capacity(block.nodes().len());
        for nid in block.nodes() {
            let node = self.program.node(*nid);
            let code = self.convert_node_call(node);
            defines.extend(code.defines);
            if node.is_yield() {
                body.push(Fragment::line(format!("return {}", code.expr)));
            } else {
                body.push(Fragment::line(code.expr));
            }
        }
        if body.is_empty() {
            body.push(Fragment::line("pass"));
        }

        let mut lambda = vec![Fragment::line(format!("def {RET_LAMBDA}({}):", self.block_params(block)))];
        lambda.extend(indent_all(body));

        let free = self.value_names(&free_values(self.program, block));
        let (params, captures) = if free.is_empty() {
            (String::new(), String::from(","))
        } else {
            (format!(", {free}"), format!(", {free}"))
        };
        defines.push(Fragment::line(format!("def {func_name}(self, call{params}):")));
        defines.extend(indent_all(lambda));
        defines.push(Fragment::line(format!("return {RET_LAMBDA}")).indent());
        defines.push(Fragment::line(""));
        NodeCode { defines, expr: format!("(self.{func_name}{captures})") }
    }

    /// Parameters of the inner block function, keyword arguments are keyword only
    fn block_params(&self, block: &Block) -> String {
        let args = self.value_names(block.args());
        let kwargs = block.kwargs().values().map(|v| value_name(self.program, *v)).join(", ");
        match (args.is_empty(), kwargs.is_empty()) {
            (_, true) => args,
            (true, false) => format!("*, {kwargs}"),
            (false, false) => format!("{args}, *, {kwargs}"),
        }
    }

    fn value_names(&self, values: &[Value]) -> String {
        values.iter().map(|v| value_name(self.program, *v)).join(", ")
    }
}

fn define_call(module_expr: &str) -> Vec<Fragment> {
    vec![
        Fragment::line("def __call__(self, call, *args, **kwargs):"),
        Fragment::line("self.SetArgs(args)").indent(),
        Fragment::line("self.SetKeywordArgs(kwargs)").indent(),
        Fragment::line(format!("return {module_expr}")).indent(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pirpy_core::{
        error::IrError,
        place::Place,
        program::NodeDesc,
        types::Type,
    };

    fn find_line<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
        text.lines().map(str::trim_start).find(|line| line.starts_with(prefix))
    }

    #[test]
    fn node_definition_and_call() -> Result<(), IrError> {
        let mut program = Program::new();
        let body = program.module_block();
        let a = program.free_value(Type::Float32);
        let b = program.free_value(Type::Float32);
        let nop = program.append(body, NodeDesc::new("demo.nop"))?;
        for _ in 0..5 {
            program.append(body, NodeDesc::new("demo.nop"))?;
        }
        let add = program.append(body, NodeDesc::new("demo.add").operands(&[a, b]).results([Type::Float32]))?;
        assert_eq!(add.id(), 7);

        let converter = Converter::new(&program, 0);
        assert_eq!(
            converter.define_node(program.node(add)),
            "self.add_7 = self.Op(\"demo.add\", 7, input_types=[self.Float32Type(), self.Float32Type()], output_types=[self.Float32Type()], attrs=dict())"
        );
        let (a, b) = (value_name(&program, a), value_name(&program, b));
        assert_eq!(converter.convert_node_call(program.node(add)).expr, format!("add_7_r0, = call(self.add_7, {a}, {b})"));
        assert_eq!(converter.convert_node_call(program.node(nop)).expr, "call(self.nop_1)");
        Ok(())
    }

    #[test]
    fn attributes_in_definition() -> Result<(), IrError> {
        let mut program = Program::new();
        let body = program.module_block();
        let x = program.free_value(Type::tensor(&[2, 3], Type::Float32));
        let sum = program.append(
            body,
            NodeDesc::new("pd_op.sum")
                .operands(&[x])
                .results([Type::tensor(&[2], Type::Float32)])
                .attr("axis", -1i32)
                .attr("place", Place::gpu(2))
                .attr("op_callstack", "model.py:12"),
        )?;
        let line = Converter::new(&program, 0).define_node(program.node(sum));
        assert_eq!(
            line,
            "self.sum_1 = self.Op(\"pd_op.sum\", 1, input_types=[self.DenseTensorType([2, 3], self.Float32Type())], output_types=[self.DenseTensorType([2], self.Float32Type())], attrs=dict(axis=self.Int32Attribute(-1), place=self.PlaceAttribute(\"gpu\", 2)))"
        );
        Ok(())
    }

    #[test]
    fn whole_program() -> Result<(), IrError> {
        let mut program = Program::new();
        let body = program.module_block();
        let x = program.append(body, NodeDesc::new("pd_op.data").results([Type::Float32]).attr("name", "x"))?;
        let x = program.node(x).results()[0];
        let relu = program.append(body, NodeDesc::new("pd_op.relu").operands(&[x]).results([Type::Float32]))?;
        let y = program.node(relu).results()[0];
        program.append(body, NodeDesc::new("cf.yield").operands(&[y]))?;

        let text = Converter::new(&program, 3).convert();
        let expected = "class PirProgram_3:
  def __init__(self):
    self.module_0 = self.Op(\"builtin.module\", 0, input_types=[], output_types=[], attrs=dict(), block_positional_arg_names=[[[]]], block_keyword_arg_names=[[{}]])
    self.data_1 = self.Op(\"pd_op.data\", 1, input_types=[], output_types=[self.Float32Type()], attrs=dict(name=self.StrAttribute(\"x\")))
    self.relu_2 = self.Op(\"pd_op.relu\", 2, input_types=[self.Float32Type()], output_types=[self.Float32Type()], attrs=dict())
    self.yield_3 = self.Op(\"cf.yield\", 3, input_types=[self.Float32Type()], output_types=[], attrs=dict())

  def module_0_block0_0_fn(self, call):
    def ret_lambda():
      data_1_r0, = call(self.data_1)
      relu_2_r0, = call(self.relu_2, data_1_r0)
      return call(self.yield_3, relu_2_r0)
    return ret_lambda

  def __call__(self, call, *args, **kwargs):
    self.SetArgs(args)
    self.SetKeywordArgs(kwargs)
    return call(self.module_0, blocks=[[(self.module_0_block0_0_fn,)]])
";
        assert_eq!(text, expected);
        assert_eq!(Converter::new(&program, 3).with_indent_size(4).convert().lines().nth(1), Some("    def __init__(self):"));
        Ok(())
    }

    #[test]
    fn nested_blocks() -> Result<(), IrError> {
        let mut program = Program::new();
        let body = program.module_block();
        let cond = program.free_value(Type::Bool);
        let outer = program.free_value(Type::Float32);
        let node = program.append(body, NodeDesc::new("pd_op.if").operands(&[cond]).results([Type::Float32]).regions(2))?;
        let then_block = program.add_block(node, 0)?;
        let else_block = program.add_block(node, 1)?;
        let neg = program.append(then_block, NodeDesc::new("pd_op.neg").operands(&[outer]).results([Type::Float32]))?;
        let neg_r = program.node(neg).results()[0];
        program.append(then_block, NodeDesc::new("cf.yield").operands(&[neg_r]))?;
        program.append(else_block, NodeDesc::new("cf.yield").operands(&[outer]))?;

        let outer = value_name(&program, outer);
        let cond = value_name(&program, cond);
        let text = Converter::new(&program, 0).convert();
        assert_eq!(find_line(&text, "def if_1_block0_0_fn"), Some(format!("def if_1_block0_0_fn(self, call, {outer}):").as_str()));
        assert_eq!(find_line(&text, "def if_1_block1_0_fn"), Some(format!("def if_1_block1_0_fn(self, call, {outer}):").as_str()));
        assert_eq!(find_line(&text, "return call(self.yield_3"), Some("return call(self.yield_3, neg_2_r0)"));
        assert_eq!(
            find_line(&text, "if_1_r0"),
            Some(
                format!("if_1_r0, = call(self.if_1, {cond}, blocks=[[(self.if_1_block0_0_fn, {outer})],[(self.if_1_block1_0_fn, {outer})]])")
                    .as_str()
            )
        );
        // Nested functions are defined before the block using them
        let nested = text.find("def if_1_block1_0_fn").unwrap();
        let module = text.find("def module_0_block0_0_fn").unwrap();
        assert!(nested < module);
        assert!(find_line(&text, "self.if_1 = ").unwrap().ends_with(
            "block_positional_arg_names=[[[]],[[]]], block_keyword_arg_names=[[{}],[{}]])"
        ));
        Ok(())
    }

    #[test]
    fn free_values_of_blocks() -> Result<(), IrError> {
        let mut program = Program::new();
        let body = program.module_block();
        let a = program.free_value(Type::Float32);
        let b = program.free_value(Type::Float32);
        let p = program.append(body, NodeDesc::new("test.p").results([Type::Float32]))?;
        let p = program.node(p).results()[0];
        let loop_node = program.append(body, NodeDesc::new("test.loop").operands(&[p]).regions(1))?;
        let inner = program.add_block(loop_node, 0)?;
        let i = program.add_block_arg(inner, Type::Int64)?;
        let k = program.add_block_kwarg(inner, "scale", Type::Float32)?;
        let q = program.append(inner, NodeDesc::new("test.q").operands(&[i, b, a]).results([Type::Float32]))?;
        let q = program.node(q).results()[0];
        let deeper = program.append(inner, NodeDesc::new("test.scope").regions(1))?;
        let deeper = program.add_block(deeper, 0)?;
        let r = program.append(deeper, NodeDesc::new("test.r").operands(&[q, p, k, b]).results([Type::Float32]))?;
        let r = program.node(r).results()[0];
        program.append(deeper, NodeDesc::new("cf.yield").operands(&[r]))?;

        // Bound values never escape, captures propagate outward
        assert_eq!(free_values(&program, program.block(deeper)?), vec![q, p, k, b]);
        assert_eq!(free_values(&program, program.block(inner)?), vec![b, a, p]);
        assert_eq!(free_values(&program, program.block(body)?), vec![b, a]);
        Ok(())
    }

    #[test]
    fn block_arguments() -> Result<(), IrError> {
        let mut program = Program::new();
        let body = program.module_block();
        let node = program.append(body, NodeDesc::new("test.while").regions(1))?;
        let block = program.add_block(node, 0)?;
        let converter = Converter::new(&program, 0);
        assert_eq!(converter.block_params(program.block(block)?), "");

        let k = program.add_block_kwarg(block, "k", Type::Int32)?;
        let converter = Converter::new(&program, 0);
        let k = value_name(&program, k);
        assert_eq!(converter.block_params(program.block(block)?), format!("*, {k}"));

        let i = program.add_block_arg(block, Type::Int32)?;
        let converter = Converter::new(&program, 0);
        let i = value_name(&program, i);
        assert_eq!(converter.block_params(program.block(block)?), format!("{i}, *, {k}"));
        assert!(converter
            .define_node(program.node(node))
            .ends_with(&format!("block_positional_arg_names=[[[\"{i}\"]]], block_keyword_arg_names=[[{{\"k\": \"{k}\"}}]])")));

        let text = converter.convert();
        assert_eq!(find_line(&text, "pass"), Some("pass"));
        Ok(())
    }

    #[test]
    fn regions_added_later() -> Result<(), IrError> {
        let mut program = Program::new();
        let body = program.module_block();
        let node = program.append(body, NodeDesc::new("test.case"))?;
        assert_eq!(program.add_region(node)?, 0);
        assert_eq!(program.add_region(node)?, 1);
        program.add_block(node, 1)?;

        let converter = Converter::new(&program, 0);
        assert!(converter
            .define_node(program.node(node))
            .ends_with("block_positional_arg_names=[[],[[]]], block_keyword_arg_names=[[],[{}]])"));
        assert_eq!(
            converter.convert_node_call(program.node(node)).expr,
            "call(self.case_1, blocks=[[],[(self.case_1_block1_0_fn,)]])"
        );
        let text = converter.convert();
        assert_eq!(find_line(&text, "def case_1_block1_0_fn"), Some("def case_1_block1_0_fn(self, call):"));
        assert!(find_line(&text, "def case_1_block0_").is_none());
        Ok(())
    }

    #[test]
    fn block_names_never_shadow_nodes() -> Result<(), IrError> {
        let mut program = Program::new();
        let body = program.module_block();
        let x = program.append(body, NodeDesc::new("p.x").regions(2))?;
        for _ in 0..11 {
            program.add_block(x, 1)?;
        }
        while program.num_nodes() < 10 {
            program.append(body, NodeDesc::new("demo.nop"))?;
        }
        let lookalike = program.append(body, NodeDesc::new("p.x_1_block1"))?;
        assert_eq!(node_name(program.node(lookalike)), "x_1_block1_10");

        let text = Converter::new(&program, 0).convert();
        let functions: BTreeSet<&str> = text
            .lines()
            .filter_map(|line| line.trim_start().strip_prefix("def ")?.split_once('('))
            .map(|(name, _)| name)
            .collect();
        let nodes: BTreeSet<&str> = text
            .lines()
            .filter_map(|line| line.trim_start().strip_prefix("self.")?.split_once(" = self.Op("))
            .map(|(name, _)| name)
            .collect();
        assert!(functions.contains("x_1_block1_10_fn"));
        assert!(nodes.contains("x_1_block1_10"));
        assert!(functions.is_disjoint(&nodes));
        Ok(())
    }
}
