use pirpy::{convert, free_values, node_name, Block, BlockRef, IrError, NodeDesc, Program, Type, Value};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::BTreeSet;

const NAMES: [&str; 7] = ["pd_op.add", "pd_op.matmul", "pd_op.if", "test.op", "cinn_op.3d", "custom-op", "pd_op.relu"];
const SEEDS: u64 = 64;

fn build_block(
    program: &mut Program,
    rng: &mut SmallRng,
    block: BlockRef,
    mut scope: Vec<Value>,
    depth: usize,
    budget: &mut usize,
) -> Result<(), IrError> {
    for _ in 0..rng.gen_range(0..3) {
        scope.push(program.add_block_arg(block, Type::Float32)?);
    }
    for k in 0..rng.gen_range(0..2) {
        scope.push(program.add_block_kwarg(block, format!("k{k}"), Type::Int64)?);
    }
    for _ in 0..rng.gen_range(0..5) {
        if *budget == 0 {
            break;
        }
        *budget -= 1;
        let num_operands = if scope.is_empty() { 0 } else { rng.gen_range(0..3) };
        let operands: Vec<Value> = (0..num_operands).map(|_| scope[rng.gen_range(0..scope.len())]).collect();
        let num_regions = if depth < 3 && rng.gen_bool(0.3) { rng.gen_range(1..3) } else { 0 };
        let num_results = rng.gen_range(0..3);
        let desc = NodeDesc::new(NAMES[rng.gen_range(0..NAMES.len())])
            .operands(&operands)
            .results((0..num_results).map(|_| Type::Float32))
            .attr("axis", rng.gen_range(-3i64..3))
            .regions(num_regions);
        let node = program.append(block, desc)?;
        for region in 0..num_regions {
            for _ in 0..rng.gen_range(1..3) {
                let nested = program.add_block(node, region)?;
                build_block(program, rng, nested, scope.clone(), depth + 1, budget)?;
            }
        }
        scope.extend_from_slice(program.node(node).results());
    }
    if !scope.is_empty() && rng.gen_bool(0.5) {
        let value = scope[rng.gen_range(0..scope.len())];
        program.append(block, NodeDesc::new("cf.yield").operands(&[value]))?;
    }
    Ok(())
}

fn random_program(seed: u64) -> Result<Program, IrError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut program = Program::new();
    let body = program.module_block();
    let mut budget = 40;
    build_block(&mut program, &mut rng, body, Vec::new(), 0, &mut budget)?;
    Ok(program)
}

fn all_blocks(program: &Program) -> Vec<&Block> {
    program
        .walk()
        .into_iter()
        .flat_map(move |nid| program.node(nid).regions().iter().flat_map(|region| region.blocks()))
        .collect()
}

fn uses(program: &Program, block: &Block, out: &mut Vec<Value>) {
    for nid in block.nodes() {
        let node = program.node(*nid);
        out.extend_from_slice(node.operands());
        for nested in node.regions().iter().flat_map(|region| region.blocks()) {
            uses(program, nested, out);
        }
    }
}

fn defined(program: &Program, block: &Block, out: &mut BTreeSet<Value>) {
    out.extend(block.args());
    out.extend(block.kwargs().values());
    for nid in block.nodes() {
        let node = program.node(*nid);
        out.extend(node.results());
        for nested in node.regions().iter().flat_map(|region| region.blocks()) {
            defined(program, nested, out);
        }
    }
}

fn value_refs(expr: &str) -> impl Iterator<Item = &str> {
    expr.split(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_')).filter(|token| {
        token.starts_with("arg_")
            || token
                .rsplit_once("_r")
                .is_some_and(|(_, index)| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
    })
}

fn params(line: &str) -> Vec<String> {
    let start = line.find('(').map_or(0, |i| i + 1);
    let end = line.rfind(')').unwrap_or(line.len());
    line[start..end]
        .split(',')
        .map(|param| param.trim().trim_start_matches('*').trim().to_string())
        .filter(|param| !param.is_empty())
        .collect()
}

#[test]
fn deterministic() -> Result<(), IrError> {
    for seed in 0..SEEDS {
        let program = random_program(seed)?;
        assert_eq!(convert(&program, seed), convert(&program, seed));
        assert_eq!(convert(&random_program(seed)?, seed), convert(&program, seed));
    }
    Ok(())
}

#[test]
fn unique_identifiers() -> Result<(), IrError> {
    for seed in 0..SEEDS {
        let program = random_program(seed)?;
        let names: BTreeSet<String> = program.walk().into_iter().map(|nid| node_name(program.node(nid))).collect();
        assert_eq!(names.len(), program.num_nodes());
        let text = convert(&program, 0);
        let defined: Vec<&str> = text
            .lines()
            .filter_map(|line| line.trim_start().strip_prefix("self.")?.split_once(" = self.Op("))
            .map(|(name, _)| name)
            .collect();
        assert_eq!(defined.len(), program.num_nodes());
        assert_eq!(defined.iter().collect::<BTreeSet<_>>().len(), program.num_nodes());
    }
    Ok(())
}

#[test]
fn free_values_match_scopes() -> Result<(), IrError> {
    for seed in 0..SEEDS {
        let program = random_program(seed)?;
        for block in all_blocks(&program) {
            let mut used = Vec::new();
            uses(&program, block, &mut used);
            let mut bound = BTreeSet::new();
            defined(&program, block, &mut bound);
            let mut expected = Vec::new();
            for value in used {
                if !bound.contains(&value) && !expected.contains(&value) {
                    expected.push(value);
                }
            }
            assert_eq!(free_values(&program, block), expected, "seed {seed}");
        }
    }
    Ok(())
}

/// Every value used by a statement is a parameter of the enclosing functions
/// or was assigned by an earlier statement of the same function.
#[test]
fn definition_before_use() -> Result<(), IrError> {
    for seed in 0..SEEDS {
        let program = random_program(seed)?;
        let text = convert(&program, seed);
        let defined_nodes: BTreeSet<&str> = text
            .lines()
            .filter_map(|line| line.trim_start().strip_prefix("self.")?.split_once(" = self.Op("))
            .map(|(name, _)| name)
            .collect();
        let mut scope: BTreeSet<String> = BTreeSet::new();
        for line in text.lines() {
            let depth = line.len() - line.trim_start().len();
            let line = line.trim_start();
            match depth {
                2 => scope = params(line).into_iter().collect(),
                4 if line.starts_with("def ret_lambda(") => scope.extend(params(line)),
                4 if line.starts_with("return call(") => {
                    // Only the module is called from __call__
                    assert_eq!(value_refs(line).count(), 0, "seed {seed}: {line}");
                }
                6 => {
                    let (results, expr) = match line.split_once(", = ") {
                        Some((results, expr)) => (Some(results), expr),
                        None => (None, line),
                    };
                    for value in value_refs(expr) {
                        assert!(scope.contains(value), "seed {seed}: {value} used before definition in {line}");
                        if let Some((node, _)) = value.rsplit_once("_r") {
                            if !value.starts_with("arg_") {
                                assert!(defined_nodes.contains(node), "seed {seed}: {node} is not defined");
                            }
                        }
                    }
                    if let Some(results) = results {
                        scope.extend(results.split(", ").map(str::to_string));
                    }
                }
                _ => {}
            }
        }
    }
    Ok(())
}
