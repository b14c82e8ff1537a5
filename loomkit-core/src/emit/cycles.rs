//! Cycle detection strategy: rather than a per-field depth-first
//! search repeated at emission time, the reference graph among all
//! named schema components is built once (one node per component
//! `$ref`, one edge per direct schema-to-schema reference) and
//! partitioned into strongly connected components with Tarjan's
//! algorithm. Membership in a non-trivial SCC is then a cheap lookup
//! at emission time instead of a re-derivation.
//!
//! A deterministic DFS over the same graph, run once up front, picks
//! exactly one back-edge per minimal cycle to become the `S.lazy`
//! edge, so each declaration is emitted exactly once and at least
//! one edge of every cycle uses `S.lazy`, without the emitter itself
//! needing to track a live traversal stack.

use std::collections::HashSet;

use indexmap::IndexSet;
use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;
use rustc_hash::FxHashMap;

use crate::ir::{AdditionalProperties, IrModel, SchemaKind, SchemaObject};

pub struct CycleAnalysis {
    in_cycle: HashSet<String>,
    lazy_edges: HashSet<(String, String)>,
}

impl CycleAnalysis {
    pub fn build(ir: &IrModel) -> Self {
        let refs: Vec<&str> = ir.schemas().map(|(ref_, _)| ref_).collect();
        let index_of: FxHashMap<&str, usize> = refs.iter().enumerate().map(|(i, &r)| (r, i)).collect();

        let mut graph = DiGraph::<&str, ()>::new();
        let nodes: Vec<_> = refs.iter().map(|&r| graph.add_node(r)).collect();
        let mut edges: Vec<Vec<usize>> = vec![Vec::new(); refs.len()];
        for (ref_, schema) in ir.schemas() {
            let from = index_of[ref_];
            let mut targets = IndexSet::new();
            collect_refs(schema, &mut targets);
            for target in &targets {
                if let Some(&to) = index_of.get(target.as_str()) {
                    graph.add_edge(nodes[from], nodes[to], ());
                    edges[from].push(to);
                }
            }
        }

        let mut in_cycle = HashSet::new();
        for scc in tarjan_scc(&graph) {
            if scc.len() > 1 {
                for node in &scc {
                    in_cycle.insert(graph[*node].to_string());
                }
            } else {
                let idx = scc[0].index();
                if edges[idx].contains(&idx) {
                    in_cycle.insert(graph[scc[0]].to_string());
                }
            }
        }

        let lazy_edges = find_lazy_edges(&refs, &edges, &in_cycle);

        Self { in_cycle, lazy_edges }
    }

    /// Whether `ref_` belongs to some non-trivial strongly connected
    /// component of the schema reference graph. Every member of such
    /// a component gets the `AnyObjectSchema`/`AnySchema` type
    /// annotation at top-level emission, not just the one declaration
    /// whose body happens to contain the lazy back-edge.
    pub fn is_in_cycle(&self, ref_: &str) -> bool {
        self.in_cycle.contains(ref_)
    }

    /// Whether the direct reference `from -> to` is the single
    /// back-edge chosen to break `from`'s cycle.
    pub fn is_lazy_edge(&self, from: &str, to: &str) -> bool {
        self.lazy_edges.contains(&(from.to_string(), to.to_string()))
    }
}

fn find_lazy_edges(refs: &[&str], edges: &[Vec<usize>], in_cycle: &HashSet<String>) -> HashSet<(String, String)> {
    let mut lazy = HashSet::new();
    let mut visited = vec![false; refs.len()];
    let mut on_stack = vec![false; refs.len()];

    for start in 0..refs.len() {
        if !visited[start] && in_cycle.contains(refs[start]) {
            visit(start, refs, edges, in_cycle, &mut visited, &mut on_stack, &mut lazy);
        }
    }
    lazy
}

#[allow(clippy::too_many_arguments)]
fn visit(
    node: usize,
    refs: &[&str],
    edges: &[Vec<usize>],
    in_cycle: &HashSet<String>,
    visited: &mut [bool],
    on_stack: &mut [bool],
    lazy: &mut HashSet<(String, String)>,
) {
    visited[node] = true;
    on_stack[node] = true;
    for &next in &edges[node] {
        if !in_cycle.contains(refs[next]) {
            continue;
        }
        if on_stack[next] {
            lazy.insert((refs[node].to_string(), refs[next].to_string()));
        } else if !visited[next] {
            visit(next, refs, edges, in_cycle, visited, on_stack, lazy);
        }
    }
    on_stack[node] = false;
}

/// Collects every `$ref` directly reachable from `schema` without
/// crossing another `$ref` (a `$ref` node terminates the walk, per
/// the IR's no-cycles-without-a-`$ref` invariant).
fn collect_refs(schema: &SchemaObject, out: &mut IndexSet<String>) {
    match &schema.kind {
        SchemaKind::Ref(target) => {
            out.insert(target.clone());
        }
        SchemaKind::Array(array) => array.items.iter().for_each(|item| collect_refs(item, out)),
        SchemaKind::Tuple(tuple) => tuple.items.iter().for_each(|item| collect_refs(item, out)),
        SchemaKind::Composite(composite) => composite.items.iter().for_each(|item| collect_refs(item, out)),
        SchemaKind::Object(object) => {
            object.properties.values().for_each(|prop| collect_refs(prop, out));
            if let Some(AdditionalProperties::Schema(extra)) = &object.additional_properties {
                collect_refs(extra, out);
            }
        }
        _ => {}
    }
}
