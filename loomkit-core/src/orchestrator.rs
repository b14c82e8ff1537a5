//! Resolves a deterministic plugin order from declared dependencies,
//! then drives each plugin's handler and the `before`/`after`
//! broadcasts around the parse/IR walk.

use indexmap::IndexMap;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use crate::config::PluginConfig;
use crate::context::Context;
use crate::error::ConfigError;
use crate::events::{Event, EventBus, Payload};
use crate::plugin::Plugin;

/// Computes `pluginOrder` from each plugin's declared `dependencies`
/// via a deterministic topological sort: ties are broken by the
/// plugin's position in `config.plugins`' insertion order, so output
/// order is reproducible run-to-run. A dependency cycle is a
/// [`ConfigError::DependencyCycle`] naming the cycle's members in
/// cycle order, raised before any plugin is instantiated.
pub fn resolve_plugin_order(plugins: &IndexMap<String, PluginConfig>) -> Result<Vec<String>, ConfigError> {
    let names: Vec<&str> = plugins.keys().map(String::as_str).collect();
    let index_of: FxHashMap<&str, usize> = names.iter().enumerate().map(|(i, &n)| (n, i)).collect();

    let mut indegree = vec![0usize; names.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); names.len()];
    for (name, config) in plugins {
        let plugin_idx = index_of[name.as_str()];
        for dependency in &config.dependencies {
            let Some(&dependency_idx) = index_of.get(dependency.as_str()) else {
                return Err(ConfigError::MissingDependency { plugin: name.clone(), dependency: dependency.clone() });
            };
            indegree[plugin_idx] += 1;
            dependents[dependency_idx].push(plugin_idx);
        }
    }

    let mut order = Vec::with_capacity(names.len());
    let mut emitted = vec![false; names.len()];
    let mut remaining_indegree = indegree.clone();

    loop {
        let Some(next) = (0..names.len()).find(|&i| !emitted[i] && remaining_indegree[i] == 0) else { break };
        emitted[next] = true;
        order.push(names[next].to_string());
        for &dependent in &dependents[next] {
            remaining_indegree[dependent] -= 1;
        }
    }

    if order.len() < names.len() {
        let cycle = find_cycle(&names, plugins, &index_of);
        return Err(ConfigError::DependencyCycle { cycle });
    }

    Ok(order)
}

fn find_cycle(
    names: &[&str],
    plugins: &IndexMap<String, PluginConfig>,
    index_of: &FxHashMap<&str, usize>,
) -> Vec<String> {
    let mut graph = DiGraph::<&str, ()>::new();
    let nodes: Vec<NodeIndex> = names.iter().map(|&n| graph.add_node(n)).collect();
    for (name, config) in plugins {
        let plugin_idx = index_of[name.as_str()];
        for dependency in &config.dependencies {
            if let Some(&dependency_idx) = index_of.get(dependency.as_str()) {
                graph.add_edge(nodes[dependency_idx], nodes[plugin_idx], ());
            }
        }
    }
    tarjan_scc(&graph)
        .into_iter()
        .find(|scc| scc.len() > 1)
        .map(|scc| scc.into_iter().map(|idx| graph[idx].to_string()).collect())
        .unwrap_or_default()
}

/// Drives the fixed instantiate/broadcast sequence over an
/// already-ordered plugin list: each plugin's `handler` subscribes to
/// the bus once, in `plugin_order`, then `before`, every component and
/// operation event, and `after` fire in turn. `plugins` need not be
/// sorted itself; `plugin_order` (from [`resolve_plugin_order`])
/// dictates invocation order, and a plugin named in `plugin_order` with
/// no matching entry in `plugins` is silently skipped, the same
/// tolerance `resolve_plugin_order` already affords a config naming a
/// plugin that isn't actually registered for this run.
pub fn run(
    ctx: &Context,
    bus: &mut EventBus,
    plugins: &[Box<dyn Plugin>],
    plugin_order: &[String],
) -> Result<(), crate::error::LoomError> {
    let by_name: FxHashMap<&str, &Box<dyn Plugin>> = plugins.iter().map(|p| (p.name(), p)).collect();
    for name in plugin_order {
        if let Some(plugin) = by_name.get(name.as_str()) {
            plugin.handler(ctx, bus);
        }
    }

    let ir = ctx.ir();
    bus.broadcast(ir, Event::Before, &Payload::Before)?;
    for (ref_, entry) in &ir.components {
        match entry {
            crate::ir::ComponentEntry::Schema(schema) => {
                bus.broadcast(ir, Event::Schema, &Payload::Schema { ref_, schema })?;
            }
            crate::ir::ComponentEntry::Parameter(parameter) => {
                bus.broadcast(ir, Event::Parameter, &Payload::Parameter { ref_, parameter })?;
            }
            crate::ir::ComponentEntry::RequestBody(request_body) => {
                bus.broadcast(ir, Event::RequestBody, &Payload::RequestBody { ref_, request_body })?;
            }
            crate::ir::ComponentEntry::SecurityScheme(security_scheme) => {
                bus.broadcast(ir, Event::SecurityScheme, &Payload::SecurityScheme { ref_, security_scheme })?;
            }
        }
    }
    for operation in ir.operations() {
        bus.broadcast(ir, Event::Operation, &Payload::Operation(operation))?;
    }
    bus.broadcast(ir, Event::After, &Payload::After)?;

    Ok(())
}
