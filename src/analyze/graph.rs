//! Intra-project import graph.
//!
//! Nodes are the discovered source files; an edge `a -> b` means `a`
//! imports a module that resolves to `b`. Imports that do not resolve to
//! a discovered file are dropped without a trace.

use crate::oracle::{ComplexityOracle, ImportRef};
use crate::scan::filesystem::relative_display;
use crate::types::config::GOD_MODULE_THRESHOLD;
use crate::types::report::{DepAnalysis, GodModule};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Upper bound on enumerated cycles; dense graphs have exponentially many.
const MAX_CYCLES: usize = 1000;

pub struct DependencyGraph {
    graph: DiGraph<PathBuf, ()>,
}

impl DependencyGraph {
    /// Builds the graph over `files`. Import extraction runs in parallel;
    /// edges are inserted in file order so the result is deterministic.
    pub fn build(root: &Path, files: &[PathBuf], oracle: &dyn ComplexityOracle) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for file in files {
            let index = graph.add_node(file.clone());
            nodes.insert(file.clone(), index);
        }

        let resolver = ModuleResolver::new(root, files, oracle);
        let imports: Vec<(usize, Vec<ImportRef>)> = files
            .par_iter()
            .enumerate()
            .map(|(position, file)| {
                let imports = std::fs::read_to_string(file)
                    .map(|source| oracle.imports(&source))
                    .unwrap_or_default();
                (position, imports)
            })
            .collect();

        for (position, refs) in imports {
            let importer = files[position].as_path();
            let Some(&from) = nodes.get(importer) else {
                continue;
            };
            for import in &refs {
                for target in resolver.resolve(importer, import) {
                    if target == importer {
                        continue;
                    }
                    if let Some(&to) = nodes.get(target) {
                        graph.update_edge(from, to, ());
                    }
                }
            }
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built dependency graph"
        );

        Self { graph }
    }

    #[cfg(test)]
    fn has_edge(&self, from: &Path, to: &Path) -> bool {
        let find = |path: &Path| {
            self.graph
                .node_indices()
                .find(|index| self.graph[*index] == path)
        };
        match (find(from), find(to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Distinct importers per file, zero for files nobody imports.
    pub fn in_degree(&self) -> BTreeMap<PathBuf, usize> {
        self.graph
            .node_indices()
            .map(|index| {
                let count = self
                    .graph
                    .neighbors_directed(index, Direction::Incoming)
                    .count();
                (self.graph[index].clone(), count)
            })
            .collect()
    }

    /// Files imported by more than `threshold` distinct files.
    pub fn god_modules(&self, threshold: usize) -> Vec<(PathBuf, usize)> {
        self.in_degree()
            .into_iter()
            .filter(|(_, count)| *count > threshold)
            .collect()
    }

    /// Every simple cycle once, rotated to start at its smallest path,
    /// ordered by path. Stops after `MAX_CYCLES` cycles.
    pub fn cycles(&self) -> Vec<Vec<PathBuf>> {
        let mut cycles = Vec::new();
        'components: for component in tarjan_scc(&self.graph) {
            if component.len() < 2 {
                continue;
            }
            let mut members = component;
            members.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
            let rank: HashMap<NodeIndex, usize> = members
                .iter()
                .enumerate()
                .map(|(position, index)| (*index, position))
                .collect();

            for &start in &members {
                CircuitSearch::new(&self.graph, &rank, start, &mut cycles).run();
                if cycles.len() >= MAX_CYCLES {
                    warn!(limit = MAX_CYCLES, "cycle enumeration capped");
                    break 'components;
                }
            }
        }

        let mut paths: Vec<Vec<PathBuf>> = cycles
            .into_iter()
            .map(|cycle| cycle.into_iter().map(|index| self.graph[index].clone()).collect())
            .collect();
        paths.sort();
        paths
    }

    /// Cycles, god modules and in-degrees keyed by path relative to `root`.
    pub fn analyze(&self, root: &Path) -> DepAnalysis {
        let in_degree: BTreeMap<String, usize> = self
            .in_degree()
            .into_iter()
            .map(|(path, count)| (relative_display(root, &path), count))
            .collect();
        let god_modules = self
            .god_modules(GOD_MODULE_THRESHOLD)
            .into_iter()
            .map(|(path, in_degree)| GodModule {
                file: relative_display(root, &path),
                in_degree,
            })
            .collect();
        let cycles = self
            .cycles()
            .into_iter()
            .map(|cycle| {
                cycle
                    .iter()
                    .map(|path| relative_display(root, path))
                    .collect()
            })
            .collect();

        DepAnalysis {
            cycles,
            god_modules,
            in_degree,
        }
    }
}

/// Johnson's circuit search for cycles whose smallest member is `start`.
///
/// Only nodes of the component ranked at or above `start` are visited. A
/// node that failed to reach `start` stays blocked until one of its
/// successors is unblocked, so every dead end is explored once per start.
struct CircuitSearch<'a> {
    graph: &'a DiGraph<PathBuf, ()>,
    rank: &'a HashMap<NodeIndex, usize>,
    start: NodeIndex,
    start_rank: usize,
    blocked: HashSet<NodeIndex>,
    blocked_by: HashMap<NodeIndex, HashSet<NodeIndex>>,
    stack: Vec<NodeIndex>,
    cycles: &'a mut Vec<Vec<NodeIndex>>,
}

impl<'a> CircuitSearch<'a> {
    fn new(
        graph: &'a DiGraph<PathBuf, ()>,
        rank: &'a HashMap<NodeIndex, usize>,
        start: NodeIndex,
        cycles: &'a mut Vec<Vec<NodeIndex>>,
    ) -> Self {
        let start_rank = rank.get(&start).copied().unwrap_or(usize::MAX);
        Self {
            graph,
            rank,
            start,
            start_rank,
            blocked: HashSet::new(),
            blocked_by: HashMap::new(),
            stack: Vec::new(),
            cycles,
        }
    }

    fn run(mut self) {
        self.circuit(self.start);
    }

    fn in_scope(&self, node: NodeIndex) -> bool {
        self.rank
            .get(&node)
            .is_some_and(|&rank| rank >= self.start_rank)
    }

    fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut next: Vec<NodeIndex> = self
            .graph
            .neighbors(node)
            .filter(|neighbor| self.in_scope(*neighbor))
            .collect();
        next.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        next.dedup();
        next
    }

    /// Returns true when a cycle was closed below `node`.
    fn circuit(&mut self, node: NodeIndex) -> bool {
        let mut closed = false;
        self.stack.push(node);
        self.blocked.insert(node);

        let successors = self.successors(node);
        for &next in &successors {
            if self.cycles.len() >= MAX_CYCLES {
                self.stack.pop();
                return true;
            }
            if next == self.start {
                self.cycles.push(self.stack.clone());
                closed = true;
            } else if !self.blocked.contains(&next) && self.circuit(next) {
                closed = true;
            }
        }

        if closed {
            self.unblock(node);
        } else {
            for next in successors {
                self.blocked_by.entry(next).or_default().insert(node);
            }
        }
        self.stack.pop();
        closed
    }

    fn unblock(&mut self, node: NodeIndex) {
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            if self.blocked.remove(&current) {
                if let Some(waiting) = self.blocked_by.remove(&current) {
                    pending.extend(waiting);
                }
            }
        }
    }
}

/// Maps import references onto discovered files.
struct ModuleResolver<'a> {
    files: HashSet<&'a Path>,
    /// Dotted module path per file, with the package entry stem dropped.
    dotted: Vec<(String, &'a Path)>,
    extension: &'static str,
    entry_module: &'static str,
}

impl<'a> ModuleResolver<'a> {
    fn new(root: &Path, files: &'a [PathBuf], oracle: &dyn ComplexityOracle) -> Self {
        let entry_module = oracle.entry_module();
        let dotted = files
            .iter()
            .filter_map(|file| {
                let relative = file
                    .strip_prefix(root)
                    .unwrap_or(file.as_path())
                    .with_extension("");
                let mut parts: Vec<String> = relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy().into_owned())
                    .collect();
                if parts.last().map(String::as_str) == Some(entry_module) {
                    parts.pop();
                }
                if parts.is_empty() {
                    return None;
                }
                Some((parts.join("."), file.as_path()))
            })
            .collect();

        Self {
            files: files.iter().map(PathBuf::as_path).collect(),
            dotted,
            extension: oracle.extension(),
            entry_module,
        }
    }

    fn resolve(&self, importer: &Path, import: &ImportRef) -> Vec<&'a Path> {
        if import.level > 0 {
            self.resolve_relative(importer, import)
        } else {
            self.resolve_absolute(&import.module)
        }
    }

    /// Suffix match on dotted paths at a `.` boundary; every match counts.
    fn resolve_absolute(&self, module: &str) -> Vec<&'a Path> {
        if module.is_empty() {
            return Vec::new();
        }
        self.dotted
            .iter()
            .filter(|(dotted, _)| {
                dotted == module
                    || (dotted.ends_with(module)
                        && dotted[..dotted.len() - module.len()].ends_with('.'))
            })
            .map(|(_, file)| *file)
            .collect()
    }

    fn resolve_relative(&self, importer: &Path, import: &ImportRef) -> Vec<&'a Path> {
        let Some(mut base) = importer.parent().map(Path::to_path_buf) else {
            return Vec::new();
        };
        for _ in 1..import.level {
            match base.parent() {
                Some(parent) => base = parent.to_path_buf(),
                None => return Vec::new(),
            }
        }
        for part in import.module.split('.').filter(|part| !part.is_empty()) {
            base.push(part);
        }

        let mut candidates = vec![base.join(format!("{}.{}", self.entry_module, self.extension))];
        if !import.module.is_empty() {
            candidates.insert(0, base.with_extension(self.extension));
        }
        candidates
            .iter()
            .filter_map(|candidate| self.files.get(candidate.as_path()).copied())
            .collect()
    }
}
