use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write;

use strsim::jaro_winkler;

use crate::error::{Error, Result};

/// Position of a node in the graph's contiguous index space.
pub type NodeIndex = usize;

/// Names scoring below this Jaro-Winkler similarity are never suggested.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Narrowest column used by [`WeightedGraph::render_matrix`].
const MIN_MATRIX_CELL_WIDTH: usize = 4;

/// Dense adjacency-matrix graph with named nodes and integer edge weights.
///
/// A weight of `0` means "no edge", so real edges always weigh at least 1.
/// The structure enforces neither symmetry nor the absence of self-loops;
/// callers building undirected networks add both directions themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedGraph {
    names: Vec<String>,
    index: HashMap<String, NodeIndex>,
    weights: Vec<u32>,
    edge_count: usize,
}

impl WeightedGraph {
    /// Allocate `node_count` unnamed nodes with no edges.
    pub fn new(node_count: usize) -> Self {
        Self {
            names: vec![String::new(); node_count],
            index: HashMap::new(),
            weights: vec![0; node_count * node_count],
            edge_count: 0,
        }
    }

    /// Create a graph whose nodes carry the given names, in index order.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut graph = Self::new(names.len());
        for (node, name) in names.into_iter().enumerate() {
            graph.set_name(node, name)?;
        }
        Ok(graph)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of nonzero matrix entries.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All node names in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Display name of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn name(&self, node: NodeIndex) -> &str {
        &self.names[node]
    }

    /// Assign a display name to `node`. Names must be unique across the graph.
    pub fn set_name(&mut self, node: NodeIndex, name: impl Into<String>) -> Result<()> {
        self.check_node(node)?;
        let name = name.into();
        match self.index.get(&name) {
            Some(&existing) if existing == node => return Ok(()),
            Some(_) => return Err(Error::DuplicateNode { name }),
            None => {}
        }

        let previous = std::mem::replace(&mut self.names[node], name.clone());
        self.index.remove(&previous);
        self.index.insert(name, node);
        Ok(())
    }

    /// Lookup a node index by its case-sensitive name.
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Resolve a node name, suggesting close matches when it is unknown.
    pub fn resolve(&self, name: &str) -> Result<NodeIndex> {
        self.node_index(name).ok_or_else(|| Error::UnknownNode {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, 3),
        })
    }

    /// Names most similar to `name`, best match first, at most `limit` of them.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .names
            .iter()
            .filter(|candidate| !candidate.is_empty())
            .map(|candidate| (jaro_winkler(name, candidate), candidate.as_str()))
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    /// Weight of the edge `from -> to`, `0` when absent.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn weight(&self, from: NodeIndex, to: NodeIndex) -> u32 {
        self.weights[self.offset(from, to)]
    }

    /// Whether an edge `from -> to` exists.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.weight(from, to) != 0
    }

    /// Set the weight of `from -> to`. A zero weight is ignored since `0`
    /// doubles as "absent".
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, weight: u32) -> Result<()> {
        let slot = self.checked_offset(from, to)?;
        if weight == 0 {
            return Ok(());
        }
        if self.weights[slot] == 0 {
            self.edge_count += 1;
        }
        self.weights[slot] = weight;
        Ok(())
    }

    /// Delete the edge `from -> to` if present.
    pub fn remove_edge(&mut self, from: NodeIndex, to: NodeIndex) -> Result<()> {
        let slot = self.checked_offset(from, to)?;
        if self.weights[slot] != 0 {
            self.edge_count -= 1;
            self.weights[slot] = 0;
        }
        Ok(())
    }

    /// Add one to the weight of `from -> to`, creating the edge if needed.
    pub fn increment_edge(&mut self, from: NodeIndex, to: NodeIndex) -> Result<()> {
        let slot = self.checked_offset(from, to)?;
        if self.weights[slot] == 0 {
            self.edge_count += 1;
        }
        self.weights[slot] = self.weights[slot].saturating_add(1);
        Ok(())
    }

    /// Outgoing edges of `node` as `(target, weight)`, in ascending target order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn edges_from(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, u32)> + '_ {
        self.row(node)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, weight)| weight != 0)
    }

    /// Targets of all outgoing edges of `node`, ascending.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.edges_from(node).map(|(target, _)| target)
    }

    /// Copy of this graph where every edge weighs exactly 1.
    pub fn unit_weight_view(&self) -> WeightedGraph {
        WeightedGraph {
            names: self.names.clone(),
            index: self.index.clone(),
            weights: self.weights.iter().map(|&w| u32::from(w > 0)).collect(),
            edge_count: self.edge_count,
        }
    }

    /// Fixed-width dump of the matrix: a header row of names, then one row
    /// per node with its name followed by its outgoing weights.
    ///
    /// Cells are four columns wide, or one wider than the longest name or
    /// weight, so every cell ends in at least one space.
    pub fn render_matrix(&self) -> String {
        let width = self.matrix_cell_width();
        let mut buffer = " ".repeat(width);
        for name in &self.names {
            let _ = write!(buffer, "{:<width$}", name);
        }
        buffer.push('\n');

        for (node, name) in self.names.iter().enumerate() {
            let _ = write!(buffer, "{:<width$}", name);
            for weight in self.row(node) {
                let _ = write!(buffer, "{:<width$}", weight);
            }
            if node + 1 != self.node_count() {
                buffer.push('\n');
            }
        }
        buffer
    }

    /// Validate that `node` exists.
    pub fn check_node(&self, node: NodeIndex) -> Result<()> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange {
                index: node,
                node_count: self.node_count(),
            })
        }
    }

    fn matrix_cell_width(&self) -> usize {
        let longest_name = self.names.iter().map(|name| name.chars().count());
        let longest_weight = self.weights.iter().map(|weight| weight.to_string().len());
        longest_name
            .chain(longest_weight)
            .max()
            .map_or(MIN_MATRIX_CELL_WIDTH, |longest| {
                (longest + 1).max(MIN_MATRIX_CELL_WIDTH)
            })
    }

    fn row(&self, node: NodeIndex) -> &[u32] {
        let n = self.node_count();
        assert!(node < n, "node {node} out of range for {n} nodes");
        &self.weights[node * n..(node + 1) * n]
    }

    fn offset(&self, from: NodeIndex, to: NodeIndex) -> usize {
        let n = self.node_count();
        assert!(
            from < n && to < n,
            "edge ({from}, {to}) out of range for {n} nodes"
        );
        from * n + to
    }

    fn checked_offset(&self, from: NodeIndex, to: NodeIndex) -> Result<usize> {
        self.check_node(from)?;
        self.check_node(to)?;
        Ok(from * self.node_count() + to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> WeightedGraph {
        let mut graph = WeightedGraph::from_names(["AAA", "BBB", "CCC"]).expect("unique names");
        graph.add_edge(0, 1, 7).unwrap();
        graph.add_edge(1, 2, 3).unwrap();
        graph.add_edge(2, 0, 4).unwrap();
        graph
    }

    #[test]
    fn add_edge_counts_once_per_slot() {
        let mut graph = triangle();
        assert_eq!(graph.edge_count(), 3);

        graph.add_edge(0, 1, 9).unwrap();
        assert_eq!(graph.edge_count(), 3, "overwrite keeps the count");
        assert_eq!(graph.weight(0, 1), 9);

        graph.add_edge(1, 0, 0).unwrap();
        assert_eq!(graph.edge_count(), 3, "zero weight is ignored");
        assert!(!graph.has_edge(1, 0));
    }

    #[test]
    fn remove_edge_only_decrements_existing_edges() {
        let mut graph = triangle();
        graph.remove_edge(0, 1).unwrap();
        graph.remove_edge(0, 1).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weight(0, 1), 0);
    }

    #[test]
    fn increment_edge_creates_and_grows() {
        let mut graph = triangle();
        graph.increment_edge(1, 0).unwrap();
        graph.increment_edge(1, 0).unwrap();
        graph.increment_edge(0, 1).unwrap();
        assert_eq!(graph.weight(1, 0), 2);
        assert_eq!(graph.weight(0, 1), 8);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn neighbors_are_ascending() {
        let mut graph = triangle();
        graph.add_edge(0, 2, 1).unwrap();
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(
            graph.edges_from(0).collect::<Vec<_>>(),
            vec![(1, 7), (2, 1)]
        );
    }

    #[test]
    fn unit_weight_view_flattens_weights() {
        let graph = triangle();
        let unit = graph.unit_weight_view();
        assert_eq!(unit.weight(0, 1), 1);
        assert_eq!(unit.weight(1, 2), 1);
        assert_eq!(unit.weight(1, 0), 0);
        assert_eq!(unit.edge_count(), graph.edge_count());
        assert_eq!(unit.name(2), "CCC");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = WeightedGraph::from_names(["AAA", "AAA"]).expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateNode { name } if name == "AAA"));
    }

    #[test]
    fn renaming_frees_the_old_name() {
        let mut graph = triangle();
        graph.set_name(0, "ZZZ").unwrap();
        assert_eq!(graph.node_index("AAA"), None);
        assert_eq!(graph.node_index("ZZZ"), Some(0));
        graph.set_name(1, "AAA").unwrap();
        assert_eq!(graph.node_index("AAA"), Some(1));
    }

    #[test]
    fn mutation_out_of_range_is_an_error() {
        let mut graph = triangle();
        let err = graph.add_edge(0, 3, 1).expect_err("out of range");
        assert!(matches!(
            err,
            Error::NodeOutOfRange {
                index: 3,
                node_count: 3
            }
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn query_out_of_range_panics() {
        triangle().weight(5, 0);
    }

    #[test]
    fn render_matrix_uses_four_wide_columns() {
        let graph = triangle();
        let expected = "    AAA BBB CCC \n\
                        AAA 0   7   0   \n\
                        BBB 0   0   3   \n\
                        CCC 4   0   0   ";
        assert_eq!(graph.render_matrix(), expected);
    }

    #[test]
    fn render_matrix_widens_columns_for_long_cells() {
        let mut graph = WeightedGraph::from_names(["JFK", "KORD"]).unwrap();
        graph.add_edge(0, 1, 1000).unwrap();
        let expected = "     JFK  KORD \n\
                        JFK  0    1000 \n\
                        KORD 0    0    ";
        assert_eq!(graph.render_matrix(), expected);
    }

    #[test]
    fn resolve_suggests_similar_names() {
        let graph = WeightedGraph::from_names(["JFK", "LAX", "ORD"]).unwrap();
        assert_eq!(graph.resolve("LAX").unwrap(), 1);

        let err = graph.resolve("JFX").expect_err("unknown");
        let message = err.to_string();
        assert!(message.contains("unknown node name: JFX"));
        assert!(message.contains("Did you mean 'JFK'?"));
    }
}
