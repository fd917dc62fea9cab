//! Single-source path engines over a dense [`WeightedGraph`].
//!
//! Both engines share the same outer loop: up to `N - 1` rounds, each picking
//! the unvisited node with the smallest tentative key (lowest index wins ties)
//! and relaxing its outgoing edges. [`shortest_paths`] keys on total mileage;
//! [`hop_minimal_paths`] keys on segment count and only consults mileage to
//! break ties between equally short candidates.


use crate::error::{Error, Result};
use crate::graph::{NodeIndex, WeightedGraph};

/// Per-destination node sequences from a single source.
///
/// Every entry starts with the source. An unreachable destination holds only
/// the source, the same shape as the trivial source-to-source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTable {
    source: NodeIndex,
    paths: Vec<Vec<NodeIndex>>,
}

impl PathTable {
    /// Rebuild every path by walking predecessor links back to the source.
    fn from_parents(source: NodeIndex, parents: &[Option<NodeIndex>]) -> Self {
        let paths = (0..parents.len())
            .map(|destination| reconstruct_path(parents, source, destination))
            .collect();
        Self { source, paths }
    }

    /// Node the table was computed from.
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    /// Path to `destination`, source first.
    ///
    /// # Panics
    ///
    /// Panics if `destination` is out of range.
    pub fn path(&self, destination: NodeIndex) -> &[NodeIndex] {
        &self.paths[destination]
    }

    /// Number of segments on the path to `destination`.
    pub fn hop_count(&self, destination: NodeIndex) -> usize {
        self.paths[destination].len().saturating_sub(1)
    }

    /// Number of destinations (equal to the graph's node count).
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in destination index order.
    pub fn iter(&self) -> impl Iterator<Item = &[NodeIndex]> {
        self.paths.iter().map(Vec::as_slice)
    }

    /// Path to `destination` as display names.
    pub fn names<'g>(&self, graph: &'g WeightedGraph, destination: NodeIndex) -> Vec<&'g str> {
        self.path(destination)
            .iter()
            .map(|&node| graph.name(node))
            .collect()
    }

    pub(crate) fn into_paths(self) -> Vec<Vec<NodeIndex>> {
        self.paths
    }
}

/// Result of [`shortest_paths`]: mileage-optimal distances and paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathTree {
    /// Total mileage per destination; `None` when unreachable.
    pub distances: Vec<Option<u64>>,
    pub paths: PathTable,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeIndex {
        self.paths.source()
    }

    pub fn distance(&self, destination: NodeIndex) -> Option<u64> {
        self.distances[destination]
    }

    pub fn path(&self, destination: NodeIndex) -> &[NodeIndex] {
        self.paths.path(destination)
    }
}

/// Result of [`hop_minimal_paths`]: segment counts, the ghost mileage that
/// accompanied each accepted path, and the paths themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopPathTree {
    /// Segment count per destination; `None` when unreachable.
    pub hops: Vec<Option<u64>>,
    /// Mileage of the selected path per destination; `None` when unreachable.
    pub mileage: Vec<Option<u64>>,
    pub paths: PathTable,
}

impl HopPathTree {
    pub fn source(&self) -> NodeIndex {
        self.paths.source()
    }

    pub fn hops(&self, destination: NodeIndex) -> Option<u64> {
        self.hops[destination]
    }

    pub fn mileage(&self, destination: NodeIndex) -> Option<u64> {
        self.mileage[destination]
    }

    pub fn path(&self, destination: NodeIndex) -> &[NodeIndex] {
        self.paths.path(destination)
    }
}

/// Index of the unvisited node with the smallest finite key.
///
/// Scans in ascending index order and keeps the first node reaching the
/// minimum. Returns `None` once every remaining node is visited or
/// unreachable.
pub fn min_vertex<T: Ord + Copy>(keys: &[Option<T>], visited: &[bool]) -> Option<NodeIndex> {
    closest_unvisited(keys, visited).map(|(node, _)| node)
}

fn closest_unvisited<T: Ord + Copy>(
    keys: &[Option<T>],
    visited: &[bool],
) -> Option<(NodeIndex, T)> {
    let mut best: Option<(NodeIndex, T)> = None;
    for (node, key) in keys.iter().enumerate() {
        if visited[node] {
            continue;
        }
        let Some(key) = *key else {
            continue;
        };
        if best.map_or(true, |(_, current)| key < current) {
            best = Some((node, key));
        }
    }
    best
}

/// Mileage-optimal paths from `source` to every node.
///
/// Dense Dijkstra without a priority queue: O(N²) for one source. Edges are
/// relaxed only on strict improvement, so among equal-mileage paths the one
/// discovered first is kept.
pub fn shortest_paths(graph: &WeightedGraph, source: NodeIndex) -> Result<ShortestPathTree> {
    graph.check_node(source)?;

    let n = graph.node_count();
    let mut distances: Vec<Option<u64>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; n];
    distances[source] = Some(0);

    for _ in 1..n {
        let Some((current, current_distance)) = closest_unvisited(&distances, &visited) else {
            break;
        };
        visited[current] = true;

        for (next, weight) in graph.edges_from(current) {
            if visited[next] {
                continue;
            }
            let candidate = current_distance + u64::from(weight);
            if distances[next].map_or(true, |known| candidate < known) {
                distances[next] = Some(candidate);
                parents[next] = Some(current);
            }
        }
    }

    Ok(ShortestPathTree {
        distances,
        paths: PathTable::from_parents(source, &parents),
    })
}

/// Segment-minimal paths from `source`, breaking hop-count ties by mileage.
///
/// `unit_graph` supplies the segment cost of each edge (normally the
/// [`WeightedGraph::unit_weight_view`] of `original`), while `original`
/// supplies the mileage tracked alongside as a ghost distance. A strictly
/// shorter hop count always wins; an equal hop count wins when its ghost
/// mileage is no greater than the stored one.
///
/// The tiebreak is greedy: it only compares candidates that meet during the
/// sweep, so it is not guaranteed to find the globally cheapest path among all
/// minimum-hop paths.
pub fn hop_minimal_paths(
    unit_graph: &WeightedGraph,
    original: &WeightedGraph,
    source: NodeIndex,
) -> Result<HopPathTree> {
    if unit_graph.node_count() != original.node_count() {
        return Err(Error::GraphMismatch {
            unit: unit_graph.node_count(),
            original: original.node_count(),
        });
    }
    unit_graph.check_node(source)?;

    let n = unit_graph.node_count();
    let mut hops: Vec<Option<u64>> = vec![None; n];
    let mut ghost = vec![0u64; n];
    let mut visited = vec![false; n];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; n];
    hops[source] = Some(0);

    for _ in 1..n {
        let Some((current, current_hops)) = closest_unvisited(&hops, &visited) else {
            break;
        };
        visited[current] = true;

        for (next, segments) in unit_graph.edges_from(current) {
            if visited[next] {
                continue;
            }
            let candidate_hops = current_hops + u64::from(segments);
            let candidate_ghost = ghost[current] + u64::from(original.weight(current, next));

            let accept = match hops[next] {
                None => true,
                Some(known) if candidate_hops < known => true,
                Some(known) if candidate_hops == known => candidate_ghost <= ghost[next],
                Some(_) => false,
            };
            if accept {
                hops[next] = Some(candidate_hops);
                ghost[next] = candidate_ghost;
                parents[next] = Some(current);
            }
        }
    }

    let mileage = hops
        .iter()
        .zip(&ghost)
        .map(|(hop, &miles)| hop.map(|_| miles))
        .collect();

    Ok(HopPathTree {
        hops,
        mileage,
        paths: PathTable::from_parents(source, &parents),
    })
}

/// Sum of edge weights along `path`, or `None` if a consecutive pair is not
/// joined by an edge. A single-node path has mileage 0.
pub fn path_mileage(graph: &WeightedGraph, path: &[NodeIndex]) -> Option<u64> {
    path.windows(2).try_fold(0u64, |total, pair| {
        let weight = graph.weight(pair[0], pair[1]);
        (weight != 0).then(|| total + u64::from(weight))
    })
}

fn reconstruct_path(
    parents: &[Option<NodeIndex>],
    source: NodeIndex,
    destination: NodeIndex,
) -> Vec<NodeIndex> {
    if destination != source && parents[destination].is_none() {
        return vec![source];
    }

    let mut path = vec![destination];
    let mut current = destination;
    while let Some(previous) = parents[current] {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
