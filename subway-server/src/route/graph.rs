//! Weighted network graph over every segment of every line.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use tracing::trace;

use crate::domain::{LineId, Segment, StationId};

use super::RouteError;

/// One traversable direction of a segment.
#[derive(Debug, Clone, Copy)]
struct Edge {
    to: StationId,
    weight: u64,
    line: LineId,
}

/// Undirected weighted multigraph: stations are vertices, segments are edges.
///
/// Parallel edges between the same pair of stations (from different lines)
/// are kept; the search simply prefers the lighter one.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    adjacency: HashMap<StationId, Vec<Edge>>,
    edge_count: usize,
}

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    /// Station ids from source to target inclusive.
    pub stations: Vec<StationId>,

    /// Line ridden for each hop; one shorter than `stations`.
    pub lines: Vec<LineId>,

    /// Sum of the traversed segment distances.
    pub distance: u64,
}

/// Predecessor on the best known path to a station.
#[derive(Debug, Clone, Copy)]
struct Step {
    from: StationId,
    line: LineId,
}

impl NetworkGraph {
    /// Build the graph from all known segments.
    pub fn build<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> Self {
        let mut graph = Self::default();
        for segment in segments {
            let weight = u64::from(segment.distance.get());
            graph.add_edge(segment.up_station_id, segment.down_station_id, weight, segment.line_id);
            graph.add_edge(segment.down_station_id, segment.up_station_id, weight, segment.line_id);
            graph.edge_count += 1;
        }
        graph
    }

    fn add_edge(&mut self, from: StationId, to: StationId, weight: u64, line: LineId) {
        self.adjacency
            .entry(from)
            .or_default()
            .push(Edge { to, weight, line });
    }

    /// Whether `station` appears in any segment.
    pub fn contains(&self, station: StationId) -> bool {
        self.adjacency.contains_key(&station)
    }

    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of segments the graph was built from.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Minimum-distance path from `source` to `target` (Dijkstra).
    ///
    /// Among paths of equal distance the lexicographically smallest station
    /// sequence wins, and among parallel edges of equal weight the lowest line
    /// id wins, so results are reproducible.
    ///
    /// # Errors
    ///
    /// - [`RouteError::SameStation`] if `source == target`
    /// - [`RouteError::StationNotFound`] if either station is not a vertex
    /// - [`RouteError::NoPath`] if the two stations are in different components
    pub fn shortest_path(
        &self,
        source: StationId,
        target: StationId,
    ) -> Result<ShortestPath, RouteError> {
        if source == target {
            return Err(RouteError::SameStation(source));
        }
        for station in [source, target] {
            if !self.contains(station) {
                return Err(RouteError::StationNotFound(station));
            }
        }

        let mut dist: HashMap<StationId, u64> = HashMap::new();
        let mut prev: HashMap<StationId, Step> = HashMap::new();
        let mut heap: BinaryHeap<Reverse<(u64, StationId)>> = BinaryHeap::new();

        dist.insert(source, 0);
        heap.push(Reverse((0, source)));

        while let Some(Reverse((d, u))) = heap.pop() {
            if dist.get(&u).is_some_and(|&best| d > best) {
                continue;
            }
            if u == target {
                break;
            }

            let Some(edges) = self.adjacency.get(&u) else {
                continue;
            };
            for edge in edges {
                let candidate = d + edge.weight;
                let step = Step {
                    from: u,
                    line: edge.line,
                };

                match dist.get(&edge.to).map(|best| candidate.cmp(best)) {
                    None | Some(Ordering::Less) => {
                        dist.insert(edge.to, candidate);
                        prev.insert(edge.to, step);
                        heap.push(Reverse((candidate, edge.to)));
                    }
                    Some(Ordering::Equal) if edge.to != source => {
                        if prefers(&prev, source, edge.to, step) {
                            prev.insert(edge.to, step);
                        }
                    }
                    _ => {}
                }
            }
        }

        let Some(&distance) = dist.get(&target) else {
            return Err(RouteError::NoPath {
                from: source,
                to: target,
            });
        };

        let (stations, lines) = walk_back(&prev, source, target);
        trace!(%source, %target, distance, hops = lines.len(), "shortest path found");

        Ok(ShortestPath {
            stations,
            lines,
            distance,
        })
    }
}

/// Whether reaching `to` via `step` beats the recorded predecessor on a tie.
///
/// Edge weights are positive, so every predecessor that ties has already
/// been settled and its path from the source is final.
fn prefers(
    prev: &HashMap<StationId, Step>,
    source: StationId,
    to: StationId,
    step: Step,
) -> bool {
    let Some(current) = prev.get(&to) else {
        return true;
    };
    if current.from == step.from {
        return step.line < current.line;
    }
    let (mut via_current, _) = walk_back(prev, source, current.from);
    let (mut via_step, _) = walk_back(prev, source, step.from);
    via_current.push(to);
    via_step.push(to);
    via_step < via_current
}

/// Rebuild the path ending at `target` from predecessor links.
fn walk_back(
    prev: &HashMap<StationId, Step>,
    source: StationId,
    target: StationId,
) -> (Vec<StationId>, Vec<LineId>) {
    let mut stations = vec![target];
    let mut lines = Vec::new();
    let mut current = target;

    while current != source {
        let Some(step) = prev.get(&current) else {
            break;
        };
        lines.push(step.line);
        stations.push(step.from);
        current = step.from;
        // A path never revisits a station.
        if stations.len() > prev.len() + 1 {
            break;
        }
    }

    stations.reverse();
    lines.reverse();
    (stations, lines)
}
