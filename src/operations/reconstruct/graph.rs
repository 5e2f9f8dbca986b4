use std::collections::HashMap;

use slotmap::SlotMap;

use crate::geometry::Segment;
use crate::math::distance_2d::closest_point_on_segment;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a node of the wall graph.
    pub struct NodeId;
}

/// Fixed-point spatial hash key: coordinates divided by the quantum and rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridKey(i64, i64);

impl GridKey {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_point(p: &Point2, quantum: f64) -> Self {
        Self((p.x / quantum).round() as i64, (p.y / quantum).round() as i64)
    }
}

/// A graph node: one distinct wall endpoint.
#[derive(Debug, Clone)]
pub struct Node {
    pub point: Point2,
    /// Insertion rank; gives the search a deterministic order.
    pub rank: usize,
    pub neighbors: Vec<NodeId>,
}

/// Undirected graph of wall segments keyed by quantized endpoint.
#[derive(Debug, Default)]
pub struct WallGraph {
    nodes: SlotMap<NodeId, Node>,
    index: HashMap<GridKey, NodeId>,
    order: Vec<NodeId>,
    quantum: f64,
}

impl WallGraph {
    /// Builds the graph; each segment contributes an edge in both directions.
    ///
    /// With `split_t_junctions`, a segment is first split wherever another
    /// segment's endpoint lies on its interior, so partitions meeting a wall
    /// mid-span share a node with it.
    #[must_use]
    pub fn from_segments(segments: &[Segment], quantum: f64, split_t_junctions: bool) -> Self {
        let mut graph = Self {
            quantum,
            ..Self::default()
        };
        let pieces = if split_t_junctions {
            split_at_junctions(segments, quantum)
        } else {
            segments.iter().map(|s| (s.a, s.b)).collect()
        };
        for (a, b) in pieces {
            let na = graph.ensure_node(a);
            let nb = graph.ensure_node(b);
            graph.add_edge(na, nb);
        }
        graph
    }

    fn ensure_node(&mut self, p: Point2) -> NodeId {
        let key = GridKey::from_point(&p, self.quantum);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.nodes.insert(Node {
            point: p,
            rank: self.order.len(),
            neighbors: Vec::new(),
        });
        self.index.insert(key, id);
        self.order.push(id);
        id
    }

    fn add_edge(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        if let Some(node) = self.nodes.get_mut(a) {
            if !node.neighbors.contains(&b) {
                node.neighbors.push(b);
            }
        }
        if let Some(node) = self.nodes.get_mut(b) {
            if !node.neighbors.contains(&a) {
                node.neighbors.push(a);
            }
        }
    }

    /// Node ids in insertion order.
    #[must_use]
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn point(&self, id: NodeId) -> Option<Point2> {
        self.nodes.get(id).map(|n| n.point)
    }

    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[][..], |n| n.neighbors.as_slice())
    }

    /// Neighbors sorted counter-clockwise by the angle of the outgoing edge.
    ///
    /// Ties on angle fall back to insertion rank.
    #[must_use]
    pub fn neighbors_by_angle(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut ring: Vec<(f64, usize, NodeId)> = node
            .neighbors
            .iter()
            .filter_map(|&other| {
                let n = self.nodes.get(other)?;
                let d = n.point - node.point;
                Some((d.y.atan2(d.x), n.rank, other))
            })
            .collect();
        ring.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        ring.into_iter().map(|(_, _, other)| other).collect()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Each undirected edge once, lower rank first.
    #[must_use]
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::new();
        for &id in &self.order {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            for &other in &node.neighbors {
                if self.nodes.get(other).is_some_and(|o| o.rank > node.rank) {
                    edges.push((id, other));
                }
            }
        }
        edges
    }
}

/// Splits segments at other segments' endpoints lying on their interior.
fn split_at_junctions(segments: &[Segment], quantum: f64) -> Vec<(Point2, Point2)> {
    let endpoints: Vec<Point2> = segments.iter().flat_map(|s| [s.a, s.b]).collect();
    let mut pieces = Vec::with_capacity(segments.len());

    for seg in segments {
        let d = seg.b - seg.a;
        let len_sq = d.norm_squared();
        if len_sq < quantum * quantum {
            continue;
        }
        let len = len_sq.sqrt();
        let t_margin = quantum / len;

        // Collect endpoints that lie on this segment's interior.
        let mut splits: Vec<f64> = endpoints
            .iter()
            .filter_map(|p| {
                let t = (p - seg.a).dot(&d) / len_sq;
                if t <= t_margin || t >= 1.0 - t_margin {
                    return None;
                }
                let foot = closest_point_on_segment(p, &seg.a, &seg.b);
                (nalgebra::distance(&foot, p) < quantum).then_some(t)
            })
            .collect();

        splits.sort_by(f64::total_cmp);
        splits.dedup_by(|a, b| (*a - *b).abs() < t_margin);

        let mut current = seg.a;
        for t in splits {
            let mid = seg.a + d * t;
            pieces.push((current, mid));
            current = mid;
        }
        pieces.push((current, seg.b));
    }
    pieces
}
