use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::graph::{NodeId, WallGraph};
use crate::error::{OperationError, Result};
use crate::geometry::Segment;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::polygon_2d::{
    has_self_intersection, leftmost_bottom, point_in_polygon, polygon_centroid, signed_area,
};
use crate::math::{Point2, CLEAN_EPSILON};

/// Bounds and filters for the face traversal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleSearchParams {
    /// Faces enclosing less than this area are discarded.
    pub min_area: f64,
    /// Grid size used to merge nearly-equal endpoints into one node.
    pub quantum: f64,
    /// Faces with more nodes than this are discarded.
    pub max_cycle_len: usize,
    /// The traversal stops after this many raw cycles.
    pub max_cycles: usize,
    /// The traversal stops after this many half-edge steps.
    pub max_steps: usize,
    /// Split segments where another segment ends on their interior.
    pub split_t_junctions: bool,
}

impl Default for CycleSearchParams {
    fn default() -> Self {
        Self {
            min_area: 0.1,
            quantum: CLEAN_EPSILON,
            max_cycle_len: 64,
            max_cycles: 1000,
            max_steps: 200_000,
            split_t_junctions: true,
        }
    }
}

/// A closed region recovered from line work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedRoom {
    /// Counter-clockwise boundary, without a closing duplicate.
    pub polygon: Vec<Point2>,
    pub area: f64,
    pub centroid: Option<Point2>,
}

/// Detects closed rooms in a cleaned segment set.
///
/// Every bounded face of the wall graph becomes a room, except faces nested
/// strictly inside a larger room, which are treated as holes (columns,
/// shafts) and dropped. Rooms are returned largest first.
#[derive(Debug, Clone)]
pub struct DetectRooms {
    segments: Vec<Segment>,
    params: CycleSearchParams,
}

impl DetectRooms {
    /// Creates a new detection operation with default parameters.
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            params: CycleSearchParams::default(),
        }
    }

    /// Sets custom search bounds.
    #[must_use]
    pub fn with_params(mut self, params: CycleSearchParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the detection.
    ///
    /// Hitting a search bound is not an error: the rooms found so far are
    /// returned and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a non-positive quantum or
    /// zero cycle length bound.
    pub fn execute(&self) -> Result<Vec<DetectedRoom>> {
        let p = self.params;
        if !p.quantum.is_finite() || p.quantum <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "quantum must be positive, got {}",
                p.quantum
            ))
            .into());
        }
        if p.max_cycle_len < 3 {
            return Err(OperationError::InvalidInput(format!(
                "max cycle length must be at least 3, got {}",
                p.max_cycle_len
            ))
            .into());
        }

        let graph = WallGraph::from_segments(&self.segments, p.quantum, p.split_t_junctions);
        let mut faces = FaceTrace::new(&graph, &p);
        faces.run();
        if faces.exhausted {
            warn!(
                steps = faces.steps,
                cycles = faces.cycles.len(),
                "face traversal bound reached, returning partial result"
            );
        }

        let mut candidates: Vec<DetectedRoom> = faces
            .cycles
            .iter()
            .filter_map(|cycle| self.accept(&graph, cycle))
            .collect();

        candidates.sort_by(|a, b| {
            b.area.total_cmp(&a.area).then_with(|| {
                let la = leftmost_bottom(&a.polygon).unwrap_or_else(Point2::origin);
                let lb = leftmost_bottom(&b.polygon).unwrap_or_else(Point2::origin);
                la.x.total_cmp(&lb.x).then(la.y.total_cmp(&lb.y))
            })
        });

        let rooms = remove_holes(candidates, p.quantum);
        debug!(
            nodes = graph.node_count(),
            raw_cycles = faces.cycles.len(),
            rooms = rooms.len(),
            "detected rooms"
        );
        Ok(rooms)
    }

    /// Applies the length, winding, area and simplicity filters.
    fn accept(&self, graph: &WallGraph, cycle: &[NodeId]) -> Option<DetectedRoom> {
        if cycle.len() > self.params.max_cycle_len {
            return None;
        }
        let polygon: Vec<Point2> = cycle.iter().filter_map(|&id| graph.point(id)).collect();
        if polygon.len() != cycle.len() {
            return None;
        }
        // Outer faces wind clockwise.
        let area = signed_area(&polygon);
        if area <= 0.0 || area < self.params.min_area {
            return None;
        }
        if has_self_intersection(&polygon) {
            return None;
        }
        let centroid = polygon_centroid(&polygon);
        Some(DetectedRoom {
            polygon,
            area,
            centroid,
        })
    }
}

/// Half-edge walk over the angle-ordered wall graph.
///
/// Each directed edge is used once. At every node the walk leaves along the
/// first edge clockwise from the one it arrived on, so bounded faces come out
/// counter-clockwise and the outer face of each component clockwise.
struct FaceTrace<'a> {
    graph: &'a WallGraph,
    params: &'a CycleSearchParams,
    rings: HashMap<NodeId, Vec<NodeId>>,
    used: HashSet<(NodeId, NodeId)>,
    cycles: Vec<Vec<NodeId>>,
    steps: usize,
    exhausted: bool,
}

impl<'a> FaceTrace<'a> {
    fn new(graph: &'a WallGraph, params: &'a CycleSearchParams) -> Self {
        let rings = graph
            .order()
            .iter()
            .map(|&id| (id, graph.neighbors_by_angle(id)))
            .collect();
        Self {
            graph,
            params,
            rings,
            used: HashSet::new(),
            cycles: Vec::new(),
            steps: 0,
            exhausted: false,
        }
    }

    fn run(&mut self) {
        let graph = self.graph;
        for &start in graph.order() {
            let ring = self.rings.get(&start).cloned().unwrap_or_default();
            for next in ring {
                if self.used.contains(&(start, next)) {
                    continue;
                }
                let Some(walk) = self.trace(start, next) else {
                    return;
                };
                for cycle in split_simple_loops(&walk) {
                    if cycle.len() < 3 {
                        continue;
                    }
                    self.cycles.push(cycle);
                    if self.cycles.len() >= self.params.max_cycles {
                        self.exhausted = true;
                        return;
                    }
                }
            }
        }
    }

    /// Walks one face starting with the half-edge `from -> to`.
    ///
    /// Returns `None` when the step bound is hit mid-walk.
    fn trace(&mut self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        let mut walk = Vec::new();
        let (mut a, mut b) = (from, to);
        while self.used.insert((a, b)) {
            self.steps += 1;
            if self.steps > self.params.max_steps {
                self.exhausted = true;
                return None;
            }
            walk.push(a);
            let Some(next) = self.pick_next(a, b) else {
                break;
            };
            (a, b) = (b, next);
        }
        Some(walk)
    }

    /// Leaves `at` along the first edge clockwise from the edge back to `from`.
    ///
    /// At a dead end this is the edge back to `from` itself.
    fn pick_next(&self, from: NodeId, at: NodeId) -> Option<NodeId> {
        let ring = self.rings.get(&at)?;
        let back = ring.iter().position(|&id| id == from)?;
        Some(ring[(back + ring.len() - 1) % ring.len()])
    }
}

/// Cuts a closed walk into simple loops at its repeated nodes.
///
/// Walks around dangling walls or bridges to islands revisit nodes; the
/// pieces between revisits are loops of their own (often two-node spurs).
fn split_simple_loops(walk: &[NodeId]) -> Vec<Vec<NodeId>> {
    let mut loops = Vec::new();
    let mut stack: Vec<NodeId> = Vec::with_capacity(walk.len());
    let mut position: HashMap<NodeId, usize> = HashMap::new();
    for &id in walk {
        if let Some(&at) = position.get(&id) {
            let tail: Vec<NodeId> = stack.drain(at + 1..).collect();
            for n in &tail {
                position.remove(n);
            }
            let mut cycle = Vec::with_capacity(tail.len() + 1);
            cycle.push(id);
            cycle.extend(tail);
            loops.push(cycle);
        } else {
            position.insert(id, stack.len());
            stack.push(id);
        }
    }
    if !stack.is_empty() {
        loops.push(stack);
    }
    loops
}

/// Returns `true` if `p` is inside `polygon` and farther than `tol` from its boundary.
fn strictly_inside(p: &Point2, polygon: &[Point2], tol: f64) -> bool {
    if !point_in_polygon(p, polygon) {
        return false;
    }
    let n = polygon.len();
    (0..n).all(|i| point_to_segment_dist(p, &polygon[i], &polygon[(i + 1) % n]) > tol)
}

/// Drops rooms whose first vertex lies strictly inside a larger kept room.
///
/// `rooms` must be sorted by area, largest first.
fn remove_holes(rooms: Vec<DetectedRoom>, tol: f64) -> Vec<DetectedRoom> {
    let mut kept: Vec<DetectedRoom> = Vec::with_capacity(rooms.len());
    for room in rooms {
        let Some(first) = room.polygon.first() else {
            continue;
        };
        let is_hole = kept
            .iter()
            .any(|outer| strictly_inside(first, &outer.polygon, tol));
        if !is_hole {
            kept.push(room);
        }
    }
    kept
}
