//! 最短路径
//!
//! 按边数（BFS）和按权重（Dijkstra）两种度量，均沿出边方向。

use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, VertexId};
use crate::types::{Direction, Weight};
use priority_queue::PriorityQueue;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::VecDeque;
use tracing::debug;

/// 路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// 路径上的顶点序列
    pub vertices: Vec<VertexId>,
    /// 路径上的边序列
    pub edges: Vec<EdgeId>,
    /// 路径长度（边数）
    pub length: usize,
    /// 路径总权重
    pub total_weight: Weight,
}

impl PathResult {
    fn with_start(start: VertexId) -> Self {
        Self {
            vertices: vec![start],
            edges: Vec::new(),
            length: 0,
            total_weight: 0,
        }
    }
}

/// 路径查找器
pub struct PathFinder<'a> {
    graph: &'a Graph,
}

impl<'a> PathFinder<'a> {
    /// 创建路径查找器
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// BFS 最少边数路径；不可达返回 None
    pub fn fewest_edges(&self, start: VertexId, end: VertexId) -> Result<Option<PathResult>> {
        self.graph.check_vertex(start)?;
        self.graph.check_vertex(end)?;
        if start == end {
            return Ok(Some(PathResult::with_start(start)));
        }

        let mut parent: Vec<Option<(VertexId, EdgeId)>> = vec![None; self.graph.vertex_count()];
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors_in(current, Direction::Outgoing) {
                if next.vertex == start || parent[next.vertex.index()].is_some() {
                    continue;
                }
                parent[next.vertex.index()] = Some((current, next.edge));
                if next.vertex == end {
                    return self.reconstruct_path(start, end, &parent).map(Some);
                }
                queue.push_back(next.vertex);
            }
        }

        Ok(None)
    }

    /// Dijkstra 加权最短路径；存在负权重时返回 InvalidArgument
    pub fn shortest_path(&self, start: VertexId, end: VertexId) -> Result<Option<PathResult>> {
        self.graph.check_vertex(start)?;
        self.graph.check_vertex(end)?;
        if let Some(edge) = self.graph.edges().iter().find(|e| e.weight() < 0) {
            return Err(Error::InvalidArgument(format!(
                "Dijkstra 不支持负权重（边 {} 权重 {}）",
                edge.id().0,
                edge.weight()
            )));
        }

        let n = self.graph.vertex_count();
        let mut dist: Vec<Option<Weight>> = vec![None; n];
        let mut parent: Vec<Option<(VertexId, EdgeId)>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut queue: PriorityQueue<VertexId, Reverse<Weight>> = PriorityQueue::new();

        dist[start.index()] = Some(0);
        queue.push(start, Reverse(0));

        while let Some((current, Reverse(d))) = queue.pop() {
            settled[current.index()] = true;
            if current == end {
                break;
            }

            for next in self.graph.neighbors_in(current, Direction::Outgoing) {
                if settled[next.vertex.index()] {
                    continue;
                }
                let weight = self
                    .graph
                    .edge(next.edge)
                    .map(|e| e.weight())
                    .unwrap_or(0);
                let candidate = d
                    .checked_add(weight)
                    .ok_or_else(|| Error::weight_overflow("最短路径"))?;
                if dist[next.vertex.index()].map_or(true, |known| candidate < known) {
                    dist[next.vertex.index()] = Some(candidate);
                    parent[next.vertex.index()] = Some((current, next.edge));
                    queue.push_increase(next.vertex, Reverse(candidate));
                }
            }
        }

        let Some(total) = dist[end.index()] else {
            debug!(start = start.0, end = end.0, "目标不可达");
            return Ok(None);
        };

        let path = self.reconstruct_path(start, end, &parent)?;
        debug!(
            start = start.0,
            end = end.0,
            total_weight = total,
            length = path.length,
            "最短路径计算完成"
        );
        Ok(Some(path))
    }

    /// 重构路径
    fn reconstruct_path(
        &self,
        start: VertexId,
        end: VertexId,
        parent: &[Option<(VertexId, EdgeId)>],
    ) -> Result<PathResult> {
        let mut current = end;
        let mut vertices = vec![end];
        let mut edges = Vec::new();
        let mut total_weight: Weight = 0;

        while current != start {
            let Some((prev, edge_id)) = parent[current.index()] else {
                break;
            };
            edges.push(edge_id);
            vertices.push(prev);
            if let Some(edge) = self.graph.edge(edge_id) {
                total_weight = total_weight
                    .checked_add(edge.weight())
                    .ok_or_else(|| Error::weight_overflow("路径"))?;
            }
            current = prev;
        }

        vertices.reverse();
        edges.reverse();

        Ok(PathResult {
            length: edges.len(),
            vertices,
            edges,
            total_weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_weighted_graph() -> Graph {
        //      1        1
        //  A -----> B -----> D
        //  |                 ^
        //  |5                | 1
        //  +------> C -------+
        let mut graph = Graph::directed();
        graph.add_edge("A", "B", 1);
        graph.add_edge("A", "C", 5);
        graph.add_edge("B", "D", 1);
        graph.add_edge("C", "D", 1);
        graph
    }

    fn id(graph: &Graph, key: &str) -> VertexId {
        graph.vertex_id(key).unwrap()
    }

    #[test]
    fn test_dijkstra() {
        let graph = create_weighted_graph();
        let path = PathFinder::new(&graph)
            .shortest_path(id(&graph, "A"), id(&graph, "D"))
            .unwrap()
            .unwrap();

        assert_eq!(graph.keys(&path.vertices), vec!["A", "B", "D"]);
        assert_eq!(path.total_weight, 2);
        assert_eq!(path.length, 2);
    }

    #[test]
    fn test_dijkstra_prefers_light_long_path() {
        let mut graph = Graph::directed();
        graph.add_edge("s", "t", 10);
        graph.add_edge("s", "a", 2);
        graph.add_edge("a", "b", 2);
        graph.add_edge("b", "t", 2);

        let finder = PathFinder::new(&graph);
        let weighted = finder
            .shortest_path(id(&graph, "s"), id(&graph, "t"))
            .unwrap()
            .unwrap();
        assert_eq!(weighted.total_weight, 6);
        assert_eq!(weighted.length, 3);

        let hops = finder
            .fewest_edges(id(&graph, "s"), id(&graph, "t"))
            .unwrap()
            .unwrap();
        assert_eq!(hops.length, 1);
        assert_eq!(hops.total_weight, 10);
    }

    #[test]
    fn test_unreachable() {
        let graph = create_weighted_graph();
        let finder = PathFinder::new(&graph);
        assert!(finder
            .shortest_path(id(&graph, "D"), id(&graph, "A"))
            .unwrap()
            .is_none());
        assert!(finder
            .fewest_edges(id(&graph, "D"), id(&graph, "A"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_same_vertex() {
        let graph = create_weighted_graph();
        let a = id(&graph, "A");
        let path = PathFinder::new(&graph).shortest_path(a, a).unwrap().unwrap();
        assert_eq!(path.vertices, vec![a]);
        assert_eq!(path.total_weight, 0);
    }

    #[test]
    fn test_undirected_edges_both_ways() {
        let mut graph = Graph::undirected();
        graph.add_edge("a", "b", 3);
        graph.add_edge("b", "c", 4);

        let path = PathFinder::new(&graph)
            .shortest_path(id(&graph, "c"), id(&graph, "a"))
            .unwrap()
            .unwrap();
        assert_eq!(path.total_weight, 7);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut graph = Graph::directed();
        graph.add_edge("a", "b", -2);

        assert!(matches!(
            PathFinder::new(&graph).shortest_path(id(&graph, "a"), id(&graph, "b")),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_weight_overflow_is_rejected() {
        let mut graph = Graph::directed();
        graph.add_edge("a", "b", Weight::MAX);
        graph.add_edge("b", "c", 1);

        let finder = PathFinder::new(&graph);
        assert!(matches!(
            finder.shortest_path(id(&graph, "a"), id(&graph, "c")),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            finder.fewest_edges(id(&graph, "a"), id(&graph, "c")),
            Err(Error::InvalidArgument(_))
        ));

        let path = finder
            .shortest_path(id(&graph, "a"), id(&graph, "b"))
            .unwrap()
            .unwrap();
        assert_eq!(path.total_weight, Weight::MAX);
    }
}
