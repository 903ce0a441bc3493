//! 关键元素：割点与桥
//!
//! 一次迭代 DFS 同时计算发现时间与 low 值。计时器在整个搜索中
//! 共享且单调递增，不随每次进入顶点而重置。有向图按其底层
//! 无向图处理。

use crate::graph::{Edge, EdgeId, Graph, VertexId};
use crate::types::Direction;
use serde::{Deserialize, Serialize};
use tracing::debug;

const UNVISITED: u32 = u32::MAX;

/// 割点与桥的计算结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalElements {
    /// 割点（按顶点顺序）
    pub articulation_points: Vec<VertexId>,
    /// 桥（按边 ID 排序）
    pub bridges: Vec<EdgeId>,
}

struct Frame<I> {
    vertex: VertexId,
    /// 进入该顶点所经过的树边；根为 None
    parent_edge: Option<EdgeId>,
    neighbors: I,
}

/// 关键元素查找器
pub struct CriticalElementsFinder<'a> {
    graph: &'a Graph,
}

impl<'a> CriticalElementsFinder<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 割点
    pub fn articulation_points(&self) -> Vec<VertexId> {
        self.find().articulation_points
    }

    /// 桥（原图中的边记录）
    pub fn bridges(&self) -> Vec<Edge> {
        self.find()
            .bridges
            .into_iter()
            .filter_map(|id| self.graph.edge(id).cloned())
            .collect()
    }

    /// 一次搜索同时求出割点与桥
    pub fn find(&self) -> CriticalElements {
        let n = self.graph.vertex_count();
        let mut discovery = vec![UNVISITED; n];
        let mut low = vec![UNVISITED; n];
        let mut is_cut = vec![false; n];
        let mut bridges = Vec::new();
        let mut timer: u32 = 0;

        for root in self.graph.vertex_ids() {
            if discovery[root.index()] != UNVISITED {
                continue;
            }

            discovery[root.index()] = timer;
            low[root.index()] = timer;
            timer += 1;
            let mut root_children = 0;

            let mut stack = vec![Frame {
                vertex: root,
                parent_edge: None,
                neighbors: self.graph.neighbors_in(root, Direction::Both),
            }];

            loop {
                let Some(frame) = stack.last_mut() else {
                    break;
                };
                let u = frame.vertex;
                let parent_edge = frame.parent_edge;

                match frame.neighbors.next() {
                    Some(next) => {
                        // 只跳过来时的那条边；平行边视为回边
                        if Some(next.edge) == parent_edge {
                            continue;
                        }
                        let v = next.vertex;
                        if discovery[v.index()] == UNVISITED {
                            discovery[v.index()] = timer;
                            low[v.index()] = timer;
                            timer += 1;
                            if u == root {
                                root_children += 1;
                            }
                            stack.push(Frame {
                                vertex: v,
                                parent_edge: Some(next.edge),
                                neighbors: self.graph.neighbors_in(v, Direction::Both),
                            });
                        } else {
                            low[u.index()] = low[u.index()].min(discovery[v.index()]);
                        }
                    }
                    None => {
                        stack.pop();
                        let (Some(parent), Some(edge)) = (stack.last(), parent_edge) else {
                            continue;
                        };
                        let p = parent.vertex.index();
                        low[p] = low[p].min(low[u.index()]);

                        if parent.parent_edge.is_some() && low[u.index()] >= discovery[p] {
                            is_cut[p] = true;
                        }
                        if low[u.index()] > discovery[p] {
                            bridges.push(edge);
                        }
                    }
                }
            }

            if root_children > 1 {
                is_cut[root.index()] = true;
            }
        }

        bridges.sort();
        let articulation_points: Vec<VertexId> = self
            .graph
            .vertex_ids()
            .filter(|v| is_cut[v.index()])
            .collect();

        debug!(
            articulation_points = articulation_points.len(),
            bridges = bridges.len(),
            "关键元素计算完成"
        );

        CriticalElements {
            articulation_points,
            bridges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(graph: &Graph, ids: &[VertexId]) -> Vec<String> {
        graph.keys(ids)
    }

    fn bridge_pairs(graph: &Graph) -> Vec<(String, String)> {
        CriticalElementsFinder::new(graph)
            .bridges()
            .iter()
            .map(|e| {
                (
                    graph.key(e.src()).unwrap().to_string(),
                    graph.key(e.dst()).unwrap().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_path_all_bridges() {
        let mut graph = Graph::undirected();
        graph.add_edge("a", "b", 1);
        graph.add_edge("b", "c", 1);
        graph.add_edge("c", "d", 1);

        let result = CriticalElementsFinder::new(&graph).find();
        assert_eq!(result.bridges.len(), 3);
        assert_eq!(keys(&graph, &result.articulation_points), vec!["b", "c"]);
    }

    #[test]
    fn test_two_triangles_joined_by_bridge() {
        let mut graph = Graph::undirected();
        for (u, v) in [
            ("0", "1"),
            ("0", "2"),
            ("2", "1"),
            ("1", "3"),
            ("3", "4"),
            ("4", "5"),
            ("5", "3"),
        ] {
            graph.add_edge(u, v, 1);
        }

        assert_eq!(
            bridge_pairs(&graph),
            vec![("1".to_string(), "3".to_string())]
        );
        let points = CriticalElementsFinder::new(&graph).articulation_points();
        assert_eq!(keys(&graph, &points), vec!["1", "3"]);
    }

    #[test]
    fn test_cycle_has_no_critical_elements() {
        let mut graph = Graph::undirected();
        graph.add_edge("a", "b", 1);
        graph.add_edge("b", "c", 1);
        graph.add_edge("c", "d", 1);
        graph.add_edge("d", "a", 1);

        let result = CriticalElementsFinder::new(&graph).find();
        assert!(result.bridges.is_empty());
        assert!(result.articulation_points.is_empty());
    }

    #[test]
    fn test_star_root_is_articulation_point() {
        let mut graph = Graph::undirected();
        graph.add_edge("c", "a", 1);
        graph.add_edge("c", "b", 1);
        graph.add_edge("c", "d", 1);

        let points = CriticalElementsFinder::new(&graph).articulation_points();
        assert_eq!(keys(&graph, &points), vec!["c"]);
    }

    #[test]
    fn test_deep_chain_with_shared_timer() {
        // 长链后接一个环：计时器若被重置，low 值会全部失效
        let mut graph = Graph::undirected();
        for i in 0..50 {
            graph.add_edge(format!("v{}", i), format!("v{}", i + 1), 1);
        }
        graph.add_edge("v50", "w0", 1);
        graph.add_edge("w0", "w1", 1);
        graph.add_edge("w1", "v50", 1);

        let result = CriticalElementsFinder::new(&graph).find();
        assert_eq!(result.bridges.len(), 50);
        // v1..=v50 都是割点
        assert_eq!(result.articulation_points.len(), 50);
    }

    #[test]
    fn test_parallel_edge_is_not_bridge() {
        let mut graph = Graph::undirected();
        graph.add_edge("a", "b", 1);
        graph.add_edge("a", "b", 1);
        graph.add_edge("b", "c", 1);

        assert_eq!(
            bridge_pairs(&graph),
            vec![("b".to_string(), "c".to_string())]
        );
    }

    #[test]
    fn test_directed_graph_uses_underlying_graph() {
        let mut graph = Graph::directed();
        graph.add_edge("a", "b", 1);
        graph.add_edge("c", "b", 1);

        let result = CriticalElementsFinder::new(&graph).find();
        assert_eq!(result.bridges.len(), 2);
        assert_eq!(keys(&graph, &result.articulation_points), vec!["b"]);
    }

    #[test]
    fn test_disconnected_components() {
        let mut graph = Graph::undirected();
        graph.add_edge("a", "b", 1);
        graph.add_edge("b", "c", 1);
        graph.add_edge("x", "y", 1);
        graph.add_vertex("lonely");

        let result = CriticalElementsFinder::new(&graph).find();
        assert_eq!(result.bridges.len(), 3);
        assert_eq!(keys(&graph, &result.articulation_points), vec!["b"]);
    }
}
