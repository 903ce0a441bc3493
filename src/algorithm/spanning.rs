//! 生成结构：遍历树、最小生成树（Kruskal）与拓扑序

use crate::algorithm::traversal::{DfsEvent, Traversal, TreeEdge, VisitedSet};
use crate::algorithm::union_find::DisjointSet;
use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, VertexId};
use crate::types::{Weight, DEFAULT_WEIGHT};
use tracing::debug;

/// 最小生成树（图不连通时为生成森林）
#[derive(Debug, Clone)]
pub struct MinimumSpanningTree {
    /// 包含原图全部顶点（ID 与原图一致）和被选中的边
    pub graph: Graph,
    /// 被选中的边在原图中的 ID，按选中顺序
    pub edges: Vec<EdgeId>,
    pub total_weight: Weight,
}

/// 生成结构构建器
pub struct SpanningBuilder<'a> {
    graph: &'a Graph,
}

impl<'a> SpanningBuilder<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 深度优先生成树：只含从 start 可达的顶点，树边权重为 1
    pub fn dfs_tree(&self, start: VertexId) -> Result<Graph> {
        self.graph.check_vertex(start)?;
        let mut discovered = Vec::new();
        let mut visited = VisitedSet::for_graph(self.graph);
        Traversal::new(self.graph).depth_first(start, &mut visited, |event| {
            if let DfsEvent::Discover { vertex, tree_edge } = event {
                discovered.push((vertex, tree_edge));
            }
        });
        Ok(self.build_tree(&discovered))
    }

    /// 广度优先生成树
    pub fn bfs_tree(&self, start: VertexId) -> Result<Graph> {
        self.graph.check_vertex(start)?;
        let mut discovered = Vec::new();
        let mut visited = VisitedSet::for_graph(self.graph);
        Traversal::new(self.graph).breadth_first(start, &mut visited, |vertex, tree_edge| {
            discovered.push((vertex, tree_edge));
        });
        Ok(self.build_tree(&discovered))
    }

    /// 按发现顺序插入顶点，再连上树边
    fn build_tree(&self, discovered: &[(VertexId, Option<TreeEdge>)]) -> Graph {
        let mut tree = Graph::new(self.graph.kind());
        for (vertex, tree_edge) in discovered {
            let Some(key) = self.graph.key(*vertex) else {
                continue;
            };
            tree.add_vertex(key);
            if let Some(edge) = tree_edge {
                if let Some(parent) = self.graph.key(edge.parent) {
                    tree.add_edge(parent, key, DEFAULT_WEIGHT);
                }
            }
        }
        tree
    }

    /// Kruskal：边按权重稳定排序，相同权重保持原有顺序。
    /// 有向图按其底层无向图处理，选中的边保留原方向。
    /// 总权重超出 `Weight` 范围时返回 InvalidArgument。
    pub fn minimum_spanning_tree(&self) -> Result<MinimumSpanningTree> {
        let n = self.graph.vertex_count();

        let mut tree = Graph::new(self.graph.kind());
        for vertex in self.graph.vertices() {
            tree.add_vertex(vertex.key());
        }

        let mut sorted: Vec<_> = self.graph.edges().iter().collect();
        sorted.sort_by_key(|e| e.weight());

        let mut sets = DisjointSet::new(n);
        let mut edges = Vec::new();
        let mut total_weight: Weight = 0;

        for edge in sorted {
            if edges.len() + 1 >= n.max(1) {
                break;
            }
            if !sets.union(edge.src().index(), edge.dst().index()) {
                continue;
            }
            // 顶点插入顺序相同，ID 一一对应
            if tree
                .add_edge_between(edge.src(), edge.dst(), edge.weight())
                .is_ok()
            {
                edges.push(edge.id());
                total_weight = total_weight
                    .checked_add(edge.weight())
                    .ok_or_else(|| Error::weight_overflow("最小生成树"))?;
            }
        }

        debug!(
            vertices = n,
            edges = edges.len(),
            total_weight,
            components = sets.set_count(),
            "最小生成树构建完成"
        );

        Ok(MinimumSpanningTree {
            graph: tree,
            edges,
            total_weight,
        })
    }

    /// 逆后序。仅对有向无环图有意义：有环时仍会终止，但结果不满足先后约束。
    pub fn topological_order(&self) -> Vec<VertexId> {
        let traversal = Traversal::new(self.graph);
        let mut visited = VisitedSet::for_graph(self.graph);
        let mut finished = Vec::with_capacity(self.graph.vertex_count());

        for vertex in self.graph.vertex_ids() {
            traversal.depth_first(vertex, &mut visited, |event| {
                if let DfsEvent::Finish { vertex } = event {
                    finished.push(vertex);
                }
            });
        }

        finished.reverse();
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::structure::StructureAnalyzer;

    fn weighted_graph() -> Graph {
        let mut graph = Graph::undirected();
        graph.add_edge("A", "B", 4);
        graph.add_edge("A", "C", 1);
        graph.add_edge("B", "C", 2);
        graph.add_edge("B", "D", 5);
        graph.add_edge("C", "D", 8);
        graph
    }

    #[test]
    fn test_mst_kruskal() {
        let graph = weighted_graph();
        let mst = SpanningBuilder::new(&graph).minimum_spanning_tree().unwrap();

        assert_eq!(mst.edges.len(), 3);
        assert_eq!(mst.total_weight, 8);
        assert_eq!(mst.graph.vertex_count(), 4);
        assert!(StructureAnalyzer::new(&mst.graph).is_connected());
        assert!(!StructureAnalyzer::new(&mst.graph).is_cyclic());
    }

    #[test]
    fn test_mst_stable_tie_break() {
        // 三条权重相同的边构成三角形：选前两条
        let mut graph = Graph::undirected();
        let first = graph.add_edge("a", "b", 1);
        let second = graph.add_edge("b", "c", 1);
        graph.add_edge("c", "a", 1);

        let mst = SpanningBuilder::new(&graph).minimum_spanning_tree().unwrap();
        assert_eq!(mst.edges, vec![first, second]);
    }

    #[test]
    fn test_mst_forest_for_disconnected_graph() {
        let mut graph = Graph::undirected();
        graph.add_edge("a", "b", 3);
        graph.add_edge("x", "y", 2);
        graph.add_edge("y", "z", 1);

        let mst = SpanningBuilder::new(&graph).minimum_spanning_tree().unwrap();
        assert_eq!(mst.edges.len(), 3);
        assert_eq!(mst.total_weight, 6);
    }

    #[test]
    fn test_mst_skips_self_loop() {
        let mut graph = Graph::undirected();
        graph.add_edge("a", "a", 0);
        graph.add_edge("a", "b", 7);

        let mst = SpanningBuilder::new(&graph).minimum_spanning_tree().unwrap();
        assert_eq!(mst.total_weight, 7);
    }

    #[test]
    fn test_mst_empty_graph() {
        let graph = Graph::undirected();
        let mst = SpanningBuilder::new(&graph).minimum_spanning_tree().unwrap();
        assert!(mst.edges.is_empty());
        assert!(mst.graph.is_empty());
        assert_eq!(mst.total_weight, 0);
    }

    #[test]
    fn test_dfs_and_bfs_trees() {
        let mut graph = Graph::undirected();
        graph.add_edge("A", "B", 9);
        graph.add_edge("A", "C", 9);
        graph.add_edge("B", "C", 9);
        graph.add_edge("C", "D", 9);
        graph.add_vertex("lonely");

        let builder = SpanningBuilder::new(&graph);
        let a = graph.vertex_id("A").unwrap();

        let dfs = builder.dfs_tree(a).unwrap();
        assert_eq!(dfs.vertex_count(), 4);
        assert_eq!(dfs.edge_count(), 3);
        // A → B → C → D
        assert!(dfs.has_edge(
            dfs.vertex_id("B").unwrap(),
            dfs.vertex_id("C").unwrap()
        ));

        let bfs = builder.bfs_tree(a).unwrap();
        assert_eq!(bfs.edge_count(), 3);
        assert!(bfs.has_edge(
            bfs.vertex_id("A").unwrap(),
            bfs.vertex_id("C").unwrap()
        ));
        assert!(bfs.edges().iter().all(|e| e.weight() == 1));
        assert!(bfs.vertex_id("lonely").is_none());
    }

    #[test]
    fn test_tree_unknown_start() {
        let graph = weighted_graph();
        assert!(SpanningBuilder::new(&graph)
            .dfs_tree(VertexId::new(42))
            .is_err());
    }

    #[test]
    fn test_topological_order() {
        let mut graph = Graph::directed();
        graph.add_edge("shirt", "tie", 1);
        graph.add_edge("tie", "jacket", 1);
        graph.add_edge("pants", "shoes", 1);
        graph.add_edge("pants", "jacket", 1);
        graph.add_edge("socks", "shoes", 1);

        let order = SpanningBuilder::new(&graph).topological_order();
        assert_eq!(order.len(), graph.vertex_count());

        let position = |id: VertexId| order.iter().position(|&v| v == id).unwrap();
        for edge in graph.edges() {
            assert!(position(edge.src()) < position(edge.dst()));
        }
    }

    #[test]
    fn test_topological_chain() {
        let mut graph = Graph::directed();
        graph.add_edge("A", "B", 1);
        graph.add_edge("B", "C", 1);

        let order = SpanningBuilder::new(&graph).topological_order();
        assert_eq!(graph.keys(&order), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_mst_weight_overflow_is_rejected() {
        let mut graph = Graph::undirected();
        graph.add_edge("a", "b", Weight::MAX);
        graph.add_edge("b", "c", 1);

        assert!(matches!(
            SpanningBuilder::new(&graph).minimum_spanning_tree(),
            Err(Error::InvalidArgument(_))
        ));
    }
}
