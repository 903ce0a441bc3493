//! 遍历原语
//!
//! 深度优先与广度优先遍历均使用显式栈/队列，不依赖递归深度。
//! 访问标记由调用方持有并在多次调用间共享，因此同一个
//! [`VisitedSet`] 可以在不连通的图上反复重启以枚举连通分量。

use crate::graph::{EdgeId, Graph, VertexId};
use crate::types::Direction;
use std::collections::VecDeque;

/// 访问标记
#[derive(Debug, Clone)]
pub struct VisitedSet {
    marks: Vec<bool>,
    count: usize,
}

impl VisitedSet {
    /// 创建容量为 n 的访问标记
    pub fn new(n: usize) -> Self {
        Self {
            marks: vec![false; n],
            count: 0,
        }
    }

    /// 为给定图创建访问标记
    pub fn for_graph(graph: &Graph) -> Self {
        Self::new(graph.vertex_count())
    }

    /// 标记顶点；首次标记返回 true
    pub fn insert(&mut self, vertex: VertexId) -> bool {
        match self.marks.get_mut(vertex.index()) {
            Some(mark) if !*mark => {
                *mark = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }

    /// 取消标记
    pub fn remove(&mut self, vertex: VertexId) {
        if let Some(mark) = self.marks.get_mut(vertex.index()) {
            if *mark {
                *mark = false;
                self.count -= 1;
            }
        }
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.marks.get(vertex.index()).copied().unwrap_or(false)
    }

    /// 已标记顶点数
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// 是否所有顶点都已标记
    pub fn is_complete(&self) -> bool {
        self.count == self.marks.len()
    }
}

/// 遍历树中的一条边
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEdge {
    pub parent: VertexId,
    pub child: VertexId,
    pub edge: EdgeId,
}

/// 深度优先遍历事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsEvent {
    /// 首次发现顶点（先序）；根顶点没有树边
    Discover {
        vertex: VertexId,
        tree_edge: Option<TreeEdge>,
    },
    /// 顶点的所有后代处理完毕（后序）
    Finish { vertex: VertexId },
}

/// 遍历引擎
pub struct Traversal<'a> {
    graph: &'a Graph,
    direction: Direction,
}

impl<'a> Traversal<'a> {
    /// 沿出边方向遍历
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            direction: Direction::Outgoing,
        }
    }

    /// 设置遍历方向；Both 表示把有向图当作其底层无向图
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// 从 start 开始深度优先遍历，按邻接顺序进入未访问邻居。
    /// start 已被访问时什么也不做。
    pub fn depth_first<F>(&self, start: VertexId, visited: &mut VisitedSet, mut on_event: F)
    where
        F: FnMut(DfsEvent),
    {
        if !visited.insert(start) {
            return;
        }
        on_event(DfsEvent::Discover {
            vertex: start,
            tree_edge: None,
        });

        let mut stack = vec![(start, self.graph.neighbors_in(start, self.direction))];
        loop {
            let Some((vertex, neighbors)) = stack.last_mut() else {
                break;
            };
            let vertex = *vertex;

            match neighbors.next() {
                Some(next) => {
                    if visited.insert(next.vertex) {
                        on_event(DfsEvent::Discover {
                            vertex: next.vertex,
                            tree_edge: Some(TreeEdge {
                                parent: vertex,
                                child: next.vertex,
                                edge: next.edge,
                            }),
                        });
                        stack.push((
                            next.vertex,
                            self.graph.neighbors_in(next.vertex, self.direction),
                        ));
                    }
                }
                None => {
                    stack.pop();
                    on_event(DfsEvent::Finish { vertex });
                }
            }
        }
    }

    /// 从 start 开始广度优先遍历。回调参数为新发现的顶点及其树边。
    pub fn breadth_first<F>(&self, start: VertexId, visited: &mut VisitedSet, mut on_discover: F)
    where
        F: FnMut(VertexId, Option<TreeEdge>),
    {
        if !visited.insert(start) {
            return;
        }
        on_discover(start, None);

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            for next in self.graph.neighbors_in(u, self.direction) {
                if visited.insert(next.vertex) {
                    on_discover(
                        next.vertex,
                        Some(TreeEdge {
                            parent: u,
                            child: next.vertex,
                            edge: next.edge,
                        }),
                    );
                    queue.push_back(next.vertex);
                }
            }
        }
    }

    /// 深度优先先序
    pub fn dfs_order(&self, start: VertexId, visited: &mut VisitedSet) -> Vec<VertexId> {
        let mut order = Vec::new();
        self.depth_first(start, visited, |event| {
            if let DfsEvent::Discover { vertex, .. } = event {
                order.push(vertex);
            }
        });
        order
    }

    /// 在每个未访问顶点上重启遍历，按顶点顺序枚举分量
    pub fn components(&self) -> Vec<Vec<VertexId>> {
        let mut visited = VisitedSet::for_graph(self.graph);
        let mut components = Vec::new();

        for vertex in self.graph.vertex_ids() {
            if !visited.contains(vertex) {
                components.push(self.dfs_order(vertex, &mut visited));
            }
        }

        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(graph: &Graph, keys: &[&str]) -> Vec<VertexId> {
        keys.iter().map(|k| graph.vertex_id(k).unwrap()).collect()
    }

    // A - B - D
    // |
    // C - E
    fn create_tree() -> Graph {
        let mut graph = Graph::undirected();
        graph.add_edge("A", "B", 1);
        graph.add_edge("A", "C", 1);
        graph.add_edge("B", "D", 1);
        graph.add_edge("C", "E", 1);
        graph
    }

    #[test]
    fn test_dfs_follows_adjacency_order() {
        let graph = create_tree();
        let mut visited = VisitedSet::for_graph(&graph);
        let order = Traversal::new(&graph).dfs_order(VertexId::new(0), &mut visited);

        assert_eq!(order, ids(&graph, &["A", "B", "D", "C", "E"]));
        assert!(visited.is_complete());
    }

    #[test]
    fn test_bfs_levels() {
        let graph = create_tree();
        let mut visited = VisitedSet::for_graph(&graph);
        let mut order = Vec::new();
        Traversal::new(&graph).breadth_first(VertexId::new(0), &mut visited, |vertex, _| {
            order.push(vertex)
        });

        assert_eq!(order, ids(&graph, &["A", "B", "C", "D", "E"]));
    }

    #[test]
    fn test_dfs_postorder_events() {
        let mut graph = Graph::directed();
        graph.add_edge("A", "B", 1);
        graph.add_edge("B", "C", 1);

        let mut finished = Vec::new();
        let mut visited = VisitedSet::for_graph(&graph);
        Traversal::new(&graph).depth_first(VertexId::new(0), &mut visited, |event| {
            if let DfsEvent::Finish { vertex } = event {
                finished.push(vertex);
            }
        });

        assert_eq!(finished, ids(&graph, &["C", "B", "A"]));
    }

    #[test]
    fn test_shared_visited_set_restarts() {
        let mut graph = Graph::undirected();
        graph.add_edge("A", "B", 1);
        graph.add_edge("C", "D", 1);
        graph.add_vertex("E");

        let traversal = Traversal::new(&graph);
        let mut visited = VisitedSet::for_graph(&graph);

        let first = traversal.dfs_order(VertexId::new(0), &mut visited);
        assert_eq!(first.len(), 2);
        // 已访问的起点不会再产生任何顶点
        assert!(traversal.dfs_order(VertexId::new(1), &mut visited).is_empty());

        let components = traversal.components();
        assert_eq!(components.len(), 3);
        assert_eq!(components[2], ids(&graph, &["E"]));
    }

    #[test]
    fn test_direction_both_reaches_predecessors() {
        let mut graph = Graph::directed();
        graph.add_edge("B", "A", 1);

        let a = graph.vertex_id("A").unwrap();
        let mut visited = VisitedSet::for_graph(&graph);
        let outgoing = Traversal::new(&graph).dfs_order(a, &mut visited);
        assert_eq!(outgoing, vec![a]);

        let mut visited = VisitedSet::for_graph(&graph);
        let both = Traversal::new(&graph)
            .with_direction(Direction::Both)
            .dfs_order(a, &mut visited);
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_tree_edges_reported() {
        let graph = create_tree();
        let mut edges = Vec::new();
        let mut visited = VisitedSet::for_graph(&graph);
        Traversal::new(&graph).breadth_first(VertexId::new(0), &mut visited, |_, tree_edge| {
            if let Some(e) = tree_edge {
                edges.push(e);
            }
        });

        assert_eq!(edges.len(), graph.vertex_count() - 1);
        assert!(edges.iter().all(|e| graph.has_edge(e.parent, e.child)));
    }
}
