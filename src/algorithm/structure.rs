//! 结构分析：图的整体性质判定
//!
//! 所有判定只读访问规范图。连通性、二部性按有向图的底层无向图计算；
//! 空图上的判定按空真处理（连通、二部、欧拉成立，无环）。

use crate::algorithm::hamilton::HamiltonSearch;
use crate::algorithm::traversal::{Traversal, VisitedSet};
use crate::config::SearchLimits;
use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, VertexId};
use crate::types::{Direction, GraphKind, DEFAULT_WEIGHT};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, warn};

/// 结构分析汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub kind: GraphKind,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub weighted: bool,
    pub directed: bool,
    /// 存在没有反向边的边
    pub asymmetric_edges: bool,
    pub connected: bool,
    pub component_count: usize,
    pub bipartite: bool,
    pub eulerian: bool,
    /// 空图或搜索被上限 / 取消打断时为 None
    pub hamiltonian: Option<bool>,
    pub cyclic: bool,
    pub planar_heuristic: bool,
}

/// 二染色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// DFS 三色标记（有向环检测）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Grey,
    Black,
}

/// 结构分析器
pub struct StructureAnalyzer<'a> {
    graph: &'a Graph,
}

impl<'a> StructureAnalyzer<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 是否存在权重不为 1 的边
    pub fn is_weighted(&self) -> bool {
        self.graph
            .edges()
            .iter()
            .any(|e| e.weight() != DEFAULT_WEIGHT)
    }

    /// 构造时声明的方向性
    pub fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    /// 结构一致性检查：是否存在某条边 (u, v) 没有对应的 (v, u)。
    /// 无向图的边天然对称，总是返回 false。
    pub fn has_asymmetric_edges(&self) -> bool {
        if !self.graph.is_directed() {
            return false;
        }
        let pairs: HashSet<(VertexId, VertexId)> = self
            .graph
            .edges()
            .iter()
            .map(|e| (e.src(), e.dst()))
            .collect();
        pairs.iter().any(|&(u, v)| !pairs.contains(&(v, u)))
    }

    /// 从第一个顶点出发能否到达所有顶点（忽略方向）
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.graph.first_vertex() else {
            return true;
        };
        let mut visited = VisitedSet::for_graph(self.graph);
        Traversal::new(self.graph)
            .with_direction(Direction::Both)
            .depth_first(start, &mut visited, |_| {});
        visited.is_complete()
    }

    /// 连通分量（有向图为弱连通分量），按顶点顺序
    pub fn connected_components(&self) -> Vec<Vec<VertexId>> {
        Traversal::new(self.graph)
            .with_direction(Direction::Both)
            .components()
    }

    pub fn is_bipartite(&self) -> bool {
        self.bipartition().is_some()
    }

    /// 每个连通分量做 BFS 二染色；成功时返回两侧顶点
    pub fn bipartition(&self) -> Option<(Vec<VertexId>, Vec<VertexId>)> {
        let n = self.graph.vertex_count();
        let mut side: Vec<Option<Side>> = vec![None; n];
        let mut queue = VecDeque::new();

        for root in self.graph.vertex_ids() {
            if side[root.index()].is_some() {
                continue;
            }
            side[root.index()] = Some(Side::Left);
            queue.push_back(root);

            while let Some(u) = queue.pop_front() {
                let Some(color) = side[u.index()] else {
                    continue;
                };
                for next in self.graph.neighbors_in(u, Direction::Both) {
                    match side[next.vertex.index()] {
                        None => {
                            side[next.vertex.index()] = Some(color.flip());
                            queue.push_back(next.vertex);
                        }
                        // 自环也会落到这里
                        Some(other) if other == color => {
                            debug!(vertex = u.0, "二染色冲突");
                            return None;
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        let (left, right): (Vec<VertexId>, Vec<VertexId>) = self
            .graph
            .vertex_ids()
            .partition(|v| side[v.index()] == Some(Side::Left));
        Some((left, right))
    }

    /// 连通且所有顶点总度数为偶数
    pub fn is_eulerian(&self) -> bool {
        self.is_connected()
            && self
                .graph
                .vertex_ids()
                .all(|v| self.graph.degree(v) % 2 == 0)
    }

    /// 是否存在经过第一个顶点的哈密顿回路；空图返回 InvalidState
    pub fn is_hamiltonian(&self, limits: SearchLimits) -> Result<bool> {
        HamiltonSearch::new(self.graph)
            .with_limits(limits)
            .is_hamiltonian()
    }

    /// 是否含环。无向图：遇到不经过来时那条边的已访问顶点即为环；
    /// 有向图：遇到仍在递归栈上的顶点即为环。
    pub fn is_cyclic(&self) -> bool {
        if self.graph.is_directed() {
            self.has_directed_cycle()
        } else {
            self.has_undirected_cycle()
        }
    }

    fn has_undirected_cycle(&self) -> bool {
        let mut visited = VisitedSet::for_graph(self.graph);

        for root in self.graph.vertex_ids() {
            if !visited.insert(root) {
                continue;
            }
            let mut stack: Vec<(Option<EdgeId>, _)> =
                vec![(None, self.graph.neighbors_in(root, Direction::Outgoing))];

            while let Some((parent_edge, neighbors)) = stack.last_mut() {
                let parent_edge = *parent_edge;
                match neighbors.next() {
                    Some(next) if Some(next.edge) == parent_edge => {}
                    Some(next) => {
                        if !visited.insert(next.vertex) {
                            return true;
                        }
                        stack.push((
                            Some(next.edge),
                            self.graph.neighbors_in(next.vertex, Direction::Outgoing),
                        ));
                    }
                    None => {
                        stack.pop();
                    }
                }
            }
        }

        false
    }

    fn has_directed_cycle(&self) -> bool {
        let mut marks = vec![Mark::White; self.graph.vertex_count()];

        for root in self.graph.vertex_ids() {
            if marks[root.index()] != Mark::White {
                continue;
            }
            marks[root.index()] = Mark::Grey;
            let mut stack = vec![(root, self.graph.neighbors_in(root, Direction::Outgoing))];

            while let Some((vertex, neighbors)) = stack.last_mut() {
                let vertex = *vertex;
                match neighbors.next() {
                    Some(next) => match marks[next.vertex.index()] {
                        Mark::Grey => return true,
                        Mark::Black => {}
                        Mark::White => {
                            marks[next.vertex.index()] = Mark::Grey;
                            stack.push((
                                next.vertex,
                                self.graph.neighbors_in(next.vertex, Direction::Outgoing),
                            ));
                        }
                    },
                    None => {
                        marks[vertex.index()] = Mark::Black;
                        stack.pop();
                    }
                }
            }
        }

        false
    }

    /// 平面性的必要条件检查（不完整）：|E| > 3|V| − 6 时返回 false，
    /// 其余情况一律返回 true。并非真正的平面性判定。
    ///
    /// 边界按有符号整数计算，对任意 |V| 都生效：单个顶点或单条边的图
    /// 同样返回 false，空图返回 true。
    pub fn is_planar_heuristic(&self) -> bool {
        let v = self.graph.vertex_count() as i64;
        let e = self.graph.edge_count() as i64;
        e <= 3 * v - 6
    }

    /// 汇总所有判定。哈密顿搜索受 `limits` 约束，超限时结果记为 None。
    pub fn report(&self, limits: SearchLimits) -> Result<AnalysisReport> {
        let hamiltonian = if self.graph.is_empty() {
            None
        } else {
            match self.is_hamiltonian(limits) {
                Ok(found) => Some(found),
                Err(e @ (Error::LimitExceeded(_) | Error::Cancelled)) => {
                    warn!(error = %e, "哈密顿判定未完成");
                    None
                }
                Err(e) => return Err(e),
            }
        };

        let report = AnalysisReport {
            kind: self.graph.kind(),
            vertex_count: self.graph.vertex_count(),
            edge_count: self.graph.edge_count(),
            weighted: self.is_weighted(),
            directed: self.is_directed(),
            asymmetric_edges: self.has_asymmetric_edges(),
            connected: self.is_connected(),
            component_count: self.connected_components().len(),
            bipartite: self.is_bipartite(),
            eulerian: self.is_eulerian(),
            hamiltonian,
            cyclic: self.is_cyclic(),
            planar_heuristic: self.is_planar_heuristic(),
        };

        debug!(
            vertices = report.vertex_count,
            edges = report.edge_count,
            "结构分析完成"
        );
        Ok(report)
    }
}
