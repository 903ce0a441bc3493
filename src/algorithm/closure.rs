//! 传递闭包（Warshall）
//!
//! 可达矩阵以直接邻接为初值，因此 `reachable(i, i)` 仅当 i 位于某个环上时成立。
//! 时间 O(V³)，空间 O(V²)，顶点数上限由 [`SearchLimits`] 给出。

use crate::config::SearchLimits;
use crate::error::Result;
use crate::graph::{Graph, VertexId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const OPERATION: &str = "传递闭包";

/// 全源可达关系
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitiveClosure {
    size: usize,
    /// 行优先的 size × size 矩阵
    reach: Vec<bool>,
}

impl TransitiveClosure {
    /// 计算闭包；每轮中间顶点检查一次取消标记
    pub fn compute(graph: &Graph, limits: &SearchLimits) -> Result<Self> {
        let n = graph.vertex_count();
        limits.check_vertices(n, OPERATION)?;

        let mut reach = vec![false; n * n];
        for edge in graph.edges() {
            let (u, v) = (edge.src().index(), edge.dst().index());
            reach[u * n + v] = true;
            if !graph.is_directed() {
                reach[v * n + u] = true;
            }
        }

        for k in 0..n {
            // 步数上限只约束回溯搜索，这里只看取消标记
            if let Err(e) = limits.check_step(0, OPERATION) {
                warn!(round = k, error = %e, "传递闭包提前终止");
                return Err(e);
            }
            for i in 0..n {
                if !reach[i * n + k] {
                    continue;
                }
                for j in 0..n {
                    if reach[k * n + j] {
                        reach[i * n + j] = true;
                    }
                }
            }
        }

        let closure = Self { size: n, reach };
        debug!(vertices = n, pairs = closure.pair_count(), "传递闭包计算完成");
        Ok(closure)
    }

    /// 顶点数
    pub fn size(&self) -> usize {
        self.size
    }

    /// j 是否可从 i 经至少一条边到达；越界返回 false
    pub fn reachable(&self, from: VertexId, to: VertexId) -> bool {
        let (i, j) = (from.index(), to.index());
        i < self.size && j < self.size && self.reach[i * self.size + j]
    }

    /// 从 i 可达的所有顶点
    pub fn successors(&self, from: VertexId) -> Vec<VertexId> {
        if from.index() >= self.size {
            return Vec::new();
        }
        let row = &self.reach[from.index() * self.size..(from.index() + 1) * self.size];
        row.iter()
            .enumerate()
            .filter(|&(_, &r)| r)
            .map(|(j, _)| VertexId::from(j))
            .collect()
    }

    /// 所有可达对 (i, j)，按行优先顺序
    pub fn pairs(&self) -> Vec<(VertexId, VertexId)> {
        self.reach
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r)
            .map(|(idx, _)| {
                (
                    VertexId::from(idx / self.size),
                    VertexId::from(idx % self.size),
                )
            })
            .collect()
    }

    /// 可达对数量
    pub fn pair_count(&self) -> usize {
        self.reach.iter().filter(|&&r| r).count()
    }

    /// 以邻接矩阵形式返回闭包（用于展示）
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.reach.chunks(self.size).map(<[bool]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CancelToken;
    use crate::error::Error;

    fn id(graph: &Graph, key: &str) -> VertexId {
        graph.vertex_id(key).unwrap()
    }

    #[test]
    fn test_chain_closure() {
        let mut graph = Graph::directed();
        graph.add_edge("a", "b", 1);
        graph.add_edge("b", "c", 1);
        graph.add_edge("c", "d", 1);

        let closure = TransitiveClosure::compute(&graph, &SearchLimits::unlimited()).unwrap();
        assert!(closure.reachable(id(&graph, "a"), id(&graph, "d")));
        assert!(!closure.reachable(id(&graph, "d"), id(&graph, "a")));
        // 无环时不自达
        assert!(!closure.reachable(id(&graph, "a"), id(&graph, "a")));
        assert_eq!(closure.pair_count(), 6);
        assert_eq!(closure.successors(id(&graph, "b")).len(), 2);
    }

    #[test]
    fn test_cycle_reaches_itself() {
        let mut graph = Graph::directed();
        graph.add_edge("a", "b", 1);
        graph.add_edge("b", "a", 1);
        graph.add_vertex("c");

        let closure = TransitiveClosure::compute(&graph, &SearchLimits::unlimited()).unwrap();
        assert!(closure.reachable(id(&graph, "a"), id(&graph, "a")));
        assert!(!closure.reachable(id(&graph, "c"), id(&graph, "c")));
        assert_eq!(closure.pairs().len(), 4);
    }

    #[test]
    fn test_undirected_closure_is_symmetric() {
        let mut graph = Graph::undirected();
        graph.add_edge("a", "b", 1);
        graph.add_edge("b", "c", 1);

        let closure = TransitiveClosure::compute(&graph, &SearchLimits::unlimited()).unwrap();
        let matrix = closure.to_matrix();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(matrix[i][j], matrix[j][i]);
            }
        }
        assert!(closure.reachable(id(&graph, "c"), id(&graph, "a")));
    }

    #[test]
    fn test_vertex_limit() {
        let mut graph = Graph::directed();
        graph.add_edge("a", "b", 1);
        graph.add_edge("b", "c", 1);

        let limits = SearchLimits::unlimited().with_max_vertices(2);
        assert!(matches!(
            TransitiveClosure::compute(&graph, &limits),
            Err(Error::LimitExceeded(_))
        ));
    }

    #[test]
    fn test_cancelled() {
        let mut graph = Graph::directed();
        graph.add_edge("a", "b", 1);

        let token = CancelToken::new();
        token.cancel();
        let limits = SearchLimits::unlimited().with_cancel(token);
        assert!(matches!(
            TransitiveClosure::compute(&graph, &limits),
            Err(Error::Cancelled)
        ));
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::directed();
        let closure = TransitiveClosure::compute(&graph, &SearchLimits::unlimited()).unwrap();
        assert_eq!(closure.size(), 0);
        assert!(closure.pairs().is_empty());
        assert!(closure.to_matrix().is_empty());
    }
}
