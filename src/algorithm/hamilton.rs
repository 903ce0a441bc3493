//! 哈密顿路径 / 回路搜索
//!
//! 显式路径栈上的穷举回溯，最坏情况指数级，只适合小图。
//! 搜索步数与取消由 [`SearchLimits`] 约束。

use crate::algorithm::traversal::VisitedSet;
use crate::config::SearchLimits;
use crate::error::Result;
use crate::graph::{Graph, VertexId};
use tracing::{debug, warn};

const OPERATION: &str = "哈密顿搜索";

/// 哈密顿搜索
pub struct HamiltonSearch<'a> {
    graph: &'a Graph,
    limits: SearchLimits,
}

impl<'a> HamiltonSearch<'a> {
    /// 创建不设上限的搜索
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            limits: SearchLimits::unlimited(),
        }
    }

    /// 设置步数上限 / 取消标记
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// 依次以每个顶点为起点，返回找到的第一条哈密顿路径。
    /// 结果取决于邻接顺序，不保证字典序最小。
    pub fn path(&self) -> Result<Option<Vec<VertexId>>> {
        self.graph.first_vertex_or_err(OPERATION)?;

        let mut steps = 0;
        for start in self.graph.vertex_ids() {
            if let Some(path) = self.search(start, false, &mut steps)? {
                debug!(steps, length = path.len(), "找到哈密顿路径");
                return Ok(Some(path));
            }
        }

        debug!(steps, "不存在哈密顿路径");
        Ok(None)
    }

    /// 从指定顶点出发的哈密顿路径
    pub fn path_from(&self, start: VertexId) -> Result<Option<Vec<VertexId>>> {
        self.graph.check_vertex(start)?;
        let mut steps = 0;
        self.search(start, false, &mut steps)
    }

    /// 经过第一个顶点的哈密顿回路（返回的序列不重复起点）
    pub fn cycle(&self) -> Result<Option<Vec<VertexId>>> {
        let start = self.graph.first_vertex_or_err(OPERATION)?;
        let mut steps = 0;
        let cycle = self.search(start, true, &mut steps)?;
        debug!(steps, found = cycle.is_some(), "哈密顿回路搜索结束");
        Ok(cycle)
    }

    /// 图是否存在哈密顿回路
    pub fn is_hamiltonian(&self) -> Result<bool> {
        Ok(self.cycle()?.is_some())
    }

    fn search(
        &self,
        start: VertexId,
        close_cycle: bool,
        steps: &mut u64,
    ) -> Result<Option<Vec<VertexId>>> {
        let n = self.graph.vertex_count();
        // 单个顶点本身即为平凡的哈密顿路径 / 回路
        if n == 1 {
            return Ok(Some(vec![start]));
        }

        let adjacency = self.graph.adjacency();
        let mut on_path = VisitedSet::new(n);
        let mut path = vec![start];
        // cursors[i]：path[i] 下一个待尝试的邻接条目下标
        let mut cursors = vec![0usize];
        on_path.insert(start);

        while let Some(&current) = path.last() {
            if path.len() == n && (!close_cycle || self.graph.has_edge(current, start)) {
                return Ok(Some(path));
            }

            let depth = path.len() - 1;
            let neighbors = adjacency.outgoing(current);
            let mut advanced = false;

            if path.len() < n {
                while cursors[depth] < neighbors.len() {
                    let candidate = neighbors[cursors[depth]].vertex;
                    cursors[depth] += 1;
                    if on_path.contains(candidate) {
                        continue;
                    }

                    *steps += 1;
                    if let Err(e) = self.limits.check_step(*steps, OPERATION) {
                        warn!(steps = *steps, error = %e, "哈密顿搜索提前终止");
                        return Err(e);
                    }

                    on_path.insert(candidate);
                    path.push(candidate);
                    cursors.push(0);
                    advanced = true;
                    break;
                }
            }

            if !advanced {
                // 回溯
                on_path.remove(current);
                path.pop();
                cursors.pop();
            }
        }

        Ok(None)
    }
}
