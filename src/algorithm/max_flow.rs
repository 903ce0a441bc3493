//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson）。
//! 容量取自边权重（非负整数）；平行边容量累加，无向边两个方向各有一份容量。

use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, VertexId};
use crate::types::Weight;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::debug;

/// 一对顶点之间的净流量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowAssignment {
    pub src: VertexId,
    pub dst: VertexId,
    pub flow: Weight,
}

/// 最小割上的一条边
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutEdge {
    pub edge: EdgeId,
    pub capacity: Weight,
}

/// 最大流结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 最大流量值
    pub value: Weight,
    /// 正的净流量（按顶点对排序）
    pub flow: Vec<FlowAssignment>,
    /// 最小割的源侧顶点集
    pub source_side: BTreeSet<VertexId>,
    /// 从源侧指向汇侧的原图边
    pub cut_edges: Vec<CutEdge>,
}

impl MaxFlow {
    /// 最小割容量；由最大流最小割定理应等于 `value`
    pub fn cut_capacity(&self) -> Weight {
        self.cut_edges.iter().map(|e| e.capacity).sum()
    }
}

type Capacity = HashMap<(VertexId, VertexId), Weight>;

/// Edmonds-Karp 最大流算法
pub struct EdmondsKarp<'a> {
    graph: &'a Graph,
}

impl<'a> EdmondsKarp<'a> {
    /// 创建算法实例
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 计算从 source 到 sink 的最大流
    pub fn max_flow(&self, source: VertexId, sink: VertexId) -> Result<MaxFlow> {
        self.graph.check_vertex(source)?;
        self.graph.check_vertex(sink)?;
        if source == sink {
            return Err(Error::InvalidArgument("源点与汇点不能相同".to_string()));
        }

        let capacity = self.build_capacity()?;

        // 残余图邻接表（含反向边）
        let mut adj: Vec<Vec<VertexId>> = vec![Vec::new(); self.graph.vertex_count()];
        for &(src, dst) in capacity.keys() {
            adj[src.index()].push(dst);
            adj[dst.index()].push(src);
        }
        for neighbors in &mut adj {
            neighbors.sort();
            neighbors.dedup();
        }

        // 流量矩阵（反对称）
        let mut flow: Capacity = HashMap::new();
        let mut max_flow_value: Weight = 0;
        let mut augmentations = 0;

        // Edmonds-Karp: 重复 BFS 找增广路径
        while let Some((path, bottleneck)) =
            self.bfs_find_path(source, sink, &capacity, &flow, &adj)
        {
            for pair in path.windows(2) {
                let (u, v) = (pair[0], pair[1]);
                *flow.entry((u, v)).or_insert(0) += bottleneck;
                *flow.entry((v, u)).or_insert(0) -= bottleneck;
            }
            max_flow_value = max_flow_value
                .checked_add(bottleneck)
                .ok_or_else(|| Error::weight_overflow("最大流总量"))?;
            augmentations += 1;
        }

        // 找最小割（残余图中从源点可达的顶点属于源侧）
        let source_side = self.find_source_side(source, &capacity, &flow, &adj);
        let cut_edges = self.cut_edges(&source_side);

        // 只保留正流量
        let mut positive_flow: Vec<FlowAssignment> = flow
            .into_iter()
            .filter(|&(_, f)| f > 0)
            .map(|((src, dst), flow)| FlowAssignment { src, dst, flow })
            .collect();
        positive_flow.sort_by_key(|a| (a.src, a.dst));

        debug!(
            source = source.0,
            sink = sink.0,
            flow = max_flow_value,
            augmentations,
            "最大流计算完成"
        );

        Ok(MaxFlow {
            value: max_flow_value,
            flow: positive_flow,
            source_side,
            cut_edges,
        })
    }

    /// 构建容量表；负权重视为非法
    fn build_capacity(&self) -> Result<Capacity> {
        let mut capacity: Capacity = HashMap::new();

        for edge in self.graph.edges() {
            if edge.weight() < 0 {
                return Err(Error::InvalidArgument(format!(
                    "边 {} 的容量为负数: {}",
                    edge.id().0,
                    edge.weight()
                )));
            }
            if edge.is_loop() {
                continue;
            }

            // 累加同一对顶点的容量
            Self::add_capacity(&mut capacity, edge.src(), edge.dst(), edge.weight())?;
            if !self.graph.is_directed() {
                Self::add_capacity(&mut capacity, edge.dst(), edge.src(), edge.weight())?;
            }
        }

        Ok(capacity)
    }

    fn add_capacity(
        capacity: &mut Capacity,
        src: VertexId,
        dst: VertexId,
        weight: Weight,
    ) -> Result<()> {
        let slot = capacity.entry((src, dst)).or_insert(0);
        *slot = slot
            .checked_add(weight)
            .ok_or_else(|| Error::weight_overflow("最大流容量"))?;
        Ok(())
    }

    /// 残余容量；反向流量可能使差值超出范围，此时截断到 `Weight::MAX`
    fn residual(capacity: &Capacity, flow: &Capacity, u: VertexId, v: VertexId) -> Weight {
        let cap = capacity.get(&(u, v)).copied().unwrap_or(0);
        let used = flow.get(&(u, v)).copied().unwrap_or(0);
        cap.saturating_sub(used)
    }

    /// BFS 找最短增广路径，返回路径与瓶颈容量
    fn bfs_find_path(
        &self,
        source: VertexId,
        sink: VertexId,
        capacity: &Capacity,
        flow: &Capacity,
        adj: &[Vec<VertexId>],
    ) -> Option<(Vec<VertexId>, Weight)> {
        let mut parent: Vec<Option<VertexId>> = vec![None; adj.len()];
        let mut queue = VecDeque::new();
        queue.push_back(source);

        'search: while let Some(u) = queue.pop_front() {
            for &v in &adj[u.index()] {
                if v == source || parent[v.index()].is_some() {
                    continue;
                }
                if Self::residual(capacity, flow, u, v) > 0 {
                    parent[v.index()] = Some(u);
                    if v == sink {
                        break 'search;
                    }
                    queue.push_back(v);
                }
            }
        }

        // 重构路径
        parent[sink.index()]?;
        let mut path = vec![sink];
        let mut current = sink;
        while current != source {
            current = parent[current.index()]?;
            path.push(current);
        }
        path.reverse();

        let bottleneck = path
            .windows(2)
            .map(|pair| Self::residual(capacity, flow, pair[0], pair[1]))
            .min()?;

        Some((path, bottleneck))
    }

    /// 找最小割的源侧顶点
    fn find_source_side(
        &self,
        source: VertexId,
        capacity: &Capacity,
        flow: &Capacity,
        adj: &[Vec<VertexId>],
    ) -> BTreeSet<VertexId> {
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();

        visited.insert(source);
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &v in &adj[u.index()] {
                if !visited.contains(&v) && Self::residual(capacity, flow, u, v) > 0 {
                    visited.insert(v);
                    queue.push_back(v);
                }
            }
        }

        visited
    }

    /// 跨越割的原图边（无向边任一方向跨越都计入）
    fn cut_edges(&self, source_side: &BTreeSet<VertexId>) -> Vec<CutEdge> {
        self.graph
            .edges()
            .iter()
            .filter(|e| {
                let src_in = source_side.contains(&e.src());
                let dst_in = source_side.contains(&e.dst());
                (src_in && !dst_in) || (!self.graph.is_directed() && dst_in && !src_in)
            })
            .map(|e| CutEdge {
                edge: e.id(),
                capacity: e.weight(),
            })
            .collect()
    }
}
