//! 欧拉路径提取（Hierholzer，迭代实现）
//!
//! 行走时会消耗邻接条目，因此始终在邻接索引的私有副本上进行，
//! 原图保持不变，之后的查询结果不受影响。

use crate::error::{Error, Result};
use crate::graph::{Graph, Neighbor, VertexId};
use std::collections::VecDeque;
use tracing::debug;

/// 欧拉路径查找器
pub struct EulerPath<'a> {
    graph: &'a Graph,
}

impl<'a> EulerPath<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 返回经过每条边恰好一次的顶点序列（长度 = 边数 + 1）
    pub fn find(&self) -> Result<Vec<VertexId>> {
        self.graph.first_vertex_or_err("欧拉路径")?;

        let start = if self.graph.is_directed() {
            self.directed_start()?
        } else {
            self.undirected_start()?
        };

        // 私有工作副本
        let mut remaining: Vec<VecDeque<Neighbor>> = self
            .graph
            .vertex_ids()
            .map(|v| self.graph.adjacency().outgoing(v).iter().copied().collect())
            .collect();

        let mut stack = vec![start];
        let mut trail = Vec::with_capacity(self.graph.edge_count() + 1);

        while let Some(&top) = stack.last() {
            match remaining[top.index()].pop_front() {
                Some(next) => {
                    if !self.graph.is_directed() {
                        // 无向边在两个端点上各有一个条目，一并消耗
                        let mirror = &mut remaining[next.vertex.index()];
                        if let Some(pos) = mirror.iter().position(|n| n.edge == next.edge) {
                            mirror.remove(pos);
                        }
                    }
                    stack.push(next.vertex);
                }
                None => {
                    trail.push(top);
                    stack.pop();
                }
            }
        }

        trail.reverse();

        if trail.len() != self.graph.edge_count() + 1 {
            return Err(Error::NoEulerianPath(format!(
                "只能连续经过 {} 条边，共 {} 条（边不连通）",
                trail.len().saturating_sub(1),
                self.graph.edge_count()
            )));
        }

        debug!(edges = self.graph.edge_count(), "找到欧拉路径");
        Ok(trail)
    }

    /// 无向图：奇度顶点数必须为 0 或 2，有奇度顶点时从它出发
    fn undirected_start(&self) -> Result<VertexId> {
        let odd: Vec<VertexId> = self
            .graph
            .vertex_ids()
            .filter(|&v| self.graph.degree(v) % 2 == 1)
            .collect();

        match odd.len() {
            0 => Ok(self.first_with_edges()),
            2 => Ok(odd[0]),
            count => Err(Error::NoEulerianPath(format!(
                "奇度顶点有 {} 个，应为 0 或 2",
                count
            ))),
        }
    }

    /// 有向图：至多一个顶点出度比入度大 1（起点），一个小 1（终点）
    fn directed_start(&self) -> Result<VertexId> {
        let mut start = None;
        let mut end = None;

        for v in self.graph.vertex_ids() {
            let balance = self.graph.out_degree(v) as i64 - self.graph.in_degree(v) as i64;
            match balance {
                0 => {}
                1 if start.is_none() => start = Some(v),
                -1 if end.is_none() => end = Some(v),
                _ => {
                    return Err(Error::NoEulerianPath(format!(
                        "顶点 {} 的出入度不平衡",
                        self.graph.key(v).unwrap_or("?")
                    )))
                }
            }
        }

        match (start, end) {
            (Some(s), Some(_)) => Ok(s),
            (None, None) => Ok(self.first_with_edges()),
            _ => Err(Error::NoEulerianPath("出入度不平衡的顶点不成对".to_string())),
        }
    }

    /// 第一个有出边的顶点；没有边时取第一个顶点
    fn first_with_edges(&self) -> VertexId {
        self.graph
            .vertex_ids()
            .find(|&v| self.graph.out_degree(v) > 0)
            .unwrap_or(VertexId::new(0))
    }
}
