//! 邻接索引
//!
//! 顶点 → 有序邻居序列。每个条目同时记录经过的边，
//! 使算法能够区分平行边与自环。

use crate::graph::edge::{Edge, EdgeId};
use crate::graph::vertex::VertexId;
use crate::types::Direction;
use smallvec::SmallVec;

/// 邻接条目：邻居顶点 + 所经过的边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighbor {
    pub vertex: VertexId,
    pub edge: EdgeId,
}

/// 单个顶点的邻居序列
pub type NeighborList = SmallVec<[Neighbor; 4]>;

const NO_NEIGHBORS: &[Neighbor] = &[];

/// 邻接索引
#[derive(Debug, Clone)]
pub struct AdjacencyIndex {
    /// 是否有向
    directed: bool,
    /// 出边邻居（无向图中即全部邻居）
    outgoing: Vec<NeighborList>,
    /// 入边邻居（仅有向图使用）
    incoming: Vec<NeighborList>,
}

impl AdjacencyIndex {
    /// 创建空索引
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// 从边序列批量构建，O(V + E)
    pub fn build(directed: bool, vertex_count: usize, edges: &[Edge]) -> Self {
        let mut index = Self::new(directed);
        index.outgoing.resize_with(vertex_count, NeighborList::new);
        if directed {
            index.incoming.resize_with(vertex_count, NeighborList::new);
        }
        for edge in edges {
            index.add_edge(edge);
        }
        index
    }

    /// 为新顶点分配空邻居序列
    pub fn add_vertex(&mut self) {
        self.outgoing.push(NeighborList::new());
        if self.directed {
            self.incoming.push(NeighborList::new());
        }
    }

    /// 增量加入一条边（端点必须已存在）
    pub fn add_edge(&mut self, edge: &Edge) {
        let (src, dst, id) = (edge.src(), edge.dst(), edge.id());
        self.outgoing[src.index()].push(Neighbor {
            vertex: dst,
            edge: id,
        });
        if self.directed {
            self.incoming[dst.index()].push(Neighbor {
                vertex: src,
                edge: id,
            });
        } else {
            // 无向自环在同一顶点上出现两次，度数按 2 计
            self.outgoing[dst.index()].push(Neighbor {
                vertex: src,
                edge: id,
            });
        }
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    /// 出边邻居切片（未知顶点返回空切片）
    pub fn outgoing(&self, vertex: VertexId) -> &[Neighbor] {
        self.outgoing
            .get(vertex.index())
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// 入边邻居切片（无向图与出边相同）
    pub fn incoming(&self, vertex: VertexId) -> &[Neighbor] {
        if !self.directed {
            return self.outgoing(vertex);
        }
        self.incoming
            .get(vertex.index())
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// 按方向遍历邻居，保持邻接顺序
    pub fn neighbors(
        &self,
        vertex: VertexId,
        direction: Direction,
    ) -> impl Iterator<Item = Neighbor> + '_ {
        let (first, second) = match direction {
            _ if !self.directed => (self.outgoing(vertex), NO_NEIGHBORS),
            Direction::Outgoing => (self.outgoing(vertex), NO_NEIGHBORS),
            Direction::Incoming => (self.incoming(vertex), NO_NEIGHBORS),
            Direction::Both => (self.outgoing(vertex), self.incoming(vertex)),
        };
        first.iter().chain(second.iter()).copied()
    }

    /// 出度
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.outgoing(vertex).len()
    }

    /// 入度
    pub fn in_degree(&self, vertex: VertexId) -> usize {
        self.incoming(vertex).len()
    }

    /// 总度数：边端点出现次数
    pub fn degree(&self, vertex: VertexId) -> usize {
        if self.directed {
            self.out_degree(vertex) + self.in_degree(vertex)
        } else {
            self.out_degree(vertex)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(u32, u32)]) -> Vec<Edge> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(u, v))| Edge::unweighted(EdgeId::from(i), VertexId(u), VertexId(v)))
            .collect()
    }

    #[test]
    fn test_undirected_mirroring() {
        let index = AdjacencyIndex::build(false, 3, &edges(&[(0, 1), (1, 2)]));

        let n1: Vec<_> = index
            .neighbors(VertexId(1), Direction::Outgoing)
            .map(|n| n.vertex)
            .collect();
        assert_eq!(n1, vec![VertexId(0), VertexId(2)]);
        assert_eq!(index.degree(VertexId(1)), 2);
        assert_eq!(index.incoming(VertexId(1)), index.outgoing(VertexId(1)));
    }

    #[test]
    fn test_directed_views() {
        let index = AdjacencyIndex::build(true, 3, &edges(&[(0, 1), (2, 1)]));

        assert_eq!(index.out_degree(VertexId(1)), 0);
        assert_eq!(index.in_degree(VertexId(1)), 2);
        assert_eq!(index.degree(VertexId(1)), 2);

        let both: Vec<_> = index
            .neighbors(VertexId(0), Direction::Both)
            .map(|n| n.vertex)
            .collect();
        assert_eq!(both, vec![VertexId(1)]);
    }

    #[test]
    fn test_self_loop_degree() {
        let undirected = AdjacencyIndex::build(false, 1, &edges(&[(0, 0)]));
        assert_eq!(undirected.degree(VertexId(0)), 2);

        let directed = AdjacencyIndex::build(true, 1, &edges(&[(0, 0)]));
        assert_eq!(directed.degree(VertexId(0)), 2);
    }

    #[test]
    fn test_unknown_vertex_is_empty() {
        let index = AdjacencyIndex::build(true, 1, &[]);
        assert!(index.outgoing(VertexId(7)).is_empty());
        assert_eq!(index.neighbors(VertexId(7), Direction::Both).count(), 0);
    }
}
