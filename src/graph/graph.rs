//! 图数据结构
//!
//! 内存中的规范表示：顶点按插入顺序存放在稠密数组中，
//! 边引用顶点下标，邻接索引按下标组织。

use super::edge::{Edge, EdgeId};
use super::index::{AdjacencyIndex, Neighbor};
use super::vertex::{Vertex, VertexId};
use crate::error::{Error, Result};
use crate::types::{Direction, GraphKind, Weight, DEFAULT_WEIGHT};
use indexmap::IndexMap;
use std::fmt;

/// 图
#[derive(Debug, Clone)]
pub struct Graph {
    /// 方向性（显式存储，不从边的对称性推断）
    kind: GraphKind,
    /// 标识符 → 顶点，位置即 VertexId
    vertices: IndexMap<String, Vertex>,
    /// 边序列，位置即 EdgeId
    edges: Vec<Edge>,
    /// 邻接索引
    adjacency: AdjacencyIndex,
}

impl Graph {
    /// 创建空图
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            vertices: IndexMap::new(),
            edges: Vec::new(),
            adjacency: AdjacencyIndex::new(kind.is_directed()),
        }
    }

    /// 创建空的有向图
    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    /// 创建空的无向图
    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    /// 批量加载边序列，最后一次性重建邻接索引
    pub fn from_edges<I, S>(kind: GraphKind, edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S, Weight)>,
        S: Into<String>,
    {
        let mut graph = Self::new(kind);
        for (src, dst, weight) in edges {
            let src = graph.intern(src.into());
            let dst = graph.intern(dst.into());
            let id = EdgeId::from(graph.edges.len());
            graph.edges.push(Edge::new(id, src, dst, weight));
        }
        graph.rebuild_adjacency();
        graph
    }

    /// 获取方向性
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// 构造时声明的方向性
    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点；标识符已存在时视为覆盖，返回原有 ID
    pub fn add_vertex(&mut self, key: impl Into<String>) -> VertexId {
        let key = key.into();
        if let Some(index) = self.vertices.get_index_of(&key) {
            return VertexId::from(index);
        }
        let id = self.intern(key);
        self.adjacency.add_vertex();
        id
    }

    /// 只登记顶点，不触碰邻接索引
    fn intern(&mut self, key: String) -> VertexId {
        if let Some(index) = self.vertices.get_index_of(&key) {
            return VertexId::from(index);
        }
        let id = VertexId::from(self.vertices.len());
        self.vertices.insert(key.clone(), Vertex::new(id, key));
        id
    }

    /// 通过标识符查找顶点 ID
    pub fn vertex_id(&self, key: &str) -> Option<VertexId> {
        self.vertices.get_index_of(key).map(VertexId::from)
    }

    /// 通过标识符查找顶点 ID，不存在时报错
    pub fn require_vertex(&self, key: &str) -> Result<VertexId> {
        self.vertex_id(key)
            .ok_or_else(|| Error::VertexNotFound(key.to_string()))
    }

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get_index(id.index()).map(|(_, v)| v)
    }

    /// 获取顶点标识符
    pub fn key(&self, id: VertexId) -> Option<&str> {
        self.vertices
            .get_index(id.index())
            .map(|(key, _)| key.as_str())
    }

    /// 把 ID 序列转换为标识符序列（用于展示）
    pub fn keys(&self, ids: &[VertexId]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.key(id))
            .map(str::to_string)
            .collect()
    }

    /// 所有顶点（插入顺序）
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    /// 所有顶点 ID（插入顺序）
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId::from)
    }

    /// 第一个顶点（空图返回 None）
    pub fn first_vertex(&self) -> Option<VertexId> {
        if self.vertices.is_empty() {
            None
        } else {
            Some(VertexId::new(0))
        }
    }

    /// 需要起始顶点的操作使用；空图返回 InvalidState
    pub fn first_vertex_or_err(&self, operation: &str) -> Result<VertexId> {
        self.first_vertex()
            .ok_or_else(|| Error::empty_graph(operation))
    }

    /// 检查 ID 是否属于本图
    pub fn check_vertex(&self, id: VertexId) -> Result<VertexId> {
        if id.index() < self.vertices.len() {
            Ok(id)
        } else {
            Err(Error::VertexNotFound(format!("#{}", id.0)))
        }
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 是否没有任何顶点
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ==================== 边操作 ====================

    /// 添加边；缺失的端点会被自动创建
    pub fn add_edge(
        &mut self,
        src: impl Into<String>,
        dst: impl Into<String>,
        weight: Weight,
    ) -> EdgeId {
        self.add_edge_with_id(src, dst, weight, None)
    }

    /// 添加无权边（权重 1）
    pub fn add_unweighted_edge(
        &mut self,
        src: impl Into<String>,
        dst: impl Into<String>,
    ) -> EdgeId {
        self.add_edge(src, dst, DEFAULT_WEIGHT)
    }

    /// 添加边并记录输入文件中的边编号
    pub fn add_edge_with_id(
        &mut self,
        src: impl Into<String>,
        dst: impl Into<String>,
        weight: Weight,
        external_id: Option<u64>,
    ) -> EdgeId {
        let src = self.add_vertex(src);
        let dst = self.add_vertex(dst);
        self.push_edge(src, dst, weight, external_id)
    }

    /// 在已有顶点之间添加边
    pub fn add_edge_between(
        &mut self,
        src: VertexId,
        dst: VertexId,
        weight: Weight,
    ) -> Result<EdgeId> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;
        Ok(self.push_edge(src, dst, weight, None))
    }

    fn push_edge(
        &mut self,
        src: VertexId,
        dst: VertexId,
        weight: Weight,
        external_id: Option<u64>,
    ) -> EdgeId {
        let id = EdgeId::from(self.edges.len());
        let edge = Edge::new(id, src, dst, weight).with_external_id(external_id);
        self.adjacency.add_edge(&edge);
        self.edges.push(edge);
        id
    }

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// 边序列
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 是否存在 u → v 的边（无向图两个方向等价）
    pub fn has_edge(&self, src: VertexId, dst: VertexId) -> bool {
        self.adjacency
            .outgoing(src)
            .iter()
            .any(|n| n.vertex == dst)
    }

    // ==================== 邻居查询 ====================

    /// 获取顶点的邻居（出边方向，保持邻接顺序）；未知顶点返回空
    pub fn neighbors(&self, vertex_id: VertexId) -> Vec<VertexId> {
        self.adjacency
            .outgoing(vertex_id)
            .iter()
            .map(|n| n.vertex)
            .collect()
    }

    /// 按方向获取邻接条目
    pub fn neighbors_in(
        &self,
        vertex_id: VertexId,
        direction: Direction,
    ) -> impl Iterator<Item = Neighbor> + '_ {
        self.adjacency.neighbors(vertex_id, direction)
    }

    /// 获取顶点的总度数
    pub fn degree(&self, vertex_id: VertexId) -> usize {
        self.adjacency.degree(vertex_id)
    }

    /// 获取顶点的出度
    pub fn out_degree(&self, vertex_id: VertexId) -> usize {
        self.adjacency.out_degree(vertex_id)
    }

    /// 获取顶点的入度
    pub fn in_degree(&self, vertex_id: VertexId) -> usize {
        self.adjacency.in_degree(vertex_id)
    }

    /// 获取邻接索引引用
    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    /// 从边序列重建邻接索引，O(V + E)
    pub fn rebuild_adjacency(&mut self) {
        self.adjacency =
            AdjacencyIndex::build(self.is_directed(), self.vertices.len(), &self.edges);
    }

    // ==================== 派生表示 ====================

    /// 邻接矩阵；无向图对称，平行边以最后声明的为准
    pub fn adjacency_matrix(&self) -> Vec<Vec<Weight>> {
        let n = self.vertex_count();
        let mut matrix = vec![vec![0; n]; n];
        for edge in &self.edges {
            let (u, v) = (edge.src().index(), edge.dst().index());
            matrix[u][v] = edge.weight();
            if !self.is_directed() {
                matrix[v][u] = edge.weight();
            }
        }
        matrix
    }
}

/// 邻接表形式输出，每行 `A -> B -> C;`
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in self.vertices() {
            write!(f, "{}", vertex.key())?;
            for neighbor in self.adjacency.outgoing(vertex.id()) {
                write!(f, " -> {}", self.key(neighbor.vertex).unwrap_or("?"))?;
            }
            writeln!(f, ";")?;
        }
        Ok(())
    }
}
