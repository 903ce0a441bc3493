//! 边定义

use crate::graph::vertex::VertexId;
use crate::types::{Weight, DEFAULT_WEIGHT};
use serde::{Deserialize, Serialize};

/// 边 ID（在边序列中的位置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl EdgeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for EdgeId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

/// 边：有向记录（src → dst），无向图中由邻接索引双向镜像
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 源顶点 ID
    src: VertexId,
    /// 目标顶点 ID
    dst: VertexId,
    /// 权重
    weight: Weight,
    /// 输入文件中的边编号
    external_id: Option<u64>,
}

impl Edge {
    /// 创建新边
    pub fn new(id: EdgeId, src: VertexId, dst: VertexId, weight: Weight) -> Self {
        Self {
            id,
            src,
            dst,
            weight,
            external_id: None,
        }
    }

    /// 创建无权边（权重 1）
    pub fn unweighted(id: EdgeId, src: VertexId, dst: VertexId) -> Self {
        Self::new(id, src, dst, DEFAULT_WEIGHT)
    }

    pub fn with_external_id(mut self, external_id: Option<u64>) -> Self {
        self.external_id = external_id;
        self
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 获取源顶点 ID
    pub fn src(&self) -> VertexId {
        self.src
    }

    /// 获取目标顶点 ID
    pub fn dst(&self) -> VertexId {
        self.dst
    }

    /// 获取权重
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// 获取外部编号
    pub fn external_id(&self) -> Option<u64> {
        self.external_id
    }

    /// 是否自环
    pub fn is_loop(&self) -> bool {
        self.src == self.dst
    }

    /// 给定一个端点，返回另一个端点
    pub fn opposite(&self, endpoint: VertexId) -> Option<VertexId> {
        if endpoint == self.src {
            Some(self.dst)
        } else if endpoint == self.dst {
            Some(self.src)
        } else {
            None
        }
    }
}
