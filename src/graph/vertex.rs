//! 顶点定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（图内稠密下标，按插入顺序分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for VertexId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

/// 顶点：唯一标识符 + 稠密 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 外部标识符（相等性只看它）
    key: String,
}

impl Vertex {
    pub fn new(id: VertexId, key: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取标识符
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}
