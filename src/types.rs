//! 通用类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 边权重（整数，1 表示“无权”）
pub type Weight = i64;

/// 默认边权重
pub const DEFAULT_WEIGHT: Weight = 1;

/// 遍历方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Outgoing
    }
}

/// 图的方向性（构造时显式指定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphKind {
    /// 有向图
    Directed,
    /// 无向图：每条声明的边只存一次，邻接索引两端镜像
    Undirected,
}

impl GraphKind {
    pub fn is_directed(&self) -> bool {
        matches!(self, GraphKind::Directed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphKind::Directed => "directed",
            GraphKind::Undirected => "undirected",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
