//! GraphProbe - 内存图分析引擎
//!
//! 在一个规范的内存图表示上提供：
//! - 结构判定（连通、二部、欧拉、哈密顿、环、平面性启发式）
//! - 欧拉路径与哈密顿路径搜索、加权最短路径
//! - 割点与桥
//! - DFS/BFS 生成树、最小生成树、拓扑序
//! - 最大流（Edmonds-Karp）与传递闭包
//! - 两种文本格式的图导入

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod import;
pub mod types;

// 重导出常用类型
pub use config::{AnalysisConfig, CancelToken, SearchLimits};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId};
pub use types::{Direction, GraphKind, Weight, DEFAULT_WEIGHT};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
