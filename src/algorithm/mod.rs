//! 图算法模块
//!
//! 遍历、结构判定、路径（欧拉 / 哈密顿 / 最短）、关键元素、
//! 生成结构、最大流与传递闭包

pub mod closure;
pub mod critical;
pub mod euler;
pub mod hamilton;
pub mod max_flow;
pub mod shortest_path;
pub mod spanning;
pub mod structure;
pub mod traversal;
pub mod union_find;

pub use closure::TransitiveClosure;
pub use critical::{CriticalElements, CriticalElementsFinder};
pub use euler::EulerPath;
pub use hamilton::HamiltonSearch;
pub use max_flow::{CutEdge, EdmondsKarp, FlowAssignment, MaxFlow};
pub use shortest_path::{PathFinder, PathResult};
pub use spanning::{MinimumSpanningTree, SpanningBuilder};
pub use structure::{AnalysisReport, StructureAnalyzer};
pub use traversal::{DfsEvent, Traversal, TreeEdge, VisitedSet};
pub use union_find::DisjointSet;
