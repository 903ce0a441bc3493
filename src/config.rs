//! 分析配置
//!
//! 指数级 / 立方级算法的规模上限与协作式取消

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 分析配置（可从 JSON 文件加载）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 哈密顿回溯的最大扩展步数，None 表示不限制
    pub hamilton_step_limit: Option<u64>,
    /// 传递闭包允许的最大顶点数，None 表示不限制
    pub closure_vertex_limit: Option<usize>,
    /// 日志过滤器（RUST_LOG 语法）
    pub log_filter: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hamilton_step_limit: Some(10_000_000),
            closure_vertex_limit: Some(4096),
            log_filter: "info".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// 从 JSON 文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        serde_json::from_slice(&data).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// 不设任何上限的配置
    pub fn unlimited() -> Self {
        Self {
            hamilton_step_limit: None,
            closure_vertex_limit: None,
            ..Self::default()
        }
    }

    /// 哈密顿搜索使用的限制
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_steps: self.hamilton_step_limit,
            max_vertices: self.closure_vertex_limit,
            cancel: None,
        }
    }
}

/// 协作式取消标记，可在线程间共享
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// 单次搜索的规模上限
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// 最大扩展步数
    pub max_steps: Option<u64>,
    /// 最大顶点数
    pub max_vertices: Option<usize>,
    /// 取消标记
    pub cancel: Option<CancelToken>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn with_max_vertices(mut self, vertices: usize) -> Self {
        self.max_vertices = Some(vertices);
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// 搜索开始前检查图规模
    pub(crate) fn check_vertices(&self, vertex_count: usize, operation: &str) -> Result<()> {
        match self.max_vertices {
            Some(max) if vertex_count > max => Err(Error::LimitExceeded(format!(
                "{}: 顶点数 {} 超过上限 {}",
                operation, vertex_count, max
            ))),
            _ => Ok(()),
        }
    }

    /// 每一步调用一次；`steps` 为已执行步数
    pub(crate) fn check_step(&self, steps: u64, operation: &str) -> Result<()> {
        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                return Err(Error::Cancelled);
            }
        }
        match self.max_steps {
            Some(max) if steps > max => Err(Error::LimitExceeded(format!(
                "{}: 已执行 {} 步，上限 {}",
                operation, steps, max
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_from_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"hamilton_step_limit": 500, "log_filter": "debug"}}"#).unwrap();

        let config = AnalysisConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.hamilton_step_limit, Some(500));
        assert_eq!(config.log_filter, "debug");
        // 未给出的字段取默认值
        assert_eq!(config.closure_vertex_limit, Some(4096));
    }

    #[test]
    fn test_config_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let err = AnalysisConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_limits() {
        let limits = SearchLimits::unlimited().with_max_steps(3).with_max_vertices(2);
        assert!(limits.check_step(3, "t").is_ok());
        assert!(matches!(limits.check_step(4, "t"), Err(Error::LimitExceeded(_))));
        assert!(limits.check_vertices(2, "t").is_ok());
        assert!(matches!(limits.check_vertices(3, "t"), Err(Error::LimitExceeded(_))));
    }

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        let limits = SearchLimits::unlimited().with_cancel(token.clone());
        assert!(limits.check_step(1, "t").is_ok());

        token.cancel();
        assert!(matches!(limits.check_step(2, "t"), Err(Error::Cancelled)));
    }
}
