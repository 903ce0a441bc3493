//! 数据导入模块
//!
//! 两种文本格式：
//!
//! 边表格式
//! ```text
//! 4 4
//! nao_direcionado
//! 1 A B 1
//! 2 B C 1
//! 3 C D 1
//! 4 D A 1
//! ```
//!
//! 花括号格式（默认无向，权重可省略）
//! ```text
//! {A,B,C}
//! {(A,B,2), (B,C)}
//! ```
//!
//! 任何一行出错都返回带行号的 `FormatError`，不会返回部分构建的图。

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::{GraphKind, Weight, DEFAULT_WEIGHT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

const DIRECTED_MARKER: &str = "direcionado";
const UNDIRECTED_MARKER: &str = "nao_direcionado";

/// 输入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFormat {
    /// 表头 + 方向行 + `<id> <u> <v> <w>` 边行
    EdgeList,
    /// `{v1,...}` 顶点集 + `{(u,v[,w]),...}` 边集
    BraceSet,
}

impl InputFormat {
    /// 按第一个非空白字符判断格式
    pub fn sniff(text: &str) -> Self {
        match text.trim_start().chars().next() {
            Some('{') => InputFormat::BraceSet,
            _ => InputFormat::EdgeList,
        }
    }
}

/// 导入统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub format: InputFormat,
    pub kind: GraphKind,
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub duration_ms: u64,
}

/// 图导入器
#[derive(Debug, Clone)]
pub struct GraphImporter {
    /// 花括号格式没有方向行，由调用方决定
    brace_kind: GraphKind,
}

impl Default for GraphImporter {
    fn default() -> Self {
        Self {
            brace_kind: GraphKind::Undirected,
        }
    }
}

impl GraphImporter {
    /// 创建导入器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置花括号格式的方向性
    pub fn with_brace_kind(mut self, kind: GraphKind) -> Self {
        self.brace_kind = kind;
        self
    }

    /// 按内容自动识别格式并导入文件
    pub fn import_path<P: AsRef<Path>>(&self, path: P) -> Result<(Graph, ImportStats)> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let format = InputFormat::sniff(&text);
        self.import_text(&text, format, path.as_ref())
    }

    /// 导入边表格式文件
    pub fn import_edge_list<P: AsRef<Path>>(&self, path: P) -> Result<(Graph, ImportStats)> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.import_text(&text, InputFormat::EdgeList, path.as_ref())
    }

    /// 导入花括号格式文件
    pub fn import_brace_set<P: AsRef<Path>>(&self, path: P) -> Result<(Graph, ImportStats)> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.import_text(&text, InputFormat::BraceSet, path.as_ref())
    }

    fn import_text(
        &self,
        text: &str,
        format: InputFormat,
        path: &Path,
    ) -> Result<(Graph, ImportStats)> {
        let start = std::time::Instant::now();
        let graph = match format {
            InputFormat::EdgeList => parse_edge_list(text)?,
            InputFormat::BraceSet => parse_brace_set(text, self.brace_kind)?,
        };

        let stats = ImportStats {
            format,
            kind: graph.kind(),
            vertices_imported: graph.vertex_count(),
            edges_imported: graph.edge_count(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            path = %path.display(),
            format = ?stats.format,
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            "图导入完成"
        );
        Ok((graph, stats))
    }
}

/// 以默认设置导入边表格式文件
pub fn load_edge_list<P: AsRef<Path>>(path: P) -> Result<Graph> {
    Ok(GraphImporter::new().import_edge_list(path)?.0)
}

/// 导入花括号格式文件
pub fn load_brace_set<P: AsRef<Path>>(path: P, kind: GraphKind) -> Result<Graph> {
    Ok(GraphImporter::new()
        .with_brace_kind(kind)
        .import_brace_set(path)?
        .0)
}

/// 自动识别格式导入文件（花括号格式按无向图处理）
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Graph> {
    Ok(GraphImporter::new().import_path(path)?.0)
}

// ==================== 边表格式 ====================

/// 解析边表格式文本
pub fn parse_edge_list(text: &str) -> Result<Graph> {
    // (行号, 内容)，跳过空行
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line_no, header) = lines
        .next()
        .ok_or_else(|| Error::format(1, "缺少表头 \"<顶点数> <边数>\""))?;
    let counts: Vec<&str> = header.split_whitespace().collect();
    let [vertex_count, edge_count] = counts.as_slice() else {
        return Err(Error::format(
            line_no,
            format!("表头应为两个整数，实际为 \"{}\"", header),
        ));
    };
    let vertex_count: usize = parse_number(line_no, vertex_count, "顶点数")?;
    let edge_count: usize = parse_number(line_no, edge_count, "边数")?;

    let (line_no, marker) = lines
        .next()
        .ok_or_else(|| Error::format(line_no + 1, "缺少方向行"))?;
    let kind = match marker {
        DIRECTED_MARKER => GraphKind::Directed,
        UNDIRECTED_MARKER => GraphKind::Undirected,
        other => {
            return Err(Error::format(
                line_no,
                format!(
                    "方向行应为 \"{}\" 或 \"{}\"，实际为 \"{}\"",
                    DIRECTED_MARKER, UNDIRECTED_MARKER, other
                ),
            ))
        }
    };

    let mut graph = Graph::new(kind);
    let mut last_line = line_no;

    for index in 0..edge_count {
        let (line_no, line) = lines.next().ok_or_else(|| {
            Error::format(
                last_line + 1,
                format!("声明了 {} 条边，只读到 {} 条", edge_count, index),
            )
        })?;
        last_line = line_no;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [id, src, dst, weight] = tokens.as_slice() else {
            return Err(Error::format(
                line_no,
                format!("边行应为 \"<编号> <起点> <终点> <权重>\"，实际为 \"{}\"", line),
            ));
        };
        let id: u64 = parse_number(line_no, id, "边编号")?;
        let weight: Weight = parse_number(line_no, weight, "权重")?;

        graph.add_edge_with_id(*src, *dst, weight, Some(id));
    }

    if let Some((line_no, _)) = lines.next() {
        return Err(Error::format(
            line_no,
            format!("已读完声明的 {} 条边，存在多余内容", edge_count),
        ));
    }

    if graph.vertex_count() > vertex_count {
        return Err(Error::format(
            1,
            format!(
                "声明了 {} 个顶点，边中出现了 {} 个",
                vertex_count,
                graph.vertex_count()
            ),
        ));
    }
    if graph.vertex_count() < vertex_count {
        // 孤立顶点在该格式中没有名字，无法还原
        warn!(
            declared = vertex_count,
            found = graph.vertex_count(),
            "声明的顶点数多于边中出现的顶点数"
        );
    }

    Ok(graph)
}

fn parse_number<T: std::str::FromStr>(line: usize, token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| Error::format(line, format!("{}不是合法数字: \"{}\"", what, token)))
}

// ==================== 花括号格式 ====================

/// 带行号跟踪的字符游标
struct Cursor<'t> {
    text: &'t str,
    pos: usize,
    line: usize,
}

impl<'t> Cursor<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_whitespace();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("期望 '{}'，实际为 '{}'", expected, c))),
            None => Err(self.error(format!("期望 '{}'，但输入已结束", expected))),
        }
    }

    /// 读取直到任一终止符（不消耗终止符），返回去掉首尾空白的内容
    fn take_until(&mut self, stops: &[char]) -> Result<&'t str> {
        let begin = self.pos;
        loop {
            match self.peek() {
                Some(c) if stops.contains(&c) => break,
                Some(_) => {
                    self.bump();
                }
                None => return Err(self.error("括号未闭合")),
            }
        }
        Ok(self.text[begin..self.pos].trim())
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::format(self.line, message)
    }
}

/// 解析花括号格式文本
pub fn parse_brace_set(text: &str, kind: GraphKind) -> Result<Graph> {
    let mut graph = Graph::new(kind);
    let mut cursor = Cursor::new(text);

    // 顶点集
    cursor.expect('{')?;
    loop {
        let name = cursor.take_until(&[',', '}'])?;
        if !name.is_empty() {
            graph.add_vertex(name);
        }
        if cursor.bump() == Some('}') {
            break;
        }
    }

    // 边集
    cursor.expect('{')?;
    cursor.skip_whitespace();
    if cursor.peek() == Some('}') {
        cursor.bump();
    } else {
        loop {
            cursor.expect('(')?;
            let line = cursor.line;
            let body = cursor.take_until(&[')'])?;
            cursor.bump();
            add_tuple(&mut graph, line, body)?;

            cursor.skip_whitespace();
            match cursor.bump() {
                Some(',') => continue,
                Some('}') => break,
                Some(c) => return Err(cursor.error(format!("边集中出现意外字符 '{}'", c))),
                None => return Err(cursor.error("边集未闭合")),
            }
        }
    }

    cursor.skip_whitespace();
    if cursor.peek().is_some() {
        return Err(cursor.error("边集之后存在多余内容"));
    }

    Ok(graph)
}

/// `u,v` 或 `u,v,w`
fn add_tuple(graph: &mut Graph, line: usize, body: &str) -> Result<()> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let (src, dst, weight) = match parts.as_slice() {
        [src, dst] => (*src, *dst, DEFAULT_WEIGHT),
        [src, dst, weight] => (*src, *dst, parse_number::<Weight>(line, weight, "权重")?),
        _ => {
            return Err(Error::format(
                line,
                format!("边应为 (u,v) 或 (u,v,w)，实际为 \"({})\"", body),
            ))
        }
    };
    if src.is_empty() || dst.is_empty() {
        return Err(Error::format(line, format!("边的端点为空: \"({})\"", body)));
    }

    graph.add_edge(src, dst, weight);
    Ok(())
}
