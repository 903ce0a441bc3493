//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use crate::algorithm::{AnalysisReport, MaxFlow, PathResult};
use crate::graph::{Edge, Graph, VertexId};
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Clone, Copy, PartialEq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

fn key_of(graph: &Graph, id: VertexId) -> String {
    graph.key(id).unwrap_or("?").to_string()
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 打印通用结果集
    pub fn print_result(
        &self,
        columns: &[String],
        rows: &[Vec<String>],
        execution_time_ms: u64,
    ) -> String {
        if columns.is_empty() || rows.is_empty() {
            return format!("Empty set ({} ms)\n", execution_time_ms);
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!(
            "{}\n{} row(s) in set ({} ms)\n",
            output,
            rows.len(),
            execution_time_ms
        )
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印统计信息
    pub fn print_stats(&self, vertex_count: usize, edge_count: usize) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", vertex_count.to_string()]);
        table.add_row(row!["Edge Count", edge_count.to_string()]);
        table.to_string()
    }

    /// 结构分析汇总（每个性质一行）
    pub fn print_report(&self, report: &AnalysisReport, execution_time_ms: u64) -> String {
        let hamiltonian = match report.hamiltonian {
            Some(found) => yes_no(found),
            None => "unknown".to_string(),
        };
        let rows = vec![
            vec!["kind".to_string(), report.kind.to_string()],
            vec!["vertices".to_string(), report.vertex_count.to_string()],
            vec!["edges".to_string(), report.edge_count.to_string()],
            vec!["weighted".to_string(), yes_no(report.weighted)],
            vec!["directed".to_string(), yes_no(report.directed)],
            vec!["asymmetric edges".to_string(), yes_no(report.asymmetric_edges)],
            vec!["connected".to_string(), yes_no(report.connected)],
            vec!["components".to_string(), report.component_count.to_string()],
            vec!["bipartite".to_string(), yes_no(report.bipartite)],
            vec!["eulerian".to_string(), yes_no(report.eulerian)],
            vec!["hamiltonian".to_string(), hamiltonian],
            vec!["cyclic".to_string(), yes_no(report.cyclic)],
            vec!["planar (heuristic)".to_string(), yes_no(report.planar_heuristic)],
        ];
        let columns = vec!["Property".to_string(), "Value".to_string()];
        self.print_result(&columns, &rows, execution_time_ms)
    }

    /// 顶点序列（路径、拓扑序、割点等）
    pub fn print_vertices(
        &self,
        graph: &Graph,
        ids: &[VertexId],
        execution_time_ms: u64,
    ) -> String {
        let columns = vec!["#".to_string(), "Vertex".to_string()];
        let rows: Vec<Vec<String>> = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| vec![(i + 1).to_string(), key_of(graph, id)])
            .collect();
        self.print_result(&columns, &rows, execution_time_ms)
    }

    /// 边列表
    pub fn print_edges(&self, graph: &Graph, edges: &[Edge], execution_time_ms: u64) -> String {
        let columns = vec![
            "Id".to_string(),
            "Source".to_string(),
            "Target".to_string(),
            "Weight".to_string(),
        ];
        let rows: Vec<Vec<String>> = edges
            .iter()
            .map(|e| {
                vec![
                    e.external_id().unwrap_or(e.id().0 as u64).to_string(),
                    key_of(graph, e.src()),
                    key_of(graph, e.dst()),
                    e.weight().to_string(),
                ]
            })
            .collect();
        self.print_result(&columns, &rows, execution_time_ms)
    }

    /// 连通分量
    pub fn print_components(
        &self,
        graph: &Graph,
        components: &[Vec<VertexId>],
        execution_time_ms: u64,
    ) -> String {
        let columns = vec![
            "Component".to_string(),
            "Size".to_string(),
            "Vertices".to_string(),
        ];
        let rows: Vec<Vec<String>> = components
            .iter()
            .enumerate()
            .map(|(i, ids)| {
                vec![
                    (i + 1).to_string(),
                    ids.len().to_string(),
                    graph.keys(ids).join(", "),
                ]
            })
            .collect();
        self.print_result(&columns, &rows, execution_time_ms)
    }

    /// 方阵（邻接矩阵、可达矩阵）；行列按顶点顺序
    pub fn print_matrix(
        &self,
        graph: &Graph,
        cells: &[Vec<String>],
        execution_time_ms: u64,
    ) -> String {
        let mut columns = vec![String::new()];
        columns.extend(graph.vertices().map(|v| v.key().to_string()));

        let rows: Vec<Vec<String>> = graph
            .vertices()
            .zip(cells)
            .map(|(vertex, row)| {
                let mut line = vec![vertex.key().to_string()];
                line.extend(row.iter().cloned());
                line
            })
            .collect();
        self.print_result(&columns, &rows, execution_time_ms)
    }

    /// 最大流：流量分配 + 最小割
    pub fn print_flow(&self, graph: &Graph, flow: &MaxFlow, execution_time_ms: u64) -> String {
        let columns = vec![
            "Source".to_string(),
            "Target".to_string(),
            "Flow".to_string(),
        ];
        let rows: Vec<Vec<String>> = flow
            .flow
            .iter()
            .map(|a| {
                vec![
                    key_of(graph, a.src),
                    key_of(graph, a.dst),
                    a.flow.to_string(),
                ]
            })
            .collect();

        let source_side: Vec<VertexId> = flow.source_side.iter().copied().collect();
        format!(
            "{}max flow = {}, min cut = {}\nsource side: {{{}}}\n",
            self.print_result(&columns, &rows, execution_time_ms),
            flow.value,
            flow.cut_capacity(),
            graph.keys(&source_side).join(", ")
        )
    }

    /// 带权路径
    pub fn print_path(&self, graph: &Graph, path: &PathResult, execution_time_ms: u64) -> String {
        format!(
            "{}length = {}, total weight = {}\n",
            self.print_vertices(graph, &path.vertices, execution_time_ms),
            path.length,
            path.total_weight
        )
    }
}
