//! GraphProbe CLI 工具
//!
//! 加载一个图文件，运行一项分析并输出结果（非交互）

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use graphprobe::algorithm::{
    CriticalElementsFinder, EdmondsKarp, EulerPath, HamiltonSearch, PathFinder, SpanningBuilder,
    StructureAnalyzer, TransitiveClosure,
};
use graphprobe::cli::{PrintMode, Printer};
use graphprobe::import::GraphImporter;
use graphprobe::{AnalysisConfig, Error, Graph, GraphKind, VertexId, Weight};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graphprobe-cli")]
#[command(about = "GraphProbe 图分析命令行工具", version)]
struct Args {
    /// 输入文件（边表格式或花括号格式，自动识别）
    input: PathBuf,

    /// 分析配置文件（JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 花括号格式按有向图读取
    #[arg(short, long)]
    directed: bool,

    /// 以 JSON 输出
    #[arg(long)]
    json: bool,

    /// 垂直显示表格结果
    #[arg(short = 'G', long)]
    vertical: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 全部结构判定
    Report,
    /// 连通分量
    Components,
    /// 欧拉路径
    Euler,
    /// 哈密顿路径（--cycle 查找回路）
    Hamilton {
        #[arg(long)]
        cycle: bool,
    },
    /// 割点
    Articulation,
    /// 桥
    Bridges,
    /// 深度优先生成树
    DfsTree { start: String },
    /// 广度优先生成树
    BfsTree { start: String },
    /// 最小生成树（Kruskal）
    Mst,
    /// 拓扑序
    Topo,
    /// 最大流
    Flow { source: String, sink: String },
    /// 传递闭包
    Closure,
    /// 加权最短路径（Dijkstra；--hops 按边数最少）
    Shortest {
        from: String,
        to: String,
        #[arg(long)]
        hops: bool,
    },
    /// 邻接矩阵
    Matrix,
    /// 邻接表
    Adjacency,
}

/// JSON 输出中的边
#[derive(Serialize)]
struct EdgeView {
    src: String,
    dst: String,
    weight: Weight,
}

fn edge_views(graph: &Graph) -> Vec<EdgeView> {
    graph
        .edges()
        .iter()
        .map(|e| EdgeView {
            src: graph.key(e.src()).unwrap_or("?").to_string(),
            dst: graph.key(e.dst()).unwrap_or("?").to_string(),
            weight: e.weight(),
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}

struct Session<'a> {
    graph: &'a Graph,
    config: &'a AnalysisConfig,
    printer: Printer,
    json: bool,
}

impl<'a> Session<'a> {
    fn vertex(&self, key: &str) -> Result<VertexId> {
        Ok(self.graph.require_vertex(key)?)
    }

    fn keys(&self, ids: &[VertexId]) -> Vec<String> {
        self.graph.keys(ids)
    }

    fn vertices(&self, ids: &[VertexId], elapsed: u64) -> Result<String> {
        if self.json {
            to_json(&self.keys(ids))
        } else {
            Ok(self.printer.print_vertices(self.graph, ids, elapsed))
        }
    }

    fn tree(&self, tree: &Graph, elapsed: u64) -> Result<String> {
        if self.json {
            to_json(&edge_views(tree))
        } else {
            Ok(self.printer.print_edges(tree, tree.edges(), elapsed))
        }
    }

    fn run(&self, command: &Command) -> Result<String> {
        let graph = self.graph;
        let started = Instant::now();
        let elapsed = || started.elapsed().as_millis() as u64;

        let output = match command {
            Command::Report => {
                let report =
                    StructureAnalyzer::new(graph).report(self.config.search_limits())?;
                if self.json {
                    to_json(&report)?
                } else {
                    self.printer.print_report(&report, elapsed())
                }
            }

            Command::Components => {
                let components = StructureAnalyzer::new(graph).connected_components();
                if self.json {
                    let named: Vec<Vec<String>> =
                        components.iter().map(|c| self.keys(c)).collect();
                    to_json(&named)?
                } else {
                    self.printer.print_components(graph, &components, elapsed())
                }
            }

            Command::Euler => match EulerPath::new(graph).find() {
                Ok(trail) => self.vertices(&trail, elapsed())?,
                Err(Error::NoEulerianPath(reason)) => {
                    format!("{} {}\n", "不存在欧拉路径:".yellow(), reason)
                }
                Err(e) => return Err(e.into()),
            },

            Command::Hamilton { cycle } => {
                let search =
                    HamiltonSearch::new(graph).with_limits(self.config.search_limits());
                let found = if *cycle { search.cycle()? } else { search.path()? };
                match found {
                    Some(path) => self.vertices(&path, elapsed())?,
                    None if self.json => "null\n".to_string(),
                    None => format!("{}\n", "未找到哈密顿路径".yellow()),
                }
            }

            Command::Articulation => {
                let points = CriticalElementsFinder::new(graph).articulation_points();
                self.vertices(&points, elapsed())?
            }

            Command::Bridges => {
                let bridges = CriticalElementsFinder::new(graph).bridges();
                if self.json {
                    to_json(&bridges)?
                } else {
                    self.printer.print_edges(graph, &bridges, elapsed())
                }
            }

            Command::DfsTree { start } => {
                let tree = SpanningBuilder::new(graph).dfs_tree(self.vertex(start)?)?;
                self.tree(&tree, elapsed())?
            }

            Command::BfsTree { start } => {
                let tree = SpanningBuilder::new(graph).bfs_tree(self.vertex(start)?)?;
                self.tree(&tree, elapsed())?
            }

            Command::Mst => {
                let mst = SpanningBuilder::new(graph).minimum_spanning_tree()?;
                if self.json {
                    to_json(&serde_json::json!({
                        "total_weight": mst.total_weight,
                        "edges": edge_views(&mst.graph),
                    }))?
                } else {
                    format!(
                        "{}total weight = {}\n",
                        self.printer.print_edges(&mst.graph, mst.graph.edges(), elapsed()),
                        mst.total_weight
                    )
                }
            }

            Command::Topo => {
                let order = SpanningBuilder::new(graph).topological_order();
                self.vertices(&order, elapsed())?
            }

            Command::Flow { source, sink } => {
                let flow =
                    EdmondsKarp::new(graph).max_flow(self.vertex(source)?, self.vertex(sink)?)?;
                if self.json {
                    to_json(&flow)?
                } else {
                    self.printer.print_flow(graph, &flow, elapsed())
                }
            }

            Command::Closure => {
                let closure = TransitiveClosure::compute(graph, &self.config.search_limits())?;
                if self.json {
                    let pairs: Vec<(String, String)> = closure
                        .pairs()
                        .into_iter()
                        .map(|(i, j)| {
                            (
                                graph.key(i).unwrap_or("?").to_string(),
                                graph.key(j).unwrap_or("?").to_string(),
                            )
                        })
                        .collect();
                    to_json(&pairs)?
                } else {
                    let cells: Vec<Vec<String>> = closure
                        .to_matrix()
                        .iter()
                        .map(|row| {
                            row.iter()
                                .map(|&r| if r { "1" } else { "0" }.to_string())
                                .collect()
                        })
                        .collect();
                    self.printer.print_matrix(graph, &cells, elapsed())
                }
            }

            Command::Shortest { from, to, hops } => {
                let finder = PathFinder::new(graph);
                let (start, end) = (self.vertex(from)?, self.vertex(to)?);
                let path = if *hops {
                    finder.fewest_edges(start, end)?
                } else {
                    finder.shortest_path(start, end)?
                };
                match path {
                    Some(path) if self.json => to_json(&path)?,
                    Some(path) => self.printer.print_path(graph, &path, elapsed()),
                    None if self.json => "null\n".to_string(),
                    None => format!("{}\n", "目标不可达".yellow()),
                }
            }

            Command::Matrix => {
                let matrix = graph.adjacency_matrix();
                if self.json {
                    to_json(&matrix)?
                } else {
                    let cells: Vec<Vec<String>> = matrix
                        .iter()
                        .map(|row| row.iter().map(|w| w.to_string()).collect())
                        .collect();
                    self.printer.print_matrix(graph, &cells, elapsed())
                }
            }

            Command::Adjacency => graph.to_string(),
        };

        debug!(command = ?command, elapsed_ms = elapsed(), "命令执行完成");
        Ok(output)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("无法读取配置文件 {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let brace_kind = if args.directed {
        GraphKind::Directed
    } else {
        GraphKind::Undirected
    };
    let (graph, stats) = GraphImporter::new()
        .with_brace_kind(brace_kind)
        .import_path(&args.input)
        .with_context(|| format!("无法加载图文件 {}", args.input.display()))?;

    let mode = if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    };
    let session = Session {
        graph: &graph,
        config: &config,
        printer: Printer::new(mode),
        json: args.json,
    };

    if !args.json {
        println!(
            "{} {} ({} ms)",
            "GraphProbe".bold(),
            args.input.display(),
            stats.duration_ms
        );
        print!("{}", session.printer.print_stats(stats.vertices_imported, stats.edges_imported));
        println!();
    }

    print!("{}", session.run(&args.command)?);
    Ok(())
}
