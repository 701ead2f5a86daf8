use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;
use wayfinder_core::{EngineConfig, LoadedGraph};

use crate::settings::open_graph;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// JSON graph store.
    pub store: PathBuf,
}

pub fn run_status(args: &StatusArgs, cfg: &EngineConfig) -> anyhow::Result<String> {
    let loaded = open_graph(&args.store, cfg)?;
    Ok(render_status(&args.store.display().to_string(), &loaded, cfg))
}

pub fn render_status(source: &str, loaded: &LoadedGraph<String>, cfg: &EngineConfig) -> String {
    let stats = &loaded.stats;
    let mut out = String::new();
    let _ = writeln!(out, "source            {}", source);
    let _ = writeln!(out, "vertices          {}", stats.vertex_count);
    let _ = writeln!(out, "edges             {}", stats.edge_count);
    let _ = writeln!(out, "skipped_loops     {}", stats.skipped_self_loops);
    let _ = writeln!(out, "memory_bytes      {}", loaded.graph.memory_usage());
    let _ = writeln!(out, "load_time_ms      {:.3}", stats.load_time_ms);
    let _ = writeln!(out, "strategy          {}", cfg.strategy);
    let _ = write!(out, "self_loops        {}", cfg.self_loops);
    out
}
