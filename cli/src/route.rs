use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use wayfinder_core::{compute_shortest_paths_with, shortest_path_with, EngineConfig, Graph, PathOutcome};

use crate::settings::open_graph;

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// JSON graph store.
    pub store: PathBuf,
    /// Starting location.
    pub from: String,
    /// Destination.
    pub to: String,
    /// Print every leg with its running total.
    #[arg(long)]
    pub steps: bool,
}

#[derive(Args, Debug)]
pub struct TableArgs {
    /// JSON graph store.
    pub store: PathBuf,
}

/// Shortest route between two locations. Returns the report text and
/// whether a route exists.
pub fn run_route(args: &RouteArgs, cfg: &EngineConfig) -> anyhow::Result<(String, bool)> {
    let loaded = open_graph(&args.store, cfg)?;
    let outcome = shortest_path_with(&loaded.graph, args.from.as_str(), args.to.as_str(), cfg.strategy)
        .with_context(|| format!("routing {} -> {}", args.from, args.to))?;
    let found = outcome.is_found();
    Ok((render_outcome(&outcome, args.steps), found))
}

/// Shortest route for every ordered pair of locations.
pub fn run_table(args: &TableArgs, cfg: &EngineConfig) -> anyhow::Result<String> {
    let loaded = open_graph(&args.store, cfg)?;
    route_table(&loaded.graph, cfg)
}

pub fn route_table(graph: &Graph, cfg: &EngineConfig) -> anyhow::Result<String> {
    let mut out = String::new();
    for from in graph.vertices() {
        // One engine run per start vertex, reused for every destination.
        let paths = compute_shortest_paths_with(graph, from, cfg.strategy)?;
        for to in graph.vertices() {
            let outcome = paths.path_to(to)?;
            writeln!(out, "From: {}, To: {}  {}", from, to, render_outcome(&outcome, false))?;
        }
    }
    Ok(out)
}

pub fn render_outcome(outcome: &PathOutcome<String>, steps: bool) -> String {
    match outcome {
        PathOutcome::Found(route) if steps => {
            let mut out = String::new();
            for step in route.steps() {
                match step.leg {
                    None => {
                        let _ = writeln!(out, "  {:<24} start", step.vertex);
                    }
                    Some(leg) => {
                        let _ = writeln!(out, "  {:<24} +{:<8} {}", step.vertex, leg, step.cumulative);
                    }
                }
            }
            let _ = write!(out, "total {}", route.total_distance());
            out
        }
        PathOutcome::Found(route) => route.to_string(),
        PathOutcome::Unreachable { start, end } => format!("unreachable: no route {} -> {}", start, end),
    }
}
