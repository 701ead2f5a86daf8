use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use wayfinder_core::{
    load_graph, EngineConfig, JsonStore, LoadedGraph, QueueStrategy, SelfLoopPolicy,
};

/// Engine options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// JSON engine config file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Queue strategy: binary_heap or linear_scan.
    #[arg(long, global = true)]
    pub strategy: Option<QueueStrategy>,

    /// Fail the load on self-loop edges instead of skipping them.
    #[arg(long, global = true)]
    pub reject_self_loops: bool,
}

impl EngineArgs {
    /// Resolve the effective config: defaults, then the config file, then
    /// `WAYFINDER_*` environment variables, then command-line flags.
    pub fn resolve(&self) -> anyhow::Result<EngineConfig> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(&self, env: F) -> anyhow::Result<EngineConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match &self.config {
            Some(path) => EngineConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        let mut cfg = base
            .with_overrides(env)
            .context("reading WAYFINDER_* environment")?;

        if let Some(strategy) = self.strategy {
            cfg.strategy = strategy;
        }
        if self.reject_self_loops {
            cfg.self_loops = SelfLoopPolicy::Reject;
        }
        tracing::debug!(strategy = %cfg.strategy, self_loops = %cfg.self_loops, "engine config");
        Ok(cfg)
    }
}

/// Open a JSON store and load it into memory.
pub fn open_graph(store: &Path, cfg: &EngineConfig) -> anyhow::Result<LoadedGraph<String>> {
    let json = JsonStore::open(store)
        .with_context(|| format!("opening graph store {}", store.display()))?;
    load_graph(&json, cfg).with_context(|| format!("loading graph from {}", store.display()))
}
