//! Standalone-mode command line.
//!
//! An interactive menu system is a separate front-end concern and is out
//! of scope here; this module implements only the flag surface and
//! exit-code contract, wiring the five core subsystems together for a
//! local, non-embedded run.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::config::EngineConfig;
use crate::filter::FilterPipeline;
use crate::proxy_pool::ProxyPool;
use crate::search_backend::HttpSearchBackend;
use crate::stealth::StealthController;
use crate::worker_engine::{Task, WorkerEngine};

#[derive(Debug, Parser)]
#[command(name = "dork-scraper", version, about = "Concurrent search-query scraper")]
pub struct Cli {
    /// Path to a file with one dork per line.
    #[arg(long)]
    pub dorks: PathBuf,

    /// Path to a file with one proxy per line (any supported proxy format).
    #[arg(long)]
    pub proxies: PathBuf,

    /// Directory results are written to.
    #[arg(long, default_value = "./output")]
    pub output: PathBuf,

    /// Number of concurrent workers.
    #[arg(long, default_value_t = 10)]
    pub workers: usize,
}

/// One dork per line; `#`-prefixed and blank lines are ignored.
fn load_dorks(path: &std::path::Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Runs a full standalone scrape: load inputs, drive the engine to
/// completion, filter results, and write the surviving URLs to
/// `<output>/urls.txt`. Returns the process exit code: 0 on success,
/// including an interrupted run with partial output, 1 on argument or
/// load error.
pub async fn run(cli: Cli) -> i32 {
    let dorks = match load_dorks(&cli.dorks) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, path = %cli.dorks.display(), "failed to load dork file");
            return 1;
        }
    };

    let (pool, parse_errors) = match ProxyPool::load_file(&cli.proxies) {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, path = %cli.proxies.display(), "failed to load proxy file");
            return 1;
        }
    };
    for err in &parse_errors {
        tracing::warn!(%err, "skipped unparsable proxy line");
    }
    if pool.is_empty() {
        tracing::error!("no proxies loaded; nothing to do");
        return 1;
    }

    let cfg = match EngineConfig::builder()
        .workers(cli.workers)
        .output_dir(cli.output.clone())
        .build()
    {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return 1;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&cli.output) {
        tracing::error!(error = %e, "failed to create output directory");
        return 1;
    }

    let pool = Arc::new(pool);
    let stealth = Arc::new(StealthController::new(&cfg));
    let backend: Arc<dyn crate::search_backend::SearchBackend> = Arc::new(HttpSearchBackend);
    let engine = Arc::new(WorkerEngine::new(
        Arc::clone(&cfg),
        Arc::clone(&pool),
        Arc::clone(&stealth),
        backend,
    ));

    let health_handle = crate::proxy_pool::health::spawn(Arc::clone(&pool), Arc::clone(&cfg));

    engine.start();

    for dork in &dorks {
        if let Err(e) = engine.submit(Task::new(dork.clone(), 0)) {
            tracing::warn!(error = %e, dork, "failed to submit task");
        }
    }

    let Some(mut results) = engine.take_results() else {
        tracing::error!("result stream unavailable");
        return 1;
    };

    let filter = FilterPipeline::new(Arc::clone(&cfg));
    let mut survivors = Vec::new();
    let mut received = 0usize;
    let expected = dorks.len();

    while received < expected {
        let Some(result) = results.recv().await else {
            break;
        };
        received += 1;
        for url in &result.urls {
            if let Some(kept) = filter.process(url) {
                survivors.push(kept);
            }
        }
    }

    engine.stop().await;
    if let Some(handle) = health_handle {
        handle.abort();
    }
    pool.log_statistics();

    let out_path = cli.output.join("urls.txt");
    if let Err(e) = std::fs::write(&out_path, survivors.join("\n")) {
        tracing::error!(error = %e, path = %out_path.display(), "failed to write output");
        return 1;
    }

    let stats = engine.stats();
    tracing::info!(
        tasks_total = stats.tasks_total,
        tasks_completed = stats.tasks_completed,
        tasks_failed = stats.tasks_failed,
        urls_found = stats.urls_found,
        urls_kept = survivors.len(),
        "run complete"
    );

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_dorks_skips_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dorks.txt");
        std::fs::write(&path, "site:example.com\n# comment\n\nfiletype:pdf\n").unwrap();
        let dorks = load_dorks(&path).unwrap();
        assert_eq!(dorks, vec!["site:example.com", "filetype:pdf"]);
    }
}
