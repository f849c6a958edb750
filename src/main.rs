//! Line-oriented host: trains at startup, then answers one JSON request per
//! stdin line. A line holding a JSON array is answered as a batch.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use study_advisor::api;
use study_advisor::common::config::AppCfg;
use study_advisor::common::log;
use study_advisor::inference::workers::Pool;
use study_advisor::RecommendationService;
use tracing::{error, info};

fn main() -> ExitCode {
    let cfg = AppCfg::load();
    log::init(&cfg);
    info!(
        seed = cfg.seed,
        samples = cfg.samples,
        trees = cfg.trees,
        workers = cfg.workers,
        "starting study advisor"
    );

    let service = Arc::new(RecommendationService::new(cfg.train_config()));
    match service.initialize() {
        Ok(model) => info!(
            accuracy = model.report.accuracy.unwrap_or(f64::NAN),
            card = %model.report.metrics_card(),
            "model ready"
        ),
        Err(err) => {
            error!(%err, "training failed, refusing to serve");
            return ExitCode::FAILURE;
        }
    }

    let pool = Pool::new(cfg.workers);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!(%err, "failed to read request");
                return ExitCode::FAILURE;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = if trimmed.starts_with('[') {
            api::handle_json_batch(&service, &pool, trimmed)
        } else {
            api::handle_json(&service, trimmed)
        };

        if let Err(err) = writeln!(stdout, "{response}").and_then(|_| stdout.flush()) {
            error!(%err, "failed to write response");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
