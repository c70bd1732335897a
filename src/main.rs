use clap::Parser;
use dlstats::core::history;
use dlstats::utils::{logger, validation::Validate};
use dlstats::{
    CliConfig, FormulaPipeline, LocalStorage, ReleasePipeline, TrackerEngine, TrackerError,
};

fn fail(e: TrackerError) -> ! {
    tracing::error!(
        "Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        dlstats::utils::error::ErrorSeverity::Low => 0,
        dlstats::utils::error::ErrorSeverity::Medium => 2,
        dlstats::utils::error::ErrorSeverity::High => 1,
        dlstats::utils::error::ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();
    let verbose = cli.verbose;

    // CI schedulers collect structured logs; interactive runs get the
    // compact formatter.
    if std::env::var("CI").is_ok() {
        logger::init_ci_logger();
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::info!("Starting dlstats");

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    if verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail(e);
    }

    // One timestamp per run so every history file written this run lines up.
    let stamp = history::run_stamp();
    let storage = LocalStorage::new(config.output_path.clone());
    let monitor_enabled = config.monitor;

    if config.track_releases() {
        let pipeline = ReleasePipeline::new(storage.clone(), config.clone(), stamp.clone());
        let engine = TrackerEngine::new_with_monitoring(pipeline, monitor_enabled);
        match engine.run().await {
            Ok(summary) => println!(
                "{}: appended {} rows across {} files",
                summary.pipeline, summary.rows_appended, summary.files_written
            ),
            Err(e) => fail(e),
        }
    }

    if config.track_formulae() {
        let pipeline = FormulaPipeline::new(storage.clone(), config.clone(), stamp.clone());
        let engine = TrackerEngine::new_with_monitoring(pipeline, monitor_enabled);
        match engine.run().await {
            Ok(summary) => println!(
                "{}: appended {} rows across {} files",
                summary.pipeline, summary.rows_appended, summary.files_written
            ),
            Err(e) => fail(e),
        }
    }

    tracing::info!("All pipelines completed");
}
