use clap::Parser;
use foody_checks::app::session::persist_report;
use foody_checks::core::sequence::Outcome;
use foody_checks::utils::logger;
use foody_checks::{run_suite, CliConfig, SuiteReport};

fn print_report(report: &SuiteReport) {
    for result in &report.results {
        let marker = match result.outcome {
            Outcome::Passed => "✅",
            Outcome::Failed => "❌",
            Outcome::Skipped => "⏭️",
        };
        match &result.message {
            Some(message) => println!(
                "{} [{}] {} ({} ms): {}",
                marker, result.order, result.name, result.duration_ms, message
            ),
            None => println!(
                "{} [{}] {} ({} ms)",
                marker, result.order, result.name, result.duration_ms
            ),
        }
    }

    if let Some(cleanup) = &report.cleanup {
        if cleanup.deleted {
            println!("🧹 Removed leftover food {}", cleanup.food_id);
        } else {
            println!("🧹 Could not remove leftover food {}", cleanup.food_id);
        }
    }

    let summary = &report.summary;
    println!(
        "📊 {} checks: {} passed, {} failed, {} skipped in {} ms",
        summary.total, summary.passed, summary.failed, summary.skipped, summary.total_duration_ms
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    match run_suite(&settings).await {
        Ok(report) => {
            print_report(&report);
            if let Some(path) = &settings.run.report_path {
                if !persist_report(&report, path) {
                    eprintln!("⚠️ Report could not be written to {}", path);
                }
            }
            if !report.is_success() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Run aborted: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
