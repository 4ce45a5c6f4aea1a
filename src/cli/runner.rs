use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use booktrack::{BookId, ProgressTracker, TrackerConfig};

use super::args::CliArgs;
use super::errors::AppError;

/// Install the stderr subscriber. `RUST_LOG` wins over the default level.
pub fn init_logging(verbose: bool) {
    if verbose {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn book_id(id: BookId) -> Result<BookId, AppError> {
    if id == 0 {
        return Err(AppError::InvalidBookId { id });
    }
    Ok(id)
}

fn build_config(args: &CliArgs) -> Result<TrackerConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("Loading config from {:?}", path);
            TrackerConfig::from_json_file(path)?
        }
        None => TrackerConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(target) = args.target {
        if target == 0 {
            return Err(AppError::ZeroTarget { target });
        }
        config.target_total = target;
    }
    Ok(config)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.verbose);

    let config = build_config(&args)?;
    info!("Progress file: {:?}", config.progress_path());
    let mut tracker = ProgressTracker::open(config)?;

    if let Some(id) = args.add_book {
        let id = book_id(id)?;
        let (collected, processed) = tracker.mark_complete(id)?;
        if collected {
            println!("✓ Book {id} marked as collected");
        }
        if processed {
            println!("✓ Book {id} marked as processed");
        }
    } else if let Some(id) = args.collected {
        let id = book_id(id)?;
        if tracker.mark_collected(id)? {
            println!("✓ Book {id} marked as collected");
        }
    } else if let Some(id) = args.processed {
        let id = book_id(id)?;
        if tracker.mark_processed(id)? {
            println!("✓ Book {id} marked as processed");
        }
    } else if let Some(id) = args.fail {
        let id = book_id(id)?;
        let reason = args.reason.as_deref().unwrap_or_default();
        tracker.record_failure(id, reason)?;
        println!("✗ Book {id} marked as failed: {reason}");
    } else if args.report {
        let report = tracker.daily_report()?;
        println!("{}", report.text);
        println!("\n✓ Report saved to: {}", report.path.display());
    } else if args.scan {
        let summary = tracker.scan_directories()?;
        if !summary.is_empty() {
            debug!("Scan summary: {:?}", summary);
        }
        println!("✓ Directories scanned and progress updated");
        print!("{}", tracker.render_status());
    } else if let Some(message) = &args.log {
        tracker.append_log(message)?;
        println!("✓ Log added: {message}");
    } else {
        print!("{}", tracker.render_status());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn no_operation_defaults_to_status() {
        let args = CliArgs::try_parse_from(["booktrack"]).unwrap();
        assert!(!args.check && !args.report && !args.scan);
        assert!(args.add_book.is_none() && args.log.is_none());
    }

    #[test]
    fn operations_are_mutually_exclusive() {
        assert!(CliArgs::try_parse_from(["booktrack", "--check", "--report"]).is_err());
        assert!(CliArgs::try_parse_from(["booktrack", "--add-book", "3", "--scan"]).is_err());
    }

    #[test]
    fn reason_requires_fail() {
        assert!(CliArgs::try_parse_from(["booktrack", "--reason", "x"]).is_err());
        let args =
            CliArgs::try_parse_from(["booktrack", "--fail", "7", "--reason", "bad encoding"])
                .unwrap();
        assert_eq!(args.fail, Some(7));
        assert_eq!(args.reason.as_deref(), Some("bad encoding"));
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let args =
            CliArgs::try_parse_from(["booktrack", "--data-dir", "/tmp/books", "--target", "80"])
                .unwrap();
        let config = build_config(&args).unwrap();
        assert_eq!(config.data_dir, std::path::PathBuf::from("/tmp/books"));
        assert_eq!(config.target_total, 80);

        let zero = CliArgs::try_parse_from(["booktrack", "--target", "0"]).unwrap();
        assert!(matches!(
            build_config(&zero),
            Err(AppError::ZeroTarget { target: 0 })
        ));
    }

    #[test]
    fn book_id_zero_is_rejected() {
        assert!(matches!(book_id(0), Err(AppError::InvalidBookId { id: 0 })));
        assert_eq!(book_id(1342).unwrap(), 1342);
    }
}
