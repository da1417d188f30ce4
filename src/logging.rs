use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger,
    LoggerHandle, Naming,
};

/// Starts the global logger. `RUST_LOG` wins over `spec`.
///
/// Without a directory, logs go to stderr in colour. With one, they go to files rotated at
/// 10 MB, keeping the last 7.
pub fn setup_logging(spec: &str, log_dir: Option<&str>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(spec)?;

    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("hyper_dots"))
            .format(opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024),
                Naming::Numbers,
                Cleanup::KeepLogFiles(7),
            )
            .start(),
        None => logger.format(colored_default_format).start(),
    }
}
