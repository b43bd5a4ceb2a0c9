use crate::core::DEFAULT_REPORT_INTERVAL;
use crate::session::SessionConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Track parcel weights per destination and report them periodically
#[derive(Parser, Debug)]
#[command(name = "parcel-tally")]
#[command(
    about = "Track parcel weights per destination and report them periodically",
    long_about = None
)]
pub struct CliArgs {
    /// Initial package file, one `<weight> <postal code>` per line
    #[arg(
        value_name = "PACKAGES_FILE",
        help = "Path to a file of packages loaded before the first report"
    )]
    pub packages_file: Option<PathBuf>,

    /// Initial fee file, one `<weight> <fee>` per line
    #[arg(
        value_name = "FEES_FILE",
        requires = "packages_file",
        help = "Path to a file of weight-based fees (only after PACKAGES_FILE)"
    )]
    pub fees_file: Option<PathBuf>,

    /// Seconds between two reports
    #[arg(
        long = "interval",
        value_name = "SECONDS",
        help = "Seconds between two reports (default: 60)"
    )]
    pub interval: Option<u64>,

    /// Enable debug diagnostics
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// Create a SessionConfig from CLI arguments
    ///
    /// A zero interval falls back to the default and logs a warning.
    pub fn to_session_config(&self) -> SessionConfig {
        let report_interval = self
            .interval
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REPORT_INTERVAL);

        SessionConfig::new(
            self.packages_file.clone(),
            self.fees_file.clone(),
            report_interval,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::no_files(&["program"], None, None)]
    #[case::packages_only(&["program", "packages.txt"], Some("packages.txt"), None)]
    #[case::both_files(
        &["program", "packages.txt", "fees.txt"],
        Some("packages.txt"),
        Some("fees.txt")
    )]
    fn test_file_arguments(
        #[case] args: &[&str],
        #[case] packages: Option<&str>,
        #[case] fees: Option<&str>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.packages_file, packages.map(PathBuf::from));
        assert_eq!(parsed.fees_file, fees.map(PathBuf::from));
    }

    #[rstest]
    #[case::default(&["program"], DEFAULT_REPORT_INTERVAL)]
    #[case::custom(&["program", "--interval", "5"], Duration::from_secs(5))]
    #[case::zero_falls_back(&["program", "--interval", "0"], DEFAULT_REPORT_INTERVAL)]
    fn test_session_config_interval(#[case] args: &[&str], #[case] expected: Duration) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_session_config().report_interval, expected);
    }

    #[test]
    fn test_session_config_files() {
        let parsed = CliArgs::try_parse_from(["program", "packages.txt", "fees.txt"]).unwrap();
        let config = parsed.to_session_config();

        assert_eq!(config.packages_file, Some(PathBuf::from("packages.txt")));
        assert_eq!(config.fees_file, Some(PathBuf::from("fees.txt")));
    }

    #[rstest]
    #[case::short(&["program", "-v"], true)]
    #[case::long(&["program", "--verbose"], true)]
    #[case::off(&["program"], false)]
    fn test_verbose_flag(#[case] args: &[&str], #[case] expected: bool) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.verbose, expected);
    }

    #[rstest]
    #[case::three_files(&["program", "a.txt", "b.txt", "c.txt"])]
    #[case::negative_interval(&["program", "--interval", "-1"])]
    #[case::word_interval(&["program", "--interval", "soon"])]
    #[case::unknown_flag(&["program", "--rate", "5"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
