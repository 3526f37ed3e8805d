use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use super::logging::LogDestination;

/// Replays scripted pull-to-refresh gestures and renders the indicator.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "refresh-demo")]
#[command(version)]
pub(crate) struct Args {
    /// RON refresh config; built-in defaults when omitted
    pub config: Option<PathBuf>,

    /// Write every indicator view to this JSON file
    #[arg(long, value_name = "OUT.json")]
    pub trace: Option<PathBuf>,

    /// Simulated refresh latency in milliseconds
    #[arg(long, value_name = "MS", default_value = "400", value_parser = parse_millis)]
    pub latency: Duration,

    /// Where log output goes
    #[arg(long, value_enum, default_value = "file")]
    pub log: LogDestination,

    /// Log file used by `--log file` and `--log both`
    #[arg(long, value_name = "PATH", default_value = "engine.log")]
    pub log_file: PathBuf,

    /// Log every scroll sample
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the default config as RON and exit
    #[arg(long, value_name = "PATH")]
    pub write_default_config: Option<PathBuf>,
}

impl Args {
    pub fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Trace
        } else {
            LevelFilter::Info
        }
    }
}

fn parse_millis(raw: &str) -> Result<Duration, String> {
    raw.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|err| format!("expected whole milliseconds: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("refresh-demo").chain(line.split_whitespace()))
    }

    #[test]
    fn empty_command_line_uses_defaults() {
        let args = parse("").unwrap();
        assert_eq!(args.config, None);
        assert_eq!(args.trace, None);
        assert_eq!(args.latency, Duration::from_millis(400));
        assert_eq!(args.log, LogDestination::File);
        assert_eq!(args.log_file, PathBuf::from("engine.log"));
        assert_eq!(args.level(), LevelFilter::Info);
        assert_eq!(args.write_default_config, None);
    }

    #[test]
    fn flags_and_config_path_are_parsed() {
        let args = parse("refresh.ron --trace out.json --latency 50 --log both -v").unwrap();
        assert_eq!(args.config, Some(PathBuf::from("refresh.ron")));
        assert_eq!(args.trace, Some(PathBuf::from("out.json")));
        assert_eq!(args.latency, Duration::from_millis(50));
        assert_eq!(args.log, LogDestination::Both);
        assert_eq!(args.level(), LevelFilter::Trace);
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse("--latency soon").is_err());
        assert!(parse("--latency -5").is_err());
        assert!(parse("--trace").is_err());
        assert!(parse("--log syslog").is_err());
        assert!(parse("--frobnicate").is_err());
        assert!(parse("a.ron b.ron").is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
