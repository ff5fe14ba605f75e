//! Command-line configuration.
//!
//! The dataset path can also come from `LAUNCH_DASH_DATA`; log verbosity is
//! controlled by `RUST_LOG` through `env_logger`.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "launch-dash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Launch records dashboard: success rates by site and payload")]
pub struct Cli {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(short, long, env = "LAUNCH_DASH_DATA", default_value = "spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Initial window width in points
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["launch-dash"]).unwrap();
        // LAUNCH_DASH_DATA may be set in the environment running the tests.
        if std::env::var_os("LAUNCH_DASH_DATA").is_none() {
            assert_eq!(cli.data, PathBuf::from("spacex_launch_dash.csv"));
        }
        assert_eq!(cli.width, 1200.0);
        assert_eq!(cli.height, 900.0);
    }

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::try_parse_from([
            "launch-dash",
            "--data",
            "launches.parquet",
            "--width",
            "800",
        ])
        .unwrap();
        assert_eq!(cli.data, PathBuf::from("launches.parquet"));
        assert_eq!(cli.width, 800.0);
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
