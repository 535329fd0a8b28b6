//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RBF explorer - squared distances to two centroids and their Gaussian features
#[derive(Parser, Debug)]
#[command(name = "rbf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every step once over a CSV file of points
    Run {
        /// CSV file with `category,x1,x2` columns
        #[arg(short, long)]
        points: PathBuf,

        /// First centroid, comma separated
        #[arg(long, allow_hyphen_values = true)]
        c1: String,

        /// Second centroid, comma separated
        #[arg(long, allow_hyphen_values = true)]
        c2: String,

        /// Variance of the Gaussian
        #[arg(long, allow_hyphen_values = true)]
        sigma_sq: String,

        /// Directory for the plots (overrides the config)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Write the augmented table to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Skip plotting
        #[arg(long)]
        no_plot: bool,
    },

    /// Enter points and parameters step by step
    Interactive,

    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let args = vec![
            "rbf", "run", "--points", "points.csv", "--c1", "0,0", "--c2", "-2,2", "--sigma-sq",
            "2",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Run {
                points,
                c1,
                c2,
                sigma_sq,
                out,
                export,
                no_plot,
            } => {
                assert_eq!(points, PathBuf::from("points.csv"));
                assert_eq!(c1, "0,0");
                assert_eq!(c2, "-2,2");
                assert_eq!(sigma_sq, "2");
                assert!(out.is_none());
                assert!(export.is_none());
                assert!(!no_plot);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_requires_parameters() {
        let args = vec!["rbf", "run", "--points", "points.csv", "--c1", "0,0"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let args = vec!["rbf", "interactive", "--verbose", "--config", "my.toml"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert!(matches!(cli.command, Commands::Interactive));
    }

    #[test]
    fn test_parse_config_init() {
        let args = vec!["rbf", "config", "init", "--force"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }
}
