use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "dnpgen")]
#[command(about = "DNP3 point list generator for CWave RTU projects")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: config.toml/config.yaml next to the executable,
    /// then in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run SIGEXT and generate __lists.ini for a project node
    Generate {
        /// Project root directory
        #[arg(long)]
        path: PathBuf,

        /// Node name (<node>.SIG / <node>.mwt)
        #[arg(long)]
        node: String,

        /// Skip running SIGEXT, use the existing .SIG file
        #[arg(long)]
        skip_ext: bool,
    },

    /// Classify a signal file into a list file
    Classify {
        /// Input .SIG file
        input: PathBuf,

        /// Output file, or "-" for stdout (default: __lists.ini next to input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the config file in use
    Path,

    /// Create a config.toml with defaults in the current directory
    Init {
        /// Directory to create config.toml in
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// List all config values
    List,

    /// Get a config value (e.g. spares.do)
    Get {
        /// Config key
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g. classification.digital_output_regex)
        key: String,

        /// Value (lists: "_CMD,_RST" or '["_CMD", "_RST"]')
        value: String,
    },

    /// Check the classification patterns
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from([
            "dnpgen", "generate", "--path", "C:/proj", "--node", "RTU01", "--skip-ext",
        ]);
        match cli.command {
            Some(Commands::Generate {
                path,
                node,
                skip_ext,
            }) => {
                assert_eq!(path, PathBuf::from("C:/proj"));
                assert_eq!(node, "RTU01");
                assert!(skip_ext);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_classify_with_global_config() {
        let cli = Cli::parse_from(["dnpgen", "classify", "RTU01.SIG", "-o", "-", "-c", "x.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
        match cli.command {
            Some(Commands::Classify { input, output }) => {
                assert_eq!(input, PathBuf::from("RTU01.SIG"));
                assert_eq!(output, Some(PathBuf::from("-")));
            }
            _ => panic!("expected classify"),
        }
    }
}
