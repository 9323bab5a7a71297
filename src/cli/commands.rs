// CLI command definitions

use super::pod::{ApplyCommand, ShowBuildCommand};
use clap::Parser;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "build-overrides",
    version,
    about = "Apply cluster-wide build override policy to build pods",
    long_about = "Applies an administrator supplied build overrides configuration to a build pod \
                  and the build encoded inside it"
)]
pub struct CliArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Apply build overrides to a build pod and print the result
    Apply(ApplyCommand),

    /// Show the build embedded in a build pod
    ShowBuild(ShowBuildCommand),
}
