use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "teletrans")]
#[command(about = "Translates your own outgoing chat messages in place")]
#[command(version)]
pub struct Args {
    /// Workspace directory holding config.json and log.txt (defaults to the current directory)
    pub workspace: Option<PathBuf>,
}
