use std::path::PathBuf;

use clap::Parser;

use super::config::Backend;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Block or restore an application's network access through host firewall rules"
)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Policy store to manage (memory keeps rules in-process and never touches the firewall)
    #[arg(long = "backend", value_enum)]
    pub backend: Option<Backend>,

    /// Rule name prefix, also the pattern the list command searches for
    #[arg(long = "prefix", value_name = "TEXT")]
    pub prefix: Option<String>,

    /// File extension a program must have to be restricted
    #[arg(long = "extension", value_name = "EXT")]
    pub extension: Option<String>,
}
