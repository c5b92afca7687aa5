use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// CLI для поиска и выбора установленных словарей
#[derive(Parser, Debug)]
#[command(name = "morphdict", version, about = "Installed morphology dictionaries: list and resolve")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print installed languages, one per line (sorted)
    Languages {
        #[arg(long)]
        path: PathBuf,
    },
    /// List installed dictionaries sorted by language, then variant
    ///
    /// Пример:
    ///   morphdict list --path /usr/share/morphdict
    ///   morphdict list --path /usr/share/morphdict --json
    List {
        #[arg(long)]
        path: PathBuf,
        /// JSON output (array of descriptors)
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Also print skipped subdirectories and why
        #[arg(long, default_value_t = false)]
        diagnostics: bool,
    },
    /// Resolve a dictionary, load its backend and release it again
    ///
    /// Примеры:
    ///   morphdict open --path ./dicts --tag fi-x-medicine
    ///   morphdict open --path ./dicts --variant fi_FI
    #[command(group(ArgGroup::new("id").required(true).args(["tag", "variant"])))]
    Open {
        #[arg(long)]
        path: PathBuf,
        /// BCP-47 tag (variant in private use: fi-x-<variant>)
        #[arg(long)]
        tag: Option<String>,
        /// Legacy identifier: variant id, "default", "" or lang_REGION
        #[arg(long)]
        variant: Option<String>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Cli as Parser>::parse()
    }
}
