use anyhow::Result;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod util;
mod cmd_languages;
mod cmd_list;
mod cmd_open;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug morphdict list --path ./dicts
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Languages { path } =>
            cmd_languages::exec(path),

        cli::Cmd::List { path, json, diagnostics } =>
            cmd_list::exec(path, json, diagnostics),

        cli::Cmd::Open { path, tag, variant } =>
            cmd_open::exec(path, tag, variant),
    }
}
