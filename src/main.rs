use std::io;

use clap::Parser;
use restrictor::{
    cli::{Args, Backend, Settings, SettingsLoader},
    engine::RuleEngine,
    error::RestrictorError,
    shell::{ConsoleSelector, Shell},
    store::{MemoryStore, NetshStore, PolicyStore},
};

fn main() -> Result<(), RestrictorError> {
    env_logger::init();

    let args = Args::parse();
    let settings = SettingsLoader::load(&args)?;

    match settings.backend {
        Backend::Netsh => run(NetshStore::new(), &settings),
        Backend::Memory => run(MemoryStore::new(), &settings),
    }
}

fn run<S: PolicyStore>(store: S, settings: &Settings) -> Result<(), RestrictorError> {
    log::info!("Managing firewall rules through the {:?} store", settings.backend);

    let engine = RuleEngine::with_naming(store, &settings.prefix, &settings.extension);
    let selector = ConsoleSelector::new(&settings.extension);
    Shell::new(engine, selector).run(io::stdin().lock(), io::stdout().lock())
}
