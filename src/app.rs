use anyhow::{Context, Result};
use ecopet::achievements::{newly_unlocked, unlocked, ACHIEVEMENTS};
use ecopet::config::{load_settings, project_paths, save_settings_atomic, Paths, Settings};
use ecopet::{FileStore, KeyValueStore, LoadSource, PetEngine};
use std::io::{self, Write};
use tracing::debug;

use crate::render::{self, Painter};
use crate::{Cli, Command};

pub(crate) struct App<S: KeyValueStore> {
    settings: Settings,
    engine: PetEngine<S>,
}

impl App<FileStore> {
    fn init(cli: &Cli) -> Result<Self> {
        let paths = match &cli.data_dir {
            Some(dir) => Paths::in_dir(dir),
            None => project_paths()?,
        };

        let mut settings = load_settings(&paths.settings_path);
        if !paths.settings_path.exists() {
            save_settings_atomic(&paths.settings_path, &settings)
                .context("writing default settings")?;
        }
        if cli.no_color {
            settings.enable_color = false;
        }

        let store = FileStore::open(&paths.data_dir)
            .with_context(|| format!("opening data dir {}", paths.data_dir.display()))?;
        debug!(dir = %paths.data_dir.display(), "store opened");
        let engine = PetEngine::new(store, settings.engine_config());

        Ok(Self { settings, engine })
    }
}

impl<S: KeyValueStore> App<S> {
    fn run<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        let xp_per_level = self.engine.config().rules.xp_per_level;
        let mut p = Painter::new(out, self.settings.enable_color);

        match command {
            Command::Status => {
                let pet = self.engine.get_pet_state()?;
                if self.engine.load_source() == LoadSource::Recovered {
                    eprintln!("warning: saved pet could not be read; starting fresh");
                }
                render::status(&mut p, &pet, xp_per_level)?;
            }
            Command::Log { action, detail } => {
                let before = unlocked(&self.engine.peek_pet_state(), &self.engine.load_history());
                let pet = self.engine.log_action(action.as_str(), detail.as_deref())?;
                render::status(&mut p, &pet, xp_per_level)?;

                let known: Vec<&str> = before.iter().map(|a| a.id).collect();
                let fresh = newly_unlocked(&pet, &self.engine.load_history(), &known);
                render::unlocked_banner(&mut p, &fresh)?;
            }
            Command::Reset { clear_history } => {
                let pet = if clear_history {
                    self.engine.reset_pet_and_history()?
                } else {
                    self.engine.reset_pet()?
                };
                render::status(&mut p, &pet, xp_per_level)?;
            }
            Command::History { limit } => {
                let history = self.engine.load_history();
                render::history(&mut p, &history[..limit.min(history.len())])?;
            }
            Command::Achievements => {
                let pet = self.engine.get_pet_state()?;
                let got = unlocked(&pet, &self.engine.load_history());
                render::achievements(&mut p, &ACHIEVEMENTS, &got)?;
            }
            Command::Stats => {
                render::stats(&mut p, &self.engine.eco_stats())?;
            }
        }
        Ok(())
    }
}

pub(crate) fn run(cli: Cli) -> Result<()> {
    let mut app = App::init(&cli)?;
    let command = cli.command.clone().unwrap_or(Command::Status);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    app.run(command, &mut out)
}
