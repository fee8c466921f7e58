// Board session: owns the draft, applies user commands, and keeps the
// persisted copy of the state in step after every change.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use snakeboard_core::config::BoardConfig;
use snakeboard_core::draft::state::Draft;
use snakeboard_core::store::StateStore;

use crate::command::{UserCommand, HELP_TEXT};
use crate::render;

/// What the session loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text and keep going.
    Show(String),
    /// The command was rejected; print the reason and keep going.
    Rejected(String),
    Quit,
}

/// A single-writer board session.
pub struct App {
    title: String,
    draft: Draft,
    store: Option<Box<dyn StateStore>>,
}

impl App {
    /// Build a session from configuration. `store` is `None` when persistence
    /// is disabled.
    pub fn new(config: &BoardConfig, store: Option<Box<dyn StateStore>>) -> anyhow::Result<Self> {
        let draft = Draft::initialize(config).context("failed to initialize draft")?;
        Ok(App {
            title: config.application.title.clone(),
            draft,
            store,
        })
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Restore the previous session from the store, if there is one.
    ///
    /// Returns `Ok(true)` when a stored state was restored. A stored state
    /// that cannot be read, or no longer fits the configuration (different
    /// teams, players or rounds), is discarded and the draft starts fresh.
    pub fn recover(&mut self) -> anyhow::Result<bool> {
        let Some(store) = &self.store else {
            return Ok(false);
        };

        let saved = match store.load() {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                info!("No saved draft found, starting fresh");
                return Ok(false);
            }
            Err(e) => {
                warn!("Discarding unreadable saved draft: {:#}", e);
                store.clear().context("failed to clear unreadable saved draft")?;
                return Ok(false);
            }
        };

        match self.draft.restore(saved) {
            Ok(state) => {
                info!(
                    "Recovered saved draft: {} picks, {} players remaining",
                    state.pick_count(),
                    state.remaining_players.len()
                );
                Ok(true)
            }
            Err(e) => {
                warn!("Discarding saved draft that does not match the config: {}", e);
                store.clear().context("failed to clear stale saved draft")?;
                Ok(false)
            }
        }
    }

    /// Apply one command.
    pub fn handle(&mut self, cmd: UserCommand) -> Outcome {
        match cmd {
            UserCommand::Pick(player) => match self.draft.select_player(&player) {
                Ok(_) => {
                    self.persist();
                    self.show_board()
                }
                Err(e) => Outcome::Rejected(e.to_string()),
            },
            UserCommand::Undo => match self.draft.undo_last_pick() {
                Ok(_) => {
                    self.persist();
                    self.show_board()
                }
                Err(e) => Outcome::Rejected(e.to_string()),
            },
            UserCommand::Reset => {
                self.draft.reset();
                self.persist();
                self.show_board()
            }
            UserCommand::ShowBoard => self.show_board(),
            UserCommand::ShowPool => Outcome::Show(render::render_pool(&self.draft)),
            UserCommand::ShowOrder => Outcome::Show(render::render_order(&self.draft)),
            UserCommand::Export(path) => {
                let path = path.unwrap_or_else(default_snapshot_path);
                match self.export(&path) {
                    Ok(()) => Outcome::Show(format!("Snapshot written to {}", path.display())),
                    Err(e) => {
                        warn!("Snapshot export failed: {:#}", e);
                        Outcome::Rejected(format!("could not write snapshot: {e:#}"))
                    }
                }
            }
            UserCommand::Help => Outcome::Show(HELP_TEXT.to_string()),
            UserCommand::Quit => Outcome::Quit,
        }
    }

    /// Write a text snapshot of the board to `path`.
    pub fn export(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let text = render::render_snapshot(&self.title, &self.draft);
        std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Exported board snapshot to {}", path.display());
        Ok(())
    }

    fn show_board(&self) -> Outcome {
        Outcome::Show(format!(
            "{}\n{}",
            render::render_board(&self.draft.board()),
            render::ticker(&self.draft)
        ))
    }

    /// Save the current state. Failures are logged; the session carries on
    /// with the in-memory state.
    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(self.draft.state()) {
                warn!("Failed to persist draft state: {:#}", e);
            }
        }
    }
}

/// `draft-YYYY-MM-DD.txt` in the working directory.
pub fn default_snapshot_path() -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    PathBuf::from(format!("draft-{date}.txt"))
}
