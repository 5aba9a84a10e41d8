//! The pet-state engine: load, decay, reward, log, reset.
//!
//! The engine is the only writer of the two persisted aggregates, the pet
//! record and the history log, each under its own key. Every mutating call
//! takes `&mut self`; wrap the engine in [`SharedPetEngine`] to drive it from
//! more than one thread.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::catalog::EcoAction;
use crate::clock::{Clock, SystemClock};
use crate::error::{EngineError, Result};
use crate::migrate::migrate_pet;
use crate::model::{level_for_xp, EcoStats, HistoryEntry, PetState, StageLabel};
use crate::personality::message_for;
use crate::sim::{apply_action, catch_up, ActionOutcome, Rules};
use crate::store::KeyValueStore;

const RUNAWAY_NOTE: &str = "Tried action but pet had already run away";

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub pet_key: String,
    pub history_key: String,
    pub history_cap: usize,
    pub rules: Rules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pet_key: "pet_state_v2".to_string(),
            history_key: "pet_history_v1".to_string(),
            history_cap: 50,
            rules: Rules::default(),
        }
    }
}

/// Where the most recently loaded pet record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing stored yet; a default record was created.
    Fresh,
    Stored,
    /// Stored data was unreadable or corrupt and was replaced by a default record.
    Recovered,
}

pub struct PetEngine<S, C = SystemClock> {
    store: S,
    clock: C,
    config: EngineConfig,
    last_load: LoadSource,
}

impl<S: KeyValueStore> PetEngine<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: KeyValueStore, C: Clock> PetEngine<S, C> {
    pub fn with_clock(store: S, clock: C, config: EngineConfig) -> Self {
        Self {
            store,
            clock,
            config,
            last_load: LoadSource::Fresh,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_source(&self) -> LoadSource {
        self.last_load
    }

    fn now_ms(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    /// Loads the current pet, applies decay, persists it and returns it.
    pub fn get_pet_state(&mut self) -> Result<PetState> {
        let now = self.now_ms();
        let pet = self.load_decayed(now);
        self.save_pet(&pet)?;
        Ok(pet)
    }

    /// Loads and decays the pet like [`get_pet_state`](Self::get_pet_state)
    /// without writing anything back.
    pub fn peek_pet_state(&mut self) -> PetState {
        let now = self.now_ms();
        self.load_decayed(now)
    }

    /// Records an eco-action and returns the updated pet.
    ///
    /// Decay is applied first. A pet that has run away is left untouched and
    /// only the history log is written; otherwise both aggregates are written
    /// exactly once.
    pub fn log_action(
        &mut self,
        action: impl Into<EcoAction>,
        detail: Option<&str>,
    ) -> Result<PetState> {
        let action = action.into();
        let now = self.now_ms();
        let mut pet = self.load_decayed(now);
        let mut history = self.load_history();

        let outcome = apply_action(&mut pet, &action, now, &self.config.rules);
        let entry = match outcome {
            ActionOutcome::Ignored => {
                debug!(action = %action, "pet has run away, action ignored");
                HistoryEntry {
                    timestamp: now,
                    action_type: action,
                    detail: detail.map(str::to_string),
                    xp_gain: None,
                    new_xp: None,
                    new_level: None,
                    note: Some(RUNAWAY_NOTE.to_string()),
                }
            }
            ActionOutcome::Applied {
                xp_gain,
                new_xp,
                new_level,
            } => {
                debug!(action = %action, xp_gain, new_xp, new_level, mood = %pet.mood, "action applied");
                HistoryEntry {
                    timestamp: now,
                    action_type: action,
                    detail: detail.map(str::to_string),
                    xp_gain: Some(xp_gain),
                    new_xp: Some(new_xp),
                    new_level: Some(new_level),
                    note: None,
                }
            }
        };

        history.insert(0, entry);
        history.truncate(self.config.history_cap);

        if outcome != ActionOutcome::Ignored {
            let stats = EcoStats::from_history(&history);
            let last = history.first().map(|e| &e.action_type);
            pet.message = Some(message_for(&pet, &stats, last).to_string());
            self.save_pet(&pet)?;
        }
        self.save_history(&history)?;
        Ok(pet)
    }

    /// Replaces the pet with a fresh default record. History is kept.
    pub fn reset_pet(&mut self) -> Result<PetState> {
        let pet = PetState::new_default(self.now_ms());
        self.save_pet(&pet)?;
        info!(key = %self.config.pet_key, "pet reset");
        Ok(pet)
    }

    /// Like [`reset_pet`](Self::reset_pet) but also clears the history log.
    pub fn reset_pet_and_history(&mut self) -> Result<PetState> {
        let pet = self.reset_pet()?;
        self.store.remove(&self.config.history_key)?;
        info!(key = %self.config.history_key, "history cleared");
        Ok(pet)
    }

    /// Newest first. Unreadable history is treated as empty.
    pub fn load_history(&self) -> Vec<HistoryEntry> {
        let key = &self.config.history_key;
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(%key, error = %e, "history unreadable, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(history) => history,
            Err(e) => {
                warn!(%key, error = %e, "history corrupt, starting empty");
                Vec::new()
            }
        }
    }

    pub fn eco_stats(&self) -> EcoStats {
        EcoStats::from_history(&self.load_history())
    }

    fn load_decayed(&mut self, now: i64) -> PetState {
        let mut pet = self.load_pet(now);
        let summary = catch_up(&mut pet, now, &self.config.rules);
        if summary.ran_away {
            info!(steps = summary.steps, "pet ran away");
        } else if summary.steps > 0 {
            debug!(steps = summary.steps, mood = %pet.mood, "mood decayed");
        }
        pet
    }

    fn load_pet(&mut self, now: i64) -> PetState {
        let key = &self.config.pet_key;
        let (pet, source) = match self.store.get(key) {
            Ok(None) => (PetState::new_default(now), LoadSource::Fresh),
            Ok(Some(raw)) => {
                let rules = &self.config.rules;
                let decoded = serde_json::from_str::<serde_json::Value>(&raw)
                    .map_err(|e| e.to_string())
                    .and_then(|v| {
                        migrate_pet(v, now, rules.xp_per_level).map_err(|e| e.to_string())
                    });
                match decoded {
                    Ok(mut pet) => {
                        rederive_level(&mut pet, rules);
                        (pet, LoadSource::Stored)
                    }
                    Err(reason) => {
                        warn!(%key, %reason, "pet record corrupt, falling back to default");
                        (PetState::new_default(now), LoadSource::Recovered)
                    }
                }
            }
            Err(e) => {
                warn!(%key, error = %e, "pet record unreadable, falling back to default");
                (PetState::new_default(now), LoadSource::Recovered)
            }
        };
        self.last_load = source;
        pet
    }

    fn save_pet(&mut self, pet: &PetState) -> Result<()> {
        let data = serde_json::to_string(pet)?;
        self.store.set(&self.config.pet_key, &data)?;
        Ok(())
    }

    fn save_history(&mut self, history: &[HistoryEntry]) -> Result<()> {
        let data = serde_json::to_string(history)?;
        self.store.set(&self.config.history_key, &data)?;
        Ok(())
    }
}

/// Level is a function of XP under the current rules, whatever was stored.
fn rederive_level(pet: &mut PetState, rules: &Rules) {
    let level = level_for_xp(pet.xp, rules.xp_per_level);
    if level != pet.level {
        debug!(stored = pet.level, level, "stored level re-derived from xp");
        pet.level = level;
    }
    if !pet.has_run_away {
        pet.stage = StageLabel::for_level(level);
    }
}

/// A cloneable handle that runs one engine operation at a time.
///
/// Each call holds the lock for its whole read-modify-write, so overlapping
/// `log_action` calls cannot lose an XP increment.
pub struct SharedPetEngine<S, C = SystemClock> {
    inner: Arc<Mutex<PetEngine<S, C>>>,
}

impl<S, C> Clone for SharedPetEngine<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore, C: Clock> SharedPetEngine<S, C> {
    pub fn new(engine: PetEngine<S, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, PetEngine<S, C>>> {
        self.inner.lock().map_err(|_| EngineError::LockPoisoned)
    }

    pub fn get_pet_state(&self) -> Result<PetState> {
        self.lock()?.get_pet_state()
    }

    pub fn log_action(&self, action: impl Into<EcoAction>, detail: Option<&str>) -> Result<PetState> {
        self.lock()?.log_action(action, detail)
    }

    pub fn reset_pet(&self) -> Result<PetState> {
        self.lock()?.reset_pet()
    }

    pub fn reset_pet_and_history(&self) -> Result<PetState> {
        self.lock()?.reset_pet_and_history()
    }

    pub fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.lock()?.load_history())
    }

    pub fn eco_stats(&self) -> Result<EcoStats> {
        Ok(self.lock()?.eco_stats())
    }
}
