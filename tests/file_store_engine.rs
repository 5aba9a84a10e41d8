use chrono::{DateTime, Duration, TimeZone, Utc};
use ecopet::clock::Clock;
use ecopet::model::Mood;
use ecopet::{EngineConfig, FileStore, LoadSource, PetEngine};
use std::cell::Cell;
use std::rc::Rc;
use tempfile::TempDir;

#[derive(Clone)]
struct StepClock(Rc<Cell<DateTime<Utc>>>);

impl StepClock {
    fn new() -> Self {
        Self(Rc::new(Cell::new(
            Utc.with_ymd_and_hms(2025, 4, 22, 9, 0, 0).unwrap(),
        )))
    }

    fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.get()
    }
}

fn open(dir: &TempDir, clock: &StepClock) -> PetEngine<FileStore, StepClock> {
    let store = FileStore::open(dir.path()).unwrap();
    PetEngine::with_clock(store, clock.clone(), EngineConfig::default())
}

#[test]
fn pet_survives_restart_and_decays_while_away() {
    let temp_dir = TempDir::new().unwrap();
    let clock = StepClock::new();

    {
        let mut engine = open(&temp_dir, &clock);
        engine.log_action("walk", Some("Long walk")).unwrap();
        engine.log_action("energySave", None).unwrap();
    }
    assert!(temp_dir.path().join("pet_state_v2.json").exists());
    assert!(temp_dir.path().join("pet_history_v1.json").exists());

    clock.advance(Duration::hours(12));
    let mut engine = open(&temp_dir, &clock);
    let pet = engine.get_pet_state().unwrap();
    assert_eq!(engine.load_source(), LoadSource::Stored);
    assert_eq!(pet.xp, 17);
    assert_eq!(pet.mood, Mood::Meh);

    let history = engine.load_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].action_type.id(), "energySave");
    assert_eq!(history[1].detail.as_deref(), Some("Long walk"));
}

#[test]
fn old_shape_file_is_migrated_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let clock = StepClock::new();
    let now = clock.now().timestamp_millis();
    std::fs::write(
        temp_dir.path().join("pet_state_v2.json"),
        format!(r#"{{"mood":"neutral","xp":320,"lastUpdated":{now}}}"#),
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join("pet_history_v1.json"),
        r#"[{"id":"1","action":"recycle","xp":5,"timestamp":1}]"#,
    )
    .unwrap();

    let mut engine = open(&temp_dir, &clock);
    let pet = engine.get_pet_state().unwrap();
    assert_eq!(pet.mood, Mood::Okay);
    assert_eq!(pet.level, 17);
    assert_eq!(pet.stage.name, "Blob");
    assert_eq!(engine.eco_stats().co2_saved, 80.0);

    let rewritten = std::fs::read_to_string(temp_dir.path().join("pet_state_v2.json")).unwrap();
    assert!(rewritten.contains("\"schemaVersion\":1"));
}

#[test]
fn garbage_on_disk_is_recovered() {
    let temp_dir = TempDir::new().unwrap();
    let clock = StepClock::new();
    std::fs::write(temp_dir.path().join("pet_state_v2.json"), "\u{0}\u{0}").unwrap();

    let mut engine = open(&temp_dir, &clock);
    let pet = engine.get_pet_state().unwrap();
    assert_eq!(engine.load_source(), LoadSource::Recovered);
    assert_eq!(pet.xp, 0);

    engine.get_pet_state().unwrap();
    assert_eq!(engine.load_source(), LoadSource::Stored);
}
