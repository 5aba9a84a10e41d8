//! Upgrades persisted pet records to the current schema before they are typed.
//!
//! Records written before `schemaVersion` existed are version 0. They may be
//! missing `hasRunAway`, `coins`, `message` or even `level`, may carry a
//! `neutral` mood, and may store the stage as a full band object. Migration
//! fills every gap deterministically so the typed decode never has to guess.

use serde_json::{json, Map, Value};

use crate::model::{level_for_xp, Mood, PetState, StageLabel, SCHEMA_VERSION};

pub fn migrate_pet(
    raw: Value,
    now_ms: i64,
    xp_per_level: u64,
) -> Result<PetState, MigrateError> {
    let Value::Object(mut obj) = raw else {
        return Err(MigrateError::NotAnObject);
    };

    let version = obj
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if version > u64::from(SCHEMA_VERSION) {
        return Err(MigrateError::Unsupported(version));
    }
    if version == 0 {
        v0_to_v1(&mut obj, now_ms, xp_per_level);
    }

    serde_json::from_value(Value::Object(obj)).map_err(MigrateError::Decode)
}

#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("pet record is not a JSON object")]
    NotAnObject,
    #[error("pet record schema version {0} is newer than supported")]
    Unsupported(u64),
    #[error("pet record does not match schema: {0}")]
    Decode(#[source] serde_json::Error),
}

fn v0_to_v1(obj: &mut Map<String, Value>, now_ms: i64, xp_per_level: u64) {
    let xp = obj.get("xp").and_then(Value::as_u64).unwrap_or(0);
    obj.insert("xp".into(), json!(xp));

    // Older clients used other level rules; only xp is trusted.
    let level = level_for_xp(xp, xp_per_level);
    obj.insert("level".into(), json!(level));

    let mood = obj
        .get("mood")
        .and_then(Value::as_str)
        .map_or(Mood::Happy, Mood::from_legacy);

    let has_run_away = obj
        .get("hasRunAway")
        .and_then(Value::as_bool)
        .unwrap_or(false)
        || mood == Mood::Gone;
    obj.insert("hasRunAway".into(), json!(has_run_away));
    let mood = if has_run_away { Mood::Gone } else { mood };
    obj.insert("mood".into(), json!(mood));

    let stage = if has_run_away {
        StageLabel::ran_away()
    } else {
        StageLabel::for_level(level)
    };
    obj.insert("stage".into(), json!(stage));

    if !obj.get("lastUpdated").is_some_and(Value::is_i64) {
        obj.insert("lastUpdated".into(), json!(now_ms));
    }
    if !obj.get("coins").is_some_and(Value::is_i64) {
        obj.insert("coins".into(), json!(0));
    }
    if !obj.contains_key("message") {
        obj.insert("message".into(), Value::Null);
    }
    obj.insert("schemaVersion".into(), json!(SCHEMA_VERSION));
}
