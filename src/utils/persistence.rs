//! Save, load and export/import of [`GameState`].
//!
//! Saves are JSON under a single key. Older saves used different field
//! names and shorter arrays, so every load goes through [`reconcile`]:
//!
//! 1. Legacy keys are renamed to their current names.
//! 2. Known fields are taken from the save, missing ones from the defaults.
//! 3. Each field is coerced to its expected shape and clamped to range.
//!
//! Anything that cannot be read at all falls back to a new game.

use crate::character::helper::{starting_roster, Helper};
use crate::core::constants::{
    EXPORT_CHECKSUM_HEX_LEN, MAX_HELPER_LEVEL, MAX_PLAYER_LEVEL, MAX_RELIC_LEVEL, MAX_SKILL_LEVEL,
    MAX_STAGE, SKILL_COUNT,
};
use crate::core::error::{ImportError, LoadError, PersistenceError};
use crate::core::game_state::GameState;
use crate::data::{ReferenceData, Series};
use crate::utils::store::KeyValueStore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Legacy top-level field names and their replacements.
const LEGACY_KEYS: [(&str, &str); 4] = [
    ("sLvs", "skillLevels"),
    ("rLvs", "relicLevels"),
    ("skillCds", "skillCooldowns"),
    ("activeTimers", "activeSkillTimers"),
];

/// Legacy helper field names and their replacements.
const LEGACY_HELPER_KEYS: [(&str, &str); 2] = [("lv", "level"), ("grp", "group")];

/// A state rebuilt from untrusted JSON, with a note per repair applied.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub state: GameState,
    pub repairs: Vec<String>,
}

/// Where a loaded state came from.
#[derive(Debug)]
pub enum LoadSource {
    /// Nothing was stored; a new game was created.
    Fresh,
    /// The stored save was read and reconciled.
    Restored { repairs: Vec<String> },
    /// The stored save could not be used; a new game was created.
    Reset { reason: LoadError },
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub state: GameState,
    pub source: LoadSource,
}

/// A brand-new game: default fields and the starting roster.
pub fn new_game(data: &dyn ReferenceData) -> GameState {
    let mut state = GameState::new(data.relic_count());
    state.helpers = starting_roster();
    state
}

/// Serializes `state` and writes it under `key`.
pub fn save_state(
    store: &mut dyn KeyValueStore,
    key: &str,
    state: &GameState,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(state)?;
    store.set(key, &json)?;
    Ok(())
}

/// Reads the save under `key`. Never fails: unreadable saves become a new
/// game and the reason is reported in [`LoadSource::Reset`].
pub fn load_state(store: &dyn KeyValueStore, key: &str, data: &dyn ReferenceData) -> LoadOutcome {
    match read_saved(store, key, data) {
        Ok(None) => LoadOutcome {
            state: new_game(data),
            source: LoadSource::Fresh,
        },
        Ok(Some(reconciled)) => {
            for repair in &reconciled.repairs {
                log::debug!("save repair: {repair}");
            }
            LoadOutcome {
                state: reconciled.state,
                source: LoadSource::Restored {
                    repairs: reconciled.repairs,
                },
            }
        }
        Err(reason) => {
            log::warn!("discarding unreadable save: {reason}");
            LoadOutcome {
                state: new_game(data),
                source: LoadSource::Reset { reason },
            }
        }
    }
}

fn read_saved(
    store: &dyn KeyValueStore,
    key: &str,
    data: &dyn ReferenceData,
) -> Result<Option<Reconciled>, LoadError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    let value: Value = serde_json::from_str(&raw)?;
    reconcile(&value, data).map(Some)
}

/// Rebuilds a [`GameState`] from arbitrary JSON.
///
/// Only a non-object root is an error; every other defect is repaired.
pub fn reconcile(raw: &Value, data: &dyn ReferenceData) -> Result<Reconciled, LoadError> {
    let Value::Object(raw) = raw else {
        return Err(LoadError::NotAnObject);
    };
    let mut fields = raw.clone();
    let mut repairs = Vec::new();
    rename_legacy(&mut fields, &LEGACY_KEYS, "", &mut repairs);

    let defaults = GameState::new(data.relic_count());
    let mut state = defaults.clone();

    state.coins = read_u64(&fields, "coins", defaults.coins, &mut repairs);
    state.diamonds = read_u64(&fields, "diamonds", defaults.diamonds, &mut repairs);
    let stage = read_u32(&fields, "stage", defaults.stage, &mut repairs).max(1);
    state.stage = clamp_to(stage, MAX_STAGE, "stage", &mut repairs);
    let player_lv = read_u32(&fields, "playerLv", defaults.player_lv, &mut repairs).max(1);
    state.player_lv = clamp_to(player_lv, MAX_PLAYER_LEVEL, "playerLv", &mut repairs);

    let max_sp = data.max_sp(state.player_lv);
    let sp = read_u32(&fields, "sp", defaults.sp, &mut repairs);
    if sp > max_sp {
        repairs.push(format!("sp {sp} clamped to {max_sp}"));
    }
    state.sp = sp.min(max_sp);

    state.skill_levels = read_slots(&fields, "skillLevels", &mut repairs);
    for level in state.skill_levels.iter_mut() {
        if *level > MAX_SKILL_LEVEL {
            repairs.push(format!("skill level {level} clamped to {MAX_SKILL_LEVEL}"));
            *level = MAX_SKILL_LEVEL;
        }
    }
    state.skill_cooldowns = read_slots(&fields, "skillCooldowns", &mut repairs);
    state.active_skill_timers = read_slots(&fields, "activeSkillTimers", &mut repairs);
    state.relic_levels = read_relics(&fields, data.relic_count(), &mut repairs);
    state.helpers = read_helpers(&fields, &mut repairs);

    if state.helpers.is_empty() {
        repairs.push("empty roster reseeded".to_string());
        state.helpers = starting_roster();
    }

    Ok(Reconciled { state, repairs })
}

fn clamp_to(value: u32, max: u32, key: &str, repairs: &mut Vec<String>) -> u32 {
    if value > max {
        repairs.push(format!("{key} {value} clamped to {max}"));
        max
    } else {
        value
    }
}

fn rename_legacy(
    fields: &mut Map<String, Value>,
    renames: &[(&str, &str)],
    scope: &str,
    repairs: &mut Vec<String>,
) {
    for (old, new) in renames {
        if let Some(value) = fields.remove(*old) {
            if !fields.contains_key(*new) {
                repairs.push(format!("{scope}{old} renamed to {new}"));
                fields.insert((*new).to_string(), value);
            }
        }
    }
}

/// Non-negative whole number from a JSON number or numeric string.
fn as_whole(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then(|| n.floor())
}

fn read_u64(
    fields: &Map<String, Value>,
    key: &str,
    default: u64,
    repairs: &mut Vec<String>,
) -> u64 {
    match fields.get(key) {
        None => default,
        Some(value) => match as_whole(value) {
            Some(n) => n.min(u64::MAX as f64) as u64,
            None => {
                repairs.push(format!("{key} was not a number, reset to {default}"));
                default
            }
        },
    }
}

fn read_u32(
    fields: &Map<String, Value>,
    key: &str,
    default: u32,
    repairs: &mut Vec<String>,
) -> u32 {
    let wide = read_u64(fields, key, u64::from(default), repairs);
    u32::try_from(wide).unwrap_or(u32::MAX)
}

fn array_u32(items: &[Value]) -> Vec<u32> {
    items
        .iter()
        .map(|v| as_whole(v).map_or(0, |n| n.min(f64::from(u32::MAX)) as u32))
        .collect()
}

/// A fixed four-slot array. Anything else becomes all zeros.
fn read_slots(
    fields: &Map<String, Value>,
    key: &str,
    repairs: &mut Vec<String>,
) -> [u32; SKILL_COUNT] {
    match fields.get(key) {
        Some(Value::Array(items)) if items.len() == SKILL_COUNT => {
            let mut slots = [0; SKILL_COUNT];
            slots.copy_from_slice(&array_u32(items));
            slots
        }
        Some(_) => {
            repairs.push(format!("{key} reset to {SKILL_COUNT} zero slots"));
            [0; SKILL_COUNT]
        }
        None => [0; SKILL_COUNT],
    }
}

/// Resizes to exactly `count`, keeping the prefix that fits.
fn read_relics(fields: &Map<String, Value>, count: usize, repairs: &mut Vec<String>) -> Vec<u32> {
    let mut levels = match fields.get("relicLevels") {
        Some(Value::Array(items)) => array_u32(items),
        Some(_) => {
            repairs.push("relicLevels was not an array".to_string());
            Vec::new()
        }
        None => Vec::new(),
    };
    if levels.len() != count && fields.contains_key("relicLevels") {
        repairs.push(format!("relicLevels resized from {} to {count}", levels.len()));
    }
    levels.resize(count, 0);
    for level in levels.iter_mut() {
        *level = clamp_to(*level, MAX_RELIC_LEVEL, "relic level", repairs);
    }
    levels
}

fn read_helpers(fields: &Map<String, Value>, repairs: &mut Vec<String>) -> Vec<Helper> {
    let items = match fields.get("helpers") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            repairs.push("helpers was not an array".to_string());
            return Vec::new();
        }
        None => return Vec::new(),
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let helper = read_helper(item, i, repairs);
            if helper.is_none() {
                repairs.push(format!("helper {i} dropped"));
            }
            helper
        })
        .collect()
}

fn read_helper(item: &Value, index: usize, repairs: &mut Vec<String>) -> Option<Helper> {
    let mut fields = item.as_object()?.clone();
    rename_legacy(&mut fields, &LEGACY_HELPER_KEYS, &format!("helper {index} "), repairs);

    let series = fields
        .get("series")
        .and_then(Value::as_str)
        .and_then(Series::from_tag)?;
    let mut helper = Helper::new(series);

    match fields.get("id") {
        Some(Value::String(id)) if !id.is_empty() => helper.id = id.clone(),
        Some(Value::Number(n)) => helper.id = n.to_string(),
        _ => repairs.push(format!("helper {index} given a new id")),
    }

    let level = read_u32(&fields, "level", 1, repairs);
    helper.level = level.clamp(1, MAX_HELPER_LEVEL);
    if helper.level != level {
        repairs.push(format!("helper {index} level {level} clamped to {}", helper.level));
    }

    let text = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    helper.camp = text("camp");
    helper.group = text("group");
    helper.job1 = text("job1");
    helper.job2 = text("job2");
    helper.job3 = text("job3");
    helper.job4 = text("job4");
    Some(helper)
}

fn checksum(payload: &[u8]) -> String {
    let digest = Sha256::digest(payload);
    digest
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<String>()
        .chars()
        .take(EXPORT_CHECKSUM_HEX_LEN)
        .collect()
}

/// Encodes `state` as a copy-paste code: base64 JSON, a dot, and the first
/// hex digits of the JSON's SHA-256.
pub fn export_code(state: &GameState) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(state)?;
    Ok(format!("{}.{}", STANDARD.encode(&json), checksum(json.as_bytes())))
}

/// Decodes and validates an export code. The checksum suffix is optional
/// but verified when present.
pub fn decode_import(code: &str, data: &dyn ReferenceData) -> Result<Reconciled, ImportError> {
    let code: String = code.chars().filter(|c| !c.is_whitespace()).collect();
    if code.is_empty() {
        return Err(ImportError::Empty);
    }
    let (encoded, expected) = match code.split_once('.') {
        Some((encoded, sum)) => (encoded, Some(sum)),
        None => (code.as_str(), None),
    };
    let bytes = STANDARD.decode(encoded)?;
    if let Some(expected) = expected {
        if !checksum(&bytes).eq_ignore_ascii_case(expected) {
            return Err(ImportError::Checksum);
        }
    }
    let json = String::from_utf8(bytes)?;
    let value: Value = serde_json::from_str(&json)?;

    let Value::Object(fields) = &value else {
        return Err(ImportError::NotAnObject);
    };
    if !fields.get("coins").is_some_and(Value::is_number) {
        return Err(ImportError::MissingField("coins"));
    }
    if !fields.get("helpers").is_some_and(Value::is_array) {
        return Err(ImportError::MissingField("helpers"));
    }
    reconcile(&value, data).map_err(|_| ImportError::NotAnObject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StandardData;
    use crate::utils::store::MemoryStore;
    use serde_json::json;

    const KEY: &str = "test.save";

    fn data() -> StandardData {
        StandardData::new()
    }

    #[test]
    fn test_missing_save_is_fresh() {
        let outcome = load_state(&MemoryStore::new(), KEY, &data());
        assert!(matches!(outcome.source, LoadSource::Fresh));
        assert_eq!(outcome.state.helpers.len(), 2);
        assert_eq!(outcome.state.relic_levels.len(), 10);
    }

    #[test]
    fn test_save_then_load() {
        let data = data();
        let mut store = MemoryStore::new();
        let mut state = new_game(&data);
        state.coins = 1234;
        state.stage = 17;
        state.relic_levels[3] = 2;
        save_state(&mut store, KEY, &state).unwrap();

        let outcome = load_state(&store, KEY, &data);
        assert_eq!(outcome.state, state);
        match outcome.source {
            LoadSource::Restored { repairs } => assert!(repairs.is_empty(), "{repairs:?}"),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut store = MemoryStore::new();
        store.set_failing(true);
        let err = save_state(&mut store, KEY, &GameState::new(10)).unwrap_err();
        assert!(matches!(err, PersistenceError::Store(_)));
    }

    #[test]
    fn test_garbage_resets_to_defaults() {
        let data = data();
        for raw in ["not json", "[1,2,3]", "42"] {
            let store = MemoryStore::with_entry(KEY, raw);
            let outcome = load_state(&store, KEY, &data);
            assert!(matches!(outcome.source, LoadSource::Reset { .. }), "{raw}");
            assert_eq!(outcome.state.coins, 0);
            assert_eq!(outcome.state.helpers.len(), 2);
        }
    }

    #[test]
    fn test_unreadable_store_resets() {
        let mut store = MemoryStore::with_entry(KEY, "{}");
        store.set_failing(true);
        let outcome = load_state(&store, KEY, &data());
        assert!(matches!(
            outcome.source,
            LoadSource::Reset {
                reason: LoadError::Store(_)
            }
        ));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let repaired = reconcile(&json!({ "coins": 50 }), &data()).unwrap();
        assert_eq!(repaired.state.coins, 50);
        assert_eq!(repaired.state.stage, 1);
        assert_eq!(repaired.state.skill_cooldowns, [0; 4]);
        assert_eq!(repaired.state.relic_levels, vec![0; 10]);
    }

    #[test]
    fn test_skill_levels_clamped() {
        let raw = json!({ "skillLevels": [150, 100, 3, 999] });
        let state = reconcile(&raw, &data()).unwrap().state;
        assert_eq!(state.skill_levels, [100, 100, 3, 100]);
    }

    #[test]
    fn test_wrong_length_slots_zeroed() {
        let raw = json!({
            "skillLevels": [1, 2],
            "skillCooldowns": "soon",
            "activeSkillTimers": [5, 5, 5, 5, 5]
        });
        let repaired = reconcile(&raw, &data()).unwrap();
        assert_eq!(repaired.state.skill_levels, [0; 4]);
        assert_eq!(repaired.state.skill_cooldowns, [0; 4]);
        assert_eq!(repaired.state.active_skill_timers, [0; 4]);
        assert_eq!(repaired.repairs.len(), 3 + 1);
    }

    #[test]
    fn test_oversized_levels_clamped() {
        let data = data();
        let raw = json!({
            "stage": 4_000_000_000_u64,
            "playerLv": 3_000_000_000_u64,
            "sp": 4_000_000_000_u64,
            "relicLevels": [4_294_967_295_u64, 4_294_967_295_u64, 12],
        });
        let repaired = reconcile(&raw, &data).unwrap();
        let state = repaired.state;
        assert_eq!(state.stage, MAX_STAGE);
        assert_eq!(state.player_lv, MAX_PLAYER_LEVEL);
        assert_eq!(state.sp, data.max_sp(MAX_PLAYER_LEVEL));
        assert_eq!(&state.relic_levels[..3], &[MAX_RELIC_LEVEL, MAX_RELIC_LEVEL, 12]);
        assert!(repaired.repairs.len() >= 5);
    }

    #[test]
    fn test_relics_resized_keep_prefix() {
        let raw = json!({ "relicLevels": [3, 0, 7] });
        let state = reconcile(&raw, &data()).unwrap().state;
        assert_eq!(state.relic_levels, vec![3, 0, 7, 0, 0, 0, 0, 0, 0, 0]);

        let long: Vec<u32> = (1..=14).collect();
        let state = reconcile(&json!({ "relicLevels": long }), &data()).unwrap().state;
        assert_eq!(state.relic_levels, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_legacy_keys_and_helpers() {
        let raw = json!({
            "coins": 10.9,
            "sLvs": [1, 2, 3, 4],
            "rLvs": [1],
            "skillCds": [0, 10, 0, 0],
            "activeTimers": [0, 0, 5, 0],
            "helpers": [
                { "id": 17, "lv": 450, "series": "MAPLE", "camp": "Explorers", "grp": "Warrior", "job1": "Swordman" },
                { "id": "b", "lv": 0, "series": "RO" },
                { "id": "c", "lv": 5, "series": "DIGI" },
                "junk"
            ]
        });
        let state = reconcile(&raw, &data()).unwrap().state;
        assert_eq!(state.coins, 10);
        assert_eq!(state.skill_levels, [1, 2, 3, 4]);
        assert_eq!(state.relic_levels[0], 1);
        assert_eq!(state.skill_cooldowns[1], 10);
        assert_eq!(state.active_skill_timers[2], 5);

        assert_eq!(state.helpers.len(), 2);
        let first = &state.helpers[0];
        assert_eq!(first.id, "17");
        assert_eq!(first.level, 200);
        assert_eq!(first.group, "Warrior");
        assert_eq!(first.job1, "Swordman");
        assert_eq!(state.helpers[1].level, 1);
        assert_eq!(state.helpers[1].series, Series::Ro);
    }

    #[test]
    fn test_numbers_coerced() {
        let raw = json!({ "coins": -5, "diamonds": "12", "stage": 0, "playerLv": 3.7, "sp": 9999 });
        let state = reconcile(&raw, &data()).unwrap().state;
        assert_eq!(state.coins, 0);
        assert_eq!(state.diamonds, 12);
        assert_eq!(state.stage, 1);
        assert_eq!(state.player_lv, 3);
        assert_eq!(state.sp, data().max_sp(3));
    }

    #[test]
    fn test_export_import_roundtrip() {
        let data = data();
        let mut state = new_game(&data);
        state.coins = 999;
        state.diamonds = 42;
        state.helpers[0].camp = "Explorers".to_string();
        let code = export_code(&state).unwrap();
        assert_eq!(code.rsplit('.').next().map(str::len), Some(8));

        let imported = decode_import(&code, &data).unwrap();
        assert_eq!(imported.state, state);
        assert!(imported.repairs.is_empty());
    }

    #[test]
    fn test_import_without_checksum() {
        let data = data();
        let state = new_game(&data);
        let code = export_code(&state).unwrap();
        let bare = code.split('.').next().unwrap();
        assert_eq!(decode_import(bare, &data).unwrap().state, state);
    }

    #[test]
    fn test_import_rejections() {
        let data = data();
        assert!(matches!(decode_import("   ", &data), Err(ImportError::Empty)));
        assert!(matches!(decode_import("@@@", &data), Err(ImportError::Encoding(_))));

        let encode = |json: &str| STANDARD.encode(json);
        assert!(matches!(decode_import(&encode("{oops"), &data), Err(ImportError::Json(_))));
        assert!(matches!(decode_import(&encode("[]"), &data), Err(ImportError::NotAnObject)));
        assert!(matches!(
            decode_import(&encode(r#"{"coins":"lots","helpers":[]}"#), &data),
            Err(ImportError::MissingField("coins"))
        ));
        assert!(matches!(
            decode_import(&encode(r#"{"coins":1,"helpers":{}}"#), &data),
            Err(ImportError::MissingField("helpers"))
        ));

        let code = export_code(&new_game(&data)).unwrap();
        let (body, _) = code.split_once('.').unwrap();
        let tampered = format!("{body}.00000000");
        assert!(matches!(decode_import(&tampered, &data), Err(ImportError::Checksum)));
    }
}
