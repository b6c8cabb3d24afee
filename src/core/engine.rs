//! The engine: game state plus everything that acts on it.
//!
//! [`Engine`] owns the state, the current monster, the reference data, the
//! durable store and an optional presenter. Every operation runs to
//! completion before the next, so no locking is involved. Ticks and actions
//! that fail leave the state as it was.

use crate::character::promotion::{self, Gate, PromotionChoice, PromotionMenu, PromotionOutcome};
use crate::character::upgrades;
use crate::combat::skills::{self, SkillCast};
use crate::core::config::EngineConfig;
use crate::core::damage::{self, Hit};
use crate::core::error::{
    ActionError, EngineError, ImportError, NonFiniteValue, PersistenceError, PromotionError,
};
use crate::core::game_loop::GameLoop;
use crate::core::game_state::GameState;
use crate::core::grand_slam::check_grand_slam;
use crate::core::monster::{apply_damage, BossDrop, KillReport, Monster};
use crate::core::tick::{self, game_tick, DpsBreakdown, TickEvent, TickResult};
use crate::data::ReferenceData;
use crate::utils::persistence::{self, LoadSource};
use crate::utils::store::KeyValueStore;
use rand::Rng;

/// Optional observer for re-render requests and transient alerts.
pub trait Presenter {
    fn state_changed(&mut self, _state: &GameState, _monster: &Monster, _dps: &DpsBreakdown) {}
    fn alert(&mut self, _message: &str) {}
}

/// Outcome of a manual attack.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    pub hit: Hit,
    pub kill: Option<KillReport>,
}

pub struct Engine<R: Rng> {
    state: GameState,
    monster: Monster,
    data: Box<dyn ReferenceData>,
    store: Box<dyn KeyValueStore>,
    presenter: Option<Box<dyn Presenter>>,
    config: EngineConfig,
    rng: R,
    last_player_attack_ms: i64,
    dps: DpsBreakdown,
}

impl<R: Rng> Engine<R> {
    /// Builds an engine around an existing state.
    pub fn new(
        state: GameState,
        data: Box<dyn ReferenceData>,
        store: Box<dyn KeyValueStore>,
        config: EngineConfig,
        rng: R,
    ) -> Self {
        let mut engine = Self {
            state,
            monster: Monster::unspawned(),
            data,
            store,
            presenter: None,
            config,
            rng,
            last_player_attack_ms: 0,
            dps: DpsBreakdown::default(),
        };
        engine.refresh_monster();
        engine.dps = engine.dps();
        engine
    }

    /// Loads the saved game from `store`, or starts a new one.
    pub fn load(
        data: Box<dyn ReferenceData>,
        store: Box<dyn KeyValueStore>,
        config: EngineConfig,
        rng: R,
    ) -> Self {
        let outcome = persistence::load_state(store.as_ref(), &config.save_key, data.as_ref());
        match &outcome.source {
            LoadSource::Fresh => log::info!("no save found, starting a new game"),
            LoadSource::Restored { repairs } => {
                log::info!("loaded save at stage {}", outcome.state.stage);
                if !repairs.is_empty() {
                    log::info!("applied {} save repairs", repairs.len());
                }
            }
            LoadSource::Reset { reason } => log::warn!("save reset to defaults: {reason}"),
        }
        Self::new(outcome.state, data, store, config, rng)
    }

    pub fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.presenter = Some(presenter);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and tests. Call
    /// [`Engine::ensure_monster`] after changing `stage`.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn data(&self) -> &dyn ReferenceData {
        self.data.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn last_dps(&self) -> DpsBreakdown {
        self.dps
    }

    /// Current DPS estimate. Falls back to the last good value when a
    /// reference curve misbehaves.
    pub fn dps(&self) -> DpsBreakdown {
        tick::dps_breakdown(&self.state, self.data.as_ref(), &self.config).unwrap_or(self.dps)
    }

    pub fn helper_dps(&self) -> Result<f64, NonFiniteValue> {
        tick::helper_dps(&self.state, self.data.as_ref())
    }

    pub fn grand_slam(&self) -> bool {
        check_grand_slam(&self.state.helpers, self.data.as_ref())
    }

    /// Respawns the monster for the current stage if it is not alive.
    pub fn ensure_monster(&mut self) -> Result<(), NonFiniteValue> {
        if !self.monster.is_valid() {
            self.monster = Monster::spawn(self.state.stage, self.data.as_ref())?;
        }
        Ok(())
    }

    fn refresh_monster(&mut self) {
        self.monster = Monster::unspawned();
        if let Err(e) = self.ensure_monster() {
            log::error!("could not spawn monster for stage {}: {e}", self.state.stage);
        }
    }

    /// Runs one tick at `now_ms`. On failure every change made by the tick
    /// is rolled back and the error is returned for the scheduler to log.
    pub fn tick(&mut self, now_ms: i64) -> Result<TickResult, EngineError> {
        self.ensure_monster()?;
        let snapshot = (
            self.state.clone(),
            self.monster.clone(),
            self.last_player_attack_ms,
        );
        let result = game_tick(
            &mut self.state,
            &mut self.monster,
            &mut self.last_player_attack_ms,
            now_ms,
            &self.config,
            self.data.as_ref(),
            &mut self.rng,
        );
        match result {
            Ok(result) => {
                self.dps = result.dps;
                for event in &result.events {
                    if let TickEvent::MonsterKilled(kill) = event {
                        self.announce_kill(kill);
                    }
                }
                self.notify();
                self.autosave();
                Ok(result)
            }
            Err(e) => {
                (self.state, self.monster, self.last_player_attack_ms) = snapshot;
                Err(e)
            }
        }
    }

    fn announce_kill(&mut self, kill: &KillReport) {
        let Some(drop) = kill.drop else {
            return;
        };
        let message = match drop {
            BossDrop::Relic(index) => {
                let name = self.data.relics().get(index).map_or("a relic", |r| r.name);
                format!("Boss dropped {name}!")
            }
            BossDrop::CollectionBonus { diamonds } => {
                format!("Every relic owned: +{diamonds} diamonds")
            }
            BossDrop::Diamonds { diamonds } => format!("Boss dropped {diamonds} diamonds"),
        };
        log::info!("stage {} boss: {message}", kill.stage);
        self.alert(&message);
    }

    fn notify(&mut self) {
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.state_changed(&self.state, &self.monster, &self.dps);
        }
    }

    fn alert(&mut self, message: &str) {
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.alert(message);
        }
    }

    /// Writes the state to the store.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        persistence::save_state(self.store.as_mut(), &self.config.save_key, &self.state)
    }

    fn autosave(&mut self) {
        if !self.config.autosave {
            return;
        }
        if let Err(e) = self.save() {
            log::warn!("save failed: {e}");
        }
    }

    fn after_action(&mut self) {
        self.dps = self.dps();
        self.notify();
        self.autosave();
    }

    /// A manual attack with the player's base damage.
    pub fn click(&mut self) -> Result<ClickOutcome, ActionError> {
        self.ensure_monster()?;
        let base = tick::player_base_damage(&self.state, self.data.as_ref())?;
        let hit = damage::roll(&self.state, base, &mut self.rng);
        let kill = apply_damage(
            &mut self.state,
            &mut self.monster,
            hit.value,
            self.data.as_ref(),
            &mut self.rng,
        )?;
        if let Some(kill) = &kill {
            self.announce_kill(kill);
        }
        self.after_action();
        Ok(ClickOutcome { hit, kill })
    }

    pub fn upgrade_player(&mut self) -> Result<u64, ActionError> {
        let cost = upgrades::upgrade_player(&mut self.state, self.data.as_ref())?;
        self.after_action();
        Ok(cost)
    }

    /// Levels up a helper. A pending promotion is reported as
    /// [`ActionError::PromotionPending`]; use [`Engine::promotion_menu`].
    pub fn upgrade_helper(&mut self, index: usize) -> Result<u64, ActionError> {
        let cost = upgrades::upgrade_helper(&mut self.state, index, self.data.as_ref())?;
        self.after_action();
        Ok(cost)
    }

    pub fn upgrade_skill(&mut self, skill: usize) -> Result<u64, ActionError> {
        let cost = upgrades::upgrade_skill(&mut self.state, skill)?;
        self.after_action();
        Ok(cost)
    }

    pub fn upgrade_relic(&mut self, relic: usize) -> Result<u64, ActionError> {
        let cost = upgrades::upgrade_relic(&mut self.state, relic)?;
        self.after_action();
        Ok(cost)
    }

    pub fn cast_skill(&mut self, skill: usize) -> Result<SkillCast, ActionError> {
        self.ensure_monster()?;
        let cast = skills::cast_skill(
            &mut self.state,
            &mut self.monster,
            skill,
            self.data.as_ref(),
            &mut self.rng,
        )?;
        if let skills::SkillEffect::Strike { kill: Some(kill), .. } = &cast.effect {
            self.announce_kill(kill);
        }
        self.after_action();
        Ok(cast)
    }

    pub fn promotion_menu(&self, index: usize) -> Result<(Gate, PromotionMenu), PromotionError> {
        promotion::promotion_menu(&self.state.helpers, index, self.data.as_ref())
    }

    pub fn promote(
        &mut self,
        index: usize,
        choice: PromotionChoice,
    ) -> Result<PromotionOutcome, PromotionError> {
        let outcome = promotion::promote(&mut self.state, index, choice, self.data.as_ref())?;
        if let Some(job) = &outcome.job {
            self.alert(&format!("Helper {} became a {job}", index + 1));
        }
        if outcome.recruited.is_some() {
            self.alert("A new helper joined the roster");
        }
        if self.grand_slam() {
            log::info!("grand slam active: every terminal job is held");
        }
        self.after_action();
        Ok(outcome)
    }

    pub fn export_code(&self) -> Result<String, serde_json::Error> {
        persistence::export_code(&self.state)
    }

    /// Replaces the whole state with an exported one. A rejected code
    /// leaves the current state untouched.
    pub fn import_code(&mut self, code: &str) -> Result<(), ImportError> {
        let imported = match persistence::decode_import(code, self.data.as_ref()) {
            Ok(imported) => imported,
            Err(e) => {
                log::warn!("import rejected: {e}");
                return Err(e);
            }
        };
        for repair in &imported.repairs {
            log::debug!("import repair: {repair}");
        }
        self.state = imported.state;
        self.last_player_attack_ms = 0;
        self.refresh_monster();
        self.after_action();
        Ok(())
    }

    /// Discards all progress and starts a new game.
    pub fn reset(&mut self) {
        self.state = persistence::new_game(self.data.as_ref());
        self.last_player_attack_ms = 0;
        self.refresh_monster();
        self.after_action();
    }
}

impl<R: Rng> GameLoop for Engine<R> {
    fn tick(&mut self, now_ms: i64) -> Result<TickResult, EngineError> {
        Engine::tick(self, now_ms)
    }

    fn state(&self) -> &GameState {
        &self.state
    }
}
