//! Turn engine.
//!
//! Owns the game context and the clock, consumes [`Input`] events, and
//! drives whose turn it is: dice, movement, landing effects, portal exits,
//! deer mode, and the end of the game. Everything runs synchronously inside
//! [`Engine::handle`]; AI players act when enough [`Input::Tick`] time has
//! accumulated.

use std::time::Duration;

use rand::Rng;

use crate::board::{Cell, GameClock, PlayerState, Quadrant, DICE_WAITING};
use crate::config::{ConfigError, GameConfig};
use crate::context::GameContext;
use crate::eval::{choose_destination, compute_results, GameResults};
use crate::event::{Input, Notification, Rejection, SoundEffect};
use crate::movegen::{compute_destinations, Destinations};
use crate::resolve::{next_round, transition, CommandProcessor, GamePhase, Trigger};

/// Holds the mutable state of one game session.
pub struct Engine {
    config: GameConfig,
    ctx: GameContext,
    clock: GameClock,
    phase: GamePhase,
    destinations: Destinations,
    think_timer: Duration,
    big_diamond_visible: bool,
    results: Option<GameResults>,
    notifications: Vec<Notification>,
}

impl Engine {
    /// Creates an engine in the `Init` phase.
    ///
    /// The PRNG is seeded from the config, or from entropy when no seed is
    /// configured. Fails if the config does not validate.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::debug!(seed, "engine created");
        Ok(Engine {
            ctx: GameContext::new(config.humans, seed),
            config,
            clock: GameClock::new(),
            phase: GamePhase::Init,
            destinations: Destinations::NONE,
            think_timer: Duration::ZERO,
            big_diamond_visible: false,
            results: None,
            notifications: Vec::new(),
        })
    }

    /// Finishes startup and shows the menu.
    pub fn boot(&mut self) -> Result<(), Rejection> {
        self.require(Trigger::Boot, "boot")
            .map(|to| self.set_phase(to))
    }

    /// Applies one inbound event.
    ///
    /// Inputs that are not legal right now leave the state untouched and
    /// come back as a [`Rejection`].
    pub fn handle(&mut self, input: Input) -> Result<(), Rejection> {
        let result = match input {
            Input::NewGameRequested => self.new_game(),
            Input::IntroFinished => self
                .require(Trigger::IntroFinished, "intro finished")
                .map(|to| self.set_phase(to)),
            Input::HumanToggleRequested(quadrant) => self.toggle_human(quadrant),
            Input::StartGameRequested => self.start_game(),
            Input::DiceRollRequested => self.human_roll(),
            Input::CellSelected(cell) => self.human_select(cell),
            Input::Continue => self.continue_game(),
            Input::Tick(dt) => {
                self.update(dt);
                Ok(())
            }
        };
        if let Err(rejection) = &result {
            tracing::debug!(?input, %rejection, "input rejected");
        }
        result
    }

    /// Advances AI thinking timers by `dt`. The acting AI rolls or moves
    /// once its timer reaches the configured thinking time.
    pub fn update(&mut self, dt: Duration) {
        if !matches!(self.phase, GamePhase::RollDice | GamePhase::Game) {
            return;
        }
        if self.current_player().human {
            return;
        }
        self.think_timer += dt;
        if self.think_timer < self.config.ai_think_time() {
            return;
        }
        self.think_timer = Duration::ZERO;
        match self.phase {
            GamePhase::RollDice => self.roll_dice(),
            GamePhase::Game => self.ai_move(),
            _ => {}
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    /// Mutable access to the rules state, for scripted setups and tests.
    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    /// Legal landing cells for the current roll.
    pub fn destinations(&self) -> Destinations {
        self.destinations
    }

    pub fn big_diamond_visible(&self) -> bool {
        self.big_diamond_visible
    }

    /// Results table, once the game has ended.
    pub fn results(&self) -> Option<&GameResults> {
        self.results.as_ref()
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &PlayerState {
        self.ctx.player(self.clock.turn)
    }

    /// Takes every notification emitted since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn require(&self, trigger: Trigger, input: &'static str) -> Result<GamePhase, Rejection> {
        transition(self.phase, trigger).ok_or(Rejection::WrongPhase {
            input,
            phase: self.phase,
        })
    }

    fn set_phase(&mut self, to: GamePhase) {
        tracing::trace!(from = %self.phase, %to, "phase change");
        self.phase = to;
        self.notifications.push(Notification::StateChanged { phase: to });
    }

    /// Fires a transition the engine itself has already checked for.
    fn fire(&mut self, trigger: Trigger) {
        match transition(self.phase, trigger) {
            Some(to) => self.set_phase(to),
            None => tracing::error!(phase = %self.phase, ?trigger, "invalid internal transition"),
        }
    }

    fn new_game(&mut self) -> Result<(), Rejection> {
        let to = self.require(Trigger::NewGame, "new game")?;
        self.ctx.reset(self.config.humans);
        self.clock = GameClock::new();
        self.destinations = Destinations::NONE;
        self.think_timer = Duration::ZERO;
        self.big_diamond_visible = false;
        self.results = None;
        for diamond in self.ctx.diamonds.diamonds() {
            if let Some(cell) = diamond.position {
                self.notifications.push(Notification::DiamondMoved {
                    id: diamond.id,
                    cell,
                });
            }
        }
        self.set_phase(to);
        Ok(())
    }

    fn toggle_human(&mut self, quadrant: Quadrant) -> Result<(), Rejection> {
        if self.phase != GamePhase::SetupPlayers {
            return Err(Rejection::WrongPhase {
                input: "human toggle",
                phase: self.phase,
            });
        }
        let player = self.ctx.player_mut(quadrant);
        player.human = !player.human;
        tracing::debug!(%quadrant, human = player.human, "seat toggled");
        self.notifications.push(Notification::PlayerUpdated { player: quadrant });
        Ok(())
    }

    fn start_game(&mut self) -> Result<(), Rejection> {
        let to = self.require(Trigger::StartGame, "start game")?;
        self.set_phase(to);
        self.big_diamond_visible = true;
        self.notifications.push(Notification::banner("start game"));
        tracing::info!(
            humans = self.ctx.players.iter().filter(|p| p.human).count(),
            "game started"
        );
        self.launch_next_player();
        Ok(())
    }

    fn continue_game(&mut self) -> Result<(), Rejection> {
        match self.phase {
            GamePhase::GuiEndRound => {
                self.launch_next_player();
                Ok(())
            }
            _ => self
                .require(Trigger::ReturnToMenu, "continue")
                .map(|to| self.set_phase(to)),
        }
    }

    fn human_turn(&self, input: &'static str, phase: GamePhase) -> Result<(), Rejection> {
        if self.phase != phase {
            return Err(Rejection::WrongPhase {
                input,
                phase: self.phase,
            });
        }
        if !self.current_player().human {
            return Err(Rejection::NotHumanTurn(self.clock.turn));
        }
        Ok(())
    }

    fn human_roll(&mut self) -> Result<(), Rejection> {
        self.human_turn("dice roll", GamePhase::RollDice)?;
        self.roll_dice();
        Ok(())
    }

    fn human_select(&mut self, cell: Cell) -> Result<(), Rejection> {
        self.human_turn("cell selection", GamePhase::Game)?;
        if !self.destinations.contains(cell) {
            return Err(Rejection::InvalidMove(cell));
        }
        self.apply_move(cell);
        Ok(())
    }

    fn roll_dice(&mut self) {
        let turn = self.clock.turn;
        let steps: u8 = self.ctx.rng.gen_range(1..=6);
        let position = self.ctx.player(turn).position;
        self.ctx.player_mut(turn).dice_result = steps;
        self.destinations = compute_destinations(&self.ctx.topology, position, steps);
        tracing::debug!(player = %turn, steps, destinations = ?self.destinations, "dice rolled");

        self.notifications.push(Notification::sound(SoundEffect::Dice));
        self.notifications.push(Notification::PlayerUpdated { player: turn });
        self.fire(Trigger::DiceRolled);

        if self.destinations.is_empty() {
            tracing::debug!(player = %turn, steps, "no legal move; turn passes");
            self.next_player();
        }
    }

    fn ai_move(&mut self) {
        let reach_portal_mode = self.current_player().reach_portal_mode;
        let choice = choose_destination(
            self.destinations,
            self.clock.deer_mode_active,
            reach_portal_mode,
            &self.ctx.diamonds,
            &mut self.ctx.rng,
        );
        match choice {
            Some(cell) => self.apply_move(cell),
            None => self.next_player(),
        }
    }

    fn apply_move(&mut self, cell: Cell) {
        let turn = self.clock.turn;
        tracing::debug!(player = %turn, %cell, "move");
        self.ctx.player_mut(turn).position = cell;
        self.destinations = Destinations::NONE;
        self.notifications.push(Notification::PlayerUpdated { player: turn });

        CommandProcessor::new(&mut self.ctx, &mut self.notifications).process_field(turn, cell);

        if self.ctx.topology.is_exit(cell) {
            self.enter_portal(turn);
            if self.clock.finished_players > 3 {
                self.end_game();
                return;
            }
        }
        self.next_player();
    }

    fn enter_portal(&mut self, turn: Quadrant) {
        let first = !self.ctx.players.iter().any(|p| p.reached_portal);
        self.ctx.player_mut(turn).finish(first);
        CommandProcessor::new(&mut self.ctx, &mut self.notifications).remove_all_items(turn);

        if first {
            let bonus = self
                .ctx
                .rng
                .gen_range(self.config.portal_bonus_min..=self.config.portal_bonus_max);
            self.ctx.player_mut(turn).cash += bonus;
            tracing::info!(player = %turn, bonus, "first through the portal");
            self.start_deer_mode();
        } else {
            tracing::info!(player = %turn, "reached the portal");
        }
        self.notifications.push(Notification::sound(SoundEffect::Portal));
        self.notifications.push(Notification::PlayerUpdated { player: turn });
        self.clock.finished_players += 1;
    }

    fn start_deer_mode(&mut self) {
        if self.clock.deer_mode_active {
            return;
        }
        self.clock.deer_mode_active = true;
        self.clock.deer_mode_counter = self.config.deer_mode_turns;
        self.big_diamond_visible = false;
        tracing::info!(turns = self.clock.deer_mode_counter, "deer mode");
        self.notifications.push(Notification::banner("deer mode"));
        self.notifications.push(Notification::sound(SoundEffect::DeerMode));
    }

    /// Hands the turn to the next player after the current one has acted.
    fn next_player(&mut self) {
        if self.phase == GamePhase::EndGame {
            return;
        }
        if self.ctx.players.iter().all(|p| p.done) {
            self.end_game();
            return;
        }
        let turn = self.clock.turn;
        self.ctx.player_mut(turn).active = false;
        self.notifications.push(Notification::PlayerUpdated { player: turn });
        if self.step_turn() {
            self.launch_next_player();
        }
    }

    /// Moves the turn marker on by one seat, rolling over into a new round
    /// after the last seat. Returns false if the engine parked between
    /// rounds.
    fn step_turn(&mut self) -> bool {
        if !self.clock.turn.is_last() {
            self.clock.turn = self.clock.turn.next();
            return true;
        }
        next_round(&mut self.clock);
        tracing::debug!(round = self.clock.round, month = self.clock.month, "new round");
        self.notifications.push(Notification::ClockChanged { clock: self.clock });
        if !self.config.pause_between_rounds {
            return true;
        }
        self.notifications.push(Notification::banner(format!(
            "end of round {}",
            self.clock.round - 1
        )));
        if self.phase != GamePhase::GuiEndRound {
            self.fire(Trigger::RoundPaused);
        }
        false
    }

    /// Activates the player whose turn it is, skipping finished and frozen
    /// players. Every pass through the loop counts as one deer-mode turn.
    fn launch_next_player(&mut self) {
        loop {
            if self.clock.deer_mode_active {
                self.clock.deer_mode_counter -= 1;
                if self.clock.deer_mode_counter < 0 {
                    tracing::info!("deer mode ran out");
                    self.end_game();
                    return;
                }
            }
            if self.ctx.players.iter().all(|p| p.done) {
                self.end_game();
                return;
            }

            let turn = self.clock.turn;
            let player = self.ctx.player_mut(turn);
            if player.done {
                tracing::trace!(player = %turn, "skipping finished player");
            } else if player.consume_frozen_turn() {
                tracing::debug!(player = %turn, left = player.frozen_turns_left, "frozen; turn lost");
                self.notifications.push(Notification::PlayerUpdated { player: turn });
            } else {
                break;
            }
            if !self.step_turn() {
                return;
            }
        }

        self.activate(self.clock.turn);
        self.fire(Trigger::PlayerLaunched);
    }

    fn activate(&mut self, turn: Quadrant) {
        let position = self.ctx.player(turn).position;
        let neighbors = self.ctx.topology.neighbor_cells(position);
        for player in self.ctx.players.iter_mut() {
            player.active = player.quadrant == turn;
            player.neighbors.clear();
        }
        let player = self.ctx.player_mut(turn);
        player.neighbors = neighbors;
        player.dice_result = DICE_WAITING;

        if !self.clock.deer_mode_active {
            self.update_cash_leader();
        }
        self.destinations = Destinations::NONE;
        self.think_timer = Duration::ZERO;
        tracing::debug!(player = %turn, round = self.clock.round, "turn starts");
        self.notifications.push(Notification::ClockChanged { clock: self.clock });
        self.notifications.push(Notification::PlayerUpdated { player: turn });
    }

    /// Flags the player with the strict cash lead. Ties flag nobody.
    fn update_cash_leader(&mut self) {
        let max = self.ctx.players.iter().map(|p| p.cash).max().unwrap_or(0);
        let holders = self.ctx.players.iter().filter(|p| p.cash == max).count();
        let mut leader = None;
        for player in self.ctx.players.iter_mut() {
            player.reach_portal_mode = holders == 1 && player.cash == max;
            if player.reach_portal_mode {
                leader = Some(player.quadrant);
            }
        }
        self.big_diamond_visible = leader.is_some();
    }

    fn end_game(&mut self) {
        if self.phase == GamePhase::EndGame {
            return;
        }
        self.notifications.push(Notification::MusicStopped);
        self.clock.finished_players = 4;
        for player in self.ctx.players.iter_mut() {
            player.active = false;
        }
        let results = compute_results(&self.ctx.players);
        tracing::info!(
            winner = ?results.winner,
            round = self.clock.round,
            "game over"
        );
        self.fire(Trigger::GameEnded);
        self.notifications.push(Notification::EndGameResults {
            results: results.clone(),
        });
        self.results = Some(results);
    }
}
