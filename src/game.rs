//! Turn engine.
//!
//! A [`Game`] owns the grid, knows which entities are the player and the wumpus, and turns each
//! user action into a complete turn: the player's step or shot, hazard resolution, the wumpus's
//! reaction and finally the outcome check. Every turn runs to completion before returning.

use log::{debug, info, warn};

use crate::{
    direction::Direction,
    entity::{Arrow, Bats, Entity, EntityKind, Pit, Player, Position, Positioned as _, Wumpus},
    grid::{ContractError, EntityId, Grid, Snapshot},
    random::RandomSource,
};

/// State of a game as seen from the outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Both the player and the wumpus are alive.
    InProgress,
    /// The wumpus died.
    PlayerWon,
    /// The player died.
    PlayerLost,
}

/// Starting layout of a game.
///
/// A scenario is kept by the game so that a finished game can be restarted from scratch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    /// Number of rooms along each side of the grid.
    ///
    /// This field holds the side length the grid is built with.
    size: usize,
    /// Starting room of the player.
    ///
    /// This field holds where the player is put at the start of every game.
    player: Position,
    /// Starting room of the wumpus.
    ///
    /// This field holds where the wumpus is put at the start of every game.
    wumpus: Position,
    /// Rooms holding a pit.
    ///
    /// This field holds one position per pit. Pits never move, so this is also where they stay.
    pits: Vec<Position>,
    /// Rooms holding bats.
    ///
    /// This field holds one position per bat colony.
    bats: Vec<Position>,
}

impl Scenario {
    /// Creates a scenario with only the player and the wumpus.
    #[must_use]
    pub const fn new(size: usize, player: Position, wumpus: Position) -> Self {
        Self {
            size,
            player,
            wumpus,
            pits: Vec::new(),
            bats: Vec::new(),
        }
    }

    /// The default layout for a grid of the given size.
    ///
    /// The player starts in room (3, 2) and the wumpus in the top-right corner. Two pits and two bat
    /// colonies are spread over the remaining edges. Grids smaller than 5 rooms across cannot hold
    /// this layout and fail when the game is built.
    #[must_use]
    pub fn classic(size: usize) -> Self {
        let far = size.saturating_sub(1);

        Self::new(size, Position::new(3, 2), Position::new(far, 0))
            .with_pit(Position::new(0, 3))
            .with_pit(Position::new(2, far))
            .with_bats(Position::new(far, far))
            .with_bats(Position::new(1, 0))
    }

    /// Adds a pit to the layout.
    #[must_use]
    pub fn with_pit(mut self, position: Position) -> Self {
        self.pits.push(position);
        self
    }

    /// Adds a bat colony to the layout.
    #[must_use]
    pub fn with_bats(mut self, position: Position) -> Self {
        self.bats.push(position);
        self
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Builds fresh entities for every room in the layout.
    fn entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = vec![
            Player::new(self.player).into(),
            Wumpus::new(self.wumpus).into(),
        ];
        entities.extend(self.pits.iter().map(|position| Pit::new(*position).into()));
        entities.extend(self.bats.iter().map(|position| Bats::new(*position).into()));

        entities
    }
}

/// A running game of Hunt the Wampus.
///
/// This structure holds the grid together with everything needed to play turns on it and to
/// start over. It is generic over its [`RandomSource`] so that tests can script every draw.
#[derive(Debug)]
pub struct Game<R> {
    /// Layout the game was started from.
    ///
    /// This field holds the scenario used by [`Game::restart`] to rebuild the grid.
    scenario: Scenario,
    /// Rooms and everything in them.
    ///
    /// This field holds the grid the turns are played on.
    grid: Grid,
    /// The player's identifier on the grid.
    ///
    /// This field holds the identifier found when the grid was built. It is looked up again on
    /// restart.
    player: EntityId,
    /// The wumpus's identifier on the grid.
    ///
    /// This field holds the identifier of the wumpus in the same way as [`Game::player`] does for
    /// the player.
    wumpus: EntityId,
    /// Current outcome.
    ///
    /// This field holds [`Outcome::InProgress`] until a turn ends with a death. It then stays put
    /// until the game is restarted.
    outcome: Outcome,
    /// Source of every random decision.
    ///
    /// This field holds the random source for the wumpus's wake-ups and steps and the bats'
    /// flights. It is kept across restarts.
    random: R,
}

impl<R: RandomSource> Game<R> {
    /// Starts a game from the given layout.
    ///
    /// # Errors
    ///
    /// This function returns the [`ContractError`] raised while building the grid, typically
    /// because an entity of the layout lies outside the grid.
    pub fn new(scenario: Scenario, random: R) -> Result<Self, ContractError> {
        let (grid, player, wumpus) = Self::build(&scenario)?;
        info!(
            "new {size}x{size} game, player at ({}, {})",
            scenario.player.x,
            scenario.player.y,
            size = scenario.size,
        );

        Ok(Self {
            scenario,
            grid,
            player,
            wumpus,
            outcome: Outcome::InProgress,
            random,
        })
    }

    /// Puts everything back where the layout says and resets the outcome.
    ///
    /// The random source carries on from where it was.
    ///
    /// # Errors
    ///
    /// This function returns the [`ContractError`] raised while rebuilding the grid.
    pub fn restart(&mut self) -> Result<(), ContractError> {
        let (grid, player, wumpus) = Self::build(&self.scenario)?;
        self.grid = grid;
        self.player = player;
        self.wumpus = wumpus;
        self.outcome = Outcome::InProgress;
        info!("game restarted");

        Ok(())
    }

    /// Returns the current outcome.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns a read-only picture of the grid for the view layer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.grid.snapshot()
    }

    /// Returns the player's identifier.
    #[must_use]
    pub const fn player(&self) -> EntityId {
        self.player
    }

    /// Returns the wumpus's identifier.
    #[must_use]
    pub const fn wumpus(&self) -> EntityId {
        self.wumpus
    }

    /// Returns the player's room.
    #[must_use]
    pub fn player_position(&self) -> Option<Position> {
        self.position_of(self.player)
    }

    /// Returns the wumpus's room.
    #[must_use]
    pub fn wumpus_position(&self) -> Option<Position> {
        self.position_of(self.wumpus)
    }

    /// Reports whether the player is alive.
    #[must_use]
    pub fn is_player_alive(&self) -> bool {
        self.grid.entity(self.player).is_some_and(Entity::is_alive)
    }

    /// Reports whether the wumpus is alive.
    #[must_use]
    pub fn is_wumpus_alive(&self) -> bool {
        self.grid.entity(self.wumpus).is_some_and(Entity::is_alive)
    }

    /// Moves a movable entity one room and applies what it walks into.
    ///
    /// Steps past the edge of the grid, and any step by a dead entity, are ignored and return
    /// `false`; nothing else happens in that case. Otherwise the entity is moved first and only then checked against its new room:
    /// a pit kills it, and a wumpus walking in on the player kills the player.
    ///
    /// This does not run the rest of a turn. See [`Game::move_player`] for that.
    pub fn move_entity(&mut self, id: EntityId, direction: Direction) -> bool {
        let dead = self
            .grid
            .entity(id)
            .is_some_and(|entity| entity.as_alive().is_some() && !entity.is_alive());
        if dead {
            debug!("{id:?} is dead and stays where it lies");
            return false;
        }

        if !self.grid.move_entity(id, direction) {
            debug!("{id:?} cannot move {direction:?}");
            return false;
        }

        let Some(position) = self.position_of(id) else {
            return false;
        };
        debug!("{id:?} moved {direction:?} to ({}, {})", position.x, position.y);

        if self.grid.find_kind(position, EntityKind::Pit).is_some() {
            debug!("{id:?} fell into the pit at ({}, {})", position.x, position.y);
            self.kill(id);
        }

        if id == self.wumpus && self.grid.find_kind(position, EntityKind::Player).is_some() {
            debug!("the wumpus walked in on the player");
            self.kill(self.player);
        }

        true
    }

    /// Plays a full turn in which the player walks one room.
    ///
    /// Returns `false` when the step is not allowed or the game is already over; the turn does not
    /// advance then.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if self.outcome != Outcome::InProgress {
            return false;
        }
        if !self.move_entity(self.player, direction) {
            return false;
        }

        self.resolve_player_turn();

        true
    }

    /// Plays a full turn in which the player shoots an arrow into the neighbouring room.
    ///
    /// The arrow lands one room away and stays there. An arrow aimed past the edge of the grid is
    /// lost. Arrows do not hurt the wumpus. Returns the landed arrow, if any.
    pub fn attack(&mut self, direction: Direction) -> Option<EntityId> {
        if self.outcome != Outcome::InProgress {
            return None;
        }

        let target = self
            .player_position()
            .and_then(|position| position.step(direction))
            .filter(|position| self.grid.contains(*position));
        let arrow = target.and_then(|position| self.grid.add(Arrow::new(position).into()).ok());
        match target {
            Some(position) => debug!("arrow landed in ({}, {})", position.x, position.y),
            None => debug!("arrow shot {direction:?} flew off the grid"),
        }

        self.resolve_player_turn();

        arrow
    }

    /// Resolves the player's room, lets the wumpus act, then updates the outcome.
    fn resolve_player_turn(&mut self) {
        self.resolve_hazards();

        if self.is_wumpus_alive() {
            if self.random.coin() {
                let direction = Direction::random(&mut self.random);
                debug!("the wumpus wakes and heads {direction:?}");
                let _ = self.move_entity(self.wumpus, direction);
            } else {
                debug!("the wumpus sleeps");
            }
        }

        self.update_outcome();
    }

    /// Applies the hazards of the player's room, following bat flights until they settle.
    ///
    /// A living wumpus takes precedence over a pit, which takes precedence over bats. Bats drop
    /// the player in a uniformly random room and the new room is resolved again. The chain of
    /// flights is cut after as many hops as there are rooms.
    fn resolve_hazards(&mut self) {
        let size = self.grid.size();
        let hops = size.saturating_mul(size);

        for hop in 0..=hops {
            let Some(position) = self.player_position() else {
                return;
            };

            if self.living_wumpus_at(position) {
                debug!("the player ran into the wumpus");
                self.kill(self.player);
                return;
            }
            if self.grid.find_kind(position, EntityKind::Pit).is_some() {
                debug!("the player fell into a pit");
                self.kill(self.player);
                return;
            }
            if self.grid.find_kind(position, EntityKind::Bats).is_none() {
                return;
            }
            if hop == hops {
                warn!("bats kept carrying the player for {hops} hops, leaving it in place");
                return;
            }

            let x = self.random.pick(size);
            let y = self.random.pick(size);
            match self.grid.relocate(self.player, Position::new(x, y)) {
                Ok(_) => debug!("bats carried the player to ({x}, {y})"),
                Err(err) => {
                    warn!("bats could not carry the player: {err}");
                    return;
                }
            }
        }
    }

    /// Sets the outcome once either side has died. A dead player wins over a dead wumpus.
    fn update_outcome(&mut self) {
        if self.outcome != Outcome::InProgress {
            return;
        }

        if !self.is_player_alive() {
            self.outcome = Outcome::PlayerLost;
            info!("the player died");
        } else if !self.is_wumpus_alive() {
            self.outcome = Outcome::PlayerWon;
            info!("the wumpus died");
        }
    }

    /// Reports whether a living wumpus is in the room.
    fn living_wumpus_at(&self, position: Position) -> bool {
        self.grid
            .cell_at(position.x, position.y)
            .ok()
            .and_then(|cell| {
                self.grid.find_entity(cell, |entity| {
                    entity.kind() == EntityKind::Wumpus && entity.is_alive()
                })
            })
            .is_some()
    }

    /// Kills an entity, if it can die.
    fn kill(&mut self, id: EntityId) {
        if let Some(alive) = self.grid.entity_mut(id).and_then(Entity::as_alive_mut) {
            alive.die();
        }
    }

    /// Returns an entity's room.
    fn position_of(&self, id: EntityId) -> Option<Position> {
        self.grid.entity(id).map(|entity| entity.position())
    }

    /// Builds the grid for a layout and finds the player and the wumpus on it.
    fn build(scenario: &Scenario) -> Result<(Grid, EntityId, EntityId), ContractError> {
        let grid = Grid::new(scenario.size, scenario.entities())?;
        let player = grid
            .first_of_kind(EntityKind::Player)
            .ok_or_else(|| ContractError::InvalidArgument("layout has no player".to_owned()))?;
        let wumpus = grid
            .first_of_kind(EntityKind::Wumpus)
            .ok_or_else(|| ContractError::InvalidArgument("layout has no wumpus".to_owned()))?;

        Ok((grid, player, wumpus))
    }
}
