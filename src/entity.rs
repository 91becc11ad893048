//! Entity model for everything that can occupy a room of the grid.
//!
//! Entities are composed from small capabilities instead of a class hierarchy. Every entity is
//! [`Positioned`], the player and the wumpus are also [`Movable`] and [`Alive`], while pits, bats
//! and arrows stay where they were put.

use crate::direction::Direction;

/// Column and row of a room, both zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column index.
    ///
    /// This field holds the zero-based column of the room, growing from left to right.
    pub x: usize,
    /// Row index.
    ///
    /// This field holds the zero-based row of the room, growing from top to bottom.
    pub y: usize,
}

impl Position {
    /// Creates a position from a column and a row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position one step away in the given direction.
    ///
    /// This function only guards against stepping below zero; checking the far edge of the grid is
    /// left to the grid, which is the only one that knows its size.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();

        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };

        Some(Self { x, y })
    }
}

/// Kind tag of an entity, as shown to the view layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The hunter controlled by the user.
    Player,
    /// The monster roaming the grid.
    Wumpus,
    /// A bottomless pit; deadly to anything that walks in.
    Pit,
    /// A bat colony that carries the player off to a random room.
    Bats,
    /// An arrow shot by the player.
    Arrow,
}

/// One-way alive flag.
///
/// Starts alive and can only ever be switched off.
#[derive(Debug, PartialEq, Eq)]
struct Life {
    /// Liveness of the owner.
    ///
    /// This field holds `true` from creation until the owner dies, after which it never flips
    /// back.
    alive: bool,
}

impl Life {
    /// Creates a living flag.
    const fn new() -> Self {
        Self { alive: true }
    }

    /// Marks the owner as dead. Idempotent.
    fn die(&mut self) {
        self.alive = false;
    }
}

/// Capability shared by every entity: it sits on a position and has a kind.
pub trait Positioned {
    /// Returns the room the entity is in.
    fn position(&self) -> Position;

    /// Returns the kind tag of the entity.
    fn kind(&self) -> EntityKind;
}

/// Capability of entities that can change rooms.
pub trait Movable: Positioned {
    /// Puts the entity at the given position.
    ///
    /// This does not touch the grid; callers are responsible for keeping the cell contents in sync.
    fn place(&mut self, position: Position);

    /// Steps the entity one room in the given direction.
    ///
    /// Returns `false` and leaves the entity untouched when the step would go below zero.
    fn advance(&mut self, direction: Direction) -> bool {
        match self.position().step(direction) {
            Some(next) => {
                self.place(next);
                true
            }
            None => false,
        }
    }
}

/// Capability of entities that can die.
pub trait Alive {
    /// Reports whether the entity is still alive.
    fn is_alive(&self) -> bool;

    /// Kills the entity. There is no way back.
    fn die(&mut self);
}

/// The hunter controlled by the user.
///
/// This structure holds the only entity the user steers directly. It can walk, shoot arrows into
/// neighbouring rooms and die from the wumpus or a pit.
#[derive(Debug, PartialEq, Eq)]
pub struct Player {
    /// Room the player is in.
    ///
    /// This field holds the player's current position. It must always agree with the grid cell
    /// listing the player, which is why only the grid moves it.
    position: Position,
    /// Liveness of the player.
    ///
    /// This field holds the one-way alive flag checked at the end of every turn.
    life: Life,
}

impl Player {
    /// Creates a living player at the given position.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            life: Life::new(),
        }
    }
}

/// The monster roaming the grid.
///
/// This structure holds the wumpus, which may wander one room after each of the player's turns.
/// Once dead its body stays where it fell and is harmless.
#[derive(Debug, PartialEq, Eq)]
pub struct Wumpus {
    /// Room the wumpus is in.
    ///
    /// This field holds the wumpus's current position, kept in sync with the grid in the same way
    /// as the player's.
    position: Position,
    /// Liveness of the wumpus.
    ///
    /// This field holds the one-way alive flag. A dead wumpus no longer moves or kills.
    life: Life,
}

impl Wumpus {
    /// Creates a living wumpus at the given position.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            life: Life::new(),
        }
    }
}

/// A bottomless pit. Never moves.
#[derive(Debug, PartialEq, Eq)]
pub struct Pit {
    /// Room holding the pit.
    ///
    /// This field holds the fixed position of the pit, set once at construction.
    position: Position,
}

impl Pit {
    /// Creates a pit at the given position.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self { position }
    }
}

/// A bat colony. Never moves.
#[derive(Debug, PartialEq, Eq)]
pub struct Bats {
    /// Room holding the bats.
    ///
    /// This field holds the fixed position of the colony. The bats carry the player away but
    /// themselves stay put.
    position: Position,
}

impl Bats {
    /// Creates a bat colony at the given position.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self { position }
    }
}

/// An arrow lying where it landed.
#[derive(Debug, PartialEq, Eq)]
pub struct Arrow {
    /// Room the arrow landed in.
    ///
    /// This field holds the room next to the shooter in the direction of the shot.
    position: Position,
}

impl Arrow {
    /// Creates an arrow at the given position.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self { position }
    }
}

/// Implements [`Positioned`] for a concrete entity type with a `position` field.
macro_rules! positioned {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl Positioned for $ty {
                fn position(&self) -> Position {
                    self.position
                }

                fn kind(&self) -> EntityKind {
                    EntityKind::$ty
                }
            }
        )+
    };
}

positioned!(Player, Wumpus, Pit, Bats, Arrow);

/// Implements [`Movable`] and [`Alive`] for a concrete entity type with `position` and `life`
/// fields.
macro_rules! creature {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl Movable for $ty {
                fn place(&mut self, position: Position) {
                    self.position = position;
                }
            }

            impl Alive for $ty {
                fn is_alive(&self) -> bool {
                    self.life.alive
                }

                fn die(&mut self) {
                    self.life.die();
                }
            }
        )+
    };
}

creature!(Player, Wumpus);

/// Any entity that can be put on the grid.
#[derive(Debug, PartialEq, Eq)]
pub enum Entity {
    /// See [`Player`].
    Player(Player),
    /// See [`Wumpus`].
    Wumpus(Wumpus),
    /// See [`Pit`].
    Pit(Pit),
    /// See [`Bats`].
    Bats(Bats),
    /// See [`Arrow`].
    Arrow(Arrow),
}

impl Entity {
    /// Returns the inner entity through its [`Positioned`] capability.
    fn inner(&self) -> &dyn Positioned {
        match self {
            Self::Player(player) => player,
            Self::Wumpus(wumpus) => wumpus,
            Self::Pit(pit) => pit,
            Self::Bats(bats) => bats,
            Self::Arrow(arrow) => arrow,
        }
    }

    /// Returns the entity as [`Movable`], if it can move.
    pub fn as_movable_mut(&mut self) -> Option<&mut dyn Movable> {
        match self {
            Self::Player(player) => Some(player),
            Self::Wumpus(wumpus) => Some(wumpus),
            Self::Pit(_) | Self::Bats(_) | Self::Arrow(_) => None,
        }
    }

    /// Returns the entity as [`Alive`], if it can die.
    #[must_use]
    pub fn as_alive(&self) -> Option<&dyn Alive> {
        match self {
            Self::Player(player) => Some(player),
            Self::Wumpus(wumpus) => Some(wumpus),
            Self::Pit(_) | Self::Bats(_) | Self::Arrow(_) => None,
        }
    }

    /// Returns the entity as mutable [`Alive`], if it can die.
    pub fn as_alive_mut(&mut self) -> Option<&mut dyn Alive> {
        match self {
            Self::Player(player) => Some(player),
            Self::Wumpus(wumpus) => Some(wumpus),
            Self::Pit(_) | Self::Bats(_) | Self::Arrow(_) => None,
        }
    }

    /// Reports whether the entity is alive. Entities that cannot die count as not alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.as_alive().is_some_and(Alive::is_alive)
    }
}

impl Positioned for Entity {
    fn position(&self) -> Position {
        self.inner().position()
    }

    fn kind(&self) -> EntityKind {
        self.inner().kind()
    }
}

impl From<Player> for Entity {
    fn from(player: Player) -> Self {
        Self::Player(player)
    }
}

impl From<Wumpus> for Entity {
    fn from(wumpus: Wumpus) -> Self {
        Self::Wumpus(wumpus)
    }
}

impl From<Pit> for Entity {
    fn from(pit: Pit) -> Self {
        Self::Pit(pit)
    }
}

impl From<Bats> for Entity {
    fn from(bats: Bats) -> Self {
        Self::Bats(bats)
    }
}

impl From<Arrow> for Entity {
    fn from(arrow: Arrow) -> Self {
        Self::Arrow(arrow)
    }
}
