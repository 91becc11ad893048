//! Room grid and the entities placed on it.
//!
//! The grid owns every entity and every cell. Cells only hold [`EntityId`]s, and the grid keeps an
//! entity's stored position and the cell listing it in agreement on every mutation.

use thiserror::Error;

use crate::{
    direction::Direction,
    entity::{Entity, EntityKind, Position, Positioned},
};

/// Violation of the grid's calling contract.
///
/// These are programming errors on the caller's side, not conditions that come up in normal play;
/// moving into a wall, for instance, is silently ignored instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContractError {
    /// Malformed construction input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Access to a room outside the grid.
    #[error("room ({x}, {y}) lies outside the {size}x{size} grid")]
    OutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Side length of the grid the request was made against.
        size: usize,
    },
}

/// Identity of an entity on the grid.
///
/// Two entities of the same kind on the same room are still told apart by their identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

/// A single room and the entities currently in it.
///
/// This structure holds identifiers only; the entities themselves live in the [`Grid`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Entities in the room.
    ///
    /// This field holds the identifiers of every entity whose position is this room, in the order
    /// they arrived. An identifier appears at most once.
    occupants: Vec<EntityId>,
}

impl Cell {
    /// Returns the identifiers of the entities in the room.
    #[must_use]
    pub fn occupants(&self) -> &[EntityId] {
        &self.occupants
    }

    /// Reports whether the given entity is in the room.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.occupants.contains(&id)
    }

    /// Reports whether the room is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Adds an entity to the room.
    fn insert(&mut self, id: EntityId) {
        if !self.contains(id) {
            self.occupants.push(id);
        }
    }

    /// Removes an entity from the room, if present.
    fn remove(&mut self, id: EntityId) {
        self.occupants.retain(|occupant| *occupant != id);
    }
}

/// Square grid of rooms.
///
/// This structure holds the rooms and every entity placed on them. All movement goes through it so
/// that an entity's position and the cell listing it never disagree.
#[derive(Debug)]
pub struct Grid {
    /// Number of rooms along each side.
    ///
    /// This field holds the side length given at construction. It is never zero.
    size: usize,
    /// Rooms of the grid.
    ///
    /// This field holds `size * size` cells in row-major order, so the room at column `x` and row
    /// `y` sits at index `y * size + x`.
    cells: Vec<Cell>,
    /// Entities on the grid.
    ///
    /// This field holds every entity ever placed, indexed by [`EntityId`]. Entities are never
    /// removed; dead ones stay in place.
    entities: Vec<Entity>,
}

impl Grid {
    /// Builds a grid of `size` by `size` empty rooms and places the given entities on it.
    ///
    /// Several entities may start in the same room.
    ///
    /// # Errors
    ///
    /// This function returns [`ContractError::InvalidArgument`] if:
    /// - The size is zero
    /// - The size is too large for the rooms to be stored
    /// - No entities are given
    /// - An entity's position lies outside the grid
    pub fn new(size: usize, entities: Vec<Entity>) -> Result<Self, ContractError> {
        if size == 0 {
            return Err(ContractError::InvalidArgument(
                "grid size must be at least one".to_owned(),
            ));
        }
        if entities.is_empty() {
            return Err(ContractError::InvalidArgument(
                "grid needs at least one entity".to_owned(),
            ));
        }

        let too_large =
            || ContractError::InvalidArgument(format!("grid size {size} is too large"));
        let rooms = size.checked_mul(size).ok_or_else(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(rooms).map_err(|_err| too_large())?;
        cells.resize_with(rooms, Cell::default);

        let mut grid = Self {
            size,
            cells,
            entities: Vec::with_capacity(entities.len()),
        };

        for entity in entities {
            let position = entity.position();
            if !grid.contains(position) {
                return Err(ContractError::InvalidArgument(format!(
                    "{:?} at ({}, {}) lies outside the {size}x{size} grid",
                    entity.kind(),
                    position.x,
                    position.y,
                )));
            }

            let _ = grid.attach(entity);
        }

        Ok(grid)
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Reports whether a position lies on the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// Returns the room at the given column and row.
    ///
    /// # Errors
    ///
    /// This function returns [`ContractError::OutOfBounds`] if either coordinate is not in
    /// `0..size`.
    pub fn cell_at(&self, x: usize, y: usize) -> Result<&Cell, ContractError> {
        self.index(Position::new(x, y))
            .and_then(|index| self.cells.get(index))
            .ok_or(ContractError::OutOfBounds {
                x,
                y,
                size: self.size,
            })
    }

    /// Reports whether one step from `position` in `direction` stays on the grid.
    ///
    /// Stepping past an edge is neither wrapped nor clamped; such a step is simply not allowed.
    #[must_use]
    pub fn is_in_bounds(&self, position: Position, direction: Direction) -> bool {
        position
            .step(direction)
            .is_some_and(|next| self.contains(next))
    }

    /// Moves an entity one room in the given direction.
    ///
    /// This function does nothing and returns `false` if the step would leave the grid or if the
    /// entity cannot move. It never looks at what is waiting in the new room; hazards are the turn
    /// engine's business.
    pub fn move_entity(&mut self, id: EntityId, direction: Direction) -> bool {
        let Some(from) = self.entity(id).map(Positioned::position) else {
            return false;
        };
        if !self.is_in_bounds(from, direction) {
            return false;
        }

        let Some(movable) = self
            .entities
            .get_mut(id.0)
            .and_then(Entity::as_movable_mut)
        else {
            return false;
        };
        if !movable.advance(direction) {
            return false;
        }
        let to = movable.position();

        self.shift(id, from, to);

        true
    }

    /// Puts a movable entity straight into another room.
    ///
    /// Returns `false` without touching anything if the entity cannot move.
    ///
    /// # Errors
    ///
    /// This function returns [`ContractError::OutOfBounds`] if the target room is not on the grid.
    pub fn relocate(&mut self, id: EntityId, to: Position) -> Result<bool, ContractError> {
        if !self.contains(to) {
            return Err(ContractError::OutOfBounds {
                x: to.x,
                y: to.y,
                size: self.size,
            });
        }

        let Some(movable) = self
            .entities
            .get_mut(id.0)
            .and_then(Entity::as_movable_mut)
        else {
            return Ok(false);
        };
        let from = movable.position();
        movable.place(to);

        self.shift(id, from, to);

        Ok(true)
    }

    /// Places a new entity on the grid and returns its identifier.
    ///
    /// # Errors
    ///
    /// This function returns [`ContractError::OutOfBounds`] if the entity's position is not on the
    /// grid.
    pub fn add(&mut self, entity: Entity) -> Result<EntityId, ContractError> {
        let position = entity.position();
        if !self.contains(position) {
            return Err(ContractError::OutOfBounds {
                x: position.x,
                y: position.y,
                size: self.size,
            });
        }

        Ok(self.attach(entity))
    }

    /// Returns the first entity in `cell` that satisfies `predicate`.
    pub fn find_entity<P>(&self, cell: &Cell, predicate: P) -> Option<EntityId>
    where
        P: Fn(&Entity) -> bool,
    {
        cell.occupants()
            .iter()
            .copied()
            .find(|id| self.entity(*id).is_some_and(&predicate))
    }

    /// Returns the first entity of the given kind in the room at `position`.
    #[must_use]
    pub fn find_kind(&self, position: Position, kind: EntityKind) -> Option<EntityId> {
        let cell = self.cell_at(position.x, position.y).ok()?;

        self.find_entity(cell, |entity| entity.kind() == kind)
    }

    /// Returns the first entity of the given kind anywhere on the grid.
    #[must_use]
    pub fn first_of_kind(&self, kind: EntityKind) -> Option<EntityId> {
        self.entities
            .iter()
            .position(|entity| entity.kind() == kind)
            .map(EntityId)
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    /// Looks up an entity by identifier for mutation.
    ///
    /// Only the alive flag may be changed through this; positions go through the grid.
    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    /// Builds a read-only view of the grid for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let rooms = self
            .cells
            .iter()
            .map(|cell| {
                cell.occupants()
                    .iter()
                    .filter_map(|id| self.entity(*id).map(Positioned::kind))
                    .collect()
            })
            .collect();

        Snapshot {
            size: self.size,
            rooms,
        }
    }

    /// Maps a position to its index in [`Grid::cells`].
    const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.y * self.size + position.x)
        } else {
            None
        }
    }

    /// Stores a new entity and lists it in its room. The position must already be checked.
    fn attach(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len());
        let position = entity.position();
        self.entities.push(entity);

        if let Some(cell) = self.index(position).and_then(|index| self.cells.get_mut(index)) {
            cell.insert(id);
        }

        id
    }

    /// Moves an entity's listing from one room to another.
    fn shift(&mut self, id: EntityId, from: Position, to: Position) {
        if let Some(cell) = self.index(from).and_then(|index| self.cells.get_mut(index)) {
            cell.remove(id);
        }
        if let Some(cell) = self.index(to).and_then(|index| self.cells.get_mut(index)) {
            cell.insert(id);
        }
    }
}

/// Read-only picture of the grid handed to the view layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Number of rooms along each side.
    ///
    /// This field holds the side length of the grid the snapshot was taken from.
    size: usize,
    /// Contents of every room.
    ///
    /// This field holds the kinds present in each room, in row-major order and in the order the
    /// entities arrived.
    rooms: Vec<Vec<EntityKind>>,
}

impl Snapshot {
    /// Returns the side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the kinds present in the room at the given column and row.
    #[must_use]
    pub fn kinds_at(&self, x: usize, y: usize) -> Option<&[EntityKind]> {
        if x >= self.size || y >= self.size {
            return None;
        }

        self.rooms.get(y * self.size + x).map(Vec::as_slice)
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Vec<EntityKind>]> {
        self.rooms.chunks(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Arrow, Bats, Pit, Player, Wumpus};

    /// Builds a 5x5 grid with a player, a wumpus and a pit.
    fn create_test_grid() -> Grid {
        Grid::new(
            5,
            vec![
                Player::new(Position::new(3, 2)).into(),
                Wumpus::new(Position::new(1, 1)).into(),
                Pit::new(Position::new(0, 3)).into(),
            ],
        )
        .expect("valid grid")
    }

    /// Returns the identifier of the player in a grid built by [`create_test_grid`].
    fn player(grid: &Grid) -> EntityId {
        grid.first_of_kind(EntityKind::Player)
            .expect("grid should hold a player")
    }

    #[test]
    fn test_new_rejects_empty_entities() {
        let result = Grid::new(5, Vec::new());

        assert!(matches!(result, Err(ContractError::InvalidArgument(_))));
    }

    #[test]
    fn test_new_rejects_zero_size() {
        let result = Grid::new(0, vec![Pit::new(Position::new(0, 0)).into()]);

        assert!(matches!(result, Err(ContractError::InvalidArgument(_))));
    }

    #[test]
    fn test_new_rejects_oversized_grid() {
        for size in [usize::MAX, 1 << (usize::BITS / 2 - 1)] {
            let result = Grid::new(size, vec![Pit::new(Position::new(0, 0)).into()]);

            assert!(
                matches!(result, Err(ContractError::InvalidArgument(_))),
                "size {size} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_rejects_entity_off_grid() {
        let result = Grid::new(5, vec![Bats::new(Position::new(5, 0)).into()]);

        assert!(matches!(result, Err(ContractError::InvalidArgument(_))));
    }

    #[test]
    fn test_new_places_entities_in_their_rooms() {
        let grid = create_test_grid();

        let cell = grid.cell_at(3, 2).expect("room on grid");
        assert_eq!(cell.occupants(), &[player(&grid)]);
        assert!(grid.cell_at(0, 0).expect("room on grid").is_empty());
    }

    #[test]
    fn test_new_allows_shared_starting_room() {
        let grid = Grid::new(
            5,
            vec![
                Pit::new(Position::new(2, 2)).into(),
                Bats::new(Position::new(2, 2)).into(),
            ],
        )
        .expect("valid grid");

        assert_eq!(grid.cell_at(2, 2).expect("room on grid").occupants().len(), 2);
    }

    #[test]
    fn test_cell_at_out_of_bounds() {
        let grid = create_test_grid();

        assert_eq!(
            grid.cell_at(5, 0),
            Err(ContractError::OutOfBounds { x: 5, y: 0, size: 5 })
        );
        assert!(grid.cell_at(0, 7).is_err());
        assert!(grid.cell_at(4, 4).is_ok());
    }

    #[test]
    fn test_is_in_bounds_matches_offset_arithmetic() {
        let grid = create_test_grid();

        for x in 0..5 {
            for y in 0..5 {
                for direction in Direction::ALL {
                    let (dx, dy) = direction.offset();
                    let next_x = isize::try_from(x).expect("small") + dx;
                    let next_y = isize::try_from(y).expect("small") + dy;
                    let expected = (0..5).contains(&next_x) && (0..5).contains(&next_y);

                    assert_eq!(
                        grid.is_in_bounds(Position::new(x, y), direction),
                        expected,
                        "({x}, {y}) {direction:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_move_entity_updates_position_and_cells() {
        let mut grid = create_test_grid();
        let id = player(&grid);

        assert!(grid.move_entity(id, Direction::Up));

        let position = grid.entity(id).expect("player exists").position();
        assert_eq!(position, Position::new(3, 1));
        assert!(grid.cell_at(3, 1).expect("room on grid").contains(id));
        assert!(!grid.cell_at(3, 2).expect("room on grid").contains(id));
    }

    #[test]
    fn test_move_entity_off_edge_is_noop() {
        let mut grid = Grid::new(5, vec![Player::new(Position::new(4, 0)).into()])
            .expect("valid grid");
        let id = player(&grid);
        let before = grid.snapshot();

        assert!(!grid.move_entity(id, Direction::Right));
        assert!(!grid.move_entity(id, Direction::Up));

        assert_eq!(grid.snapshot(), before);
        assert_eq!(
            grid.entity(id).expect("player exists").position(),
            Position::new(4, 0)
        );
    }

    #[test]
    fn test_move_entity_ignores_immobile_entities() {
        let mut grid = create_test_grid();
        let pit = grid.first_of_kind(EntityKind::Pit).expect("pit exists");

        assert!(!grid.move_entity(pit, Direction::Up));
        assert!(grid.cell_at(0, 3).expect("room on grid").contains(pit));
    }

    #[test]
    fn test_move_entity_does_not_resolve_hazards() {
        let mut grid = Grid::new(
            5,
            vec![
                Player::new(Position::new(0, 2)).into(),
                Pit::new(Position::new(0, 3)).into(),
            ],
        )
        .expect("valid grid");
        let id = player(&grid);

        assert!(grid.move_entity(id, Direction::Down));

        assert!(grid.entity(id).expect("player exists").is_alive());
    }

    #[test]
    fn test_relocate_moves_listing() {
        let mut grid = create_test_grid();
        let id = player(&grid);

        assert_eq!(grid.relocate(id, Position::new(0, 4)), Ok(true));

        assert!(grid.cell_at(0, 4).expect("room on grid").contains(id));
        assert!(grid.cell_at(3, 2).expect("room on grid").is_empty());
        assert_eq!(
            grid.entity(id).expect("player exists").position(),
            Position::new(0, 4)
        );
    }

    #[test]
    fn test_relocate_off_grid_fails() {
        let mut grid = create_test_grid();
        let id = player(&grid);

        assert!(grid.relocate(id, Position::new(9, 9)).is_err());
        assert!(grid.cell_at(3, 2).expect("room on grid").contains(id));
    }

    #[test]
    fn test_add_keeps_identical_arrows_apart() {
        let mut grid = create_test_grid();

        let first = grid
            .add(Arrow::new(Position::new(3, 1)).into())
            .expect("room on grid");
        let second = grid
            .add(Arrow::new(Position::new(3, 1)).into())
            .expect("room on grid");

        assert_ne!(first, second);
        assert_eq!(
            grid.cell_at(3, 1).expect("room on grid").occupants(),
            &[first, second]
        );
    }

    #[test]
    fn test_add_off_grid_fails() {
        let mut grid = create_test_grid();

        assert!(grid.add(Arrow::new(Position::new(5, 1)).into()).is_err());
    }

    #[test]
    fn test_find_entity_by_predicate() {
        let grid = create_test_grid();
        let cell = grid.cell_at(1, 1).expect("room on grid");

        let found = grid.find_entity(cell, |entity| entity.kind() == EntityKind::Wumpus);
        let missing = grid.find_entity(cell, |entity| entity.kind() == EntityKind::Bats);

        assert_eq!(found, grid.first_of_kind(EntityKind::Wumpus));
        assert_eq!(missing, None);
    }

    #[test]
    fn test_find_kind_off_grid_is_none() {
        let grid = create_test_grid();

        assert_eq!(grid.find_kind(Position::new(8, 8), EntityKind::Pit), None);
        assert!(grid
            .find_kind(Position::new(0, 3), EntityKind::Pit)
            .is_some());
    }

    #[test]
    fn test_snapshot_lists_kinds_per_room() {
        let grid = create_test_grid();
        let snapshot = grid.snapshot();

        assert_eq!(snapshot.size(), 5);
        assert_eq!(snapshot.kinds_at(3, 2), Some(&[EntityKind::Player][..]));
        assert_eq!(snapshot.kinds_at(0, 3), Some(&[EntityKind::Pit][..]));
        assert!(snapshot.kinds_at(2, 2).is_some_and(|kinds| kinds.is_empty()));
        assert_eq!(snapshot.kinds_at(5, 0), None);
        assert_eq!(snapshot.rows().count(), 5);
        assert!(snapshot.rows().all(|row| row.len() == 5));
    }
}
