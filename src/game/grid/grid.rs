//! Bounded multi-occupancy grid.
//!
//! Each cell holds an insertion-ordered list of [`Occupant`] references.
//! The grid never touches the position stored on the objects themselves:
//! callers pair every `remove`/`place` with the matching position update.

use serde::{Deserialize, Serialize};

use crate::game::types::{Occupant, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    /// Row-major cells, `size * size` long.
    cells: Vec<Vec<Occupant>>,
}

impl Grid {
    /// Create an empty square grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Vec::new(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        let n = self.size as i32;
        (0..n).contains(&pos.x) && (0..n).contains(&pos.y)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_valid(pos) {
            Some(pos.y as usize * self.size + pos.x as usize)
        } else {
            None
        }
    }

    /// Occupants of a cell in insertion order. Out-of-bounds cells are empty.
    pub fn occupants_at(&self, pos: Position) -> &[Occupant] {
        match self.index(pos) {
            Some(i) => &self.cells[i],
            None => &[],
        }
    }

    /// True if the cell is in bounds and holds nothing.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i].is_empty())
    }

    /// Append an occupant to a cell. Returns false (and does nothing) for
    /// out-of-bounds positions.
    pub fn place(&mut self, pos: Position, occupant: Occupant) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i].push(occupant);
                true
            }
            None => false,
        }
    }

    /// Remove one occupant from a cell. Returns whether it was there.
    pub fn remove(&mut self, pos: Position, occupant: Occupant) -> bool {
        let Some(i) = self.index(pos) else {
            return false;
        };
        match self.cells[i].iter().position(|o| *o == occupant) {
            Some(at) => {
                self.cells[i].remove(at);
                true
            }
            None => false,
        }
    }

    /// Every in-bounds position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let n = self.size as i32;
        (0..n).flat_map(move |y| (0..n).map(move |x| Position::new(x, y)))
    }

    /// Positions on the outer ring of the grid.
    pub fn edge_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let last = self.size as i32 - 1;
        self.positions()
            .filter(move |p| p.x == 0 || p.y == 0 || p.x == last || p.y == last)
    }

    /// All cells holding `occupant`. A consistent grid yields at most one.
    pub fn locate(&self, occupant: Occupant) -> Vec<Position> {
        self.positions()
            .filter(|p| self.occupants_at(*p).contains(&occupant))
            .collect()
    }

    /// Every (position, occupant) pair, row by row then insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Occupant)> + '_ {
        self.positions()
            .flat_map(move |p| self.occupants_at(p).iter().map(move |o| (p, *o)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{ActorId, ItemId, ObstacleId};

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(10);
        assert!(grid.is_valid(Position::new(0, 0)));
        assert!(grid.is_valid(Position::new(9, 9)));
        assert!(!grid.is_valid(Position::new(10, 3)));
        assert!(!grid.is_valid(Position::new(3, -1)));
        assert!(!grid.is_empty(Position::new(-1, 0)));
        assert!(grid.occupants_at(Position::new(12, 12)).is_empty());
    }

    #[test]
    fn test_place_and_remove_keep_insertion_order() {
        let mut grid = Grid::new(5);
        let pos = Position::new(2, 2);
        assert!(grid.place(pos, Occupant::Obstacle(ObstacleId(1))));
        assert!(grid.place(pos, Occupant::Actor(ActorId(0))));
        assert_eq!(
            grid.occupants_at(pos),
            &[Occupant::Obstacle(ObstacleId(1)), Occupant::Actor(ActorId(0))]
        );

        assert!(grid.remove(pos, Occupant::Obstacle(ObstacleId(1))));
        assert!(!grid.remove(pos, Occupant::Item(ItemId(4))));
        assert_eq!(grid.occupants_at(pos), &[Occupant::Actor(ActorId(0))]);
        assert!(!grid.is_empty(pos));
    }

    #[test]
    fn test_place_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(5);
        assert!(!grid.place(Position::new(5, 0), Occupant::Item(ItemId(0))));
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    fn test_edge_positions_count() {
        let grid = Grid::new(10);
        assert_eq!(grid.edge_positions().count(), 36);
        assert!(grid.edge_positions().all(|p| grid.is_valid(p)));
    }

    #[test]
    fn test_locate_finds_single_cell() {
        let mut grid = Grid::new(4);
        grid.place(Position::new(1, 3), Occupant::Actor(ActorId(2)));
        assert_eq!(grid.locate(Occupant::Actor(ActorId(2))), vec![Position::new(1, 3)]);
        assert!(grid.locate(Occupant::Actor(ActorId(0))).is_empty());
    }
}
