#[cfg(test)]
mod tests {
    use crate::components::{ActivePiece, Board, Position, TetrominoType};
    use crate::game::BOARD_HALF_EXTENT;

    fn ring_cells(center: Position) -> Vec<Position> {
        let mut cells = Vec::new();
        for y in center.y - 1..=center.y + 1 {
            for x in center.x - 1..=center.x + 1 {
                let cell = Position::new(x, y);
                if cell != center {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    #[test]
    fn test_bounds_are_symmetric_and_half_open() {
        let board = Board::new(BOARD_HALF_EXTENT);

        assert!(board.is_within_bounds(Position::ZERO));
        assert!(board.is_within_bounds(Position::new(-18, -18)));
        assert!(board.is_within_bounds(Position::new(17, 17)));

        assert!(!board.is_within_bounds(Position::new(18, 0)));
        assert!(!board.is_within_bounds(Position::new(0, 18)));
        assert!(!board.is_within_bounds(Position::new(-19, 0)));
        assert!(!board.is_within_bounds(Position::new(0, -19)));
    }

    #[test]
    fn test_half_extent_is_clamped_to_minimum() {
        let board = Board::new(1);
        assert_eq!(board.half_extent, crate::game::MIN_BOARD_HALF_EXTENT);
    }

    #[test]
    fn test_tile_freedom_is_independent_of_bounds() {
        let mut board = Board::new(BOARD_HALF_EXTENT);
        let piece = ActivePiece::new(TetrominoType::T, Position::DOWN);

        // Far outside the bounds but nothing occupied there
        assert!(board.is_tile_free(&piece.cells, Position::new(40, 40)));

        board.occupy(Position::new(0, 1), TetrominoType::I);
        assert!(!board.is_tile_free(&piece.cells, Position::ZERO));
    }

    #[test]
    fn test_place_and_clear_piece_roundtrip() {
        let mut board = Board::new(BOARD_HALF_EXTENT);
        let piece = ActivePiece::new(TetrominoType::S, Position::DOWN);
        let anchor = Position::new(3, -2);

        board.place(&piece, anchor);
        assert_eq!(board.occupied_count(), 4);
        for cell in piece.absolute_cells(anchor) {
            assert_eq!(board.occupant(cell), Some(TetrominoType::S));
        }
        assert!(!board.is_tile_free(&piece.cells, anchor));

        board.clear_piece(&piece, anchor);
        assert_eq!(board.occupied_count(), 0);
        assert!(board.is_tile_free(&piece.cells, anchor));
    }

    #[test]
    fn test_try_move_commits_anchor_only_on_success() {
        let mut board = Board::new(BOARD_HALF_EXTENT);
        let piece = ActivePiece::new(TetrominoType::T, Position::DOWN);
        let mut anchor = Position::ZERO;

        let outcome = piece.try_move(&board, &mut anchor, Position::DOWN);
        assert!(outcome.moved);
        assert!(!outcome.out_of_bounds);
        assert_eq!(anchor, Position::new(0, -1));

        // Block a cell of the next candidate: anchor stays put
        board.occupy(Position::new(1, -2), TetrominoType::Z);
        let outcome = piece.try_move(&board, &mut anchor, Position::DOWN);
        assert!(!outcome.moved);
        assert!(!outcome.out_of_bounds);
        assert_eq!(anchor, Position::new(0, -1));
    }

    #[test]
    fn test_try_move_reports_out_of_bounds_anchor() {
        let board = Board::new(BOARD_HALF_EXTENT);
        let piece = ActivePiece::new(TetrominoType::T, Position::DOWN);
        let mut anchor = Position::new(0, -18);

        let outcome = piece.try_move(&board, &mut anchor, Position::DOWN);
        assert!(!outcome.moved);
        assert!(outcome.out_of_bounds);
        assert_eq!(anchor, Position::new(0, -18));
    }

    #[test]
    fn test_scan_on_empty_board_clears_nothing() {
        let mut board = Board::new(BOARD_HALF_EXTENT);
        assert!(board.scan_and_clear_boxes().is_empty());
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_full_ring_clears_and_reports_once() {
        let mut board = Board::new(BOARD_HALF_EXTENT);
        for cell in ring_cells(Position::ZERO) {
            board.occupy(cell, TetrominoType::J);
        }

        let cleared = board.scan_and_clear_boxes();
        assert_eq!(cleared, vec![Position::new(-1, -1)]);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_occupied_center_is_ignored_and_survives_the_clear() {
        let mut board = Board::new(BOARD_HALF_EXTENT);
        for cell in ring_cells(Position::ZERO) {
            board.occupy(cell, TetrominoType::J);
        }
        board.occupy(Position::ZERO, TetrominoType::O);

        let cleared = board.scan_and_clear_boxes();
        assert_eq!(cleared.len(), 1);
        assert_eq!(board.occupant(Position::ZERO), Some(TetrominoType::O));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_incomplete_ring_does_not_clear() {
        let mut board = Board::new(BOARD_HALF_EXTENT);
        let mut cells = ring_cells(Position::ZERO);
        cells.pop();
        for cell in cells {
            board.occupy(cell, TetrominoType::J);
        }

        assert!(board.scan_and_clear_boxes().is_empty());
        assert_eq!(board.occupied_count(), 7);
    }

    #[test]
    fn test_earlier_clear_starves_overlapping_box_in_same_pass() {
        let mut board = Board::new(BOARD_HALF_EXTENT);

        // Fill x in [-1, 2], y in [-1, 1] except (0, 0): the box at
        // (-1, -1) is full, and the overlapping box at (0, -1) only
        // becomes checkable after it - by then its cells are gone.
        for y in -1..=1 {
            for x in -1..=2 {
                let cell = Position::new(x, y);
                if cell != Position::ZERO {
                    board.occupy(cell, TetrominoType::L);
                }
            }
        }

        let cleared = board.scan_and_clear_boxes();
        assert_eq!(cleared, vec![Position::new(-1, -1)]);

        // The column at x=2 was outside the cleared box and remains
        for y in -1..=1 {
            assert_eq!(board.occupant(Position::new(2, y)), Some(TetrominoType::L));
        }
        assert_eq!(board.occupied_count(), 3);
    }

    #[test]
    fn test_disjoint_boxes_clear_in_one_pass() {
        let mut board = Board::new(BOARD_HALF_EXTENT);
        for cell in ring_cells(Position::new(-10, -10)) {
            board.occupy(cell, TetrominoType::S);
        }
        for cell in ring_cells(Position::new(5, 5)) {
            board.occupy(cell, TetrominoType::Z);
        }

        let cleared = board.scan_and_clear_boxes();
        assert_eq!(cleared.len(), 2);
        // Row-major scan order: the lower row first
        assert_eq!(cleared[0], Position::new(-11, -11));
        assert_eq!(cleared[1], Position::new(4, 4));
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_seed_center_occupies_the_origin() {
        let mut board = Board::new(BOARD_HALF_EXTENT);
        board.seed_center(TetrominoType::O);
        assert_eq!(board.occupant(Position::ZERO), Some(TetrominoType::O));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_spawn_points_cover_all_four_edges() {
        let board = Board::new(BOARD_HALF_EXTENT);
        assert_eq!(board.spawn_points.len(), 4);
        for spawn_point in &board.spawn_points {
            assert!(board.is_within_bounds(spawn_point.cell));
            assert_eq!(spawn_point.gravity, spawn_point.edge.gravity());
        }
    }
}
