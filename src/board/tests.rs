use proptest::prelude::*;
use proptest::sample::Index;

use super::*;
use crate::strike::Axis;

fn at(x: i32, y: i32) -> Offset {
    Offset::new(x, y)
}

#[test]
fn test_player_other() {
    assert_eq!(Player::P1.other(), Player::P2);
    assert_eq!(Player::P2.other(), Player::P1);
    assert_eq!(Player::P1.index(), 0);
    assert_eq!(Player::P2.index(), 1);
}

#[test]
fn test_cell_occupied_by() {
    assert!(Cell::Occupied(Player::P1).is_occupied_by(Player::P1));
    assert!(!Cell::Occupied(Player::P1).is_occupied_by(Player::P2));
    assert!(!Cell::Unoccupied.is_occupied_by(Player::P1));
    assert_eq!(Cell::Unavailable.player(), None);
}

#[test]
fn test_new_board_opens_disk_around_origin() {
    let board = Board::new(3);
    assert_eq!(board.bound(), Rect::new(-3, -3, 7, 7));
    // 7x7 square minus its four corners
    assert_eq!(board.unoccupied_count(), 45);
    assert_eq!(board.cell(at(0, 0)), Cell::Unoccupied);
    assert_eq!(board.cell(at(3, 2)), Cell::Unoccupied);
    assert_eq!(board.cell(at(3, 3)), Cell::Unavailable);
    assert_eq!(board.cell(at(4, 0)), Cell::Unavailable);
    assert!(board.is_empty());
    assert_eq!(board.latest_move(), None);
}

#[test]
fn test_mark_cell_opens_frontier() {
    let mut board = Board::new(2);
    assert_eq!(board.unoccupied_count(), 25);

    board.mark_cell(at(2, 0), Player::P1).unwrap();

    assert_eq!(board.cell(at(2, 0)), Cell::Occupied(Player::P1));
    assert_eq!(board.cell(at(4, 2)), Cell::Unoccupied);
    assert_eq!(board.cell(at(5, 0)), Cell::Unavailable);
    assert_eq!(board.bound(), Rect::new(-2, -2, 7, 5));
    // Two new columns of five, minus the marked cell
    assert_eq!(board.unoccupied_count(), 25 + 10 - 1);
    assert_eq!(board.latest_move(), Some(PlayerMove { cell: at(2, 0), player: Player::P1 }));
    assert_eq!(board.move_count(), 1);
}

#[test]
fn test_mark_cell_feeds_strikes() {
    let mut board = Board::new(3);
    board.mark_cell(at(0, 0), Player::P1).unwrap();
    board.mark_cell(at(0, 1), Player::P2).unwrap();
    board.mark_cell(at(1, 0), Player::P1).unwrap();

    let strike = board.strikes().strike_at(at(1, 0), Axis::RIGHT).copied().unwrap();
    assert_eq!(strike.len, 2);
    assert_eq!(strike.start, at(0, 0));
    assert_eq!(board.strikes().owner(at(0, 1)), Some(Player::P2));

    let mut mine: Vec<_> = board.player_cells(Player::P1).collect();
    mine.sort();
    assert_eq!(mine, vec![at(0, 0), at(1, 0)]);
}

#[test]
fn test_rejected_marks_do_not_mutate() {
    let mut board = Board::new(3);
    board.mark_cell(at(0, 0), Player::P1).unwrap();
    let before = board.clone();

    assert_eq!(board.mark_cell(at(0, 0), Player::P2), Err(BoardError::Occupied(at(0, 0))));
    assert_eq!(board.mark_cell(at(50, 50), Player::P2), Err(BoardError::Unavailable(at(50, 50))));
    assert_eq!(board, before);
}

#[test]
fn test_undo_on_empty_board() {
    let mut board = Board::new(3);
    assert_eq!(board.undo_last_move(), Err(BoardError::NoMoves));
    assert_eq!(board, Board::new(3));
}

#[test]
fn test_undo_restores_frontier() {
    let mut board = Board::new(2);
    let fresh = board.clone();

    board.mark_cell(at(2, 0), Player::P1).unwrap();
    board.mark_cell(at(4, 1), Player::P2).unwrap();
    assert_eq!(board.cell(at(6, 1)), Cell::Unoccupied);

    let undone = board.undo_last_move().unwrap();
    assert_eq!(undone, PlayerMove { cell: at(4, 1), player: Player::P2 });
    assert_eq!(board.cell(at(6, 1)), Cell::Unavailable);
    assert_eq!(board.cell(at(4, 1)), Cell::Unoccupied);

    board.undo_last_move().unwrap();
    assert_eq!(board, fresh);
    assert!(board.strikes().is_empty());
}

#[test]
fn test_frontier_follows_marks() {
    let mut board = Board::new(1);
    let mut player = Player::P1;
    for x in 0..10 {
        board.mark_cell(at(x, 0), player).unwrap();
        player = player.other();
    }
    assert_eq!(board.cell(at(10, 0)), Cell::Unoccupied);
    assert_eq!(board.cell(at(11, 0)), Cell::Unavailable);
    assert_eq!(board.bound(), Rect::new(-1, -1, 12, 3));
}

proptest! {
    #[test]
    fn prop_undo_restores_every_snapshot(picks in prop::collection::vec(any::<Index>(), 0..30)) {
        let mut board = Board::new(2);
        let mut snapshots = Vec::new();
        let mut player = Player::P1;

        for pick in picks {
            let mut free: Vec<_> = board.unoccupied_cells().collect();
            free.sort();
            let pos = free[pick.index(free.len())];

            snapshots.push(board.clone());
            board.mark_cell(pos, player).unwrap();
            player = player.other();
        }

        while let Some(snapshot) = snapshots.pop() {
            board.undo_last_move().unwrap();
            prop_assert_eq!(&board, &snapshot);
        }
        prop_assert_eq!(board.undo_last_move(), Err(BoardError::NoMoves));
    }
}
