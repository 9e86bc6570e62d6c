use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::move_generation::pseudo_moves_shared::{push_piece_moves, MoveKind};
use crate::moves::chess_move::ChessMove;
use crate::moves::step_moves::knight_targets;

pub fn generate_knight_quiet_moves(board: &BoardState, out: &mut Vec<ChessMove>) {
    push_piece_moves(board, PieceKind::Knight, MoveKind::Quiet, |sq, _| knight_targets(sq), out);
}

pub fn generate_knight_captures(board: &BoardState, out: &mut Vec<ChessMove>) {
    push_piece_moves(board, PieceKind::Knight, MoveKind::Capture, |sq, _| knight_targets(sq), out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_knights_have_four_quiet_moves_and_no_captures() {
        let start = BoardState::new_game();
        let mut quiet = Vec::new();
        let mut captures = Vec::new();
        generate_knight_quiet_moves(&start, &mut quiet);
        generate_knight_captures(&start, &mut captures);

        assert_eq!(quiet.len(), 4);
        assert!(captures.is_empty());
    }

    #[test]
    fn corner_knight_captures_enemy_but_not_friend() {
        let b = BoardState::from_fen("4k3/8/8/8/8/1p6/2P5/N3K3 w - - 0 1").expect("FEN should parse");
        let mut captures = Vec::new();
        generate_knight_captures(&b, &mut captures);

        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to, square_at(1, 2));
        assert!(captures[0].is_capture());
    }
}
