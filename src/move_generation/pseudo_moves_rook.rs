use crate::board_state::{board_state::BoardState, chess_types::*};
use crate::move_generation::pseudo_moves_shared::{push_piece_moves, MoveKind};
use crate::moves::chess_move::ChessMove;
use crate::moves::sliding_moves::rook_attacks;

pub fn generate_rook_quiet_moves(board: &BoardState, out: &mut Vec<ChessMove>) {
    push_piece_moves(board, PieceKind::Rook, MoveKind::Quiet, rook_attacks, out);
}

pub fn generate_rook_captures(board: &BoardState, out: &mut Vec<ChessMove>) {
    push_piece_moves(board, PieceKind::Rook, MoveKind::Capture, rook_attacks, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_captures_only_the_first_enemy_on_each_ray() {
        let b = BoardState::from_fen("r3k3/p7/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let mut captures = Vec::new();
        let mut quiet = Vec::new();
        generate_rook_captures(&b, &mut captures);
        generate_rook_quiet_moves(&b, &mut quiet);

        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to, square_at(0, 6));
        // a2..a6 up the file, b1..d1 along the rank.
        assert_eq!(quiet.len(), 8);
    }
}
