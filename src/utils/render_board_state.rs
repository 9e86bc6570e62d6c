//! Terminal board renderer for the command-line `--show-board` flag.

use crate::board_state::{board_state::BoardState, chess_types::*};

/// Render the board with White at the bottom, one rank per line.
pub fn render_board_state(board: &BoardState) -> String {
    let mut out = String::from("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        let label = char::from(b'1' + rank);
        out.push(label);

        for file in 0..8u8 {
            out.push(' ');
            out.push(
                board
                    .piece_at(square_at(file, rank))
                    .map_or('·', |(color, kind)| piece_to_unicode(color, kind)),
            );
        }

        out.push(' ');
        out.push(label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

fn piece_to_unicode(color: Color, kind: PieceKind) -> char {
    const LIGHT: [char; 6] = ['♙', '♘', '♗', '♖', '♕', '♔'];
    const DARK: [char; 6] = ['♟', '♞', '♝', '♜', '♛', '♚'];
    match color {
        Color::Light => LIGHT[kind.index()],
        Color::Dark => DARK[kind.index()],
    }
}

#[cfg(test)]
mod tests {
    use super::render_board_state;
    use crate::board_state::board_state::BoardState;

    #[test]
    fn starting_position_renders_back_ranks() {
        let text = render_board_state(&BoardState::new_game());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[5], "4 · · · · · · · · 4");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }
}
