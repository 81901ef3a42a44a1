use minegrid_core::{Board, CellSnapshot, CellType};

pub fn cell_symbol(snapshot: &CellSnapshot) -> char {
    match snapshot.cell_type {
        _ if snapshot.flagged => 'F',
        None => '#',
        Some(CellType::Mine) => '*',
        Some(CellType::Empty) => '.',
        Some(CellType::Hint(count)) => char::from_digit(count.into(), 10).unwrap_or('?'),
    }
}

/// Draws the board with row and column numbers, followed by a mine counter line.
pub fn render_board(board: &Board) -> String {
    let (_, width) = board.size();
    let header: String = (0..width).map(|col| format!("{col:>3}")).collect();
    let mut out = format!("   {header}");

    for snapshot in board.snapshots() {
        let (row, col) = snapshot.position;
        if col == 0 {
            out.push_str(&format!("\n{row:>3}"));
        }
        out.push_str(&format!("{:>3}", cell_symbol(&snapshot)));
    }

    out.push_str(&format!(
        "\nmines: {}  flags: {}  left: {}",
        board.mine_count(),
        board.flag_count(),
        board.mines_left()
    ));
    out
}
