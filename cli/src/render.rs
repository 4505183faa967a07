use minesweeper_core::*;

pub fn face_glyph(face: Face) -> &'static str {
    match face {
        Face::Smile => "😃",
        Face::Surprised => "😮",
        Face::Dead => "😫",
        Face::Cool => "😎",
    }
}

pub fn cell_glyph(cell: DisplayCell) -> char {
    use DisplayCell::*;
    match cell {
        Hidden => '#',
        Flagged => 'F',
        Revealed(0) => '.',
        Revealed(hint) => char::from(b'0' + hint.min(9)),
        Exploded => 'X',
        MineShown => '*',
        MineMarkedCorrect => '!',
        AllClearSuccess => '+',
    }
}

pub fn status_line(session: &Session, pressing: bool) -> String {
    format!(
        "{} left:{} {} {}",
        face_glyph(session.face(pressing)),
        session.engine().flags_remaining(),
        session.difficulty(),
        format_elapsed(session.elapsed_secs())
    )
}

/// The whole board with column and row numbers, status line first.
pub fn board(session: &Session, pressing: bool) -> String {
    let engine = session.engine();
    let (columns, rows) = engine.size();

    let mut out = status_line(session, pressing);
    out.push('\n');

    out.push_str("   ");
    for x in 0..columns {
        out.push_str(&format!("{x:>3}"));
    }
    out.push('\n');

    for y in 0..rows {
        out.push_str(&format!("{y:>3}"));
        for x in 0..columns {
            out.push_str(&format!("{:>3}", cell_glyph(engine.cell_at((x, y)))));
        }
        out.push('\n');
    }
    out
}
