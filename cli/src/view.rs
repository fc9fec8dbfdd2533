use std::fmt::Write;

use tripwire_core::{CellMarks, CellView, Face, Outcome, Snapshot};

fn glyph(cell: CellView) -> char {
    match cell.face {
        Face::Hidden => '.',
        Face::Flagged if cell.marks.contains(CellMarks::MISFLAGGED) => 'x',
        Face::Flagged => 'F',
        Face::Revealed(_) if cell.marks.contains(CellMarks::FALSE_REVEAL) => '!',
        Face::Revealed(_) if cell.marks.contains(CellMarks::MISFLAGGED) => 'x',
        Face::Revealed(0) => ' ',
        // adjacency never exceeds 8
        Face::Revealed(count) => char::from(b'0' + count),
        Face::Mine if cell.marks.contains(CellMarks::TRIGGER) => '#',
        Face::Mine => '*',
    }
}

/// Plain-text board with column and row numbers, followed by the status line.
pub fn render(snapshot: &Snapshot) -> String {
    let (width, height) = snapshot.size;
    let mut out = String::new();

    out.push_str("    ");
    for x in 0..width {
        let _ = write!(out, "{}", x % 10);
    }
    out.push('\n');

    for y in 0..height {
        let _ = write!(out, "{y:>3} ");
        for x in 0..width {
            if let Some(cell) = snapshot.cell((x, y)) {
                out.push(glyph(cell));
            }
        }
        out.push('\n');
    }

    let _ = write!(out, "{}", status(snapshot));
    out
}

pub fn status(snapshot: &Snapshot) -> String {
    match snapshot.outcome {
        Outcome::InProgress => format!(
            "Mines left: {}  Progress: {:.1}%",
            snapshot.mines_remaining, snapshot.progress
        ),
        Outcome::Won => "Good job!".to_string(),
        Outcome::Lost => "You lost!".to_string(),
    }
}
