// Improvement potential. Redraw in place instead of printing a new board after every
//   command.

use console::Style;
use itertools::Itertools;
use xiangqi_dare::adventure::{AdventureKind, AdventureState};
use xiangqi_dare::coord::{Col, Coord, Row};
use xiangqi_dare::effect::EffectKind;
use xiangqi_dare::force::Force;
use xiangqi_dare::game::{GameState, GameStatus};
use xiangqi_dare::notation::format_move;
use xiangqi_dare::piece::{PieceOnBoard, piece_to_ascii};


pub fn render_game(state: &GameState, ascii: bool) -> String {
    format!(
        "{}\n{}\n{}",
        render_stash(state, Force::Red),
        render_grid(state, ascii),
        render_status(state)
    )
}

fn render_grid(state: &GameState, ascii: bool) -> String {
    let colors = [
        Style::new().color256(233).on_color256(222),
        Style::new().color256(233).on_color256(230),
    ];
    let last_move = state.last_move().map(|record| [record.from, record.to]);
    let file_header = format!(
        "   {}",
        Col::all().map(|col| format_square(col.to_algebraic())).join("")
    );
    let mut ret = vec![file_header.clone()];
    for row in Row::all() {
        if row == Row::from_zero_based(5) {
            ret.push(format!("   {}", Style::new().cyan().apply_to("~".repeat(27))));
        }
        let squares = Col::all()
            .map(|col| {
                let pos = Coord::new(row, col);
                let color_idx = (row.to_zero_based() + col.to_zero_based()).rem_euclid(2) as usize;
                let mut style = colors[color_idx].clone();
                if last_move.is_some_and(|squares| squares.contains(&pos)) {
                    style = style.reverse();
                }
                let text = match state.grid()[pos] {
                    Some(piece) => render_piece(state, piece, ascii),
                    None => format_square(' '),
                };
                style.apply_to(text).to_string()
            })
            .join("");
        let rank = format_square(row.to_algebraic());
        ret.push(format!("{}{}{}", rank, squares, rank));
    }
    ret.push(file_header);
    ret.join("\n")
}

fn render_piece(state: &GameState, piece: PieceOnBoard, ascii: bool) -> String {
    let symbol = if ascii { piece_to_ascii(piece.kind, piece.force) } else { piece.symbol() };
    let mut style = match piece.force {
        Force::Red => Style::new().red(),
        Force::Black => Style::new().black().bold(),
    };
    if state.effects().is_sealed(piece.id) {
        style = style.dim().strikethrough();
    }
    if state.effects().is_immune(piece.id) {
        style = style.underlined();
    }
    // Pictograms are double-width.
    let text = if ascii { format_square(symbol) } else { format!(" {}", symbol) };
    style.apply_to(text).to_string()
}

fn render_stash(state: &GameState, force: Force) -> String {
    let captured = state.stash()[force].iter().map(|piece| piece.symbol()).join(" ");
    format!("{:?} captured: {}", force, captured)
}

fn render_status(state: &GameState) -> String {
    let mut lines = vec![render_stash(state, Force::Black)];
    if let Some(record) = state.last_move() {
        lines.push(format!(
            "Last move: {} {}",
            record.piece_kind.label(),
            format_move(record.from, record.to)
        ));
    }
    match state.status() {
        GameStatus::Victory(winner) => {
            lines.push(Style::new().bold().apply_to(format!("{:?} wins!", winner)).to_string());
        }
        GameStatus::Active => {
            lines.push(format!("{:?} to move", state.active_force()));
        }
    }
    match state.adventure() {
        AdventureState::Idle => {}
        AdventureState::Pending => lines.push("Adventure pending".to_owned()),
        AdventureState::Open(adventure) => {
            let title = match adventure.kind {
                AdventureKind::Dare => Style::new().on_red().apply_to("DARE"),
                AdventureKind::Reward => Style::new().on_green().apply_to("REWARD"),
            };
            let text = adventure.card().map_or("?", |card| card.text);
            lines.push(format!("{} {}", title, text));
            lines.push("Type \"close\" when done.".to_owned());
        }
    }
    let phase = state.phase();
    if phase.bonus_move_phase {
        lines.push("Bonus move: no captures".to_owned());
    }
    if let Some(force) = phase.pending_double_move {
        lines.push(format!("{:?} has a double move ready", force));
    }
    if let Some(force) = phase.next_capture_grants_extra_move {
        lines.push(format!("{:?}: next capture grants an extra move", force));
    }
    if phase.opponent_cannot_capture {
        lines.push("Pacifism: no captures this turn".to_owned());
    }
    for effect in state.effects().iter() {
        let piece = state.grid().find_piece(effect.target).map(|(pos, piece)| {
            format!("{:?} {} on {}", piece.force, piece.label(), pos.to_algebraic())
        });
        let what = match effect.kind {
            EffectKind::Immunity => "immune",
            EffectKind::Seal => "sealed",
        };
        lines.push(format!("{} is {}", piece.unwrap_or_default(), what));
    }
    if state.undo_tokens() > 0 {
        lines.push(format!("Undo tokens: {}", state.undo_tokens()));
    }
    if state.show_taunt() {
        lines.push(Style::new().magenta().bold().apply_to("Is that all you've got?").to_string());
    }
    lines.join("\n")
}

fn format_square(ch: char) -> String { format!(" {} ", ch) }
