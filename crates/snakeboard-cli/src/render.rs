// Plain-text rendering of the draft board, ticker, pool and order.

use std::fmt::Write as _;

use snakeboard_core::draft::board::Board;
use snakeboard_core::draft::state::Draft;

/// Minimum width of a team column.
const MIN_COLUMN_WIDTH: usize = 8;

/// Separator between columns.
const SEPARATOR: &str = " | ";

/// Status line shown under the board.
pub fn ticker(draft: &Draft) -> String {
    match draft.peek_next_pick() {
        Some(next) => {
            let team = draft
                .team(next.team)
                .map(|t| t.name.as_str())
                .unwrap_or("?");
            format!(
                "Round {}: {} is now picking (Pick {})",
                next.round_index + 1,
                team,
                next.slot_number
            )
        }
        None => "Draft Complete! All players have been selected.".to_string(),
    }
}

/// Render the board grid: a label column ("Teams", "Captain", "Round N")
/// followed by one column per team in round-1 order. The team on the clock
/// carries its pick number and the current round is marked with `>`.
pub fn render_board(board: &Board) -> String {
    let active_column = board.active_column();
    let active_round = board.next_pick.map(|n| n.round_index);

    let headers: Vec<String> = board
        .columns
        .iter()
        .enumerate()
        .map(|(idx, col)| match (active_column == Some(idx), board.next_pick) {
            (true, Some(next)) => format!("{} #{}", col.name, next.slot_number),
            _ => col.name.clone(),
        })
        .collect();

    let widths: Vec<usize> = board
        .columns
        .iter()
        .zip(&headers)
        .map(|(col, header)| {
            col.cells
                .iter()
                .flatten()
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), col.captain.chars().count()])
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    let label_width = format!("Round {}", board.total_rounds)
        .len()
        .max("Captain".len())
        + 2;

    let mut out = String::new();
    push_row(&mut out, "  Teams", label_width, &headers, &widths);
    let captains: Vec<String> = board.columns.iter().map(|c| c.captain.clone()).collect();
    push_row(&mut out, "  Captain", label_width, &captains, &widths);

    let rule_len = label_width + widths.iter().map(|w| w + SEPARATOR.len()).sum::<usize>();
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    for round in 0..board.total_rounds {
        let marker = if active_round == Some(round) { "> " } else { "  " };
        let label = format!("{marker}Round {}", round + 1);
        let cells: Vec<String> = board
            .columns
            .iter()
            .map(|c| c.cells.get(round).cloned().flatten().unwrap_or_default())
            .collect();
        push_row(&mut out, &label, label_width, &cells, &widths);
    }

    out
}

fn push_row(out: &mut String, label: &str, label_width: usize, cells: &[String], widths: &[usize]) {
    let mut line = format!("{label:<label_width$}");
    for (cell, &width) in cells.iter().zip(widths) {
        line.push_str(SEPARATOR);
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// List of remaining players, one per line.
pub fn render_pool(draft: &Draft) -> String {
    let pool = &draft.state().remaining_players;
    let mut out = format!("Available players ({}):\n", pool.len());
    for (idx, player) in pool.iter().enumerate() {
        let _ = writeln!(out, "  {:>3}. {}", idx + 1, player);
    }
    out
}

/// Pick order for every round, by team name.
pub fn render_order(draft: &Draft) -> String {
    let mut out = String::new();
    for (idx, round) in draft.order().iter().enumerate() {
        let names: Vec<&str> = round
            .iter()
            .map(|&id| draft.team(id).map(|t| t.name.as_str()).unwrap_or("?"))
            .collect();
        let _ = writeln!(out, "Round {}: {}", idx + 1, names.join(", "));
    }
    out
}

/// Full snapshot text: title, board, ticker.
pub fn render_snapshot(title: &str, draft: &Draft) -> String {
    format!(
        "{title}\n{}\n{}{}\n",
        "=".repeat(title.chars().count()),
        render_board(&draft.board()),
        ticker(draft)
    )
}
