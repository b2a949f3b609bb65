//! Plain-text rendering of an odds board

use super::{OddsBoard, OddsCell, TeamRow};
use crate::odds::decimal_to_american;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const NOT_AVAILABLE: &str = "N/A";

/// Probability as a percentage with one decimal, e.g. `57.1%`
pub fn format_percent(probability: Decimal) -> String {
    format!("{:.1}%", round_percent(probability, 1))
}

/// Signed percentage difference, e.g. `+2.7%` or `-1.0%`
pub fn format_signed_percent(difference: Decimal) -> String {
    let rounded = round_percent(difference, 1);
    if rounded > Decimal::ZERO {
        format!("+{:.1}%", rounded)
    } else if rounded < Decimal::ZERO {
        format!("-{:.1}%", rounded.abs())
    } else {
        "0.0%".to_string()
    }
}

/// American price with explicit sign, e.g. `+130` or `-150`
pub fn format_american(price: i64) -> String {
    if price > 0 {
        format!("+{price}")
    } else {
        price.to_string()
    }
}

/// Best available price as American odds, or `N/A`
pub fn format_best(best_decimal_odds: Option<Decimal>) -> String {
    best_decimal_odds
        .and_then(|decimal| decimal_to_american(decimal).ok())
        .map(format_american)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Cell text as shown in the table
///
/// `^` marks the best price among selected bookmakers, `*` an actionable
/// value bet.
pub fn format_cell(cell: &OddsCell, show_stake: bool) -> String {
    let Some(data) = cell.data() else {
        return NOT_AVAILABLE.to_string();
    };

    let mut parts = Vec::new();
    if let Some(point) = data.point {
        let sign = if point > Decimal::ZERO { "+" } else { "" };
        parts.push(format!("({sign}{point})"));
    }
    parts.push(format_american(data.odds));
    parts.push(format_percent(data.implied_probability));
    if !data.prob_difference.is_zero() {
        parts.push(format_signed_percent(data.prob_difference));
    }
    if show_stake && data.kelly_fraction > Decimal::ZERO {
        parts.push(format!(
            "${} ({:.3}%)",
            data.recommended_bet
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            round_percent(data.kelly_fraction, 3)
        ));
    }

    let mut text = parts.join(" ");
    if data.is_best_odds {
        text.push('^');
    }
    if data.is_actionable {
        text.push('*');
    }
    text
}

/// Render the board as an aligned text table
pub fn render_table(board: &OddsBoard) -> String {
    let mut header = vec![
        "Game".to_string(),
        "Team".to_string(),
        "Est. Prob.".to_string(),
        "Best".to_string(),
    ];
    header.extend(board.columns.iter().map(|c| c.title.clone()));

    let show_stake = board.bankroll.is_some();
    let mut rows = vec![header];
    for m in &board.matches {
        let estimate = |row: &TeamRow| {
            if m.consensus.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                format_percent(row.estimated_probability)
            }
        };

        for (game, row) in [
            (format!("{} vs {}", m.home_team, m.away_team), &m.home),
            (String::new(), &m.away),
        ] {
            let mut line = vec![
                game,
                row.team.clone(),
                estimate(row),
                format_best(row.best_decimal_odds),
            ];
            line.extend(board.columns.iter().map(|c| match row.cell(&c.key) {
                Some(cell) => format_cell(cell, show_stake),
                None => NOT_AVAILABLE.to_string(),
            }));
            rows.push(line);
        }
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|i| rows.iter().map(|r| r[i].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = format!(
        "Market: {} ({})\n",
        board.market.label(),
        board.market.key()
    );
    if board.matches.is_empty() {
        out.push_str("No matches found. Try adjusting your search or filters.\n");
        return out;
    }

    for (i, row) in rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(text, width)| format!("{:<width$}", text, width = *width))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("-+-"));
            out.push('\n');
        }
    }
    out
}

fn round_percent(value: Decimal, dp: u32) -> Decimal {
    let rounded = (value * dec!(100)).round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}
