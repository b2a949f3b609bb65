//! Odds board assembly
//!
//! Turns raw match payloads into render-ready rows: one row per team, one
//! cell per bookmaker column. Every value is derived fresh from the inputs
//! passed in [`BoardParams`]; the builder holds no mutable state.
//!
//! Per match:
//! 1. Consensus probability from the selected bookmakers
//! 2. Best decimal price per team among selected bookmakers
//! 3. Per bookmaker cell: implied probability, value classification, Kelly stake

mod render;

pub use render::{
    format_american, format_best, format_cell, format_percent, format_signed_percent,
    render_table,
};

use crate::model::{ConsensusModel, ConsensusProbability, ProbabilityModel};
use crate::odds::{
    american_to_decimal, decimal_to_implied_probability, BookmakerQuote, Match, MarketError,
    MarketType, OddsError, Side,
};
use crate::risk::KellySizer;
use crate::signal::ValueBetClassifier;
use crate::telemetry::{increment, CounterMetric};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Bookmakers selected when the user has not picked any
pub const POPULAR_BOOKMAKERS: &[(&str, &str)] = &[
    ("draftkings", "DraftKings"),
    ("williamhill_us", "Caesars"),
    ("betus", "BetUS"),
    ("fanduel", "FanDuel"),
    ("mybookieag", "MyBookie.ag"),
    ("betrivers", "BetRivers"),
    ("betmgm", "BetMGM"),
    ("betonlineag", "BetOnline.ag"),
    ("lowvig", "LowVig.ag"),
    ("bovada", "Bovada"),
];

/// Inputs that drive a board computation
#[derive(Debug, Clone, Default)]
pub struct BoardParams {
    /// Market to compare
    pub market: MarketType,
    /// Bookmaker keys that count towards consensus and get cells
    pub selected: HashSet<String>,
    /// Bankroll for stake sizing; `None` disables sizing
    pub bankroll: Option<Decimal>,
}

impl BoardParams {
    /// Create params for a market with nothing selected
    pub fn new(market: MarketType) -> Self {
        Self {
            market,
            selected: HashSet::new(),
            bankroll: None,
        }
    }

    /// Select bookmakers by key
    pub fn with_bookmakers<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Select the popular bookmaker set
    pub fn with_popular_bookmakers(self) -> Self {
        self.with_bookmakers(POPULAR_BOOKMAKERS.iter().map(|(key, _)| *key))
    }

    /// Set the bankroll used for stake sizing
    pub fn with_bankroll(mut self, bankroll: Decimal) -> Self {
        self.bankroll = Some(bankroll);
        self
    }

    /// Bankroll if stake sizing is enabled
    pub fn sizing_bankroll(&self) -> Option<Decimal> {
        self.bankroll.filter(|b| *b > Decimal::ZERO)
    }

    /// Whether a bookmaker is selected
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }
}

/// A bookmaker column in the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmakerColumn {
    pub key: String,
    pub title: String,
}

/// Computed data for one bookmaker/team cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookmakerCellData {
    /// American odds as quoted
    pub odds: i64,
    pub decimal_odds: Decimal,
    pub implied_probability: Decimal,
    /// Estimated minus implied probability
    pub prob_difference: Decimal,
    pub kelly_fraction: Decimal,
    pub recommended_bet: Decimal,
    /// Line for spread markets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<Decimal>,
    pub is_value_bet: bool,
    /// Value bet with a positive Kelly stake
    pub is_actionable: bool,
    /// Highest price among the selected bookmakers
    pub is_best_odds: bool,
}

/// A cell is either computed or shown as N/A
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum OddsCell {
    Available(BookmakerCellData),
    Unavailable,
}

impl OddsCell {
    pub fn is_available(&self) -> bool {
        matches!(self, OddsCell::Available(_))
    }

    pub fn data(&self) -> Option<&BookmakerCellData> {
        match self {
            OddsCell::Available(data) => Some(data),
            OddsCell::Unavailable => None,
        }
    }
}

/// One team's row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRow {
    pub team: String,
    pub side: Side,
    pub estimated_probability: Decimal,
    /// Best decimal price among selected bookmakers, if any quoted
    pub best_decimal_odds: Option<Decimal>,
    /// Cells keyed by bookmaker key
    pub cells: BTreeMap<String, OddsCell>,
}

impl TeamRow {
    /// Cell for a bookmaker column
    pub fn cell(&self, bookmaker: &str) -> Option<&OddsCell> {
        self.cells.get(bookmaker)
    }
}

/// Both rows of a match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRows {
    pub match_id: String,
    pub home_team: String,
    pub away_team: String,
    pub consensus: ConsensusProbability,
    pub home: TeamRow,
    pub away: TeamRow,
}

impl MatchRows {
    pub fn row(&self, side: Side) -> &TeamRow {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

/// Fully computed odds board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsBoard {
    pub market: MarketType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bankroll: Option<Decimal>,
    pub columns: Vec<BookmakerColumn>,
    pub matches: Vec<MatchRows>,
}

impl OddsBoard {
    /// All available cells flagged actionable
    pub fn actionable_cells(&self) -> impl Iterator<Item = (&MatchRows, &TeamRow, &BookmakerCellData)> {
        self.matches.iter().flat_map(|m| {
            [&m.home, &m.away].into_iter().flat_map(move |row| {
                row.cells
                    .values()
                    .filter_map(OddsCell::data)
                    .filter(|data| data.is_actionable)
                    .map(move |data| (m, row, data))
            })
        })
    }
}

/// Builds odds boards from match payloads
pub struct BoardBuilder<M: ProbabilityModel = ConsensusModel> {
    model: M,
    sizer: KellySizer,
    classifier: ValueBetClassifier,
}

impl BoardBuilder<ConsensusModel> {
    /// Builder using the consensus model
    pub fn new() -> Self {
        Self::with_model(ConsensusModel::new())
    }
}

impl Default for BoardBuilder<ConsensusModel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ProbabilityModel> BoardBuilder<M> {
    /// Builder using a custom probability model
    pub fn with_model(model: M) -> Self {
        Self {
            model,
            sizer: KellySizer::new(),
            classifier: ValueBetClassifier::new(),
        }
    }

    /// Build the board for a set of matches
    pub fn build<'a, I>(&self, matches: I, params: &BoardParams) -> OddsBoard
    where
        I: IntoIterator<Item = &'a Match>,
    {
        let matches: Vec<&Match> = matches.into_iter().collect();
        let columns = board_columns(matches.iter().copied());

        let rows: Vec<MatchRows> = matches
            .iter()
            .map(|event| self.build_match(event, &columns, params))
            .collect();

        let board = OddsBoard {
            market: params.market,
            bankroll: params.sizing_bankroll(),
            columns,
            matches: rows,
        };

        tracing::info!(
            market = %board.market,
            matches = board.matches.len(),
            columns = board.columns.len(),
            selected = params.selected.len(),
            actionable = board.actionable_cells().count(),
            "Odds board built"
        );

        board
    }

    /// Rows for a single match
    pub fn build_match(
        &self,
        event: &Match,
        columns: &[BookmakerColumn],
        params: &BoardParams,
    ) -> MatchRows {
        let consensus = self.model.estimate(event, params.market, &params.selected);

        MatchRows {
            match_id: event.id.clone(),
            home_team: event.home_team.clone(),
            away_team: event.away_team.clone(),
            consensus,
            home: self.team_row(event, Side::Home, &consensus, columns, params),
            away: self.team_row(event, Side::Away, &consensus, columns, params),
        }
    }

    fn team_row(
        &self,
        event: &Match,
        side: Side,
        consensus: &ConsensusProbability,
        columns: &[BookmakerColumn],
        params: &BoardParams,
    ) -> TeamRow {
        let team = event.team(side);
        let estimated_probability = consensus.for_side(side);
        let best = best_decimal_odds(event, team, params);

        let cells = columns
            .iter()
            .map(|column| {
                let cell = self.cell_for(event, &column.key, team, estimated_probability, best, params);
                (column.key.clone(), cell)
            })
            .collect();

        TeamRow {
            team: team.to_string(),
            side,
            estimated_probability,
            best_decimal_odds: best,
            cells,
        }
    }

    fn cell_for(
        &self,
        event: &Match,
        bookmaker_key: &str,
        team: &str,
        estimated_probability: Decimal,
        best: Option<Decimal>,
        params: &BoardParams,
    ) -> OddsCell {
        if !params.is_selected(bookmaker_key) {
            return OddsCell::Unavailable;
        }
        let Some(bookmaker) = event.bookmaker(bookmaker_key) else {
            increment(CounterMetric::CellsUnavailable);
            return OddsCell::Unavailable;
        };

        match self.compute_cell(
            bookmaker,
            params.market,
            team,
            estimated_probability,
            params.sizing_bankroll(),
        ) {
            Ok(mut data) => {
                data.is_best_odds = best == Some(data.decimal_odds);
                increment(CounterMetric::CellsComputed);
                if data.is_actionable {
                    increment(CounterMetric::ValueBetsFlagged);
                }
                OddsCell::Available(data)
            }
            Err(e) => {
                increment(CounterMetric::CellsUnavailable);
                tracing::debug!(match_id = %event.id, error = %e, "Cell unavailable");
                OddsCell::Unavailable
            }
        }
    }

    /// Compute one bookmaker cell for a team
    ///
    /// `is_best_odds` is left unset; it depends on the other bookmakers.
    pub fn compute_cell(
        &self,
        bookmaker: &BookmakerQuote,
        market: MarketType,
        team: &str,
        estimated_probability: Decimal,
        bankroll: Option<Decimal>,
    ) -> Result<BookmakerCellData, MarketError> {
        let outcome = bookmaker.outcome(market, team)?;
        let invalid = |source: OddsError| MarketError::InvalidQuote {
            bookmaker: bookmaker.key.clone(),
            source,
        };

        let odds = outcome.american().map_err(invalid)?;
        let decimal_odds = american_to_decimal(odds).map_err(invalid)?;
        let implied_probability = decimal_to_implied_probability(decimal_odds).map_err(invalid)?;

        let assessment = self
            .classifier
            .classify(estimated_probability, implied_probability);
        let sizing = self
            .sizer
            .size(decimal_odds, estimated_probability, bankroll);

        Ok(BookmakerCellData {
            odds,
            decimal_odds,
            implied_probability,
            prob_difference: assessment.prob_difference,
            kelly_fraction: sizing.kelly_fraction,
            recommended_bet: sizing.recommended_bet,
            point: if market.has_point() { outcome.point } else { None },
            is_value_bet: assessment.is_value_bet,
            is_actionable: assessment.is_actionable(sizing.kelly_fraction),
            is_best_odds: false,
        })
    }
}

/// Bookmaker columns across matches, in first-seen order
pub fn board_columns<'a, I>(matches: I) -> Vec<BookmakerColumn>
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut seen = HashSet::new();
    let mut columns = Vec::new();

    for bookmaker in matches.into_iter().flat_map(|m| m.bookmakers.iter()) {
        if seen.insert(bookmaker.key.as_str()) {
            columns.push(BookmakerColumn {
                key: bookmaker.key.clone(),
                title: bookmaker.title.clone(),
            });
        }
    }

    columns
}

/// Highest decimal price for a team among the selected bookmakers
pub fn best_decimal_odds(event: &Match, team: &str, params: &BoardParams) -> Option<Decimal> {
    event
        .bookmakers
        .iter()
        .filter(|b| params.is_selected(&b.key))
        .filter_map(|b| b.price(params.market, team).ok())
        .filter_map(|american| american_to_decimal(american).ok())
        .max()
}

/// Filter matches by team-name query, or by sport when no query is given
pub fn filter_matches<'a>(
    matches: &'a [Match],
    query: Option<&str>,
    sport: Option<&str>,
) -> Vec<&'a Match> {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => matches.iter().filter(|m| m.matches_query(q)).collect(),
        None => matches
            .iter()
            .filter(|m| sport.map_or(true, |s| m.sport_key.as_deref() == Some(s)))
            .collect(),
    }
}
