//! End-to-end odds board scenarios

use oddsboard::board::{render_table, BoardBuilder, BoardParams, OddsCell};
use oddsboard::model::{ConsensusModel, ProbabilityModel};
use oddsboard::odds::{
    american_to_decimal, decimal_to_implied_probability, BookmakerQuote, Market, MarketType,
    Match, Outcome,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

const TOLERANCE: Decimal = dec!(0.000000001);

fn close(actual: Decimal, expected: Decimal) -> bool {
    (actual - expected).abs() < TOLERANCE
}

fn bookmaker(key: &str, title: &str, home: Option<i64>, away: Option<i64>) -> BookmakerQuote {
    let mut outcomes = Vec::new();
    if let Some(price) = home {
        outcomes.push(Outcome::new("New York Knicks", price));
    }
    if let Some(price) = away {
        outcomes.push(Outcome::new("Miami Heat", price));
    }
    BookmakerQuote {
        key: key.to_string(),
        title: title.to_string(),
        markets: vec![Market {
            key: "h2h".to_string(),
            outcomes,
        }],
    }
}

fn knicks_heat(bookmakers: Vec<BookmakerQuote>) -> Match {
    Match {
        id: "knicks-heat".to_string(),
        sport_key: Some("basketball_nba".to_string()),
        sport_title: Some("NBA".to_string()),
        commence_time: None,
        home_team: "New York Knicks".to_string(),
        away_team: "Miami Heat".to_string(),
        bookmakers,
    }
}

fn two_books() -> Vec<BookmakerQuote> {
    vec![
        bookmaker("draftkings", "DraftKings", Some(-150), Some(130)),
        bookmaker("fanduel", "FanDuel", Some(-140), Some(120)),
    ]
}

#[test]
fn test_single_bookmaker_conversion() {
    let home_decimal = american_to_decimal(-150).unwrap();
    assert!(close(home_decimal, dec!(1.6666666666666666666666666667)));

    let implied = decimal_to_implied_probability(home_decimal).unwrap();
    assert!(close(implied, dec!(0.6)));
}

#[test]
fn test_two_bookmaker_consensus_and_sizing() {
    let matches = vec![knicks_heat(two_books())];
    let params = BoardParams::new(MarketType::H2h)
        .with_bookmakers(["draftkings", "fanduel"])
        .with_bankroll(dec!(10000));

    let board = BoardBuilder::new().build(&matches, &params);
    let m = &board.matches[0];

    // DraftKings vig-free: 0.579831932773, FanDuel: 0.562043795620
    assert_eq!(m.consensus.bookmakers_used, 2);
    assert!(close(m.consensus.home_prob, dec!(0.5709378641967736)));
    assert!(close(m.consensus.away_prob, dec!(0.4290621358032264)));
    assert_eq!(m.home.estimated_probability, m.consensus.home_prob);

    // Both books carry vig against the consensus: no edge anywhere
    let dk_home = m.home.cell("draftkings").unwrap().data().unwrap();
    assert_eq!(dk_home.odds, -150);
    assert!(close(dk_home.implied_probability, dec!(0.6)));
    assert!(close(dk_home.prob_difference, dec!(-0.0290621358032264)));
    assert_eq!(dk_home.kelly_fraction, Decimal::ZERO);
    assert_eq!(dk_home.recommended_bet, Decimal::ZERO);
    assert!(!dk_home.is_value_bet);
    assert!(!dk_home.is_actionable);

    let fd_away = m.away.cell("fanduel").unwrap().data().unwrap();
    assert_eq!(fd_away.decimal_odds, dec!(2.2));
    assert_eq!(fd_away.kelly_fraction, Decimal::ZERO);
    assert_eq!(board.actionable_cells().count(), 0);
}

#[test]
fn test_generous_bookmaker_is_actionable() {
    let mut books = two_books();
    books.push(bookmaker("betmgm", "BetMGM", Some(-120), Some(150)));
    let matches = vec![knicks_heat(books)];
    let params = BoardParams::new(MarketType::H2h)
        .with_bookmakers(["draftkings", "fanduel", "betmgm"])
        .with_bankroll(dec!(10000));

    let board = BoardBuilder::new().build(&matches, &params);
    let m = &board.matches[0];
    assert!(close(m.consensus.away_prob, dec!(0.4270670648944586)));

    // +150 pays 2.5: (1.5 * 0.42707 - 0.57293) / 1.5
    let mgm_away = m.away.cell("betmgm").unwrap().data().unwrap();
    assert_eq!(mgm_away.implied_probability, dec!(0.4));
    assert!(close(mgm_away.prob_difference, dec!(0.0270670648944586)));
    assert!(close(mgm_away.kelly_fraction, dec!(0.0451117748240977)));
    assert!((mgm_away.recommended_bet - dec!(451.117748240977)).abs() < dec!(0.000001));
    assert!(mgm_away.is_value_bet);
    assert!(mgm_away.is_actionable);
    assert!(mgm_away.is_best_odds);

    // -120 is the best home price and also beats the consensus
    let mgm_home = m.home.cell("betmgm").unwrap().data().unwrap();
    assert!(mgm_home.is_best_odds);
    assert!(close(mgm_home.kelly_fraction, dec!(0.0604524572321910)));

    assert_eq!(board.actionable_cells().count(), 2);
}

#[test]
fn test_one_sided_bookmaker_excluded_from_consensus() {
    let mut with_partial = two_books();
    with_partial.push(bookmaker("bovada", "Bovada", Some(-500), None));
    let selected = ["draftkings", "fanduel", "bovada"];

    let params = BoardParams::new(MarketType::H2h).with_bookmakers(selected);
    let builder = BoardBuilder::new();

    let with_board = builder.build(&[knicks_heat(with_partial)], &params);
    let without_board = builder.build(&[knicks_heat(two_books())], &params);

    assert_eq!(with_board.matches[0].consensus, without_board.matches[0].consensus);

    // The partial book still shows its home price but no away price
    let home = with_board.matches[0].home.cell("bovada").unwrap();
    assert!(home.is_available());
    assert_eq!(with_board.matches[0].away.cell("bovada"), Some(&OddsCell::Unavailable));
}

#[test]
fn test_no_selected_bookmakers() {
    let matches = vec![knicks_heat(two_books())];
    let params = BoardParams::new(MarketType::H2h).with_bankroll(dec!(10000));

    let board = BoardBuilder::new().build(&matches, &params);
    let m = &board.matches[0];

    assert_eq!(m.consensus.home_prob, Decimal::ZERO);
    assert_eq!(m.consensus.away_prob, Decimal::ZERO);
    assert_eq!(board.columns.len(), 2);
    for row in [&m.home, &m.away] {
        assert!(row.cells.values().all(|c| *c == OddsCell::Unavailable));
    }

    let table = render_table(&board);
    assert!(table.contains("N/A"));
}

#[test]
fn test_bad_quote_does_not_blank_match() {
    let mut books = two_books();
    books.push(bookmaker("lowvig", "LowVig.ag", Some(0), Some(110)));
    let matches = vec![knicks_heat(books)];
    let params = BoardParams::new(MarketType::H2h)
        .with_bookmakers(["draftkings", "fanduel", "lowvig"]);

    let board = BoardBuilder::new().build(&matches, &params);
    let m = &board.matches[0];

    assert_eq!(m.consensus.bookmakers_used, 2);
    assert_eq!(m.home.cell("lowvig"), Some(&OddsCell::Unavailable));
    assert!(m.away.cell("lowvig").unwrap().is_available());
    assert!(m.home.cell("draftkings").unwrap().is_available());
}

#[test]
fn test_recompute_is_idempotent() {
    let matches = vec![knicks_heat(two_books())];
    let params = BoardParams::new(MarketType::H2h)
        .with_popular_bookmakers()
        .with_bankroll(dec!(5000));
    let builder = BoardBuilder::new();

    assert_eq!(builder.build(&matches, &params), builder.build(&matches, &params));
}

#[test]
fn test_bankroll_change_only_scales_stake() {
    let mut books = two_books();
    books.push(bookmaker("betmgm", "BetMGM", Some(-120), Some(150)));
    let matches = vec![knicks_heat(books)];
    let base = BoardParams::new(MarketType::H2h).with_bookmakers(["draftkings", "fanduel", "betmgm"]);
    let builder = BoardBuilder::new();

    let small = builder.build(&matches, &base.clone().with_bankroll(dec!(1000)));
    let none = builder.build(&matches, &base);

    let small_cell = small.matches[0].away.cell("betmgm").unwrap().data().unwrap();
    let none_cell = none.matches[0].away.cell("betmgm").unwrap().data().unwrap();
    assert_eq!(small_cell.kelly_fraction, none_cell.kelly_fraction);
    assert_eq!(none_cell.recommended_bet, Decimal::ZERO);
    assert_eq!(small_cell.recommended_bet, small_cell.kelly_fraction * dec!(1000));
}

struct FixedModel;

impl ProbabilityModel for FixedModel {
    fn estimate(
        &self,
        _event: &Match,
        _market: MarketType,
        _selected: &HashSet<String>,
    ) -> oddsboard::model::ConsensusProbability {
        oddsboard::model::ConsensusProbability {
            home_prob: dec!(0.9),
            away_prob: dec!(0.1),
            bookmakers_used: 1,
        }
    }
}

#[test]
fn test_custom_model_kelly_capped() {
    let matches = vec![knicks_heat(two_books())];
    let params = BoardParams::new(MarketType::H2h).with_bookmakers(["draftkings"]);

    let board = BoardBuilder::with_model(FixedModel).build(&matches, &params);
    let cell = board.matches[0].home.cell("draftkings").unwrap().data().unwrap();
    assert_eq!(cell.kelly_fraction, dec!(0.25));
    assert!(cell.is_actionable);

    // Sanity check: the default model still agrees with itself
    let consensus = ConsensusModel::new().estimate(
        &matches[0],
        MarketType::H2h,
        &params.selected,
    );
    assert_eq!(consensus.bookmakers_used, 1);
}
