//! Odds API payload parsing and board output

use oddsboard::board::{render_table, BoardBuilder, BoardParams, OddsCell};
use oddsboard::feed::{parse_matches, FeedError, JsonFileSource, OddsSource};
use oddsboard::odds::MarketType;
use rust_decimal_macros::dec;
use std::io::Write;

const PAYLOAD: &str = r#"[
  {
    "id": "e912304de2b2ce35b473ce2ecd3d1502",
    "sport_key": "americanfootball_nfl",
    "sport_title": "NFL",
    "commence_time": "2024-09-08T17:00:00Z",
    "home_team": "Kansas City Chiefs",
    "away_team": "Baltimore Ravens",
    "bookmakers": [
      {
        "key": "draftkings",
        "title": "DraftKings",
        "last_update": "2024-09-06T12:00:00Z",
        "markets": [
          {
            "key": "h2h",
            "last_update": "2024-09-06T12:00:00Z",
            "outcomes": [
              { "name": "Kansas City Chiefs", "price": -150 },
              { "name": "Baltimore Ravens", "price": 130 }
            ]
          },
          {
            "key": "spreads",
            "outcomes": [
              { "name": "Kansas City Chiefs", "price": -110, "point": -3.5 },
              { "name": "Baltimore Ravens", "price": -110, "point": 3.5 }
            ]
          }
        ]
      },
      {
        "key": "fanduel",
        "title": "FanDuel",
        "markets": [
          {
            "key": "h2h",
            "outcomes": [
              { "name": "Kansas City Chiefs", "price": -140 },
              { "name": "Baltimore Ravens", "price": 120 }
            ]
          }
        ]
      }
    ]
  },
  {
    "id": "b7a4c1",
    "sport_key": "americanfootball_nfl",
    "home_team": "Green Bay Packers",
    "away_team": "Chicago Bears",
    "bookmakers": []
  }
]"#;

#[test]
fn test_parse_odds_api_payload() {
    let matches = parse_matches(PAYLOAD).unwrap();
    assert_eq!(matches.len(), 2);

    let chiefs = &matches[0];
    assert_eq!(chiefs.sport_key.as_deref(), Some("americanfootball_nfl"));
    assert!(chiefs.commence_time.is_some());
    assert_eq!(chiefs.bookmakers.len(), 2);

    let spread = chiefs.bookmakers[0]
        .outcome(MarketType::Spreads, "Baltimore Ravens")
        .unwrap();
    assert_eq!(spread.american(), Ok(-110));
    assert_eq!(spread.point, Some(dec!(3.5)));
}

#[test]
fn test_spreads_board_from_payload() {
    let matches = parse_matches(PAYLOAD).unwrap();
    let params = BoardParams::new(MarketType::Spreads).with_bookmakers(["draftkings", "fanduel"]);
    let board = BoardBuilder::new().build(&matches, &params);

    let chiefs = &board.matches[0];
    // -110 / -110 splits evenly once the vig is removed
    assert_eq!(chiefs.consensus.home_prob, dec!(0.5));
    assert_eq!(chiefs.consensus.away_prob, dec!(0.5));
    assert_eq!(chiefs.consensus.bookmakers_used, 1);

    let dk = chiefs.home.cell("draftkings").unwrap().data().unwrap();
    assert_eq!(dk.point, Some(dec!(-3.5)));
    assert!(dk.is_best_odds);
    // FanDuel has no spreads market
    assert_eq!(chiefs.home.cell("fanduel"), Some(&OddsCell::Unavailable));

    // Match without bookmakers renders but has no estimate
    let packers = &board.matches[1];
    assert!(packers.consensus.is_empty());

    let table = render_table(&board);
    assert!(table.contains("Market: Spread (spreads)"));
    assert!(table.contains("(-3.5) -110"));
    assert!(table.contains("Green Bay Packers vs Chicago Bears"));
}

#[test]
fn test_board_json_output() {
    let matches = parse_matches(PAYLOAD).unwrap();
    let params = BoardParams::new(MarketType::H2h)
        .with_bookmakers(["draftkings"])
        .with_bankroll(dec!(10000));
    let board = BoardBuilder::new().build(&matches, &params);

    let json = serde_json::to_value(&board).unwrap();
    assert_eq!(json["market"], "h2h");
    assert_eq!(json["columns"][0]["key"], "draftkings");

    let dk = &json["matches"][0]["home"]["cells"]["draftkings"];
    assert_eq!(dk["status"], "available");
    assert_eq!(dk["data"]["odds"], -150);
    assert!(dk["data"].get("point").is_none());

    let fd = &json["matches"][0]["home"]["cells"]["fanduel"];
    assert_eq!(fd["status"], "unavailable");
}

fn payload_with_away_price(price: &str) -> String {
    format!(
        r#"[
          {{
            "id": "m1",
            "home_team": "Denver Nuggets",
            "away_team": "Utah Jazz",
            "bookmakers": [
              {{ "key": "dk", "title": "DraftKings", "markets": [{{ "key": "h2h", "outcomes": [
                {{ "name": "Denver Nuggets", "price": -200 }},
                {{ "name": "Utah Jazz", "price": 170 }}
              ]}}]}}
            ]
          }},
          {{
            "id": "m2",
            "home_team": "Phoenix Suns",
            "away_team": "Dallas Mavericks",
            "bookmakers": [
              {{ "key": "dk", "title": "DraftKings", "markets": [{{ "key": "h2h", "outcomes": [
                {{ "name": "Phoenix Suns", "price": -150 }},
                {{ "name": "Dallas Mavericks", "price": 130 }}
              ]}}]}},
              {{ "key": "fd", "title": "FanDuel", "markets": [{{ "key": "h2h", "outcomes": [
                {{ "name": "Phoenix Suns", "price": -140 }},
                {{ "name": "Dallas Mavericks", "price": {price} }}
              ]}}]}}
            ]
          }}
        ]"#
    )
}

#[test]
fn test_unusable_price_only_drops_that_quote() {
    for price in ["null", "-110.5", r#""N/A""#] {
        let matches = parse_matches(&payload_with_away_price(price)).unwrap();
        assert_eq!(matches.len(), 2, "price {price}");

        let params = BoardParams::new(MarketType::H2h).with_bookmakers(["dk", "fd"]);
        let board = BoardBuilder::new().build(&matches, &params);

        let nuggets = &board.matches[0];
        assert_eq!(nuggets.consensus.bookmakers_used, 1);
        assert!(nuggets.home.cell("dk").unwrap().is_available());

        // FanDuel drops out of consensus; its other side still renders
        let suns = &board.matches[1];
        assert_eq!(suns.consensus.bookmakers_used, 1, "price {price}");
        assert_eq!(suns.away.cell("fd"), Some(&OddsCell::Unavailable));
        assert!(suns.home.cell("fd").unwrap().is_available());
        assert!(suns.away.cell("dk").unwrap().is_available());

        let table = render_table(&board);
        assert!(table.contains("Phoenix Suns vs Dallas Mavericks"));
        assert!(table.contains("N/A"));
    }
}

#[test]
fn test_malformed_payload_is_decode_error() {
    let err = parse_matches(r#"[{"id": "x", "home_team": "A"}]"#).unwrap_err();
    assert!(matches!(err, FeedError::Decode(_)));
}

#[tokio::test]
async fn test_json_file_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PAYLOAD.as_bytes()).unwrap();

    let source = JsonFileSource::new(file.path());
    let matches = source
        .fetch_odds("americanfootball_nfl", MarketType::H2h)
        .await
        .unwrap();
    assert_eq!(matches.len(), 2);
}
