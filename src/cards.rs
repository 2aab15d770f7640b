//! Card and ruling records.
//!
//! Both shapes are built from CSV rows through [`FromRecord`]. Card fields are
//! kept as opaque strings exactly as curated; only the ruling id is typed.

use crate::csv::{self, CsvError, FromRecord, Record};
use serde::{Deserialize, Serialize};

/// Card CSV columns, in the order [`Card::to_row`] writes them.
pub const CARD_HEADERS: [&str; 6] = ["id", "name", "kind", "type", "effect", "tags"];

pub const RULING_ID: &str = "裁定ID";
pub const RULING_CARD: &str = "該当カード";
pub const RULING_CONTENT: &str = "内容";

/// Ruling CSV columns, in the order [`Ruling::to_row`] writes them.
pub const RULING_HEADERS: [&str; 3] = [RULING_ID, RULING_CARD, RULING_CONTENT];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    /// Broad category (unit, spell, field, ...). Drives grouping on the index page.
    pub kind: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub effect: String,
    /// Free-form tag string; see [`Card::tag_list`].
    pub tags: String,
}

impl Card {
    /// Individual tags, split on whitespace, `|` and the ideographic comma.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(|c: char| c.is_whitespace() || c == '|' || c == '、')
            .filter(|t| !t.is_empty())
            .collect()
    }

    pub fn to_row(&self) -> [&str; 6] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.kind.as_str(),
            self.card_type.as_str(),
            self.effect.as_str(),
            self.tags.as_str(),
        ]
    }
}

impl FromRecord for Card {
    const REQUIRED: &'static [&'static str] = &CARD_HEADERS;

    fn from_record(record: &Record) -> Result<Self, CsvError> {
        Ok(Card {
            id: record.get_or_empty("id").to_string(),
            name: record.get_or_empty("name").to_string(),
            kind: record.get_or_empty("kind").to_string(),
            card_type: record.get_or_empty("type").to_string(),
            effect: record.get_or_empty("effect").to_string(),
            tags: record.get_or_empty("tags").to_string(),
        })
    }
}

/// An official clarification attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruling {
    pub id: u32,
    /// Card reference as written in the sheet: a card id or a card name.
    pub card: String,
    pub content: String,
}

impl Ruling {
    pub fn applies_to(&self, card: &Card) -> bool {
        self.card == card.id || self.card == card.name
    }

    pub fn to_row(&self) -> [String; 3] {
        [self.id.to_string(), self.card.clone(), self.content.clone()]
    }
}

impl FromRecord for Ruling {
    const REQUIRED: &'static [&'static str] = &RULING_HEADERS;

    fn from_record(record: &Record) -> Result<Self, CsvError> {
        let raw = record.get_or_empty(RULING_ID);
        let id = raw.parse::<u32>().map_err(|e| CsvError::InvalidField {
            line: record.line,
            column: RULING_ID.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Ruling {
            id,
            card: record.get_or_empty(RULING_CARD).to_string(),
            content: record.get_or_empty(RULING_CONTENT).to_string(),
        })
    }
}

pub fn parse_cards(text: &str) -> Result<Vec<Card>, CsvError> {
    csv::parse(text)
}

pub fn parse_rulings(text: &str) -> Result<Vec<Ruling>, CsvError> {
    csv::parse(text)
}

/// Format cards back into CSV with the standard header.
pub fn write_cards(cards: &[Card]) -> String {
    let rows: Vec<[&str; 6]> = cards.iter().map(Card::to_row).collect();
    csv::write_table(&CARD_HEADERS, &rows)
}

/// Group cards by kind, keeping both kinds and cards in source order.
pub fn group_by_kind(cards: &[Card]) -> Vec<(&str, Vec<&Card>)> {
    let mut groups: Vec<(&str, Vec<&Card>)> = Vec::new();
    for card in cards {
        match groups.iter_mut().find(|(kind, _)| *kind == card.kind) {
            Some((_, members)) => members.push(card),
            None => groups.push((card.kind.as_str(), vec![card])),
        }
    }
    groups
}

pub fn rulings_for<'a>(rulings: &'a [Ruling], card: &Card) -> Vec<&'a Ruling> {
    rulings.iter().filter(|r| r.applies_to(card)).collect()
}

/// Resolve a ruling's card reference, trying ids before names.
pub fn find_card<'a>(cards: &'a [Card], reference: &str) -> Option<&'a Card> {
    cards
        .iter()
        .find(|c| c.id == reference)
        .or_else(|| cards.iter().find(|c| c.name == reference))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, name: &str, kind: &str) -> Card {
        Card {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            card_type: "normal".to_string(),
            effect: String::new(),
            tags: String::new(),
        }
    }

    #[test]
    fn parses_quoted_commas() {
        let text = "id,name,kind,type,effect,tags\n\
                    1,\"Rose, Thorn\",unit,normal,\"draw a card, then discard\",common";
        let cards = parse_cards(text).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Rose, Thorn");
        assert_eq!(cards[0].effect, "draw a card, then discard");
        assert_eq!(cards[0].tags, "common");
    }

    #[test]
    fn parses_escaped_quotes() {
        let text = "id,name,kind,type,effect,tags\n\
                    7,Herald,unit,normal,\"She said \"\"hi\"\" and left\",";
        let cards = parse_cards(text).unwrap();
        assert_eq!(cards[0].effect, "She said \"hi\" and left");
        assert_eq!(cards[0].tags, "");
    }

    #[test]
    fn type_column_maps_to_card_type() {
        let cards = parse_cards("id,name,kind,type,effect,tags\n1,a,b,quick,e,t").unwrap();
        assert_eq!(cards[0].card_type, "quick");
    }

    #[test]
    fn missing_tags_header_is_reported() {
        let err = parse_cards("id,name,kind,type,effect\n1,a,b,c,d").unwrap_err();
        assert_eq!(err, CsvError::MissingHeaders(vec!["tags".into()]));
    }

    #[test]
    fn several_missing_headers_are_all_reported() {
        let err = parse_cards("id,name,effect\n1,a,b").unwrap_err();
        assert_eq!(
            err,
            CsvError::MissingHeaders(vec!["kind".into(), "type".into(), "tags".into()])
        );
    }

    #[test]
    fn extra_columns_and_order_do_not_matter() {
        let text = "tags,effect,type,kind,name,id,artist\nt,e,ty,k,n,9,someone";
        let cards = parse_cards(text).unwrap();
        assert_eq!(cards[0].id, "9");
        assert_eq!(cards[0].name, "n");
        assert_eq!(cards[0].tags, "t");
    }

    #[test]
    fn cards_round_trip_through_csv() {
        let mut first = card("001", "Rose, Thorn", "unit");
        first.effect = "Say \"bloom\", then draw.".to_string();
        first.tags = "rose knight".to_string();
        let cards = vec![first, card("002", "Field", "field")];

        let text = write_cards(&cards);
        assert_eq!(parse_cards(&text).unwrap(), cards);
    }

    #[test]
    fn tag_list_splits_on_separators() {
        let mut c = card("1", "a", "unit");
        c.tags = "rose  knight|hero、starter".to_string();
        assert_eq!(c.tag_list(), vec!["rose", "knight", "hero", "starter"]);
        c.tags = String::new();
        assert!(c.tag_list().is_empty());
    }

    #[test]
    fn group_by_kind_keeps_first_seen_order() {
        let cards = vec![
            card("1", "a", "unit"),
            card("2", "b", "spell"),
            card("3", "c", "unit"),
        ];
        let groups = group_by_kind(&cards);
        let kinds: Vec<&str> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec!["unit", "spell"]);
        let unit_ids: Vec<&str> = groups[0].1.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(unit_ids, vec!["1", "3"]);
    }

    // =========================================================================
    // Rulings
    // =========================================================================

    #[test]
    fn parses_rulings() {
        let text = "裁定ID,該当カード,内容\n1,001,\"Applies on entry, too.\"\n2,Rose,Second";
        let rulings = parse_rulings(text).unwrap();
        assert_eq!(rulings.len(), 2);
        assert_eq!(rulings[0].id, 1);
        assert_eq!(rulings[0].card, "001");
        assert_eq!(rulings[0].content, "Applies on entry, too.");
    }

    #[test]
    fn non_numeric_ruling_id_is_error() {
        let text = "裁定ID,該当カード,内容\n1,a,b\nx2,a,b";
        let err = parse_rulings(text).unwrap_err();
        match err {
            CsvError::InvalidField {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, RULING_ID);
                assert_eq!(value, "x2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ruling_matches_card_by_id_or_name() {
        let rose = card("001", "Rose", "unit");
        let by_id = Ruling {
            id: 1,
            card: "001".into(),
            content: String::new(),
        };
        let by_name = Ruling {
            id: 2,
            card: "Rose".into(),
            content: String::new(),
        };
        let other = Ruling {
            id: 3,
            card: "Thorn".into(),
            content: String::new(),
        };
        assert!(by_id.applies_to(&rose));
        assert!(by_name.applies_to(&rose));
        assert!(!other.applies_to(&rose));

        let rulings = vec![by_id, other, by_name];
        let ids: Vec<u32> = rulings_for(&rulings, &rose).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn find_card_prefers_id() {
        let cards = vec![card("Rose", "First", "unit"), card("002", "Rose", "unit")];
        assert_eq!(find_card(&cards, "Rose").unwrap().name, "First");
        assert_eq!(find_card(&cards, "002").unwrap().id, "002");
        assert!(find_card(&cards, "nope").is_none());
    }

    #[test]
    fn rulings_round_trip_through_csv() {
        let rulings = vec![Ruling {
            id: 4,
            card: "Rose, Thorn".into(),
            content: "Counts as \"played\".".into(),
        }];
        let rows: Vec<[String; 3]> = rulings.iter().map(Ruling::to_row).collect();
        let text = csv::write_table(&RULING_HEADERS, &rows);
        assert_eq!(parse_rulings(&text).unwrap(), rulings);
    }
}
