//! Leaderboard CSV parsing.
//!
//! The expected input is a header line containing `username`, `displayName`,
//! `prize` and `bet` (any order, any case, extra columns allowed) followed by
//! one contestant per line. Fields are split on plain commas: quoting is not
//! supported, so values cannot contain commas.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::{ImporterError, Result};

const REQUIRED_COLUMNS: [&str; 4] = ["username", "displayname", "prize", "bet"];
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Scale of the stored `numeric(18,2)` amounts.
const AMOUNT_SCALE: u32 = 2;
/// Exclusive upper bound of a `numeric(18,2)` magnitude.
const AMOUNT_LIMIT: i64 = 10_000_000_000_000_000;

/// A contestant line as read from the CSV, before ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub username: String,
    pub display_name: String,
    pub prize: Decimal,
    pub bet: Decimal,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    username: usize,
    display_name: usize,
    prize: usize,
    bet: usize,
}

impl Columns {
    fn from_header(line: &str) -> Result<Self> {
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (index, field) in line.split(',').enumerate() {
            let mut name = field.trim();
            if index == 0 {
                name = name.trim_start_matches(BYTE_ORDER_MARK).trim();
            }
            let name = name.to_lowercase();

            if positions.contains_key(&name) {
                if REQUIRED_COLUMNS.contains(&name.as_str()) {
                    return Err(ImporterError::DuplicateColumn(field.trim().to_string()));
                }
                continue;
            }
            positions.insert(name, index);
        }

        let position = |name: &str| {
            positions
                .get(name)
                .copied()
                .ok_or(ImporterError::InvalidHeader)
        };

        Ok(Self {
            username: position("username")?,
            display_name: position("displayname")?,
            prize: position("prize")?,
            bet: position("bet")?,
        })
    }

    fn max_index(&self) -> usize {
        self.username
            .max(self.display_name)
            .max(self.prize)
            .max(self.bet)
    }
}

/// Parses leaderboard CSV text into contestant rows.
///
/// A header without data lines is valid and yields no rows. Data lines that
/// are too short or have a blank username are skipped.
pub fn parse(text: &str) -> Result<Vec<ParsedRow>> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines.next().ok_or(ImporterError::EmptyInput)?;
    let columns = Columns::from_header(header)?;

    let mut rows = Vec::new();
    for (number, line) in lines.enumerate() {
        match parse_line(line, &columns) {
            Some(row) => rows.push(row),
            None => debug!(row = number + 1, "Skipping CSV row"),
        }
    }

    Ok(rows)
}

fn parse_line(line: &str, columns: &Columns) -> Option<ParsedRow> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() <= columns.max_index() {
        return None;
    }

    let username = fields[columns.username].trim();
    if username.is_empty() {
        return None;
    }

    let display_name = match fields[columns.display_name].trim() {
        "" => username,
        name => name,
    };

    Some(ParsedRow {
        username: username.to_string(),
        display_name: display_name.to_string(),
        prize: parse_amount(fields[columns.prize]),
        bet: parse_amount(fields[columns.bet]),
    })
}

/// Parses a currency amount written with either `.` or `,` as the decimal
/// point.
///
/// Spaces are removed. When both separators appear, `.` groups thousands and
/// `,` is the decimal point (`15.000,50`); a lone `,` is the decimal point
/// (`15000,50`). Anything unparsable, or too large for `numeric(18,2)`,
/// becomes zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let compact: String = raw.trim().chars().filter(|c| *c != ' ').collect();

    let normalized = match (compact.contains('.'), compact.contains(',')) {
        (true, true) => compact.replace('.', "").replace(',', "."),
        (false, true) => compact.replace(',', "."),
        _ => compact,
    };

    parse_decimal(&normalized).unwrap_or(Decimal::ZERO)
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    let is_numeric = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    if value.is_empty() || !is_numeric {
        return None;
    }

    let amount = Decimal::from_str(value)
        .ok()?
        .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);

    (amount.abs() < Decimal::from(AMOUNT_LIMIT)).then_some(amount)
}
