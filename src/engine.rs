// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Contact, Transaction};

/// Contract violations surfaced by the aggregation engine. None of these
/// are recoverable here; callers get the full error rather than a silent
/// zero.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("record {id}: {field} '{value}' is missing or unparseable")]
    MalformedRecord {
        id: i64,
        field: &'static str,
        value: String,
    },
    #[error("unknown date range '{0}', expected all|week|month|quarter|year")]
    InvalidRange(String),
    #[error("invalid limit {0}, must be zero or positive")]
    InvalidLimit(i64),
}

/// Parses an amount cell as loaded from the store. Amounts live as TEXT
/// in SQLite; a blank or non-numeric cell is a data-integrity fault.
pub fn require_amount(id: i64, raw: &str) -> Result<Decimal, EngineError> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| EngineError::MalformedRecord {
            id,
            field: "amount",
            value: raw.to_string(),
        })
}

/// Parses a date cell (`YYYY-MM-DD`) as loaded from the store.
pub fn require_date(id: i64, raw: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| EngineError::MalformedRecord {
        id,
        field: "date",
        value: raw.to_string(),
    })
}

/// Signed sum of a contact's transactions. Positive means the contact
/// owes the user, negative means the user owes the contact.
pub fn contact_balance(txs: &[Transaction], contact_id: i64) -> Decimal {
    txs.iter()
        .filter(|t| t.contact_id == Some(contact_id))
        .map(|t| t.amount)
        .sum()
}

/// Fills in every contact's derived balance from the transaction
/// snapshot. This is the only place balances come from.
pub fn with_balances(mut contacts: Vec<Contact>, txs: &[Transaction]) -> Vec<Contact> {
    for c in &mut contacts {
        c.balance = contact_balance(txs, c.id);
    }
    contacts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total_given: Decimal,
    pub total_received: Decimal,
    pub net_balance: Decimal,
}

/// Sign-split sums over the snapshot: given is the magnitude of all
/// outflows, received the sum of all inflows, net their difference.
pub fn totals(txs: &[Transaction]) -> Totals {
    let mut given = Decimal::ZERO;
    let mut received = Decimal::ZERO;
    for t in txs {
        if t.amount < Decimal::ZERO {
            given += -t.amount;
        } else {
            received += t.amount;
        }
    }
    Totals {
        total_given: given,
        total_received: received,
        net_balance: received - given,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    All,
    Week,
    Month,
    Quarter,
    Year,
}

impl DateRange {
    /// Lower bound relative to `now`, or None when unbounded.
    pub fn start(self, now: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateRange::All => None,
            DateRange::Week => now.checked_sub_days(Days::new(7)),
            DateRange::Month => now.checked_sub_months(Months::new(1)),
            DateRange::Quarter => now.checked_sub_months(Months::new(3)),
            DateRange::Year => now.checked_sub_months(Months::new(12)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Week => "week",
            DateRange::Month => "month",
            DateRange::Quarter => "quarter",
            DateRange::Year => "year",
        }
    }
}

impl FromStr for DateRange {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(DateRange::All),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            "quarter" => Ok(DateRange::Quarter),
            "year" => Ok(DateRange::Year),
            other => Err(EngineError::InvalidRange(other.to_string())),
        }
    }
}

/// Transactions on or after the range's start date. `now` is explicit so
/// callers control the clock.
pub fn filter_by_range(txs: &[Transaction], range: DateRange, now: NaiveDate) -> Vec<Transaction> {
    match range.start(now) {
        None => txs.to_vec(),
        Some(start) => txs.iter().filter(|t| t.date >= start).cloned().collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub month: u32,
    pub given: Decimal,
    pub received: Decimal,
}

/// Given/received per calendar month of `year`: always 12 entries,
/// Jan through Dec, zero-filled. Values are rounded to whole currency
/// units, halves away from zero, so report output is reproducible.
pub fn monthly_breakdown(txs: &[Transaction], year: i32) -> Vec<MonthTotals> {
    (1..=12)
        .map(|month| {
            let in_month: Vec<Transaction> = txs
                .iter()
                .filter(|t| t.date.year() == year && t.date.month() == month)
                .cloned()
                .collect();
            let t = totals(&in_month);
            MonthTotals {
                month,
                given: t
                    .total_given
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
                received: t
                    .total_received
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Contacts with a positive balance: they owe the user.
    OwedToUser,
    /// Contacts with a negative balance: the user owes them.
    UserOwes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedContact {
    pub name: String,
    pub amount: Decimal,
}

/// Top contacts by balance in the given direction. Amounts are reported
/// as magnitudes. Equal balances keep their input order (the sort is
/// stable), and the result holds min(limit, matches) entries.
pub fn rank_contacts(
    contacts: &[Contact],
    direction: Direction,
    limit: i64,
) -> Result<Vec<RankedContact>, EngineError> {
    if limit < 0 {
        return Err(EngineError::InvalidLimit(limit));
    }
    let mut matched: Vec<&Contact> = contacts
        .iter()
        .filter(|c| match direction {
            Direction::OwedToUser => c.balance > Decimal::ZERO,
            Direction::UserOwes => c.balance < Decimal::ZERO,
        })
        .collect();
    match direction {
        Direction::OwedToUser => matched.sort_by(|a, b| b.balance.cmp(&a.balance)),
        Direction::UserOwes => matched.sort_by(|a, b| a.balance.cmp(&b.balance)),
    }
    Ok(matched
        .into_iter()
        .take(limit as usize)
        .map(|c| RankedContact {
            name: c.name.clone(),
            amount: c.balance.abs(),
        })
        .collect())
}

/// Contacts whose balance is not exactly zero. Settled contacts do not
/// count.
pub fn count_active(contacts: &[Contact]) -> usize {
    contacts.iter().filter(|c| !c.balance.is_zero()).count()
}
