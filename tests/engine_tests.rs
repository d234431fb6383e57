// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook::engine::{self, DateRange, Direction, EngineError};
use tallybook::models::{Contact, Transaction};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: i64, date: &str, amount: &str, contact_id: Option<i64>) -> Transaction {
    Transaction {
        id,
        date: d(date),
        amount: dec(amount),
        description: None,
        contact_id,
        contact_name: None,
        category_id: None,
        category_name: None,
    }
}

fn contact(id: i64, name: &str, balance: &str) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        phone: None,
        balance: dec(balance),
    }
}

#[test]
fn totals_splits_given_and_received() {
    let txs = vec![
        tx(1, "2024-01-05", "-100", Some(1)),
        tx(2, "2024-01-06", "300", Some(1)),
        tx(3, "2024-01-07", "-50", Some(2)),
    ];
    let t = engine::totals(&txs);
    assert_eq!(t.total_given, dec("150"));
    assert_eq!(t.total_received, dec("300"));
    assert_eq!(t.net_balance, dec("150"));
}

#[test]
fn totals_empty_is_all_zero() {
    let t = engine::totals(&[]);
    assert_eq!(t.total_given, Decimal::ZERO);
    assert_eq!(t.total_received, Decimal::ZERO);
    assert_eq!(t.net_balance, Decimal::ZERO);
}

#[test]
fn net_balance_is_received_minus_given() {
    let txs = vec![
        tx(1, "2024-03-01", "-19.99", Some(1)),
        tx(2, "2024-03-02", "45.50", Some(2)),
        tx(3, "2024-03-03", "-0.01", None),
        tx(4, "2024-03-04", "12", None),
    ];
    let t = engine::totals(&txs);
    assert_eq!(t.net_balance, t.total_received - t.total_given);
}

#[test]
fn contact_balances_conserve_net_balance() {
    // Every transaction carries a contact, so per-contact balances must
    // add up to the overall net.
    let txs = vec![
        tx(1, "2024-01-01", "-100", Some(1)),
        tx(2, "2024-01-02", "250", Some(1)),
        tx(3, "2024-01-03", "-300", Some(2)),
        tx(4, "2024-01-04", "80", Some(3)),
    ];
    let sum = engine::contact_balance(&txs, 1)
        + engine::contact_balance(&txs, 2)
        + engine::contact_balance(&txs, 3);
    assert_eq!(sum, engine::totals(&txs).net_balance);
}

#[test]
fn contact_balance_is_zero_without_transactions() {
    let txs = vec![tx(1, "2024-01-01", "-100", Some(1))];
    assert_eq!(engine::contact_balance(&txs, 99), Decimal::ZERO);
}

#[test]
fn week_range_excludes_older_dates() {
    let txs = vec![
        tx(1, "2024-01-08", "10", None),
        tx(2, "2024-01-07", "20", None),
        tx(3, "2024-01-15", "30", None),
    ];
    let kept = engine::filter_by_range(&txs, DateRange::Week, d("2024-01-15"));
    let ids: Vec<i64> = kept.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn all_range_returns_input_unchanged() {
    let txs = vec![
        tx(1, "1999-06-01", "10", None),
        tx(2, "2024-01-15", "30", None),
    ];
    let kept = engine::filter_by_range(&txs, DateRange::All, d("2024-01-15"));
    assert_eq!(kept.len(), 2);
}

#[test]
fn quarter_range_starts_three_months_back() {
    let txs = vec![
        tx(1, "2023-10-15", "10", None),
        tx(2, "2023-10-14", "20", None),
    ];
    let kept = engine::filter_by_range(&txs, DateRange::Quarter, d("2024-01-15"));
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, 1);
}

#[test]
fn range_tokens_parse_and_reject() {
    assert_eq!("quarter".parse::<DateRange>().unwrap(), DateRange::Quarter);
    assert_eq!("ALL".parse::<DateRange>().unwrap(), DateRange::All);
    assert!(matches!(
        "fortnight".parse::<DateRange>(),
        Err(EngineError::InvalidRange(_))
    ));
}

#[test]
fn monthly_breakdown_always_returns_twelve_months() {
    let breakdown = engine::monthly_breakdown(&[], 2024);
    assert_eq!(breakdown.len(), 12);
    for (i, mt) in breakdown.iter().enumerate() {
        assert_eq!(mt.month, i as u32 + 1);
        assert_eq!(mt.given, Decimal::ZERO);
        assert_eq!(mt.received, Decimal::ZERO);
    }
}

#[test]
fn monthly_breakdown_buckets_by_month_and_rounds_half_up() {
    let txs = vec![
        tx(1, "2024-02-03", "-10.5", None),
        tx(2, "2024-02-20", "2.4", None),
        tx(3, "2024-11-01", "99.5", None),
        // different year, must not leak in
        tx(4, "2023-02-10", "-500", None),
    ];
    let breakdown = engine::monthly_breakdown(&txs, 2024);
    assert_eq!(breakdown[1].given, dec("11"));
    assert_eq!(breakdown[1].received, dec("2"));
    assert_eq!(breakdown[10].received, dec("100"));
    assert_eq!(breakdown[0].given, Decimal::ZERO);
}

#[test]
fn rank_limit_zero_is_empty() {
    let contacts = vec![contact(1, "A", "250"), contact(2, "B", "-300")];
    let ranked = engine::rank_contacts(&contacts, Direction::OwedToUser, 0).unwrap();
    assert!(ranked.is_empty());
}

#[test]
fn rank_limit_beyond_matches_returns_all() {
    let contacts = vec![contact(1, "A", "250"), contact(2, "B", "-300")];
    let owed = engine::rank_contacts(&contacts, Direction::OwedToUser, 5).unwrap();
    assert_eq!(owed.len(), 1);
    assert_eq!(owed[0].name, "A");
    assert_eq!(owed[0].amount, dec("250"));

    let owing = engine::rank_contacts(&contacts, Direction::UserOwes, 5).unwrap();
    assert_eq!(owing.len(), 1);
    assert_eq!(owing[0].name, "B");
    assert_eq!(owing[0].amount, dec("300"));
}

#[test]
fn rank_orders_by_magnitude() {
    let contacts = vec![
        contact(1, "Small", "10"),
        contact(2, "Big", "500"),
        contact(3, "Mid", "50"),
        contact(4, "DeepDebt", "-900"),
        contact(5, "ShallowDebt", "-5"),
    ];
    let owed = engine::rank_contacts(&contacts, Direction::OwedToUser, 10).unwrap();
    let names: Vec<&str> = owed.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Big", "Mid", "Small"]);

    let owing = engine::rank_contacts(&contacts, Direction::UserOwes, 10).unwrap();
    let names: Vec<&str> = owing.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["DeepDebt", "ShallowDebt"]);
}

#[test]
fn rank_keeps_input_order_on_ties() {
    let contacts = vec![
        contact(1, "First", "50"),
        contact(2, "Second", "50"),
        contact(3, "Third", "50"),
    ];
    let ranked = engine::rank_contacts(&contacts, Direction::OwedToUser, 2).unwrap();
    let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[test]
fn rank_rejects_negative_limit() {
    let contacts = vec![contact(1, "A", "250")];
    assert!(matches!(
        engine::rank_contacts(&contacts, Direction::OwedToUser, -1),
        Err(EngineError::InvalidLimit(-1))
    ));
}

#[test]
fn count_active_skips_settled_contacts() {
    let contacts = vec![
        contact(1, "A", "10"),
        contact(2, "B", "0"),
        contact(3, "C", "-5"),
    ];
    assert_eq!(engine::count_active(&contacts), 2);
    assert_eq!(engine::count_active(&[]), 0);
}

#[test]
fn operations_are_idempotent_over_a_snapshot() {
    let txs = vec![
        tx(1, "2024-01-05", "-100", Some(1)),
        tx(2, "2024-01-06", "300", Some(2)),
    ];
    let contacts = vec![contact(1, "A", "-100"), contact(2, "B", "300")];
    assert_eq!(engine::totals(&txs), engine::totals(&txs));
    assert_eq!(
        engine::monthly_breakdown(&txs, 2024),
        engine::monthly_breakdown(&txs, 2024)
    );
    assert_eq!(
        engine::rank_contacts(&contacts, Direction::UserOwes, 3).unwrap(),
        engine::rank_contacts(&contacts, Direction::UserOwes, 3).unwrap()
    );
}

#[test]
fn with_balances_derives_from_snapshot() {
    let txs = vec![
        tx(1, "2024-01-01", "-100", Some(1)),
        tx(2, "2024-01-02", "250", Some(1)),
        tx(3, "2024-01-03", "-300", Some(2)),
    ];
    let contacts = vec![contact(1, "A", "0"), contact(2, "B", "0"), contact(3, "C", "0")];
    let derived = engine::with_balances(contacts, &txs);
    assert_eq!(derived[0].balance, dec("150"));
    assert_eq!(derived[1].balance, dec("-300"));
    assert_eq!(derived[2].balance, Decimal::ZERO);
}

#[test]
fn malformed_cells_are_rejected_not_zeroed() {
    assert!(matches!(
        engine::require_amount(7, "abc"),
        Err(EngineError::MalformedRecord { id: 7, field: "amount", .. })
    ));
    assert!(matches!(
        engine::require_amount(8, ""),
        Err(EngineError::MalformedRecord { .. })
    ));
    assert_eq!(engine::require_amount(9, " -12.34 ").unwrap(), dec("-12.34"));

    assert!(matches!(
        engine::require_date(7, "not-a-date"),
        Err(EngineError::MalformedRecord { id: 7, field: "date", .. })
    ));
    assert_eq!(engine::require_date(9, "2024-02-29").unwrap(), d("2024-02-29"));
}
