// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Days;
use rusqlite::Connection;
use tallybook::store::{self, FlowKind, NewTransaction};
use tallybook::{cli, commands::transactions, db};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO categories(name) VALUES ('Food')", [])
        .unwrap();
    let today = chrono::Utc::now().date_naive();
    let seed = [
        // (days back, amount, kind, contact, description)
        (40u64, "300", FlowKind::Given, "Emma", "Rent contribution"),
        (3, "120", FlowKind::Given, "Sarah", "Grocery run"),
        (2, "250", FlowKind::Received, "John", "Lunch payment"),
        (1, "80", FlowKind::Received, "Mike", "Movie tickets"),
    ];
    for (back, amount, kind, contact, description) in seed {
        store::create_transaction(
            &conn,
            NewTransaction {
                date: today.checked_sub_days(Days::new(back)).unwrap(),
                amount: amount.parse().unwrap(),
                kind,
                description: Some(description.to_string()),
                contact: Some(contact.to_string()),
                category: Some("Food".to_string()),
            },
        )
        .unwrap();
    }
    conn
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let m = list_matches(&["tallybook", "tx", "list", "--limit", "2"]);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows.len(), 2);
    // newest first
    assert_eq!(rows[0].contact, "Mike");
    assert_eq!(rows[1].contact, "John");
}

#[test]
fn list_week_range_drops_old_entries() {
    let conn = setup();
    let m = list_matches(&["tallybook", "tx", "list", "--range", "week"]);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.contact != "Emma"));
}

#[test]
fn list_search_matches_description_and_contact() {
    let conn = setup();
    let m = list_matches(&["tallybook", "tx", "list", "--search", "(?i)lunch"]);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].contact, "John");

    let m = list_matches(&["tallybook", "tx", "list", "--search", "Sar.h"]);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Grocery run");
}

#[test]
fn list_rejects_invalid_search_pattern() {
    let conn = setup();
    let m = list_matches(&["tallybook", "tx", "list", "--search", "(unclosed"]);
    assert!(transactions::query_rows(&conn, &m).is_err());
}

#[test]
fn list_filters_by_contact_and_reports_kind() {
    let conn = setup();
    let m = list_matches(&["tallybook", "tx", "list", "--contact", "Sarah"]);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "given");
    assert_eq!(rows[0].amount, "-120");
    assert_eq!(rows[0].category, "Food");
}
