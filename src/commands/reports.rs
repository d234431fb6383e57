// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{self, DateRange, Direction};
use crate::store;
use crate::utils::{
    currency_symbol, fmt_money, fmt_signed, get_base_currency, maybe_print_json, month_label,
    pretty_table,
};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("top", sub)) => top(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| chrono::Utc::now().date_naive().year());

    let txs = store::list_transactions(conn)?;
    let breakdown = engine::monthly_breakdown(&txs, year);
    if !maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        let rows: Vec<Vec<String>> = breakdown
            .iter()
            .map(|mt| {
                vec![
                    month_label(mt.month).to_string(),
                    mt.given.to_string(),
                    mt.received.to_string(),
                ]
            })
            .collect();
        println!("Monthly overview for {}", year);
        println!("{}", pretty_table(&["Month", "Given", "Received"], rows));
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let range = match sub.get_one::<String>("range") {
        Some(s) => s.parse::<DateRange>()?,
        None => DateRange::All,
    };
    let today = chrono::Utc::now().date_naive();

    let txs = store::list_transactions(conn)?;
    let in_range = engine::filter_by_range(&txs, range, today);
    let totals = engine::totals(&in_range);
    let contacts = store::list_contacts(conn)?;
    let active = engine::count_active(&contacts);

    if maybe_print_json(
        json_flag,
        jsonl_flag,
        &json!({
            "range": range.as_str(),
            "totals": totals,
            "active_contacts": active,
            "transactions": in_range.len(),
        }),
    )? {
        return Ok(());
    }

    let sym = currency_symbol(&get_base_currency(conn)?);
    println!("Summary ({})", range.as_str());
    println!(
        "{}",
        pretty_table(
            &["Total Given", "Total Received", "Net Balance", "Active Contacts"],
            vec![vec![
                fmt_money(&totals.total_given, sym),
                fmt_money(&totals.total_received, sym),
                fmt_signed(&totals.net_balance, sym),
                active.to_string(),
            ]],
        )
    );
    Ok(())
}

fn top(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let direction = match sub.get_one::<String>("direction").unwrap().as_str() {
        "owing" => Direction::UserOwes,
        _ => Direction::OwedToUser,
    };
    let limit = *sub.get_one::<i64>("limit").unwrap();

    let contacts = store::list_contacts(conn)?;
    let ranked = engine::rank_contacts(&contacts, direction, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &ranked)? {
        let sym = currency_symbol(&get_base_currency(conn)?);
        let header = match direction {
            Direction::OwedToUser => "They owe you",
            Direction::UserOwes => "You owe them",
        };
        let rows: Vec<Vec<String>> = ranked
            .iter()
            .map(|r| vec![r.name.clone(), fmt_money(&r.amount, sym)])
            .collect();
        println!("{}", pretty_table(&[header, "Amount"], rows));
    }
    Ok(())
}
