// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{self, Direction};
use crate::models::Transaction;
use crate::store::{self, FlowKind};
use crate::utils::{currency_symbol, fmt_money, fmt_signed, get_base_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

const TOP_LIMIT: i64 = 4;
const RECENT_LIMIT: usize = 5;

#[derive(Serialize)]
struct DashboardView {
    totals: engine::Totals,
    active_contacts: usize,
    top_owed: Vec<engine::RankedContact>,
    top_owing: Vec<engine::RankedContact>,
    recent: Vec<Transaction>,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");

    let txs = store::list_transactions(conn)?;
    let contacts = store::list_contacts(conn)?;

    let view = DashboardView {
        totals: engine::totals(&txs),
        active_contacts: engine::count_active(&contacts),
        top_owed: engine::rank_contacts(&contacts, Direction::OwedToUser, TOP_LIMIT)?,
        top_owing: engine::rank_contacts(&contacts, Direction::UserOwes, TOP_LIMIT)?,
        recent: txs.iter().take(RECENT_LIMIT).cloned().collect(),
    };
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    let sym = currency_symbol(&get_base_currency(conn)?);
    println!(
        "{}",
        pretty_table(
            &["Total Given", "Total Received", "Net Balance", "Active Contacts"],
            vec![vec![
                fmt_money(&view.totals.total_given, sym),
                fmt_money(&view.totals.total_received, sym),
                fmt_signed(&view.totals.net_balance, sym),
                view.active_contacts.to_string(),
            ]],
        )
    );

    let owed_rows: Vec<Vec<String>> = view
        .top_owed
        .iter()
        .map(|r| vec![r.name.clone(), fmt_money(&r.amount, sym)])
        .collect();
    println!("{}", pretty_table(&["They owe you", "Amount"], owed_rows));

    let owing_rows: Vec<Vec<String>> = view
        .top_owing
        .iter()
        .map(|r| vec![r.name.clone(), fmt_money(&r.amount, sym)])
        .collect();
    println!("{}", pretty_table(&["You owe them", "Amount"], owing_rows));

    let recent_rows: Vec<Vec<String>> = view
        .recent
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.contact_name.clone().unwrap_or_else(|| "Unknown".to_string()),
                fmt_signed(&t.amount, sym),
                FlowKind::of(t.amount).as_str().to_string(),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Contact", "Amount", "Kind", "Description"],
            recent_rows,
        )
    );
    Ok(())
}
