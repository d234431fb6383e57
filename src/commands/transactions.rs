// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{self, DateRange};
use crate::store::{self, FlowKind, NewTransaction, TransactionPatch};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use regex::Regex;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind: FlowKind = sub.get_one::<String>("kind").unwrap().parse()?;
    let recorded = store::create_transaction(
        conn,
        NewTransaction {
            date,
            amount,
            kind,
            description: sub.get_one::<String>("description").cloned(),
            contact: sub.get_one::<String>("contact").cloned(),
            category: sub.get_one::<String>("category").cloned(),
        },
    )?;
    println!(
        "Recorded {} {} on {} ({})",
        kind.as_str(),
        amount,
        date,
        recorded.contact_name.as_deref().unwrap_or("Unknown")
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.contact.clone(),
                    r.amount.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Contact", "Amount", "Kind", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub contact: String,
    pub amount: String,
    pub kind: String,
    pub category: String,
    pub description: String,
}

/// Applies the list filters (range, contact, category, regex search,
/// limit) to the store snapshot, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut txs = store::list_transactions(conn)?;

    if let Some(r) = sub.get_one::<String>("range") {
        let range: DateRange = r.parse()?;
        let today = chrono::Utc::now().date_naive();
        txs = engine::filter_by_range(&txs, range, today);
    }
    if let Some(contact) = sub.get_one::<String>("contact") {
        txs.retain(|t| t.contact_name.as_deref() == Some(contact.as_str()));
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        txs.retain(|t| t.category_name.as_deref() == Some(cat.as_str()));
    }
    if let Some(pat) = sub.get_one::<String>("search") {
        let re = Regex::new(pat).with_context(|| format!("Invalid search pattern '{}'", pat))?;
        txs.retain(|t| {
            t.description.as_deref().is_some_and(|d| re.is_match(d))
                || t.contact_name.as_deref().is_some_and(|n| re.is_match(n))
        });
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            contact: t.contact_name.unwrap_or_else(|| "Unknown".to_string()),
            amount: t.amount.to_string(),
            kind: FlowKind::of(t.amount).as_str().to_string(),
            category: t.category_name.unwrap_or_default(),
            description: t.description.unwrap_or_default(),
        })
        .collect())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = TransactionPatch {
        amount: match sub.get_one::<String>("amount") {
            Some(s) => Some(parse_decimal(s)?),
            None => None,
        },
        date: match sub.get_one::<String>("date") {
            Some(s) => Some(parse_date(s)?),
            None => None,
        },
        description: sub.get_one::<String>("description").cloned(),
        category: sub.get_one::<String>("category").cloned(),
    };
    if patch.amount.is_none()
        && patch.date.is_none()
        && patch.description.is_none()
        && patch.category.is_none()
    {
        anyhow::bail!("Nothing to edit: pass --amount, --date, --category or --description");
    }
    let updated = store::update_transaction(conn, id, patch)?;
    println!("Updated transaction {}: {} on {}", id, updated.amount, updated.date);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    store::delete_transaction(conn, id)?;
    println!("Deleted transaction {}", id);
    Ok(())
}
