// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::models::{Contact, Profile, Transaction};
use crate::store::{self, FlowKind};
use crate::utils::{currency_symbol, fmt_money, fmt_signed, load_profile, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;
use std::fmt::Write;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("data", sub)) => export_data(conn, sub),
        _ => Ok(()),
    }
}

fn export_data(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let profile = load_profile(conn)?;
    let txs = store::list_transactions(conn)?;
    let contacts = store::list_contacts(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["Date", "Contact", "Amount", "Type", "Category", "Description"])?;
            // store snapshot is newest first; exports run oldest first
            for t in txs.iter().rev() {
                wtr.write_record([
                    t.date.to_string(),
                    t.contact_name.clone().unwrap_or_else(|| "Unknown".to_string()),
                    t.amount.abs().to_string(),
                    FlowKind::of(t.amount).as_str().to_string(),
                    t.category_name.clone().unwrap_or_default(),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let doc = json!({
                "profile": profile,
                "transactions": txs,
                "contacts": contacts,
                "exported_at": chrono::Utc::now().to_rfc3339(),
            });
            std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
        }
        "text" => {
            std::fs::write(out, text_report(&profile, &txs, &contacts)?)?;
        }
        _ => {
            anyhow::bail!("Unknown format: {} (use csv|json|text)", fmt);
        }
    }
    println!("Exported data to {}", out);
    Ok(())
}

fn text_report(profile: &Profile, txs: &[Transaction], contacts: &[Contact]) -> Result<String> {
    let sym = currency_symbol(&profile.base_currency);
    let totals = engine::totals(txs);
    let mut out = String::new();

    writeln!(out, "Tallybook report")?;
    if !profile.display_name.is_empty() {
        writeln!(out, "Account: {}", profile.display_name)?;
    }
    writeln!(out, "Currency: {}", profile.base_currency)?;
    writeln!(out)?;

    writeln!(
        out,
        "{}",
        pretty_table(
            &["Total Given", "Total Received", "Net Balance", "Active Contacts"],
            vec![vec![
                fmt_money(&totals.total_given, sym),
                fmt_money(&totals.total_received, sym),
                fmt_signed(&totals.net_balance, sym),
                engine::count_active(contacts).to_string(),
            ]],
        )
    )?;

    let balance_rows: Vec<Vec<String>> = contacts
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.phone.clone().unwrap_or_default(),
                fmt_signed(&c.balance, sym),
            ]
        })
        .collect();
    writeln!(
        out,
        "{}",
        pretty_table(&["Contact", "Phone", "Balance"], balance_rows)
    )?;

    let tx_rows: Vec<Vec<String>> = txs
        .iter()
        .rev()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.contact_name.clone().unwrap_or_else(|| "Unknown".to_string()),
                fmt_money(&t.amount, sym),
                FlowKind::of(t.amount).as_str().to_string(),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    writeln!(
        out,
        "{}",
        pretty_table(&["Date", "Contact", "Amount", "Type", "Description"], tx_rows)
    )?;

    Ok(out)
}
