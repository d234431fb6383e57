// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{currency_symbol, fmt_signed, get_base_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let phone = sub.get_one::<String>("phone").map(|s| s.as_str());
            let c = store::create_contact(conn, name, phone)?;
            println!("Added contact '{}'", c.name);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let c = store::contact_by_name(conn, name)?;
            let removed = store::delete_contact(conn, c.id)?;
            println!("Removed contact '{}' and {} transaction(s)", name, removed);
        }
        _ => {}
    }
    Ok(())
}

fn status(balance: &Decimal) -> &'static str {
    if *balance > Decimal::ZERO {
        "Owes you"
    } else if *balance < Decimal::ZERO {
        "You owe"
    } else {
        "Settled"
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let contacts = store::list_contacts(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &contacts)? {
        let sym = currency_symbol(&get_base_currency(conn)?);
        let rows: Vec<Vec<String>> = contacts
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.phone.clone().unwrap_or_default(),
                    fmt_signed(&c.balance, sym),
                    status(&c.balance).to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Phone", "Balance", "Status"], rows)
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let name = sub.get_one::<String>("name").unwrap();
    let contact = store::contact_by_name(conn, name)?;
    let history: Vec<_> = store::list_transactions(conn)?
        .into_iter()
        .filter(|t| t.contact_id == Some(contact.id))
        .collect();
    if maybe_print_json(
        json_flag,
        jsonl_flag,
        &json!({ "contact": contact, "transactions": history }),
    )? {
        return Ok(());
    }

    let sym = currency_symbol(&get_base_currency(conn)?);
    println!(
        "{} ({}): {} - {}",
        contact.name,
        contact.phone.as_deref().unwrap_or("no phone"),
        fmt_signed(&contact.balance, sym),
        status(&contact.balance)
    );
    let rows: Vec<Vec<String>> = history
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                fmt_signed(&t.amount, sym),
                t.category_name.clone().unwrap_or_default(),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Amount", "Category", "Description"], rows)
    );
    Ok(())
}
