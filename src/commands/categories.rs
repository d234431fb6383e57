// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("INSERT INTO categories(name) VALUES (?1)", params![name])?;
            println!("Added category '{}'", name);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let mut stmt = conn.prepare("SELECT name FROM categories ORDER BY name")?;
            let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
            let mut names = Vec::new();
            for row in rows {
                names.push(row?);
            }
            if !maybe_print_json(json_flag, jsonl_flag, &names)? {
                let data = names.into_iter().map(|n| vec![n]).collect();
                println!("{}", pretty_table(&["Category"], data));
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = store::category_id_by_name(conn, name)?;
            // FK is ON DELETE SET NULL; count what gets detached first
            let detached: i64 = conn.query_row(
                "SELECT COUNT(*) FROM transactions WHERE category_id=?1",
                params![id],
                |r| r.get(0),
            )?;
            conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
            println!(
                "Removed category '{}' ({} transaction(s) left uncategorized)",
                name, detached
            );
        }
        _ => {}
    }
    Ok(())
}
