// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Amount/date cells that would fail aggregation
    let mut stmt = conn.prepare("SELECT id, date, amount FROM transactions ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let amount: String = r.get(2)?;
        if let Err(e) = engine::require_amount(id, &amount) {
            rows.push(vec!["malformed_amount".into(), e.to_string()]);
        }
        if let Err(e) = engine::require_date(id, &date) {
            rows.push(vec!["malformed_date".into(), e.to_string()]);
        }
    }

    // 2) Transactions pointing at contacts that no longer exist
    let mut stmt2 = conn.prepare(
        "SELECT t.id FROM transactions t LEFT JOIN contacts c ON t.contact_id=c.id
         WHERE t.contact_id IS NOT NULL AND c.id IS NULL",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["orphaned_contact_ref".into(), format!("transaction {}", id)]);
    }

    // 3) Transactions pointing at deleted categories
    let mut stmt3 = conn.prepare(
        "SELECT t.id FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.category_id IS NOT NULL AND c.id IS NULL",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["orphaned_category_ref".into(), format!("transaction {}", id)]);
    }

    // 4) Contacts with blank names
    let mut stmt4 = conn.prepare("SELECT id FROM contacts WHERE trim(name)=''")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["blank_contact_name".into(), format!("contact {}", id)]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
