// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::engine::{self, EngineError};
use crate::models::{Contact, Transaction};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("transient storage failure, retry may succeed: {0}")]
    Transient(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error(transparent)]
    Malformed(#[from] EngineError),
    #[error("storage failure: {0}")]
    Database(rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(err, _) = &e {
            match err.code {
                ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::SystemIoFailure => return StoreError::Transient(e.to_string()),
                ErrorCode::ReadOnly | ErrorCode::PermissionDenied => {
                    return StoreError::PermissionDenied(e.to_string());
                }
                _ => {}
            }
        }
        StoreError::Database(e)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Whether money moved out to or in from the counterparty. Applies the
/// ledger's sign convention: given is stored negative, received positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Given,
    Received,
}

impl FlowKind {
    pub fn signed(self, magnitude: Decimal) -> Decimal {
        match self {
            FlowKind::Given => -magnitude.abs(),
            FlowKind::Received => magnitude.abs(),
        }
    }

    pub fn of(amount: Decimal) -> FlowKind {
        if amount < Decimal::ZERO {
            FlowKind::Given
        } else {
            FlowKind::Received
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlowKind::Given => "given",
            FlowKind::Received => "received",
        }
    }
}

impl std::str::FromStr for FlowKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "given" => Ok(FlowKind::Given),
            "received" => Ok(FlowKind::Received),
            other => Err(StoreError::Validation(format!(
                "unknown kind '{}', expected given|received",
                other
            ))),
        }
    }
}

/// Input for a new ledger entry. `amount` is a positive magnitude; the
/// kind decides the stored sign. A named contact is created on the fly
/// when it does not exist yet; a category must already exist.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: FlowKind,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub category: Option<String>,
}

/// Fields an edit may touch. The contact link and the sign convention
/// are fixed at creation; an amount patch updates the magnitude only.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
}

const TX_SELECT: &str = "SELECT t.id, t.date, t.amount, t.description, t.contact_id, p.name, \
     t.category_id, c.name \
     FROM transactions t \
     LEFT JOIN contacts p ON t.contact_id = p.id \
     LEFT JOIN categories c ON t.category_id = c.id";

type RawTx = (
    i64,
    String,
    String,
    Option<String>,
    Option<i64>,
    Option<String>,
    Option<i64>,
    Option<String>,
);

fn read_tx_row(r: &rusqlite::Row) -> rusqlite::Result<RawTx> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
    ))
}

fn materialize(raw: RawTx) -> Result<Transaction> {
    let (id, date, amount, description, contact_id, contact_name, category_id, category_name) = raw;
    Ok(Transaction {
        id,
        date: engine::require_date(id, &date)?,
        amount: engine::require_amount(id, &amount)?,
        description,
        contact_id,
        contact_name,
        category_id,
        category_name,
    })
}

/// Full transaction snapshot, newest first, joined with contact and
/// category names and validated through the engine's record checks.
pub fn list_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let sql = format!("{} ORDER BY t.date DESC, t.id DESC", TX_SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], read_tx_row)?;
    let mut txs = Vec::new();
    for row in rows {
        txs.push(materialize(row?)?);
    }
    Ok(txs)
}

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Transaction> {
    let sql = format!("{} WHERE t.id=?1", TX_SELECT);
    let raw = conn
        .query_row(&sql, params![id], read_tx_row)
        .optional()?
        .ok_or(StoreError::NotFound {
            entity: "transaction",
            key: id.to_string(),
        })?;
    materialize(raw)
}

pub fn create_transaction(conn: &Connection, new: NewTransaction) -> Result<Transaction> {
    if new.amount <= Decimal::ZERO {
        return Err(StoreError::Validation(format!(
            "amount must be positive, got {}",
            new.amount
        )));
    }
    let contact_id = match new.contact.as_deref() {
        Some(name) => Some(find_or_create_contact(conn, name, None)?),
        None => None,
    };
    let category_id = match new.category.as_deref() {
        Some(name) => Some(category_id_by_name(conn, name)?),
        None => None,
    };
    let signed = new.kind.signed(new.amount);
    conn.execute(
        "INSERT INTO transactions(date, amount, description, contact_id, category_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            new.date.to_string(),
            signed.to_string(),
            new.description,
            contact_id,
            category_id
        ],
    )?;
    get_transaction(conn, conn.last_insert_rowid())
}

pub fn update_transaction(
    conn: &Connection,
    id: i64,
    patch: TransactionPatch,
) -> Result<Transaction> {
    let current = get_transaction(conn, id)?;
    if let Some(mag) = patch.amount {
        if mag <= Decimal::ZERO {
            return Err(StoreError::Validation(format!(
                "amount must be positive, got {}",
                mag
            )));
        }
        let signed = FlowKind::of(current.amount).signed(mag);
        conn.execute(
            "UPDATE transactions SET amount=?1 WHERE id=?2",
            params![signed.to_string(), id],
        )?;
    }
    if let Some(date) = patch.date {
        conn.execute(
            "UPDATE transactions SET date=?1 WHERE id=?2",
            params![date.to_string(), id],
        )?;
    }
    if let Some(desc) = patch.description {
        conn.execute(
            "UPDATE transactions SET description=?1 WHERE id=?2",
            params![desc, id],
        )?;
    }
    if let Some(cat) = patch.category {
        let category_id = category_id_by_name(conn, &cat)?;
        conn.execute(
            "UPDATE transactions SET category_id=?1 WHERE id=?2",
            params![category_id, id],
        )?;
    }
    get_transaction(conn, id)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<()> {
    let affected = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if affected == 0 {
        return Err(StoreError::NotFound {
            entity: "transaction",
            key: id.to_string(),
        });
    }
    Ok(())
}

/// All contacts ordered by name, balances derived by the engine from the
/// current transaction snapshot.
pub fn list_contacts(conn: &Connection) -> Result<Vec<Contact>> {
    let mut stmt = conn.prepare("SELECT id, name, phone FROM contacts ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok(Contact {
            id: r.get(0)?,
            name: r.get(1)?,
            phone: r.get(2)?,
            balance: Decimal::ZERO,
        })
    })?;
    let mut contacts = Vec::new();
    for row in rows {
        contacts.push(row?);
    }
    let txs = list_transactions(conn)?;
    Ok(engine::with_balances(contacts, &txs))
}

pub fn contact_by_name(conn: &Connection, name: &str) -> Result<Contact> {
    list_contacts(conn)?
        .into_iter()
        .find(|c| c.name == name)
        .ok_or(StoreError::NotFound {
            entity: "contact",
            key: name.to_string(),
        })
}

pub fn create_contact(conn: &Connection, name: &str, phone: Option<&str>) -> Result<Contact> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::Validation("contact name is required".into()));
    }
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM contacts WHERE name=?1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Err(StoreError::Validation(format!(
            "contact '{}' already exists",
            name
        )));
    }
    conn.execute(
        "INSERT INTO contacts(name, phone) VALUES (?1, ?2)",
        params![name, phone],
    )?;
    Ok(Contact {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        phone: phone.map(|p| p.to_string()),
        balance: Decimal::ZERO,
    })
}

/// Resolves a contact by name, creating it when unknown. Used by
/// transaction creation so naming a new counterparty just works.
pub fn find_or_create_contact(conn: &Connection, name: &str, phone: Option<&str>) -> Result<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::Validation("contact name is required".into()));
    }
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM contacts WHERE name=?1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO contacts(name, phone) VALUES (?1, ?2)",
        params![name, phone],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Removes a contact and everything it is party to. The contact's
/// transactions go first, in the same SQL transaction, and the count of
/// removed transactions is returned.
pub fn delete_contact(conn: &mut Connection, id: i64) -> Result<usize> {
    let tx = conn.transaction()?;
    let exists: Option<i64> = tx
        .query_row("SELECT id FROM contacts WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .optional()?;
    if exists.is_none() {
        return Err(StoreError::NotFound {
            entity: "contact",
            key: id.to_string(),
        });
    }
    let removed = tx.execute("DELETE FROM transactions WHERE contact_id=?1", params![id])?;
    tx.execute("DELETE FROM contacts WHERE id=?1", params![id])?;
    tx.commit()?;
    Ok(removed)
}

pub fn category_id_by_name(conn: &Connection, name: &str) -> Result<i64> {
    conn.query_row(
        "SELECT id FROM categories WHERE name=?1",
        params![name],
        |r| r.get(0),
    )
    .optional()?
    .ok_or(StoreError::NotFound {
        entity: "category",
        key: name.to_string(),
    })
}
