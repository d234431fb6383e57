// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A ledger entry as materialized from the store, with contact and
/// category display names joined in. Negative amounts are money given,
/// positive amounts money received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: Option<String>,
    pub contact_id: Option<i64>,
    pub contact_name: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

/// A counterparty. `balance` is derived from the transaction set by the
/// engine whenever contacts are listed; it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// User-facing identity and display settings, backed by the settings table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: String,
    pub base_currency: String,
}
