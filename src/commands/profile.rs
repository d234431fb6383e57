// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    currency_symbol, load_profile, maybe_print_json, set_base_currency, set_display_name,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let profile = load_profile(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &profile)? {
                let name = if profile.display_name.is_empty() {
                    "(unset)"
                } else {
                    profile.display_name.as_str()
                };
                println!("Name:     {}", name);
                println!(
                    "Currency: {} ({})",
                    profile.base_currency,
                    currency_symbol(&profile.base_currency)
                );
            }
        }
        Some(("set", sub)) => {
            let mut changed = false;
            if let Some(name) = sub.get_one::<String>("name") {
                set_display_name(conn, name)?;
                println!("Display name set to '{}'", name);
                changed = true;
            }
            if let Some(ccy) = sub.get_one::<String>("currency") {
                let ccy = ccy.to_uppercase();
                set_base_currency(conn, &ccy)?;
                println!("Base currency set to {}", ccy);
                changed = true;
            }
            if !changed {
                anyhow::bail!("Nothing to set: pass --name and/or --currency");
            }
        }
        _ => {}
    }
    Ok(())
}
