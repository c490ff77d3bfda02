// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{arg, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = arg(sub, "name")?;
            let client = store::insert_client(conn, name)?;
            println!("Added client '{}' (id {})", client.name, client.id);
        }
        Some(("list", sub)) => {
            let clients = store::list_clients(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &clients)? {
                let data = clients
                    .into_iter()
                    .map(|c| vec![c.id.to_string(), c.name, c.created_at.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Created"], data));
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing client id")?;
            store::delete_client(conn, id)?;
            println!("Removed client {}", id);
        }
        _ => {}
    }
    Ok(())
}
