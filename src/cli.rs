// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .about("Personal ledger: track money given to and received from contacts")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("contact")
                .about("Manage contacts")
                .subcommand(
                    Command::new("add")
                        .about("Add a contact")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("phone").long("phone")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List contacts with derived balances"),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show one contact with transaction history")
                        .arg(Arg::new("name").long("name").required(true)),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a contact and all its transactions")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List categories")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category (transactions keep running uncategorized)")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record money given or received")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["given", "received"]),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("contact").long("contact"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(
                            Arg::new("range")
                                .long("range")
                                .value_parser(["all", "week", "month", "quarter", "year"]),
                        )
                        .arg(Arg::new("contact").long("contact"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Regex over description and contact name"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit amount, date, category or description")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                        .arg(Arg::new("amount").long("amount").help("New magnitude, sign is kept"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Balances, top contacts and recent activity"),
        ))
        .subcommand(
            Command::new("report")
                .about("Reports over the ledger")
                .subcommand(json_flags(
                    Command::new("monthly")
                        .about("Given/received per calendar month")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Totals over a date range")
                        .arg(
                            Arg::new("range")
                                .long("range")
                                .value_parser(["all", "week", "month", "quarter", "year"]),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("top")
                        .about("Contacts ranked by outstanding balance")
                        .arg(
                            Arg::new("direction")
                                .long("direction")
                                .value_parser(["owed", "owing"])
                                .default_value("owed"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(i64))
                                .default_value("4"),
                        ),
                )),
        )
        .subcommand(
            Command::new("export").about("Export the ledger").subcommand(
                Command::new("data")
                    .about("Dump profile, transactions and contacts")
                    .arg(Arg::new("format").long("format").required(true))
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("profile")
                .about("Display name and base currency")
                .subcommand(json_flags(Command::new("show").about("Show the profile")))
                .subcommand(
                    Command::new("set")
                        .about("Update profile settings")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("currency").long("currency")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for integrity issues"))
}
