// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
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
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month as YYYY-MM (defaults to the current month)")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

fn status_arg() -> Arg {
    Arg::new("status")
        .long("status")
        .value_parser(["unpaid", "paid", "saved"])
}

fn year_arg() -> Arg {
    Arg::new("year")
        .long("year")
        .value_parser(value_parser!(i32).range(1..=9999))
        .help("Calendar year (defaults to the current year)")
}

fn kind_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["business", "personal"])
}

pub fn build_cli() -> Command {
    Command::new("meicaixa")
        .about("MEI cash tracking: business and personal books, DRE and annual limit monitor")
        .version(clap::crate_version!())
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Treat this date (YYYY-MM-DD) as today"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("client")
                .about("Revenue sources")
                .subcommand(
                    Command::new("add").arg(Arg::new("name").required(true)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("income")
                .about("Received and expected revenue")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("client").long("client").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description").default_value("")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("client").long("client"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_args(Command::new("list").arg(month_arg())))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("expense")
                .about("Business and personal expenses")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true).help("Due date"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(kind_arg().required(true))
                        .arg(status_arg().default_value("unpaid"))
                        .arg(Arg::new("source").long("source").help("Client funding it"))
                        .arg(
                            Arg::new("fixed")
                                .long("fixed")
                                .action(ArgAction::SetTrue)
                                .help("Recurs every month"),
                        )
                        .arg(Arg::new("description").long("description").default_value("")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(kind_arg())
                        .arg(
                            Arg::new("fixed")
                                .long("fixed")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("status")
                        .arg(id_arg())
                        .arg(status_arg().required(true))
                        .arg(Arg::new("source").long("source")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(month_arg()).arg(kind_arg()),
                ))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("investment")
                .about("Capital put into the business")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description").default_value("")),
                )
                .subcommand(json_args(Command::new("list").arg(month_arg())))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(json_args(
            Command::new("summary")
                .about("Monthly summary")
                .arg(month_arg())
                .arg(
                    Arg::new("scope")
                        .long("scope")
                        .value_parser(["business", "personal"]),
                ),
        ))
        .subcommand(json_args(
            Command::new("mei")
                .about("Annual MEI revenue limit")
                .arg(year_arg()),
        ))
        .subcommand(json_args(
            Command::new("dre")
                .about("Income statement for a month")
                .arg(month_arg())
                .arg(Arg::new("out").long("out").help("Write CSV to this file")),
        ))
        .subcommand(
            Command::new("report")
                .about("Derived reports")
                .subcommand(json_args(Command::new("allocation").arg(month_arg())))
                .subcommand(json_args(Command::new("sources")))
                .subcommand(json_args(Command::new("categories").arg(month_arg())))
                .subcommand(json_args(
                    Command::new("evolution").arg(month_arg()).arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(value_parser!(u16).range(1..=240))
                            .default_value("12"),
                    ),
                ))
                .subcommand(json_args(
                    Command::new("compare").arg(year_arg()),
                )),
        )
}
