// Copyright (c) 2025 Pocketfolio.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Command, arg};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").required(false))
        .arg(arg!(--jsonl "Print as JSON lines").required(false))
}

pub fn build_cli() -> Command {
    Command::new("pocketfolio")
        .about("Personal finance ledger and investment portfolio")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("tx")
                .about("Personal and investment transactions")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--date <DATE> "YYYY-MM-DD").required(true))
                        .arg(arg!(--amount <AMOUNT> "Signed; negative = expense").required(true))
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--kind <KIND> "personal|investment").required(false))
                        .arg(arg!(--description <TEXT>).required(false)),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(arg!(--kind <KIND> "personal|investment").required(false)),
                ))
                .subcommand(Command::new("get").arg(arg!(--id <ID> "Transaction id").required(true)))
                .subcommand(
                    Command::new("update")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(arg!(--date <DATE>).required(false))
                        .arg(arg!(--amount <AMOUNT>).required(false))
                        .arg(arg!(--category <CATEGORY>).required(false))
                        .arg(arg!(--kind <KIND>).required(false))
                        .arg(arg!(--description <TEXT>).required(false)),
                )
                .subcommand(Command::new("rm").arg(arg!(--id <ID>).required(true)))
                .subcommand(
                    Command::new("search")
                        .about("Case-insensitive match on description")
                        .arg(arg!(<TEXT> "Substring to look for").required(true)),
                ),
        )
        .subcommand(
            Command::new("asset")
                .about("Portfolio holdings")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--ticker <TICKER>).required(true))
                        .arg(arg!(--quantity <QTY>).required(true))
                        .arg(arg!(--price <PRICE> "Purchase price per unit").required(true))
                        .arg(arg!(--date <DATE> "Purchase date, YYYY-MM-DD").required(true))
                        .arg(arg!(--class <CLASS> "crypto|stock|bond").required(true))
                        .arg(arg!(--current <PRICE> "Current price, if known").required(false)),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(arg!(--class <CLASS> "crypto|stock|bond").required(false)),
                ))
                .subcommand(Command::new("get").arg(arg!(--id <ID>).required(true)))
                .subcommand(
                    Command::new("update")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(arg!(--ticker <TICKER>).required(false))
                        .arg(arg!(--quantity <QTY>).required(false))
                        .arg(arg!(--price <PRICE>).required(false))
                        .arg(arg!(--date <DATE>).required(false))
                        .arg(arg!(--current <PRICE>).required(false))
                        .arg(
                            arg!(--"clear-current" "Forget the refreshed price; value at buy price again")
                                .required(false)
                                .conflicts_with("current"),
                        )
                        .arg(arg!(--class <CLASS>).required(false)),
                )
                .subcommand(Command::new("rm").arg(arg!(--id <ID>).required(true)))
                .subcommand(
                    Command::new("performance")
                        .about("Cost, value and gain/loss for one holding")
                        .arg(arg!(--id <ID>).required(true)),
                ),
        )
        .subcommand(
            Command::new("order")
                .about("Buy/sell orders")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--ticker <TICKER>).required(true))
                        .arg(arg!(--quantity <QTY>).required(true))
                        .arg(arg!(--price <PRICE>).required(true))
                        .arg(arg!(--side <SIDE> "buy|sell").required(true))
                        .arg(arg!(--date <DATE> "YYYY-MM-DD").required(true))
                        .arg(arg!(--status <STATUS> "open|closed").required(false)),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(arg!(--status <STATUS> "open|closed").required(false)),
                ))
                .subcommand(Command::new("get").arg(arg!(--id <ID>).required(true)))
                .subcommand(
                    Command::new("update")
                        .about("Edit order fields; status only moves via close")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(arg!(--ticker <TICKER>).required(false))
                        .arg(arg!(--quantity <QTY>).required(false))
                        .arg(arg!(--price <PRICE>).required(false))
                        .arg(arg!(--side <SIDE>).required(false))
                        .arg(arg!(--date <DATE>).required(false)),
                )
                .subcommand(Command::new("rm").arg(arg!(--id <ID>).required(true)))
                .subcommand(Command::new("close").arg(arg!(--id <ID>).required(true)))
                .subcommand(Command::new("close-all").about("Close every open order")),
        )
        .subcommand(
            Command::new("report")
                .about("Derived figures, recomputed from current rows")
                .subcommand(json_flags(Command::new("balance")))
                .subcommand(json_flags(Command::new("categories")))
                .subcommand(json_flags(Command::new("portfolio")))
                .subcommand(json_flags(Command::new("stats"))),
        )
        .subcommand(
            Command::new("price")
                .about("Market data")
                .subcommand(Command::new("refresh").about("Refresh current prices for all assets")),
        )
        .subcommand(
            Command::new("export")
                .about("CSV export")
                .subcommand(Command::new("transactions").arg(arg!(--out <PATH>).required(true)))
                .subcommand(Command::new("assets").arg(arg!(--out <PATH>).required(true)))
                .subcommand(Command::new("orders").arg(arg!(--out <PATH>).required(true)))
                .subcommand(Command::new("portfolio").arg(arg!(--out <PATH>).required(true)))
                .subcommand(Command::new("categories").arg(arg!(--out <PATH>).required(true))),
        )
        .subcommand(Command::new("seed").about("Load a small sample data set"))
        .subcommand(
            Command::new("tickers")
                .about("Maintenance on stored symbols")
                .subcommand(
                    Command::new("normalize")
                        .about("Collapse composite symbols like 'ARB - ARBITRUM (...)' to 'ARB'"),
                ),
        )
}
