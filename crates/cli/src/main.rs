// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! test-cmd binary entry point.

use clap::Parser;

use test_cmd::app;
use test_cmd::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = app::run(&cli).await;
    std::process::exit(code);
}
