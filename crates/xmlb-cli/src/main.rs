// Dweve XMLB - Lazy XML Builder Rendering
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! XMLB Command Line Interface

use clap::Parser;
use std::process::ExitCode;
use xmlb_cli::cli::Commands;

/// XMLB - lazy XML builder rendering
///
/// Renders XML builder trees described as JSON, either as encoded bytes or
/// as the node sequence a pull reader reports.
///
/// # Examples
///
/// ```bash
/// # Render to stdout in 16-byte reads
/// xmlb render tree.json --chunk-size 16
///
/// # Show reader nodes
/// xmlb trace tree.json
/// ```
#[derive(Parser)]
#[command(name = "xmlb")]
#[command(author, version, about = "XMLB - lazy XML builder rendering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(xmlb_cli::log_filter())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
