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

//! Command-line argument definitions.

use clap::Subcommand;

use crate::commands;
use crate::error::CliError;

/// XMLB subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a tree description as XML bytes
    ///
    /// Streams the tree through a render stream, requesting at most
    /// `--chunk-size` bytes per read.
    Render {
        /// JSON tree description
        #[arg(value_name = "FILE")]
        file: String,

        /// Output encoding, e.g. `utf-8` or `utf-16le with signature`
        #[arg(short, long)]
        encoding: Option<String>,

        /// Bytes requested per read
        #[arg(short, long, default_value_t = 4096)]
        chunk_size: usize,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the nodes a pull reader reports for a tree description
    Trace {
        /// JSON tree description
        #[arg(value_name = "FILE")]
        file: String,

        /// Skip whitespace-only text
        #[arg(long)]
        ignore_whitespace: bool,
    },
}

impl Commands {
    /// Run the command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Render {
                file,
                encoding,
                chunk_size,
                output,
            } => commands::render(&file, encoding.as_deref(), chunk_size, output.as_deref()),
            Commands::Trace {
                file,
                ignore_whitespace,
            } => commands::trace(&file, ignore_whitespace),
        }
    }
}
