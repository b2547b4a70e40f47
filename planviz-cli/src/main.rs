// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! planviz CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    match cli.command {
        Commands::Version => {
            println!("{} {}", "planviz".bold().green(), planviz::VERSION);
            println!("Physical query plan visualizer");
            Ok(())
        }

        Commands::Render {
            snapshot,
            format,
            output,
            template,
            max_depth,
            config,
        } => cli::handle_render(snapshot, format, output, template, max_depth, config),

        Commands::Summary { snapshot, max_depth } => cli::handle_summary(snapshot, max_depth),

        Commands::Classify { name, description } => {
            cli::handle_classify(name, description.unwrap_or_default())
        }
    }
}
