//! matpack CLI - Command-line interface for texture channel packing
//!
//! This binary provides commands for validating pack plans, packing source
//! textures into composite outputs, and converting materials between shader
//! layouts.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use matpack_cli::commands;

/// matpack - Texture Channel Packing Toolkit
#[derive(Parser)]
#[command(name = "matpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pack plan without writing any textures
    Validate {
        /// Path to the pack plan (JSON)
        #[arg(short, long)]
        plan: String,

        /// Also validate a conversion rules file
        #[arg(long)]
        rules: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Pack source textures into composite outputs from a plan
    Pack {
        /// Path to the pack plan (JSON)
        #[arg(short, long)]
        plan: String,

        /// Material document resolving property-name inputs
        /// (required for pack.material_v1 plans)
        #[arg(short, long)]
        material: Option<String>,

        /// Output root directory (default: current directory)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Base name for output files (default: material name for
        /// material-bound plans, plan name otherwise)
        #[arg(long)]
        base_name: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Convert a material to another shader layout using conversion rules
    Convert {
        /// Path to the conversion rules (JSON)
        #[arg(short, long)]
        rules: String,

        /// Path to the material document to convert
        #[arg(short, long)]
        material: String,

        /// Output file path (default: <material stem>.converted.json)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { plan, rules, json } => {
            commands::validate::run(&plan, rules.as_deref(), json)
        }
        Commands::Pack {
            plan,
            material,
            out_root,
            base_name,
            json,
        } => commands::pack::run(
            &plan,
            material.as_deref(),
            out_root.as_deref(),
            base_name.as_deref(),
            json,
        ),
        Commands::Convert {
            rules,
            material,
            output,
            json,
        } => commands::convert::run(&rules, &material, output.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
