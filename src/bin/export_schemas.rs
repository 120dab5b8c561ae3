//! Writes JSON Schemas for the request bodies the REST API accepts.
//!
//! ```text
//! cargo run --features cli --bin export_schemas -- --out-dir schemas
//! ```

use anyhow::Context;
use clap::Parser;
use schemars::schema::RootSchema;
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;
use venture_match::api::rest::{
    EquitySplitRequest, LtvCacRequest, SensitivityRequest, WhatIfRequest,
};
use venture_match::domain::entities::PreferencesRecord;
use venture_match::domain::services::calculator::{
    DilutionInputs, RetentionInputs, RunwayInputs, ValuationInputs,
};

#[derive(Parser, Debug)]
#[command(name = "export_schemas", version, about = "Export request JSON Schemas")]
struct Cli {
    /// Directory the `.schema.json` files are written to.
    #[arg(long, default_value = "schemas")]
    out_dir: PathBuf,
    /// Print to stdout instead of writing files.
    #[arg(long, default_value_t = false)]
    stdout: bool,
}

fn schemas() -> Vec<(&'static str, RootSchema)> {
    vec![
        ("preferences", schema_for!(PreferencesRecord)),
        ("runway", schema_for!(RunwayInputs)),
        ("what_if", schema_for!(WhatIfRequest)),
        ("ltv_cac", schema_for!(LtvCacRequest)),
        ("sensitivity", schema_for!(SensitivityRequest)),
        ("retention", schema_for!(RetentionInputs)),
        ("equity_split", schema_for!(EquitySplitRequest)),
        ("dilution", schema_for!(DilutionInputs)),
        ("valuation", schema_for!(ValuationInputs)),
    ]
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.stdout {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("creating {}", cli.out_dir.display()))?;
    }

    for (name, schema) in schemas() {
        let json = serde_json::to_string_pretty(&schema)
            .with_context(|| format!("serializing {name} schema"))?;
        if cli.stdout {
            println!("{json}");
            continue;
        }
        let path = cli.out_dir.join(format!("{name}.schema.json"));
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
