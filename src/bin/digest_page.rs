//! CLI that digests one exported page and prints the record as JSON.
//!
//! Usage: `digest_page <site-dir> <page-name> [out-dir]`
//!
//! With an out-dir, the record is written to
//! `<out-dir>/<wikidot-name>.json` instead of stdout, named after the
//! page's wikidot-style canonical unit name.

use std::path::Path;
use std::process::ExitCode;

use fanwiki_digest::{digest_page, names};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("usage: digest_page <site-dir> <page-name> [out-dir]");
        return ExitCode::FAILURE;
    }

    let Some(record) = digest_page(Path::new(&args[1]), &args[2]) else {
        eprintln!("page '{}' could not be digested", args[2]);
        return ExitCode::FAILURE;
    };

    let json = match serde_json::to_string_pretty(&record) {
        Ok(json) => json,
        Err(err) => {
            eprintln!("could not serialize record: {err}");
            return ExitCode::FAILURE;
        }
    };

    match args.get(3) {
        Some(out_dir) => {
            let out_path =
                Path::new(out_dir).join(format!("{}.json", names::wikidot_unit_name(record.title())));
            if let Err(err) = std::fs::write(&out_path, json) {
                eprintln!("could not write {}: {err}", out_path.display());
                return ExitCode::FAILURE;
            }
        }
        None => println!("{json}"),
    }
    ExitCode::SUCCESS
}
