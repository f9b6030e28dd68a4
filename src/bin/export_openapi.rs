//! Write the storefront OpenAPI document
//!
//! ```text
//! cargo run --bin export_openapi                    # stdout
//! cargo run --bin export_openapi -- -o docs/openapi.json
//! ```

use anyhow::Context;
use std::path::PathBuf;
use storefront::gateway::openapi::ApiDoc;
use utoipa::OpenApi;

fn output_path() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--output" || arg == "-o" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

fn main() -> anyhow::Result<()> {
    let doc = ApiDoc::openapi();
    let json = doc.to_pretty_json()?;

    let Some(path) = output_path() else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create {}", dir.display()))?;
    }
    std::fs::write(&path, &json).with_context(|| format!("cannot write {}", path.display()))?;
    eprintln!(
        "Exported {} paths ({} v{}) to {}",
        doc.paths.paths.len(),
        doc.info.title,
        doc.info.version,
        path.display()
    );
    Ok(())
}
