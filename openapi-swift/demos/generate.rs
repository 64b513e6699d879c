//! Example generating a Swift client from an abstract document.
//!
//! Run with: `cargo run --example generate -- <document.json> <output-dir>`

use openapi_swift::prelude::*;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(document_path), Some(output_path)) = (args.next(), args.next()) else {
        eprintln!("usage: generate <document.json> <output-dir>");
        std::process::exit(2);
    };
    let output_path = PathBuf::from(output_path);

    let document = parse_document_file(Path::new(&document_path))?;
    println!(
        "[Generate] {} {}: {} schemas, {} groups",
        document.info.title,
        document.info.version,
        document.schemas.len(),
        document.groups.len()
    );

    let generator = Generator::new(CodegenOptions::default());
    let resolved = generator.post_process_document(document)?;
    generator.export_templates(&output_path, &resolved).await?;

    println!(
        "[Generate] Package {} written to {}",
        resolved.options.package_name().unwrap_or_default(),
        output_path.display()
    );
    Ok(())
}
