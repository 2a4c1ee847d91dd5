//! Rewrites named placeholders read from stdin, no database needed
//!
//! Run with: echo "select * from t where id = :id" | cargo run --example rewrite

use std::io::Read;

use sqlx_named_sql::QuerySource;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut document = String::new();
    std::io::stdin().read_to_string(&mut document)?;

    let source = QuerySource::parse(&document)?;
    for diagnostic in &source.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    if !source.name.is_empty() {
        println!("-- {}", source.name);
    }
    for parameter in &source.parameters {
        println!("-- ${}: {}", parameter.ordinal, parameter.name);
    }
    println!("{}", source.sql);
    Ok(())
}
