//! Runs a datatable over a small collection and prints the JSON envelope
//!
//! ```sh
//! RUST_LOG=datatable=debug cargo run --example people -- "search=example.org&sort=age&direction=desc"
//! ```

use anyhow::Result;
use datatable::config::DatatableConfig;
use datatable::logging;
use datatable::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    logging::init_tracing();

    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/datatables.yaml");
    let config = DatatableConfig::from_yaml_file(config_path)?;
    let table = config.table("people")?;

    let query = std::env::args().nth(1).unwrap_or_default();
    let params = RequestParams::from_query_str(&query)?;

    let people = json!([
        {"name": "Alice", "email": "alice@example.com", "age": 34, "address": {"city": "Paris"}},
        {"name": "Bob", "email": "bob@example.org", "age": 27, "address": {"city": "Lyon"}},
        {"name": "Carol", "email": "carol@example.com", "age": 41, "address": {"city": "Berlin"}},
        {"name": "Eve", "email": "eve@example.org", "age": 22},
    ]);

    let result = Datatable::make(people)
        .with_table_config(table)
        .request(params)
        .process()?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
