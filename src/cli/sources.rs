use comfy_table::{Cell, Table};

use crate::adapter;
use crate::error::Result;

pub fn run() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Layout"]);
    for a in adapter::all() {
        table.add_row(vec![Cell::new(a.key), Cell::new(a.name)]);
    }
    println!("Source adapters (use with `penny ingest --source <key>`)\n{table}");
    println!("Non-CSV files are parsed as extracted statement text under any source tag.");
    Ok(())
}
