use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::reports::{category_totals, monthly_summary};
use crate::settings::get_data_dir;

pub fn run(month: Option<String>) -> Result<()> {
    let month = month.unwrap_or_else(|| chrono::Local::now().format("%Y-%m").to_string());
    let conn = get_connection(&get_data_dir().join("penny.db"))?;

    let summary = monthly_summary(&conn, &month)?;

    println!("Monthly overview \u{2014} {month}");
    println!("  Income:    {}", money(summary.income));
    println!("  Bills:     {}", money(summary.bills.abs()));
    println!("  Spending:  {}", money(summary.spending.abs()));
    let net = money(summary.net_saved);
    if summary.net_saved >= 0.0 {
        println!("  Net saved: {}", net.green());
    } else {
        println!("  Net saved: {}", net.red());
    }

    for (label, bucket) in [
        ("Discretionary spending", "SPEND"),
        ("Fixed bills", "BILL"),
        ("Income", "INCOME"),
    ] {
        let totals = category_totals(&conn, &month, bucket)?;
        if totals.is_empty() {
            continue;
        }
        let mut table = Table::new();
        table.set_header(vec!["Category", "Total", "Count"]);
        for t in &totals {
            table.add_row(vec![
                Cell::new(&t.category),
                Cell::new(money(t.total)).set_alignment(CellAlignment::Right),
                Cell::new(t.count).set_alignment(CellAlignment::Right),
            ]);
        }
        println!();
        println!("{label}\n{table}");
    }

    Ok(())
}
