//! Schema inspection command
//!
//! Usage: roster schema

use clap::Args;
use roster_store::db::bootstrap;
use roster_store::inspect::{table_info, TableInfo};
use roster_store::migrations::applied_migrations;
use roster_store::StoreTarget;

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Table to describe
    #[arg(long, default_value = "students")]
    pub table: String,
}

/// Execute schema command
pub fn execute(db: &str, args: SchemaArgs) -> Result<(), Box<dyn std::error::Error>> {
    let target: StoreTarget = db.parse()?;
    let conn = bootstrap(&target)?;

    println!("Store: {}", target);
    println!("Migrations: {}", applied_migrations(&conn)?.join(", "));
    println!();
    print!("{}", render_table(&table_info(&conn, &args.table)?));

    Ok(())
}

fn render_table(info: &TableInfo) -> String {
    let mut out = format!("Table {}\n", info.name);

    for column in &info.columns {
        let mut line = format!("  {} {}", column.name, column.declared_type);
        if column.primary_key {
            line.push_str(" PRIMARY KEY");
        }
        if column.not_null {
            line.push_str(" NOT NULL");
        }
        if let Some(default) = &column.default {
            line.push_str(&format!(" DEFAULT {}", default));
        }
        out.push_str(&line);
        out.push('\n');
    }

    for index in &info.indexes {
        out.push_str(&format!(
            "  INDEX {}{} ({})\n",
            if index.unique { "UNIQUE " } else { "" },
            index.name,
            index.columns.join(", ")
        ));
    }

    out
}
