use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabmatch_map::MatchReport;

use crate::commands::RunResult;

pub fn print_summary(result: &RunResult) {
    match &result.destination {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!("Rows: {}", result.report.rows);
    println!("{}", summary_table(&result.report));
    let unresolved = result.report.total_unresolved();
    if unresolved > 0 {
        eprintln!("warning: {unresolved} key values were left unresolved");
    }
}

/// One row per key column with its match counts.
pub fn summary_table(report: &MatchReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key column"),
        header_cell("Resolved column"),
        header_cell("Exact"),
        header_cell("Fuzzy"),
        header_cell("Unresolved"),
        header_cell("Partitions"),
        header_cell("Unmatched"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for level in &report.levels {
        table.add_row(vec![
            Cell::new(&level.column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&level.resolved_column),
            Cell::new(level.exact),
            Cell::new(level.fuzzy),
            count_cell(level.unresolved, Color::Yellow),
            Cell::new(level.partitions),
            count_cell(level.unmatched_partitions, Color::Red),
        ]);
    }
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
