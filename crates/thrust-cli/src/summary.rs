use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use thrust_cli::report::column_reports;
use thrust_core::{BatchResult, DriftStatus};
use thrust_model::ColumnRole;

use crate::types::{CompareResult, InspectResult};

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

pub fn print_analysis(batch: &BatchResult) {
    if !batch.analyses.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("File"),
            header_cell("Rows"),
            header_cell("Time"),
            header_cell("Thrust"),
            header_cell("Peak (N)"),
            header_cell("Peak at (s)"),
            header_cell("Rise (s)"),
            header_cell("Burn (s)"),
            header_cell("Impulse (N·s)"),
            header_cell("Warnings"),
        ]);
        apply_summary_table_style(&mut table);
        for index in [1, 4, 5, 6, 7, 8, 9] {
            align_column(&mut table, index, CellAlignment::Right);
        }
        for analysis in &batch.analyses {
            let metrics = analysis.metrics.as_ref();
            let selection = analysis.selection.as_ref();
            table.add_row(vec![
                Cell::new(&analysis.file_name)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(analysis.dataset.row_count()),
                text_cell(selection.map(|s| s.time.as_str())),
                text_cell(selection.map(|s| s.thrust.as_str())),
                number_cell(metrics.and_then(|m| m.peak_thrust), 2),
                number_cell(metrics.and_then(|m| m.peak_thrust_time), 3),
                number_cell(metrics.and_then(|m| m.rise_time), 3),
                number_cell(metrics.and_then(|m| m.burn_duration), 3),
                number_cell(metrics.and_then(|m| m.area_under_curve), 2),
                count_cell(analysis.all_warnings().len(), Color::Yellow),
            ]);
        }
        println!("{table}");
    }

    let warnings: Vec<(&str, String)> = batch
        .analyses
        .iter()
        .flat_map(|analysis| {
            analysis
                .all_warnings()
                .into_iter()
                .map(|warning| (analysis.file_name.as_str(), warning))
        })
        .collect();
    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for (file, warning) in warnings {
            println!("- {file}: {warning}");
        }
    }
    print_errors(&batch.errors);
}

pub fn print_comparison(result: &CompareResult) {
    println!("Baseline: {}", result.drift.baseline);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Run"),
        header_cell("Baseline"),
        header_cell("Value"),
        header_cell("Change"),
        header_cell("Change %"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);
    for comparison in &result.drift.comparisons {
        let baseline = comparison.values.first().copied().flatten();
        for (entry, value) in comparison.drift.iter().zip(comparison.values.iter().skip(1)) {
            table.add_row(vec![
                Cell::new(comparison.metric.to_string()),
                Cell::new(&entry.run),
                number_cell(baseline, 3),
                number_cell(*value, 3),
                Cell::new(format!("{:+.3}", entry.absolute_change)),
                Cell::new(format!("{:+.1}%", entry.percent_change)),
                status_cell(entry.status),
            ]);
        }
    }
    println!("{table}");

    println!();
    println!("Alignment ({}):", result.alignment);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Run"),
        header_cell("Offset (s)"),
        header_cell("Start (s)"),
        header_cell("End (s)"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for run in &result.aligned_runs {
        table.add_row(vec![
            Cell::new(&run.name),
            number_cell(Some(run.offset), 3),
            number_cell(run.start_time, 3),
            number_cell(run.end_time, 3),
        ]);
    }
    println!("{table}");
    print_errors(&result.batch.errors);
}

pub fn print_inspection(result: &InspectResult) {
    println!("File: {}", result.file_name);
    println!("Rows: {}", result.dataset.row_count());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Confidence"),
        header_cell("Roles"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in column_reports(&result.dataset, &result.roles) {
        let confidence = Cell::new(format!("{:.1}%", column.confidence * 100.0));
        table.add_row(vec![
            Cell::new(column.name),
            Cell::new(column.column_type.to_string()),
            if column.confidence < 0.5 {
                confidence.fg(Color::Yellow)
            } else {
                confidence
            },
            roles_cell(&column.roles),
        ]);
    }
    println!("{table}");
    if !result.dataset.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.dataset.warnings {
            println!("- {warning}");
        }
    }
}

fn print_errors(errors: &[String]) {
    if !errors.is_empty() {
        eprintln!("Errors:");
        for error in errors {
            eprintln!("- {error}");
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn number_cell(value: Option<f64>, precision: usize) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:.precision$}")),
        None => dim_cell("-"),
    }
}

fn text_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn status_cell(status: DriftStatus) -> Cell {
    match status {
        DriftStatus::Increase => Cell::new("▲ increase")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        DriftStatus::Decrease => Cell::new("▼ decrease")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        DriftStatus::Stable => dim_cell("stable"),
    }
}

fn roles_cell(roles: &[ColumnRole]) -> Cell {
    if roles.is_empty() {
        return dim_cell("-");
    }
    let names: Vec<&str> = roles.iter().copied().map(ColumnRole::as_str).collect();
    Cell::new(names.join(", ")).fg(Color::Blue)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
