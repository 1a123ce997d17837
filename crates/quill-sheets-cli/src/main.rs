//! Quill Sheets CLI - sample document-assembly host

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use quill_sheets::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quill")]
#[command(author, version, about = "Spreadsheet document assembly tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the demo report workbook and write it to disk
    Demo {
        /// Output file
        #[arg(short, long, default_value = "report.xlsx")]
        output: PathBuf,
    },

    /// Show information about a workbook produced by this tool
    Info {
        /// Input workbook file
        input: PathBuf,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input workbook file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { output } => demo(&output),
        Commands::Info { input } => show_info(&input),
        Commands::Sheets { input } => list_sheets(&input),
    }
}

fn demo(output: &PathBuf) -> Result<()> {
    let header = StyleDescriptor::new("Header")
        .with_font(FontSpec::new().with_bold(true).with_color(Color::WHITE))
        .with_fill(Color::rgb(47, 84, 150))
        .with_alignment(Alignment::new().with_horizontal(HorizontalAlignment::Center));
    let amount = StyleDescriptor::new("Amount")
        .with_banded_fill(Color::WHITE, Color::rgb(221, 235, 247))
        .with_format(ValueFormat::Number(
            NumberFormatSpec::with_decimals(2).grouped(),
        ));
    let title = StyleDescriptor::new("Title")
        .with_font(FontSpec::new().with_bold(true).with_size(16.0))
        .with_merge(MergeSpec::horizontal(3));

    let regions = [
        ("North", 118_250.75),
        ("South", 96_410.10),
        ("East", 153_020.00),
        ("West", 87_955.25),
    ];
    let rows: Vec<Vec<Value>> = regions
        .iter()
        .map(|(region, total)| vec![Value::from(*region), Value::from(*total)])
        .collect();
    let data_rows = regions.len() as u32;

    let mut document = Document::new();
    document
        .insert(
            InsertText::new("Sheet1", Point::new(1, 1)?, "Quarterly totals").with_style(title),
        )
        .insert(
            InsertTable::new("Sheet1", Point::new(3, 1)?, rows)
                .with_header(vec!["Region".into(), "Total".into()])
                .with_header_style(header)
                .with_value_style(amount),
        )
        .insert(InsertAggregate::new(
            "Sheet1",
            Point::new(4 + data_rows, 2)?,
            AggregateDefinition::new(
                AggregateKind::Sum,
                Range::from_coordinates(4, 2, 3 + data_rows, 2)?,
            )
            .with_auto_filter(true),
        ))
        .insert(InsertMiniChart::new(
            "Sheet1",
            "totals-trend",
            Point::new(3, 4)?,
            Sparkline::new(
                SparklineKind::Column,
                Range::from_coordinates(4, 2, 3 + data_rows, 2)?,
            ),
        ))
        .set(SetAutoFilter::new(
            "Sheet1",
            Range::from_coordinates(3, 1, 3 + data_rows, 2)?,
        ))
        .set(SetGridLines::new("Sheet1", false));

    for result in document.results() {
        let context = result.context();
        if result.is_success() {
            println!("ok    {}", context.operation);
        } else {
            println!("fail  {}: {}", context.operation, result.messages().join("; "));
        }
    }

    if document.has_errors() {
        bail!("document assembly reported errors; nothing written");
    }

    document
        .save_to_file(output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    println!("Wrote '{}'", output.display());
    Ok(())
}

fn show_info(input: &PathBuf) -> Result<()> {
    let workbook = open_workbook(input)?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());

    for sheet in workbook.worksheets() {
        println!();
        println!("  Sheet: \"{}\"", sheet.name());
        match sheet.used_range() {
            Some(range) => println!(
                "    Used range: {} ({} rows x {} columns)",
                range.address(),
                range.row_count(),
                range.column_count()
            ),
            None => println!("    Used range: empty"),
        }
        println!("    Merged regions: {}", sheet.merged_regions().len());
        if let Some(filter) = sheet.auto_filter() {
            println!("    Autofilter: {}", filter.address());
        }
    }

    Ok(())
}

fn list_sheets(input: &PathBuf) -> Result<()> {
    let workbook = open_workbook(input)?;
    for (i, name) in workbook.sheet_names().iter().enumerate() {
        println!("{}\t{}", i, name);
    }
    Ok(())
}

fn open_workbook(input: &PathBuf) -> Result<Workbook> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read '{}'", input.display()))?;
    Workbook::from_bytes(&bytes).with_context(|| format!("Failed to open '{}'", input.display()))
}
