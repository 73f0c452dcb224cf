use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::auto::{RunRecord, StrategyAggregate};

#[derive(Serialize)]
struct JsonReport<'a> {
    strategies: &'a [StrategyAggregate],
    runs: &'a [RunRecord],
}

pub fn generate_console_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[RunRecord],
    aggregates: &[StrategyAggregate],
    total_duration: Duration,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Automated Run Summary".bright_cyan().bold())?;
    writeln!(writer, "{}", "========================".cyan())?;
    writeln!(writer, "Total runs: {}", records.len())?;
    writeln!(writer, "Total time: {total_duration:?}")?;
    writeln!(writer)?;

    for aggregate in aggregates {
        let rate = format!("{:.1}%", aggregate.victory_rate * 100.0);
        let rate = if aggregate.victories * 2 >= aggregate.runs {
            rate.green()
        } else {
            rate.red()
        };
        writeln!(writer, "{} {}", "▶".bright_white(), aggregate.strategy.bold())?;
        writeln!(
            writer,
            "   Victories: {}/{} ({rate})",
            aggregate.victories, aggregate.runs
        )?;
        writeln!(
            writer,
            "   Defeats: perished {} · winter {} · abandoned {}",
            aggregate.perished.to_string().red(),
            aggregate.winter.to_string().blue(),
            aggregate.abandoned.to_string().yellow()
        )?;
        writeln!(
            writer,
            "   Mean score {:.1} · days {:.1} · miles {:.0} · survivors {:.2}",
            aggregate.mean_score, aggregate.mean_days, aggregate.mean_miles, aggregate.mean_survivors
        )?;
        writeln!(writer)?;
    }

    if let Some(best) = records.iter().max_by_key(|record| record.summary.score) {
        writeln!(writer, "{}", "🏆 Best Run".bright_yellow().bold())?;
        writeln!(writer, "{}", "==========".yellow())?;
        writeln!(
            writer,
            "{} seed {}: {} with score {} on day {}",
            best.strategy.green(),
            best.journey_seed,
            best.summary.status,
            best.summary.score,
            best.summary.days_elapsed
        )?;
    }
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[RunRecord],
    aggregates: &[StrategyAggregate],
) -> Result<()> {
    let report = JsonReport {
        strategies: aggregates,
        runs: records,
    };
    let json_output = serde_json::to_string_pretty(&report)?;
    writeln!(writer, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    writer: &mut W,
    records: &[RunRecord],
    aggregates: &[StrategyAggregate],
) -> Result<()> {
    writeln!(writer, "# Westward Automated Runs\n")?;
    writeln!(writer, "## Summary\n")?;
    writeln!(
        writer,
        "| Strategy | Runs | Victories | Victory rate | Perished | Winter | Abandoned | Mean score | Mean days |"
    )?;
    writeln!(writer, "|---|---|---|---|---|---|---|---|---|")?;
    for aggregate in aggregates {
        writeln!(
            writer,
            "| {} | {} | {} | {:.1}% | {} | {} | {} | {:.1} | {:.1} |",
            aggregate.strategy,
            aggregate.runs,
            aggregate.victories,
            aggregate.victory_rate * 100.0,
            aggregate.perished,
            aggregate.winter,
            aggregate.abandoned,
            aggregate.mean_score,
            aggregate.mean_days
        )?;
    }

    writeln!(writer, "\n## Runs\n")?;
    for record in records {
        let status = if record.summary.is_victory() {
            "✅"
        } else {
            "❌"
        };
        writeln!(
            writer,
            "- {status} **{}** seed {}: {} on {} (day {}, {} of {} miles, score {})",
            record.strategy,
            record.journey_seed,
            record.summary.status,
            record.summary.end_date,
            record.summary.days_elapsed,
            record.summary.miles_traveled,
            record.summary.total_miles,
            record.summary.score
        )?;
        if !record.summary.survivors.is_empty() {
            writeln!(
                writer,
                "  - Survivors: {}",
                record.summary.survivors.join(", ")
            )?;
        }
    }
    Ok(())
}
