//! Non-interactive dashboard output: text, JSON, or CSV.

use std::io::Write;

use analyzer_core::{ScoredTransaction, Severity};
use analyzer_finance::Analysis;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

const BAR_WIDTH: usize = 20;
const DESC_WIDTH: usize = 28;

pub fn money(amount: f64) -> String {
    format!("${}", format_num::format_num!(",.2f", amount))
}

pub fn points(points: u64) -> String {
    format_num::format_num!(",.0f", points as f64)
}

/// Signed table amount: credits are shown as `+$x`, debits as `$x`
pub fn table_amount(t: &ScoredTransaction) -> String {
    if t.transaction.is_credit() {
        format!("+{}", money(t.transaction.amount.abs()))
    } else {
        money(t.transaction.amount)
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn write_report(
    out: &mut impl Write,
    analysis: &Analysis,
    format: OutputFormat,
    search: &str,
    limit: Option<usize>,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, analysis, search, limit),
        OutputFormat::Json => write_json(out, analysis),
        OutputFormat::Csv => write_csv(out, analysis, search),
    }
}

pub fn write_text(
    out: &mut impl Write,
    analysis: &Analysis,
    search: &str,
    limit: Option<usize>,
) -> Result<()> {
    writeln!(out, "Statement Analyzer")?;
    writeln!(out, "==================\n")?;

    writeln!(out, "{:<20}{:>14}   (This Statement)", "Total Spend", money(analysis.total_spend))?;
    writeln!(
        out,
        "{:<20}{:>14}   (Estimated Earned)",
        "Reward Points",
        format!("{} pts", points(analysis.total_points))
    )?;
    writeln!(
        out,
        "{:<20}{:>14}   (Optimizable Spend)\n",
        "Potential Savings",
        format!("${}", analysis.potential_savings())
    )?;

    writeln!(out, "Category Breakdown")?;
    for c in &analysis.categories {
        let share = analysis.category_share(c);
        let filled = ((share / 100.0) * BAR_WIDTH as f64).round() as usize;
        writeln!(
            out,
            "  {:<22}{:>12}  ({:>5.1}%)  {}{}",
            c.category.label(),
            money(c.amount),
            share,
            "█".repeat(filled.min(BAR_WIDTH)),
            "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
        )?;
    }
    writeln!(out)?;

    let visible: Vec<&ScoredTransaction> = analysis
        .transactions
        .iter()
        .filter(|t| t.transaction.matches_search(search))
        .collect();
    if search.is_empty() {
        writeln!(out, "Transactions ({})", visible.len())?;
    } else {
        writeln!(out, "Transactions ({} matching \"{}\")", visible.len(), search)?;
    }
    if visible.is_empty() {
        writeln!(out, "  No transactions found matching \"{}\"", search)?;
    } else {
        writeln!(
            out,
            "  {:<12}{:<w$}  {:<20}{:>8}{:>14}",
            "DATE",
            "MERCHANT",
            "CATEGORY",
            "POINTS",
            "AMOUNT",
            w = DESC_WIDTH
        )?;
        let shown = limit.unwrap_or(visible.len());
        for t in visible.iter().take(shown) {
            let date = t
                .transaction
                .calendar_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| truncate(&t.transaction.date, 10));
            let category = t.category.map(|c| c.label()).unwrap_or("Payment");
            let pts = t.points.map(|p| format!("+{}", p)).unwrap_or_default();
            writeln!(
                out,
                "  {:<12}{:<w$}  {:<20}{:>8}{:>14}",
                date,
                truncate(&t.transaction.description, DESC_WIDTH),
                category,
                pts,
                table_amount(t),
                w = DESC_WIDTH
            )?;
        }
        if visible.len() > shown {
            writeln!(out, "  … {} more", visible.len() - shown)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Smart Insights")?;
    if analysis.rule_insights().next().is_none() {
        writeln!(out, "  Great job! No unusual spending patterns detected.")?;
    }
    for insight in &analysis.insights {
        let marker = match insight.severity {
            Severity::Warning => "[!]",
            Severity::Info => "[i]",
        };
        writeln!(out, "  {} {}", marker, insight.title)?;
        writeln!(out, "      {}", insight.description)?;
        if let Some(saving) = insight.estimated_saving.filter(|s| *s > 0) {
            writeln!(out, "      Potential Savings: ${}", saving)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Rewards Status")?;
    writeln!(out, "  Total Points Earned: {}", points(analysis.total_points))?;
    writeln!(
        out,
        "  Redeem for a {} statement credit or transfer to travel partners.",
        money(analysis.redemption_value())
    )?;

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    analysis: &'a Analysis,
    potential_savings: u64,
    redemption_value: f64,
}

pub fn write_json(out: &mut impl Write, analysis: &Analysis) -> Result<()> {
    let report = JsonReport {
        analysis,
        potential_savings: analysis.potential_savings(),
        redemption_value: analysis.redemption_value(),
    };
    serde_json::to_writer_pretty(&mut *out, &report).context("serialize analysis")?;
    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: usize,
    date: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    amount: f64,
    category: Option<&'static str>,
    points: Option<u64>,
}

pub fn write_csv(out: &mut impl Write, analysis: &Analysis, search: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for t in analysis
        .transactions
        .iter()
        .filter(|t| t.transaction.matches_search(search))
    {
        wtr.serialize(CsvRow {
            id: t.transaction.id,
            date: &t.transaction.date,
            description: &t.transaction.description,
            kind: if t.transaction.is_credit() { "credit" } else { "debit" },
            amount: t.transaction.amount,
            category: t.category.map(|c| c.key()),
            points: t.points,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
