//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use devicecalc_engine::{AlternativeOffer, CalculationResult};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print structured data; commands render their own tables, anything
    /// without one falls back to YAML
    pub fn print<T: Serialize>(&self, data: &T) {
        match self {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Yaml | OutputFormat::Table => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
        }
    }
}

/// Amount rounded for display
pub fn money(amount: Decimal) -> String {
    amount.round_dp(2).normalize().to_string()
}

fn flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "-"
    }
}

#[derive(Tabled)]
pub(crate) struct FigureRow {
    #[tabled(rename = "Figure")]
    pub figure: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
struct OfferRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Bundle")]
    name: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Unlimited")]
    unlimited: &'static str,
    #[tabled(rename = "Free credits")]
    free_consumables: &'static str,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Annual service")]
    annual_service: &'static str,
    #[tabled(rename = "Loaner")]
    loaner: &'static str,
    #[tabled(rename = "Breakdown")]
    breakdown: String,
}

/// Key figures of a result as a two-column table
pub fn result_table(result: &CalculationResult) -> String {
    let opt = |v: Option<Decimal>| v.map(money).unwrap_or_else(|| "-".into());
    let rows = vec![
        FigureRow { figure: "Leasing / month", value: money(result.leasing.monthly) },
        FigureRow { figure: "Leasing factor", value: result.leasing.factor.to_string() },
        FigureRow { figure: "Credit unit price", value: money(result.credits.unit_price) },
        FigureRow {
            figure: "Consumables / flatrate",
            value: money(result.operating_cost.consumable_or_flatrate_cost),
        },
        FigureRow {
            figure: "Service tier",
            value: format!("{} ({})", result.service.tier, money(result.operating_cost.service_tier_cost)),
        },
        FigureRow { figure: "Operating cost", value: money(result.operating_cost.total_cost) },
        FigureRow { figure: "Insurance", value: money(result.insurance_cost) },
        FigureRow { figure: "Revenue / month incl. tax", value: money(result.revenue.monthly_inc_tax) },
        FigureRow { figure: "Revenue / month excl. tax", value: money(result.revenue.monthly_ex_tax) },
        FigureRow { figure: "Revenue / year excl. tax", value: money(result.revenue.yearly_ex_tax) },
        FigureRow { figure: "Net / month excl. tax", value: money(result.net.per_month_ex_tax) },
        FigureRow { figure: "Net / year excl. tax", value: money(result.net.per_year_ex_tax) },
        FigureRow {
            figure: "Credit break-even (uses/day)",
            value: opt(result.profitability.credit_break_even_uses_per_day),
        },
        FigureRow {
            figure: "Net break-even (uses/day)",
            value: opt(result.profitability.operating_break_even_uses_per_day),
        },
    ];
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Ranked alternatives table
pub fn offers_table(offers: &[AlternativeOffer]) -> String {
    let rows: Vec<OfferRow> = offers
        .iter()
        .map(|o| OfferRow {
            rank: o.rank,
            name: if o.is_current { format!("{} *", o.name) } else { o.name.clone() },
            monthly: money(o.monthly_cost),
            unlimited: flag(o.features.unlimited_use),
            free_consumables: flag(o.features.free_consumables_included),
            tier: o.features.service_tier.to_string(),
            annual_service: flag(o.features.annual_service_included),
            loaner: flag(o.features.loaner_device_included),
            breakdown: o.breakdown.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Warnings in yellow, errors in red, on stderr
pub fn print_issues(result: &CalculationResult) {
    for error in &result.errors {
        eprintln!("{} {}", "error:".red().bold(), error);
    }
    for warning in &result.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}
