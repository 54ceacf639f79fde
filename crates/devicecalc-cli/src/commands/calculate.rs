//! Calculation commands

use anyhow::Result;
use chrono::{DateTime, Utc};
use devicecalc_engine::{
    AlternativeOffer, CalculationEngine, CalculationInputs, CalculationResult, ConsumptionPreference,
    LeasingModel, PaymentMode, ServiceTier,
};
use serde::Serialize;

use super::{fetch_device, open_catalog};
use crate::config::Config;
use crate::output::{self, OutputFormat};
use crate::{ModelArg, PaymentArg, ScenarioArgs, TierArg};

/// Which part of the result to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Full,
    Alternatives,
}

#[derive(Debug, Serialize)]
struct CalculationReport<'a> {
    generated_at: DateTime<Utc>,
    device_name: &'a str,
    result: &'a CalculationResult,
}

#[derive(Debug, Serialize)]
struct AlternativesReport<'a> {
    generated_at: DateTime<Utc>,
    device_name: &'a str,
    alternatives: &'a [AlternativeOffer],
}

impl From<PaymentArg> for PaymentMode {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Leasing => PaymentMode::Leasing,
            PaymentArg::Cash => PaymentMode::Cash,
        }
    }
}

impl From<TierArg> for ServiceTier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Bronze => ServiceTier::Bronze,
            TierArg::Silver => ServiceTier::Silver,
            TierArg::Gold => ServiceTier::Gold,
        }
    }
}

impl From<ModelArg> for LeasingModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Hybrid => LeasingModel::Hybrid,
            ModelArg::AllInclusive => LeasingModel::AllInclusive,
        }
    }
}

pub async fn handle(
    args: ScenarioArgs,
    config: &Config,
    catalog_flag: Option<&str>,
    engine_config_path: Option<&str>,
    format: OutputFormat,
    view: View,
) -> Result<()> {
    let engine = CalculationEngine::new(config.engine_config(engine_config_path)?);
    let catalog = open_catalog(config, catalog_flag)?;
    let device = fetch_device(&catalog, &args.device).await?;

    let inputs = CalculationInputs {
        device: Some(&device),
        uses_per_day: args.uses_per_day,
        unit_price: args.unit_price,
        payment_mode: args.payment.into(),
        leasing_months: args.months,
        insurance: args.insurance,
        service_tier: args.tier.into(),
        adjustment_factor: args.factor,
        consumption: if args.flatrate {
            ConsumptionPreference::Flatrate
        } else {
            ConsumptionPreference::PayPerUse
        },
        working_days_per_month: args.working_days,
        leasing_model: args.model.into(),
    };

    let result = engine.calculate(&inputs);
    tracing::info!(
        device = %device.id,
        valid = result.is_valid,
        warnings = result.warnings.len(),
        "Calculation finished"
    );

    let generated_at = Utc::now();
    match (format, view) {
        (OutputFormat::Table, View::Full) => {
            println!("{} ({})", device.name, device.id);
            println!("{}", output::result_table(&result));
            println!("{}", output::offers_table(&result.alternatives));
            output::print_issues(&result);
        }
        (OutputFormat::Table, View::Alternatives) => {
            println!("{}", output::offers_table(&result.alternatives));
            output::print_issues(&result);
        }
        (_, View::Full) => format.print(&CalculationReport {
            generated_at,
            device_name: &device.name,
            result: &result,
        }),
        (_, View::Alternatives) => format.print(&AlternativesReport {
            generated_at,
            device_name: &device.name,
            alternatives: &result.alternatives,
        }),
    }

    if !result.is_valid {
        anyhow::bail!("calculation for {} is not valid", device.id);
    }
    Ok(())
}
