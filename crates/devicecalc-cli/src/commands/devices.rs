//! Device catalog commands

use anyhow::Result;
use devicecalc_common::{Device, DeviceCatalog, LeasingBounds, Money};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{fetch_device, open_catalog};
use crate::config::Config;
use crate::output::{money, FigureRow, OutputFormat};
use crate::DeviceCommands;

#[derive(Debug, Serialize, Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Consumables")]
    consumables: String,
    #[tabled(rename = "Tariffs (months)")]
    tariffs: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            category: format!("{:?}", d.category),
            price: money(d.price),
            consumables: if d.uses_consumables() { "yes".into() } else { "-".into() },
            tariffs: d
                .tariffs
                .keys()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// One device's pricing data as a two-column table
fn device_table(d: &Device) -> String {
    let opt = |v: Option<Money>| v.map(money).unwrap_or_else(|| "-".into());
    let bounds = |b: &LeasingBounds| format!("{} / {} / {}", money(b.min), money(b.standard), money(b.max));

    let mut rows = vec![
        FigureRow { figure: "ID", value: d.id.to_string() },
        FigureRow { figure: "Name", value: d.name.clone() },
        FigureRow { figure: "Category", value: format!("{:?}", d.category) },
        FigureRow { figure: "Price", value: money(d.price) },
        FigureRow {
            figure: "Leasing min / std / max",
            value: d.leasing.as_ref().map(bounds).unwrap_or_else(|| "-".into()),
        },
    ];
    rows.extend(d.tariffs.iter().map(|(months, row)| FigureRow {
        figure: "Tariff",
        value: format!("{} months: {}", months, bounds(row)),
    }));
    if let Some(c) = &d.consumables {
        rows.push(FigureRow {
            figure: "Consumable price",
            value: format!("{} - {} ({} per use)", money(c.min_price), money(c.max_price), c.per_use),
        });
        rows.push(FigureRow { figure: "Flatrate", value: money(c.flatrate_price) });
    }
    rows.extend([
        FigureRow { figure: "Default usage price", value: opt(d.default_usage_price) },
        FigureRow { figure: "All-inclusive leasing", value: opt(d.strategic_leasing) },
        FigureRow { figure: "Insurance / month", value: opt(d.insurance_per_month) },
        FigureRow { figure: "Daily capacity", value: opt(d.max_daily_capacity) },
    ]);
    Table::new(rows).with(Style::rounded()).to_string()
}

pub async fn handle(
    action: DeviceCommands,
    config: &Config,
    catalog_flag: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let catalog = open_catalog(config, catalog_flag)?;
    match action {
        DeviceCommands::List => {
            let devices = catalog.fetch_active().await?;
            tracing::info!(count = devices.len(), "Fetched active devices");
            match format {
                OutputFormat::Table => {
                    let rows: Vec<DeviceRow> = devices.iter().map(DeviceRow::from).collect();
                    println!("{}", Table::new(rows).with(Style::rounded()));
                }
                _ => format.print(&devices),
            }
        }
        DeviceCommands::Get { id } => {
            let device = fetch_device(&catalog, &id).await?;
            match format {
                OutputFormat::Table => println!("{}", device_table(&device)),
                _ => format.print(&device),
            }
        }
    }
    Ok(())
}
