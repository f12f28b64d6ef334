use anyhow::Result;

use crate::estimate::EstimationResult;
use crate::output::cost_rows;

pub fn estimate_to_csv(result: &EstimationResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["category", "item", "quantity", "unit_cost", "total"])?;
    for row in cost_rows(result) {
        writer.write_record([
            row.category.to_string(),
            row.item.to_string(),
            format!("{:.2}", row.quantity),
            format!("{:.2}", row.unit_cost),
            format!("{:.2}", row.total),
        ])?;
    }
    let b = &result.breakdown;
    for (label, value) in [
        ("subtotal", b.subtotal),
        ("overhead", b.overhead),
        ("profit", b.profit),
        ("total", b.total),
    ] {
        writer.write_record([
            "summary".to_string(),
            label.to_string(),
            String::new(),
            String::new(),
            format!("{value:.2}"),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
