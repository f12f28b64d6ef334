pub mod csv;
pub mod json;
pub mod table;

use crate::estimate::{EstimationResult, LineItem};

/// One flattened cost line for tabular output.
#[derive(Debug, Clone, PartialEq)]
pub struct CostRow {
    pub category: &'static str,
    pub item: &'static str,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total: f64,
}

impl CostRow {
    fn from_item(category: &'static str, item: &'static str, line: &LineItem) -> Self {
        Self {
            category,
            item,
            quantity: line.quantity,
            unit_cost: line.unit_cost,
            total: line.total_cost,
        }
    }
}

pub fn cost_rows(result: &EstimationResult) -> Vec<CostRow> {
    let b = &result.breakdown;
    let mut rows = Vec::new();

    if let Some(m) = &b.materials.sealcoating {
        rows.push(CostRow::from_item("sealcoating", "sealer concentrate (gal)", &m.sealer));
        rows.push(CostRow::from_item("sealcoating", "sand (bags)", &m.sand));
        rows.push(CostRow::from_item("sealcoating", "water (gal)", &m.water));
        rows.push(CostRow::from_item("sealcoating", "fast dry (buckets)", &m.fast_dry));
        if let Some(prep) = &m.prep_seal {
            rows.push(CostRow::from_item("sealcoating", "prep seal (buckets)", prep));
        }
    }
    if let Some(m) = &b.materials.crack_filling {
        rows.push(CostRow::from_item("crack filling", "crack filler (boxes)", &m.crack_filler));
        rows.push(CostRow::from_item("crack filling", "propane (tanks)", &m.propane));
        if let Some(sand) = &m.sand {
            rows.push(CostRow::from_item("crack filling", "sand (bags)", sand));
        }
    }
    if let Some(m) = &b.materials.line_striping {
        rows.push(CostRow::from_item("line striping", "paint (linear ft)", &m.paint));
        rows.push(CostRow::from_item("line striping", "stencils", &m.stencils));
    }
    if let Some(m) = &b.materials.patching {
        rows.push(CostRow::from_item("patching", "patch material (sq ft)", &m.patch_material));
    }

    let rate = b.labor.hourly_rate;
    for (item, line) in [
        ("preparation (h)", &b.labor.preparation),
        ("application (h)", &b.labor.application),
        ("cleanup (h)", &b.labor.cleanup),
    ] {
        rows.push(CostRow {
            category: "labor",
            item,
            quantity: line.hours,
            unit_cost: rate,
            total: line.cost,
        });
    }

    let eq = &b.equipment;
    for (item, line) in [
        ("sealcoating machine (h)", &eq.sealcoating_machine),
        ("crack filling machine (h)", &eq.crack_filling_machine),
        ("striping equipment (h)", &eq.striping_equipment),
    ] {
        if let Some(line) = line {
            rows.push(CostRow::from_item("equipment", item, line));
        }
    }
    rows.push(CostRow::from_item("equipment", "miscellaneous", &eq.miscellaneous));

    rows.push(CostRow::from_item("fuel", "transportation (gal)", &b.fuel.transportation));
    rows.push(CostRow::from_item("fuel", "equipment operation (gal)", &b.fuel.equipment_operation));
    rows.push(CostRow {
        category: "mobilization",
        item: "mobilization",
        quantity: 1.0,
        unit_cost: b.mobilization,
        total: b.mobilization,
    });
    rows
}
