use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::estimate::quick::{QuickFuel, QuickSealcoat};
use crate::estimate::{
    CrackFillingMaterials, EstimationResult, LineItem, LineStripingMaterials, PatchingMaterials,
    WeightAnalysis,
};
use crate::output::cost_rows;
use crate::rates::RateTables;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

pub fn render_estimate(result: &EstimationResult) -> String {
    let mut out = String::new();
    let summary = &result.project_summary;
    out.push_str(&format!(
        "{}\nTimeline: {}\nQuoted {} - valid until {}\n\n",
        summary.description, summary.timeline, summary.quoted_on, summary.valid_until
    ));

    let mut table = new_table(vec!["Category", "Item", "Qty", "Unit", "Total"]);
    for row in cost_rows(result) {
        table.add_row(vec![
            row.category.to_string(),
            row.item.to_string(),
            format!("{:.2}", row.quantity),
            format!("${:.2}", row.unit_cost),
            format!("${:.2}", row.total),
        ]);
    }
    out.push_str(&table.to_string());
    out.push('\n');

    let b = &result.breakdown;
    let mut totals = new_table(vec!["", "Amount"]);
    for (label, value) in [
        ("Materials", b.materials.grand_total),
        ("Labor", b.labor.total.cost),
        ("Equipment", b.equipment.total),
        ("Fuel", b.fuel.total),
        ("Mobilization", b.mobilization),
        ("Subtotal", b.subtotal),
        ("Overhead", b.overhead),
        ("Profit", b.profit),
    ] {
        totals.add_row(vec![label.to_string(), format!("${value:.2}")]);
    }
    totals.add_row(Row::from(vec![
        Cell::new("TOTAL"),
        Cell::new(format!("${:.2}", b.total)).fg(Color::Green),
    ]));
    out.push_str(&totals.to_string());
    out.push('\n');

    let mut alternatives = new_table(vec!["Option", "Subtotal", "Markup", "Total"]);
    for option in [&result.alternatives.with_markup25, &result.alternatives.rounded_up] {
        alternatives.add_row(vec![
            option.label.clone(),
            format!("${:.2}", option.subtotal),
            format!("{:.2}%", option.markup_percentage),
            format!("${:.2}", option.total),
        ]);
    }
    out.push_str(&alternatives.to_string());
    out.push('\n');

    if let Some(weight) = &result.weight_analysis {
        out.push_str(&render_weight(weight));
        out.push('\n');
    }
    if !result.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for item in &result.recommendations {
            out.push_str(&format!("  - {item}\n"));
        }
    }
    out.push_str("\nDisclaimers:\n");
    for item in &result.disclaimers {
        out.push_str(&format!("  - {item}\n"));
    }
    out
}

pub fn render_weight(weight: &WeightAnalysis) -> String {
    let mut table = new_table(vec!["Weight", "lbs"]);
    for (label, value) in [
        ("Vehicle", weight.vehicle_weight),
        ("Equipment + sealer", weight.equipment_weight),
        ("Sand", weight.material_weight),
        ("Crew", weight.crew_weight),
        ("Total", weight.total_weight),
        ("GVWR", weight.gvwr),
    ] {
        table.add_row(vec![label.to_string(), format!("{value:.0}")]);
    }
    let status = if weight.within_limits {
        Cell::new(format!("OK {:.1}% margin", weight.safety_margin)).fg(Color::Green)
    } else {
        Cell::new(format!("OVER {:.1}%", -weight.safety_margin)).fg(Color::Red)
    };
    table.add_row(Row::from(vec![Cell::new("Status"), status]));

    let mut out = table.to_string();
    for warning in &weight.warnings {
        out.push_str(&format!("\nWARNING: {warning}"));
    }
    out
}

fn items_table(items: &[(&str, &LineItem)], total: f64) -> String {
    let mut table = new_table(vec!["Item", "Qty", "Unit", "Total"]);
    for (label, item) in items {
        table.add_row(vec![
            label.to_string(),
            format!("{:.2}", item.quantity),
            format!("${:.2}", item.unit_cost),
            format!("${:.2}", item.total_cost),
        ]);
    }
    table.add_row(vec![
        "Total".to_string(),
        String::new(),
        String::new(),
        format!("${total:.2}"),
    ]);
    table.to_string()
}

pub fn render_quick_sealcoat(quick: &QuickSealcoat) -> String {
    let m = &quick.materials;
    let mut items = vec![
        ("Sealer concentrate (gal)", &m.sealer),
        ("Sand (bags)", &m.sand),
        ("Water (gal)", &m.water),
        ("Fast dry (buckets)", &m.fast_dry),
    ];
    if let Some(prep) = &m.prep_seal {
        items.push(("Prep seal (buckets)", prep));
    }
    format!(
        "Mixed gallons needed: {:.0}\n{}\n{}",
        m.gallons_needed,
        items_table(&items, m.total),
        render_weight(&quick.weight_analysis)
    )
}

pub fn render_quick_crack_fill(m: &CrackFillingMaterials) -> String {
    let mut items = vec![("Crack filler (boxes)", &m.crack_filler), ("Propane (tanks)", &m.propane)];
    if let Some(sand) = &m.sand {
        items.push(("Sand (bags)", sand));
    }
    items_table(&items, m.total)
}

pub fn render_quick_striping(m: &LineStripingMaterials) -> String {
    format!(
        "Total linear feet: {:.0}\n{}",
        m.total_linear_feet,
        items_table(&[("Paint (ft)", &m.paint), ("Stencils", &m.stencils)], m.total)
    )
}

pub fn render_quick_patching(m: &PatchingMaterials) -> String {
    items_table(&[("Patch material (sq ft)", &m.patch_material)], m.total)
}

pub fn render_quick_fuel(q: &QuickFuel) -> String {
    format!(
        "Round trip: {:.1} mi\n{}\nMobilization: ${:.2}",
        q.fuel.round_trip_miles,
        items_table(
            &[
                ("Transportation (gal)", &q.fuel.transportation),
                ("Equipment operation (gal)", &q.fuel.equipment_operation),
            ],
            q.fuel.total
        ),
        q.mobilization
    )
}

pub fn render_rates(rates: &RateTables) -> String {
    let mut table = new_table(vec!["Rate", "Value"]);
    let m = &rates.materials;
    let rows: Vec<(&str, String)> = vec![
        ("Base address", rates.business.base_address.clone()),
        ("Default distance", format!("{:.0} mi", rates.business.default_distance_miles)),
        ("Vehicle", rates.vehicle.name.clone()),
        ("Curb weight / GVWR", format!("{:.0} / {:.0} lbs", rates.vehicle.curb_weight_lbs, rates.vehicle.gvwr_lbs)),
        ("Fuel economy", format!("{:.1} mpg", rates.vehicle.miles_per_gallon)),
        ("Sealer tank", format!("{} ({:.0} lbs empty)", rates.sealer_tank.name, rates.sealer_tank.empty_weight_lbs)),
        ("Sealer", format!("${:.2}/gal", m.sealer_per_gallon)),
        ("Sand", format!("${:.2}/bag", m.sand_per_bag)),
        ("Fast dry", format!("${:.2}/bucket", m.fast_dry_per_bucket)),
        ("Prep seal", format!("${:.2}/bucket", m.prep_seal_per_bucket)),
        ("Crack filler", format!("${:.2}/box", m.crack_fill_per_box)),
        ("Propane", format!("${:.2}/tank", m.propane_per_tank)),
        ("Paint", format!("${:.2}/ft", m.paint_per_linear_foot)),
        ("Stencil", format!("${:.2} each", m.stencil_each)),
        ("Hot mix / cold patch", format!("${:.2} / ${:.2} per sq ft", m.hot_mix_per_sqft, m.cold_patch_per_sqft)),
        ("Diesel", format!("${:.2}/gal", m.diesel_per_gallon)),
        ("Coverage", format!("{:.0} sq ft/gal", rates.application.coverage_per_gallon)),
        ("Labor", format!("${:.2}/h", rates.labor.hourly_rate)),
        ("Overhead / profit", format!("{:.0}% / {:.0}%", rates.pricing.overhead_rate * 100.0, rates.pricing.profit_rate * 100.0)),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    table.to_string()
}
