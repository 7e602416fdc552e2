// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::state::plan::{Cell, StowagePlan};
use serde::Serialize;
use std::io::Write;
use stowage_model::prelude::{ContainerRegistry, SizeClass, SlotCoord, VesselGeometry};

// Single-voyage run: every container shares one rotation and arrives full.
const LOAD_PORT: &str = "IDJKT";
const DISCHARGE_PORT: &str = "IDSUB";
const ISO_TWENTY: &str = "22G1";
const ISO_FORTY: &str = "45G1";
const FREIGHT_STATUS_FULL: &str = "F";

/// One row of the exported stowage list. Bay, row and tier carry the
/// painted identifiers (not grid indices), zero padded to two digits; a
/// 40-foot container reports the even bay it straddles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StowageRecord {
    pub container_id: String,
    pub bay: String,
    pub row: String,
    pub tier: String,
    pub slot: String,
    pub load_port: &'static str,
    pub discharge_port: &'static str,
    pub container_iso: &'static str,
    pub freight_status: &'static str,
    pub weight_tons: f64,
}

/// Extracts the export rows of a plan, sorted by bay, row, tier.
pub fn plan_records(
    plan: &StowagePlan,
    geometry: &VesselGeometry,
    registry: &ContainerRegistry,
) -> Vec<StowageRecord> {
    let mut records: Vec<StowageRecord> = plan
        .iter_primary()
        .map(|(coord, idx)| {
            let container = registry.get(idx);
            let bay_id = match container.size() {
                // A 40ft box straddles the even bay between its halves.
                SizeClass::Forty => geometry.bay_id(coord.bay) + 1,
                SizeClass::Twenty => geometry.bay_id(coord.bay),
            };
            let bay = format!("{bay_id:02}");
            let row = format!("{:02}", coord.row);
            let tier = format!("{:02}", geometry.tier_id(coord.tier));
            let slot = format!("{bay}{row}{tier}");
            StowageRecord {
                container_id: container.id().value().clone(),
                bay,
                row,
                tier,
                slot,
                load_port: LOAD_PORT,
                discharge_port: DISCHARGE_PORT,
                container_iso: match container.size() {
                    SizeClass::Twenty => ISO_TWENTY,
                    SizeClass::Forty => ISO_FORTY,
                },
                freight_status: FREIGHT_STATUS_FULL,
                weight_tons: container.weight().tons(),
            }
        })
        .collect();
    records.sort_by(|a, b| {
        (&a.bay, &a.row, &a.tier).cmp(&(&b.bay, &b.row, &b.tier))
    });
    records
}

/// Writes the records as CSV with the export column order.
pub fn write_csv<W: Write>(records: &[StowageRecord], mut w: W) -> std::io::Result<()> {
    writeln!(
        w,
        "Container_ID,Bay,Row,Tier,slot,Load Port,Discharge Port,Container ISO,F/E,Weight_ton"
    )?;
    for r in records {
        writeln!(
            w,
            "{},{},{},{},{},{},{},{},{},{}",
            r.container_id,
            r.bay,
            r.row,
            r.tier,
            r.slot,
            r.load_port,
            r.discharge_port,
            r.container_iso,
            r.freight_status,
            r.weight_tons
        )?;
    }
    Ok(())
}

const CELL_WIDTH: usize = 12;

/// Renders the plan tier by tier, topmost first, for logs and debugging.
/// A 40-foot placement spans the two bay columns of its halves. Tiers
/// without any occupied cell are omitted.
pub fn render_tier_views(
    plan: &StowagePlan,
    geometry: &VesselGeometry,
    registry: &ContainerRegistry,
) -> String {
    let shape = plan.shape();
    let mut out = String::new();

    for t_idx in (0..shape.tiers).rev() {
        let occupied = (0..shape.bays).any(|b| {
            (0..shape.rows).any(|r| plan.is_occupied(SlotCoord::new(t_idx, b, r)))
        });
        if !occupied {
            continue;
        }

        out.push_str(&format!("--- Tier {:02} ---\n", geometry.tier_id(t_idx)));

        let mut header = pad_left("Row");
        let mut b = 0;
        while b < shape.bays {
            let bay_id = geometry.bay_id(b);
            if b + 1 < shape.bays && geometry.bay_id(b + 1) == bay_id + 2 {
                header.push_str(&pad_center(
                    &format!("Bay{:02} (40ft)", bay_id + 1),
                    CELL_WIDTH * 2,
                ));
                b += 2;
            } else {
                header.push_str(&pad_left(&format!("Bay{bay_id:02}")));
                b += 1;
            }
        }
        out.push_str(&header);
        out.push('\n');

        for r in 0..shape.rows {
            let mut line = pad_left(&format!("Row {r:02}"));
            let mut has_content = false;
            let mut b = 0;
            while b < shape.bays {
                let coord = SlotCoord::new(t_idx, b, r);
                if !geometry.is_valid_twenty(coord) {
                    line.push_str(&" ".repeat(CELL_WIDTH));
                    b += 1;
                    continue;
                }
                match plan.cell(coord) {
                    Cell::Primary(idx) => {
                        let container = registry.get(idx);
                        has_content = true;
                        if container.size() == SizeClass::Forty {
                            line.push_str(&pad_center(
                                container.id().value(),
                                CELL_WIDTH * 2,
                            ));
                            b += 2;
                            continue;
                        }
                        line.push_str(&pad_left(container.id().value()));
                    }
                    Cell::SecondaryOf(_) => line.push_str(&pad_left(".")),
                    Cell::Empty => line.push_str(&pad_left(".")),
                }
                b += 1;
            }
            if has_content {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out.push('\n');
    }

    out
}

fn pad_left(s: &str) -> String {
    format!("{:<width$}", s, width = CELL_WIDTH)
}

fn pad_center(s: &str, width: usize) -> String {
    format!("{:^width$}", s, width = width)
}
