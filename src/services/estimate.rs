// src/services/estimate.rs
//
// Orçamento residencial por template: a taxa-base (mão de obra + terceiros)
// é repartida em percentuais fixos por tipo de projeto. Os valores vêm de
// dados históricos de obras em Massachusetts — ajuste com os seus.

use crate::models::estimate::{Estimate, EstimateRange, EstimateRequest, LineItem, ProjectType};

/// Markup embutido no total (nunca exposto como linha).
pub const MARKUP_RATE: f64 = 0.35;

/// Faixa da proposta: ±8% sobre o total.
const RANGE_SPREAD: f64 = 0.08;

const NOTES: [&str; 3] = [
    "Automated estimate for planning only; field verification required.",
    "Final pricing varies by measurements, code needs, and site conditions.",
    "Massachusetts: permit costs and timelines vary by town.",
];

/// Taxa-base por sqft, por tipo de projeto.
pub fn base_rate_per_sqft(project_type: ProjectType) -> f64 {
    match project_type {
        ProjectType::Kitchen => 255.0,
        ProjectType::Bathroom => 315.0,
        ProjectType::Basement => 90.0,
        ProjectType::Exterior => 70.0,
        ProjectType::Other => 135.0,
    }
}

/// Partição percentual da taxa-base em categorias de ofício.
/// Cada tabela soma exatamente 1.0 (testado abaixo).
pub fn trade_template(project_type: ProjectType) -> &'static [(&'static str, f64)] {
    match project_type {
        ProjectType::Kitchen => &[
            ("Demo & protection", 0.08),
            ("Rough carpentry", 0.10),
            ("Electrical (rough + trim)", 0.12),
            ("Plumbing (rough + trim)", 0.10),
            ("Drywall & paint", 0.10),
            ("Cabinet install", 0.12),
            ("Counters install (labor)", 0.06),
            ("Flooring install (labor)", 0.08),
            ("Tile / backsplash labor", 0.08),
            ("Finish trim & punch list", 0.10),
            ("Cleanup & haul-away", 0.06),
        ],
        ProjectType::Bathroom => &[
            ("Demo & protection", 0.10),
            ("Framing / carpentry", 0.10),
            ("Plumbing (rough + trim)", 0.16),
            ("Electrical (rough + trim)", 0.10),
            ("Waterproofing system labor", 0.10),
            ("Tile labor", 0.16),
            ("Drywall & paint", 0.08),
            ("Vanity / fixture install", 0.10),
            ("Glass / accessories allowance", 0.04),
            ("Cleanup & haul-away", 0.06),
        ],
        ProjectType::Basement => &[
            ("Demo / prep", 0.08),
            ("Framing & insulation", 0.18),
            ("Electrical", 0.14),
            ("Plumbing (if needed)", 0.08),
            ("Drywall & paint", 0.18),
            ("Flooring labor", 0.14),
            ("Doors / trim labor", 0.10),
            ("Cleanup & haul-away", 0.10),
        ],
        ProjectType::Exterior => &[
            ("Demo / prep", 0.10),
            ("Flashing / weather barrier labor", 0.14),
            ("Siding labor", 0.24),
            ("Windows/doors labor (if applicable)", 0.10),
            ("Trim labor", 0.14),
            ("Paint / touch-ups", 0.10),
            ("Cleanup & haul-away", 0.18),
        ],
        ProjectType::Other => &[
            ("Demo & prep", 0.10),
            ("Rough work", 0.30),
            ("Finish work", 0.40),
            ("Cleanup & haul-away", 0.20),
        ],
    }
}

// Arredondamento: metade sempre para longe de zero (`f64::round`).
// Regra fixada de propósito — o total e a faixa dependem dela.
fn round_to_hundred(n: f64) -> i64 {
    ((n / 100.0).round() * 100.0) as i64
}

fn round_dollars(n: f64) -> i64 {
    n.round() as i64
}

/// Calcula o orçamento completo. Pura e determinística: entrada válida
/// (garantida pelo handler via `validator`) nunca falha aqui.
pub fn build_estimate(req: &EstimateRequest) -> Estimate {
    let sqft = req.room_size_sqft;
    let q_mult = req.quality.multiplier();

    // Custo de materiais escolhidos na paleta (não passa pelo template)
    let materials: f64 = req.selected_products.iter().map(|p| p.qty * p.price).sum();

    let base = base_rate_per_sqft(req.project_type) * sqft * q_mult;

    let mut items: Vec<(String, f64)> = trade_template(req.project_type)
        .iter()
        .map(|(label, pct)| ((*label).to_owned(), base * pct))
        .collect();

    // Materiais entram como segunda linha, logo depois do demo
    items.insert(1, ("Materials (selected from palette)".to_owned(), materials));

    // Provisões fixas: licenças, caçamba e logística
    let permits = if req.project_type == ProjectType::Exterior { 650.0 } else { 1250.0 };
    let dumpster = if req.project_type == ProjectType::Basement { 750.0 } else { 1150.0 };
    let delivery = 450.0;

    items.push(("Permits allowance".to_owned(), permits));
    items.push(("Disposal / dumpster".to_owned(), dumpster));
    items.push(("Delivery / logistics".to_owned(), delivery));

    let subtotal: f64 = items.iter().map(|(_, cost)| cost).sum();

    let total = subtotal * (1.0 + MARKUP_RATE);
    let low = total * (1.0 - RANGE_SPREAD);
    let high = total * (1.0 + RANGE_SPREAD);

    Estimate {
        items: items
            .into_iter()
            .map(|(label, cost)| LineItem { label, cost: round_dollars(cost) })
            .collect(),
        subtotal: round_dollars(subtotal),
        markup_rate: MARKUP_RATE,
        total: round_to_hundred(total),
        range: EstimateRange {
            low: round_to_hundred(low),
            high: round_to_hundred(high),
        },
        notes: NOTES.iter().map(|s| (*s).to_owned()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::estimate::Quality;
    use crate::models::product::{SelectedProduct, Unit};

    fn request(
        project_type: ProjectType,
        sqft: f64,
        quality: Quality,
        selected: Vec<SelectedProduct>,
    ) -> EstimateRequest {
        EstimateRequest {
            project_type,
            room_size_sqft: sqft,
            quality,
            selected_products: selected,
        }
    }

    fn product(price: f64, qty: f64) -> SelectedProduct {
        SelectedProduct {
            sku: "TST-1".into(),
            name: "Teste".into(),
            brand: "Marca".into(),
            price,
            unit: Unit::Sqft,
            image: String::new(),
            qty,
        }
    }

    #[test]
    fn every_template_partitions_the_base_exactly() {
        for pt in ProjectType::ALL {
            let sum: f64 = trade_template(pt).iter().map(|(_, pct)| pct).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{:?} soma {}", pt, sum);
        }
    }

    #[test]
    fn kitchen_160_sqft_better_no_products() {
        // base = 255 * 160 * 1.0 = 40800; provisões = 2850; subtotal = 43650
        // total = 43650 * 1.35 = 58927.5 -> 58900 (metade para longe de zero
        // só entraria em jogo num empate exato de centena, que aqui não há)
        let est = build_estimate(&request(ProjectType::Kitchen, 160.0, Quality::Better, vec![]));

        assert_eq!(est.items[0], LineItem { label: "Demo & protection".into(), cost: 3264 });
        assert_eq!(
            est.items[1],
            LineItem { label: "Materials (selected from palette)".into(), cost: 0 }
        );
        assert_eq!(est.subtotal, 43650);
        assert_eq!(est.markup_rate, 0.35);
        assert_eq!(est.total, 58900);
        assert_eq!(est.range, EstimateRange { low: 54200, high: 63600 });
        assert_eq!(est.notes.len(), 3);
        // 11 categorias + materiais + 3 provisões
        assert_eq!(est.items.len(), 15);
    }

    #[test]
    fn is_deterministic() {
        let req = request(
            ProjectType::Bathroom,
            72.0,
            Quality::Best,
            vec![product(68.0, 24.0), product(3.25, 40.0)],
        );
        assert_eq!(build_estimate(&req), build_estimate(&req));
    }

    #[test]
    fn materials_line_is_always_second_and_unscaled() {
        let req = request(ProjectType::Basement, 500.0, Quality::Good, vec![product(10.0, 30.0)]);
        let est = build_estimate(&req);
        assert_eq!(est.items[1].label, "Materials (selected from palette)");
        // 10 * 30, sem multiplicador de qualidade nem percentual
        assert_eq!(est.items[1].cost, 300);
    }

    #[test]
    fn allowances_vary_by_project_type() {
        let find = |est: &Estimate, label: &str| {
            est.items.iter().find(|i| i.label == label).unwrap().cost
        };

        let ext = build_estimate(&request(ProjectType::Exterior, 100.0, Quality::Better, vec![]));
        assert_eq!(find(&ext, "Permits allowance"), 650);
        assert_eq!(find(&ext, "Disposal / dumpster"), 1150);

        let bsm = build_estimate(&request(ProjectType::Basement, 100.0, Quality::Better, vec![]));
        assert_eq!(find(&bsm, "Permits allowance"), 1250);
        assert_eq!(find(&bsm, "Disposal / dumpster"), 750);

        let kit = build_estimate(&request(ProjectType::Kitchen, 100.0, Quality::Better, vec![]));
        assert_eq!(find(&kit, "Permits allowance"), 1250);
        assert_eq!(find(&kit, "Disposal / dumpster"), 1150);
        assert_eq!(find(&kit, "Delivery / logistics"), 450);
    }

    #[test]
    fn quality_scales_only_the_base() {
        let good = build_estimate(&request(ProjectType::Kitchen, 100.0, Quality::Good, vec![]));
        let best = build_estimate(&request(ProjectType::Kitchen, 100.0, Quality::Best, vec![]));
        // Demo: 255*100*0.9*0.08 = 1836 vs 255*100*1.15*0.08 = 2346
        assert_eq!(good.items[0].cost, 1836);
        assert_eq!(best.items[0].cost, 2346);
        // Provisões não mudam com a qualidade
        assert_eq!(
            good.items.last().unwrap().cost,
            best.items.last().unwrap().cost
        );
    }

    #[test]
    fn range_always_brackets_the_total() {
        for pt in ProjectType::ALL {
            for sqft in [1.0, 47.0, 160.0, 999.0, 10000.0] {
                let est = build_estimate(&request(pt, sqft, Quality::Better, vec![]));
                assert!(est.range.low <= est.total, "{:?} {}", pt, sqft);
                assert!(est.total <= est.range.high, "{:?} {}", pt, sqft);
            }
        }
    }

    #[test]
    fn schema_boundaries_stay_finite() {
        let tiny = build_estimate(&request(ProjectType::Exterior, 1.0, Quality::Good, vec![]));
        assert!(tiny.total > 0);

        let huge = build_estimate(&request(ProjectType::Bathroom, 10000.0, Quality::Best, vec![]));
        assert!(huge.total > 0);
        assert!(huge.range.high > huge.range.low);
    }
}
