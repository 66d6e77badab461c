use crate::error::{Error, Result};
use crate::prices::{EnergyRecord, Metric, RankField, RecordSummary};
use std::cmp::Ordering;

/// Keeps records where `key` is present, preserving order.
pub fn filter_valid(records: Vec<EnergyRecord>, key: Metric) -> Vec<EnergyRecord> {
    records
        .into_iter()
        .filter(|record| key.value(record).is_some())
        .collect()
}

/// Writes a 1-based rank of `key` into `rank_field` of every record.
///
/// Sorting is stable so equal values keep their original relative order.
/// Records without a value for `key` rank after all records that have one,
/// whichever direction is better.
pub fn rank(
    mut records: Vec<EnergyRecord>,
    key: Metric,
    rank_field: RankField,
    lower_is_better: bool,
) -> Vec<EnergyRecord> {
    let mut order = (0..records.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        match (key.value(&records[a]), key.value(&records[b])) {
            (Some(a), Some(b)) if lower_is_better => a.total_cmp(&b),
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });

    for (position, index) in order.into_iter().enumerate() {
        rank_field.set(&mut records[index], position as u32 + 1);
    }
    records
}

pub fn process_electricity(raw: Vec<EnergyRecord>) -> Vec<EnergyRecord> {
    let records = filter_valid(raw, Metric::TotalPrice);
    let records = rank(records, Metric::TotalPrice, RankField::TotalPrice, true);
    // Null sustainability scores are ranked too, last
    rank(
        records,
        Metric::SustainabilityScore,
        RankField::SustainabilityScore,
        false,
    )
}

pub fn process_gas(raw: Vec<EnergyRecord>) -> Vec<EnergyRecord> {
    let records = filter_valid(raw, Metric::TotalPrice);
    rank(records, Metric::TotalPrice, RankField::TotalPrice, true)
}

/// Picks the cheapest and most expensive record, and for electricity the one
/// with the best sustainability rank. First record wins ties.
pub fn extract_summary(
    records: &[EnergyRecord],
    include_sustainability: bool,
) -> Result<RecordSummary> {
    let first = records.first().ok_or(Error::EmptyDataset)?;

    let mut price_low = first;
    let mut price_high = first;
    for record in records {
        let Some(price) = record.total_price_tax_included else {
            continue;
        };
        if price_low.total_price_tax_included.map_or(true, |low| price < low) {
            price_low = record;
        }
        if price_high.total_price_tax_included.map_or(true, |high| price > high) {
            price_high = record;
        }
    }

    let sustainability_high = if include_sustainability {
        best_ranked(records, RankField::SustainabilityScore).cloned()
    } else {
        None
    };

    Ok(RecordSummary {
        price_low: price_low.clone(),
        price_high: price_high.clone(),
        sustainability_high,
    })
}

/// Record with the lowest rank in `rank_field`, ignoring unranked records
fn best_ranked(records: &[EnergyRecord], rank_field: RankField) -> Option<&EnergyRecord> {
    let mut best: Option<(&EnergyRecord, u32)> = None;
    for record in records {
        if let Some(rank) = rank_field.get(record) {
            if best.map_or(true, |(_, best_rank)| rank < best_rank) {
                best = Some((record, rank));
            }
        }
    }
    best.map(|(record, _)| record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::EnergyRecord;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref ELECTRICITY: Vec<EnergyRecord> = vec![
            EnergyRecord::with_price_and_score(Some(100.0), Some(80.0)),
            EnergyRecord::with_price_and_score(Some(200.0), Some(90.0)),
            EnergyRecord::with_price_and_score(None, Some(70.0)),
        ];
    }

    fn prices(values: &[f64]) -> Vec<EnergyRecord> {
        values.iter().copied().map(EnergyRecord::with_price).collect()
    }

    fn ranks(records: &[EnergyRecord], field: RankField) -> Vec<u32> {
        records.iter().map(|r| field.get(r).unwrap()).collect()
    }

    #[test]
    fn filter_valid_drops_null_keys_in_order() {
        let records = vec![
            EnergyRecord::with_price(100.0),
            EnergyRecord::default(),
            EnergyRecord::with_price(300.0),
        ];

        let result = filter_valid(records, Metric::TotalPrice);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].total_price_tax_included, Some(100.0));
        assert_eq!(result[1].total_price_tax_included, Some(300.0));
    }

    #[test]
    fn rank_lower_is_better() {
        let result = rank(
            prices(&[300.0, 100.0, 200.0]),
            Metric::TotalPrice,
            RankField::TotalPrice,
            true,
        );
        assert_eq!(ranks(&result, RankField::TotalPrice), vec![3, 1, 2]);
    }

    #[test]
    fn rank_higher_is_better() {
        let result = rank(
            prices(&[300.0, 100.0, 200.0]),
            Metric::TotalPrice,
            RankField::TotalPrice,
            false,
        );
        assert_eq!(ranks(&result, RankField::TotalPrice), vec![1, 3, 2]);
    }

    #[test]
    fn rank_ties_keep_insertion_order() {
        let result = rank(
            prices(&[5.0, 1.0, 5.0, 1.0]),
            Metric::TotalPrice,
            RankField::TotalPrice,
            true,
        );
        assert_eq!(ranks(&result, RankField::TotalPrice), vec![3, 1, 4, 2]);

        let result = rank(
            prices(&[5.0, 1.0, 5.0, 1.0]),
            Metric::TotalPrice,
            RankField::TotalPrice,
            false,
        );
        assert_eq!(ranks(&result, RankField::TotalPrice), vec![1, 3, 2, 4]);
    }

    #[test]
    fn rank_is_a_permutation_without_gaps() {
        let values = [0.31, -0.02, 0.31, 0.18, 0.0, 0.27, -0.02, 0.5, 0.11];
        for lower_is_better in [true, false] {
            let result = rank(
                prices(&values),
                Metric::TotalPrice,
                RankField::TotalPrice,
                lower_is_better,
            );
            let mut assigned = ranks(&result, RankField::TotalPrice);
            assigned.sort_unstable();
            assert_eq!(assigned, (1..=values.len() as u32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn rank_puts_missing_values_last() {
        let records = vec![
            EnergyRecord::with_price_and_score(Some(1.0), None),
            EnergyRecord::with_price_and_score(Some(1.0), Some(10.0)),
            EnergyRecord::with_price_and_score(Some(1.0), Some(20.0)),
        ];
        let result = rank(
            records.clone(),
            Metric::SustainabilityScore,
            RankField::SustainabilityScore,
            false,
        );
        assert_eq!(ranks(&result, RankField::SustainabilityScore), vec![3, 2, 1]);

        let result = rank(
            records,
            Metric::SustainabilityScore,
            RankField::SustainabilityScore,
            true,
        );
        assert_eq!(ranks(&result, RankField::SustainabilityScore), vec![3, 1, 2]);
    }

    #[test]
    fn process_electricity_filters_and_ranks() {
        let result = process_electricity(ELECTRICITY.clone());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].rank_total_price, Some(1));
        assert_eq!(result[1].rank_total_price, Some(2));
        assert_eq!(result[1].rank_sustainability_score, Some(1));
        assert_eq!(result[0].rank_sustainability_score, Some(2));
    }

    #[test]
    fn process_gas_only_ranks_price() {
        let records = vec![
            EnergyRecord::with_price(1.4),
            EnergyRecord::default(),
            EnergyRecord::with_price(1.2),
        ];
        let result = process_gas(records);

        assert_eq!(result.len(), 2);
        assert_eq!(ranks(&result, RankField::TotalPrice), vec![2, 1]);
        assert!(result.iter().all(|r| r.rank_sustainability_score.is_none()));
    }

    #[test]
    fn electricity_summary() {
        let records = process_electricity(ELECTRICITY.clone());
        let summary = extract_summary(&records, true).unwrap();

        assert_eq!(summary.price_low.total_price_tax_included, Some(100.0));
        assert_eq!(summary.price_high.total_price_tax_included, Some(200.0));
        assert_eq!(
            summary.sustainability_high.unwrap().sustainability_score,
            Some(90.0)
        );
    }

    #[test]
    fn gas_summary_has_no_sustainability() {
        let summary = extract_summary(&prices(&[100.0, 200.0]), false).unwrap();

        assert_eq!(summary.price_low.total_price_tax_included, Some(100.0));
        assert_eq!(summary.price_high.total_price_tax_included, Some(200.0));
        assert!(summary.sustainability_high.is_none());
    }

    #[test]
    fn summary_first_record_wins_ties() {
        let mut records = prices(&[2.0, 1.0, 3.0, 1.0, 3.0]);
        for (i, record) in records.iter_mut().enumerate() {
            record.extra.insert("hour".into(), (i as u64).into());
        }
        let summary = extract_summary(&records, false).unwrap();

        assert_eq!(summary.price_low.extra["hour"], 1);
        assert_eq!(summary.price_high.extra["hour"], 2);
    }

    #[test]
    fn summary_of_nothing_is_an_error() {
        assert!(matches!(
            extract_summary(&[], true),
            Err(Error::EmptyDataset)
        ));
    }
}
