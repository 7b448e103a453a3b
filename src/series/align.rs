//! Full outer join of two single-parameter sources on date.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::StationSeries;
use crate::reading::{DailyObservation, Measurement};

/// Joins `left` and `right` observations of one station.
///
/// Every date found in either source appears once, with values
/// `[left, right]`; the side that lacks the date is `Missing`. Within one
/// source the first row for a date wins.
pub fn outer_join(
    station_id: &str,
    left: Vec<DailyObservation>,
    right: Vec<DailyObservation>,
) -> StationSeries {
    let mut slots: BTreeMap<NaiveDate, [Option<Measurement>; 2]> = BTreeMap::new();
    let mut duplicates = 0;

    for (side, observations) in [left, right].into_iter().enumerate() {
        for obs in observations {
            let slot = &mut slots.entry(obs.date).or_default()[side];
            if slot.is_some() {
                duplicates += 1;
                continue;
            }
            *slot = Some(obs.values.first().copied().unwrap_or(Measurement::Missing));
        }
    }

    if duplicates > 0 {
        tracing::debug!("Station {}: ignored {} duplicate dates", station_id, duplicates);
    }

    let records = slots
        .into_iter()
        .map(|(date, pair)| {
            let values = pair
                .iter()
                .map(|v| v.unwrap_or(Measurement::Missing))
                .collect();
            (date, values)
        })
        .collect();

    StationSeries::from_dates(station_id, records)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::{date, obs};

    fn run(station: &str, days: &[&str], first: f64) -> Vec<DailyObservation> {
        days.iter()
            .enumerate()
            .map(|(i, d)| obs(station, d, Measurement::Present(first + i as f64)))
            .collect()
    }

    #[test]
    fn should_keep_dates_from_either_side() {
        let min = run("ABO", &["20200101", "20200102", "20200103"], -5.0);
        let max = run("ABO", &["20200104", "20200102", "20200103"], 10.0);

        let series = outer_join("ABO", min, max);
        let records = series.records();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].date, date("20200101"));
        assert_eq!(
            records[0].values,
            vec![Measurement::Present(-5.0), Measurement::Missing]
        );
        assert_eq!(
            records[1].values,
            vec![Measurement::Present(-4.0), Measurement::Present(11.0)]
        );
        assert_eq!(records[3].date, date("20200104"));
        assert_eq!(
            records[3].values,
            vec![Measurement::Missing, Measurement::Present(10.0)]
        );
    }

    #[test]
    fn should_not_duplicate_shared_dates() {
        let min = run("ABO", &["20200101", "20200101"], 1.0);
        let max = run("ABO", &["20200101"], 5.0);

        let series = outer_join("ABO", min, max);

        assert_eq!(series.records().len(), 1);
        assert_eq!(
            series.records()[0].values,
            vec![Measurement::Present(1.0), Measurement::Present(5.0)]
        );
    }

    #[test]
    fn should_cover_union_of_date_sets() {
        let min = run("ABO", &["20191230", "20200301"], 0.0);
        let max = run("ABO", &["20200301", "20211231", "20200229"], 0.0);

        let series = outer_join("ABO", min, max);
        let dates: Vec<_> = series.records().iter().map(|r| r.date).collect();

        assert_eq!(
            dates,
            vec![
                date("20191230"),
                date("20200229"),
                date("20200301"),
                date("20211231"),
            ]
        );
        assert_eq!(series.years_difference(), 3);
    }

    #[test]
    fn should_join_empty_sources() {
        let series = outer_join("ABO", vec![], run("ABO", &["20200101"], 1.0));

        assert_eq!(
            series.records()[0].values,
            vec![Measurement::Missing, Measurement::Present(1.0)]
        );
        assert!(outer_join("ABO", vec![], vec![]).is_empty());
    }
}
