use crate::series::{AlignedSeries, Metric};

/// Fill `previous` and `delta` for `metric`, in place, in the series'
/// current row order. The first row has no previous value; a delta is
/// missing whenever either operand is.
pub fn shift(series: &mut AlignedSeries, metric: Metric) {
    let mut previous: Option<f64> = None;
    for row in &mut series.rows {
        let cell = &mut row.observation.metrics[metric];
        cell.previous = previous;
        cell.delta = match (cell.raw, previous) {
            (Some(current), Some(prev)) => Some(current - prev),
            _ => None,
        };
        previous = cell.raw;
    }
}

/// [`shift`] over every tracked metric.
pub fn shift_all(series: &mut AlignedSeries) {
    for metric in Metric::ALL {
        shift(series, metric);
    }
}

/// Centered 3-point average of `metric`'s delta, stored in its `smooth`
/// slot. The first and last rows have no full window; a window containing
/// a missing delta yields a missing average (so the second row is missing
/// too, since the first delta always is).
pub fn smooth(series: &mut AlignedSeries, metric: Metric) {
    let deltas: Vec<Option<f64>> = series
        .rows
        .iter()
        .map(|row| row.observation.metrics[metric].delta)
        .collect();

    let len = series.rows.len();
    for (i, row) in series.rows.iter_mut().enumerate() {
        let window = if i == 0 || i + 1 == len {
            None
        } else {
            match (deltas[i - 1], deltas[i], deltas[i + 1]) {
                (Some(a), Some(b), Some(c)) => Some((a + b + c) / 3.0),
                _ => None,
            }
        };
        row.observation.metrics[metric].smooth = window;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{AlignedRow, Observation};
    use chrono::NaiveDate;

    fn aligned(metric: Metric, values: &[Option<f64>]) -> AlignedSeries {
        let rows = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let mut obs = Observation::new(
                    None,
                    "A".to_string(),
                    NaiveDate::from_ymd_opt(2020, 3, 1).unwrap() + chrono::Days::new(i as u64),
                );
                obs.metrics[metric].raw = value;
                AlignedRow {
                    days_after_cutoff: i as i64 + 1,
                    observation: obs,
                }
            })
            .collect();
        AlignedSeries {
            region: "A".to_string(),
            rows,
        }
    }

    fn column(
        series: &AlignedSeries,
        metric: Metric,
        pick: impl Fn(&crate::series::MetricValues) -> Option<f64>,
    ) -> Vec<Option<f64>> {
        series
            .rows
            .iter()
            .map(|r| pick(&r.observation.metrics[metric]))
            .collect()
    }

    #[test]
    fn shift_fills_previous_and_delta() {
        // the [2, 6, 7] column: previous [-, 2, 6], delta [-, 4, 1]
        let mut series = aligned(Metric::Confirmed, &[Some(2.0), Some(6.0), Some(7.0)]);
        shift(&mut series, Metric::Confirmed);

        assert_eq!(
            column(&series, Metric::Confirmed, |c| c.previous),
            vec![None, Some(2.0), Some(6.0)]
        );
        assert_eq!(
            column(&series, Metric::Confirmed, |c| c.delta),
            vec![None, Some(4.0), Some(1.0)]
        );
    }

    #[test]
    fn missing_raw_breaks_the_delta_on_both_sides() {
        let mut series = aligned(
            Metric::Deaths,
            &[Some(1.0), None, Some(5.0), Some(9.0)],
        );
        shift(&mut series, Metric::Deaths);

        assert_eq!(
            column(&series, Metric::Deaths, |c| c.delta),
            vec![None, None, None, Some(4.0)]
        );
    }

    #[test]
    fn shift_all_covers_every_metric_independently() {
        let mut series = aligned(Metric::Confirmed, &[Some(1.0), Some(3.0)]);
        series.rows[0].observation.metrics[Metric::Deaths].raw = Some(0.0);
        series.rows[1].observation.metrics[Metric::Deaths].raw = Some(2.0);
        shift_all(&mut series);

        assert_eq!(
            series.rows[1].observation.metrics[Metric::Confirmed].delta,
            Some(2.0)
        );
        assert_eq!(
            series.rows[1].observation.metrics[Metric::Deaths].delta,
            Some(2.0)
        );
        // untouched metric: no raw, no derived values
        assert_eq!(
            series.rows[1].observation.metrics[Metric::Recovered].delta,
            None
        );
    }

    #[test]
    fn smooth_is_the_centered_window_mean_where_defined() {
        let raw: Vec<Option<f64>> = [10.0, 13.0, 19.0, 22.0, 34.0]
            .iter()
            .map(|&v| Some(v))
            .collect();
        let mut series = aligned(Metric::ConfirmedPerCapita, &raw);
        shift(&mut series, Metric::ConfirmedPerCapita);
        smooth(&mut series, Metric::ConfirmedPerCapita);

        // deltas: [-, 3, 6, 3, 12]
        let smoothed = column(&series, Metric::ConfirmedPerCapita, |c| c.smooth);
        // edges have no full window; index 1's window contains the missing
        // first delta
        assert_eq!(smoothed[0], None);
        assert_eq!(smoothed[1], None);
        assert_eq!(smoothed[2], Some(4.0));
        assert_eq!(smoothed[3], Some(7.0));
        assert_eq!(smoothed[4], None);
    }

    #[test]
    fn smooth_on_short_series_is_all_missing() {
        let mut series = aligned(Metric::ConfirmedPerCapita, &[Some(1.0), Some(2.0)]);
        shift(&mut series, Metric::ConfirmedPerCapita);
        smooth(&mut series, Metric::ConfirmedPerCapita);
        assert_eq!(
            column(&series, Metric::ConfirmedPerCapita, |c| c.smooth),
            vec![None, None]
        );
    }
}
