#[cfg(test)]
mod tests {
    use crate::slots::OpeningHours;
    use crate::time_of_day::parse_hhmm;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn offered_times_fit_the_window(
            day_offset in -3i64..4,
            hour in 0u32..24,
            minute in 0u32..60,
            mins in 5u32..120,
        ) {
            let hours = OpeningHours::default();
            let now = NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            let day = now.date() + Duration::days(day_offset);
            let times = hours.times_for_day(day, now, Some(mins));

            if day_offset < 0 {
                prop_assert!(times.is_empty());
            }

            let parsed: Vec<u32> = times.iter().filter_map(|t| parse_hhmm(t)).collect();
            prop_assert_eq!(parsed.len(), times.len());
            for pair in parsed.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for start in &parsed {
                prop_assert!(*start >= hours.open);
                prop_assert!(start + mins <= hours.close);
                prop_assert_eq!((start - hours.open) % hours.step, 0);
                if day_offset == 0 {
                    prop_assert!(*start >= hour * 60 + minute);
                }
            }
        }

        #[test]
        fn next_today_is_the_first_offered_start(
            open in 0u32..720,
            length in 30u32..720,
            step in 1u32..61,
            hour in 0u32..24,
            minute in 0u32..60,
        ) {
            let hours = OpeningHours::new(open, open + length, step).unwrap();
            let now = NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            let first = hours.build_times_for_date(now.date(), now).into_iter().next();
            prop_assert_eq!(hours.next_available_today(now), first);
        }

        #[test]
        fn filtering_never_adds_times(mins in 0u32..600) {
            let hours = OpeningHours::default();
            let all = hours.all_times();
            let kept = hours.filter_times_for_service(&all, mins);
            prop_assert!(kept.len() <= all.len());
            prop_assert!(kept.iter().all(|t| all.contains(t)));
        }
    }
}
