#[cfg(test)]
mod tests {
    use crate::logic::generate_time_slots;
    use chrono::{Duration, NaiveDate, NaiveTime};
    use proptest::prelude::*;
    use viewty_common::AvailabilityWindow;

    // Helper function to build a window for the given weekday
    fn window(day_of_week: u8, start_min: u32, end_min: u32) -> AvailabilityWindow {
        AvailabilityWindow {
            agent_id: "agent-prop".to_string(),
            day_of_week,
            start_time: NaiveTime::from_hms_opt(start_min / 60, start_min % 60, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end_min / 60, end_min % 60, 0).unwrap(),
        }
    }

    // Helper function to pick a date with a known weekday
    // (2026-09-06 is a Sunday, so adding the weekday index lands on it)
    fn date_for_weekday(day_of_week: u8) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 6).unwrap() + Duration::days(i64::from(day_of_week))
    }

    proptest! {
        // Every generated slot is exactly one duration long
        #[test]
        fn slot_length_is_always_the_configured_duration(
            day_of_week in 0u8..7,
            start_min in 0u32..720,
            span_min in 0u32..600,
            duration_min in 5i64..120,
        ) {
            let end_min = (start_min + span_min).min(1439);
            let windows = [window(day_of_week, start_min, end_min)];
            let date = date_for_weekday(day_of_week);
            let duration = Duration::minutes(duration_min);

            let slots = generate_time_slots(&windows, date, &[], &[], duration);

            for slot in &slots {
                prop_assert_eq!(slot.end_time - slot.start_time, duration);
            }
        }

        // Slots never leave the window and never leave a usable remainder
        #[test]
        fn slots_stay_inside_the_window(
            day_of_week in 0u8..7,
            start_min in 0u32..720,
            span_min in 1u32..600,
            duration_min in 5i64..120,
        ) {
            let end_min = (start_min + span_min).min(1439);
            let w = window(day_of_week, start_min, end_min);
            let date = date_for_weekday(day_of_week);
            let duration = Duration::minutes(duration_min);

            let slots = generate_time_slots(std::slice::from_ref(&w), date, &[], &[], duration);

            for slot in &slots {
                prop_assert!(slot.start_time >= w.start_time);
                prop_assert!(slot.end_time <= w.end_time);
            }

            // Number of slots is exactly the window length divided by the duration
            if w.end_time > w.start_time {
                let window_minutes = (w.end_time - w.start_time).num_minutes();
                prop_assert_eq!(slots.len() as i64, window_minutes / duration_min);
            }
        }

        // Output is sorted ascending by start time
        #[test]
        fn output_is_sorted_by_start_time(
            day_of_week in 0u8..7,
            starts in proptest::collection::vec(0u32..1200, 1..4),
            duration_min in 10i64..60,
        ) {
            let windows: Vec<AvailabilityWindow> = starts
                .iter()
                .map(|&s| window(day_of_week, s, (s + 180).min(1439)))
                .collect();
            let date = date_for_weekday(day_of_week);

            let slots = generate_time_slots(
                &windows,
                date,
                &[],
                &[],
                Duration::minutes(duration_min),
            );

            for pair in slots.windows(2) {
                prop_assert!(pair[0].start_time <= pair[1].start_time);
            }
        }

        // A blocked date produces nothing, whatever the windows say
        #[test]
        fn blocked_date_always_wins(
            day_of_week in 0u8..7,
            start_min in 0u32..720,
            span_min in 1u32..600,
        ) {
            let end_min = (start_min + span_min).min(1439);
            let windows = [window(day_of_week, start_min, end_min)];
            let date = date_for_weekday(day_of_week);

            let slots = generate_time_slots(
                &windows,
                date,
                &[],
                &[date],
                Duration::minutes(30),
            );

            prop_assert!(slots.is_empty());
        }
    }
}
