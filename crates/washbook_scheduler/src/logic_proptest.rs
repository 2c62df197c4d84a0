#[cfg(test)]
mod tests {
    use crate::catalog::ServiceCatalog;
    use crate::logic::{
        candidate_starts, check_availability, has_conflict, interval_of, overlaps,
        suggest_alternatives, MAX_SUGGESTIONS,
    };
    use crate::models::{Appointment, Availability, CustomerDetails, TimeInterval};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    const SERVICES: [&str; 4] = ["Basic Wash", "Interior Clean", "Full Detail", "Unlisted"];

    // All generated times are minute offsets from this instant
    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn minutes(offset: i64) -> DateTime<Utc> {
        base() + Duration::minutes(offset)
    }

    fn appointment(start: DateTime<Utc>, service: &str) -> Appointment {
        Appointment {
            id: format!("BK-{}", start.timestamp()),
            start,
            service: service.to_string(),
            customer: CustomerDetails::default(),
            created_at: base(),
        }
    }

    fn interval_strategy() -> impl Strategy<Value = TimeInterval> {
        (0..2880i64, 1..240i64).prop_map(|(start, length)| TimeInterval {
            start: minutes(start),
            end: minutes(start + length),
        })
    }

    fn request_strategy() -> impl Strategy<Value = (i64, usize)> {
        (0..2880i64, 0..SERVICES.len())
    }

    // Replays requests through the same accept rule the scheduler uses
    fn replay(catalog: &ServiceCatalog, requests: &[(i64, usize)]) -> Vec<Appointment> {
        let now = base();
        let mut ledger = Vec::new();
        for (offset, service) in requests {
            let service = SERVICES[*service];
            let start = minutes(*offset);
            if check_availability(catalog, start, service, now, &ledger).is_available() {
                ledger.push(appointment(start, service));
            }
        }
        ledger
    }

    proptest! {
        #[test]
        fn test_overlap_is_symmetric(a in interval_strategy(), b in interval_strategy()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn test_adjacent_intervals_never_overlap(
            start in 0..2880i64,
            first in 1..240i64,
            second in 1..240i64,
        ) {
            let a = TimeInterval { start: minutes(start), end: minutes(start + first) };
            let b = TimeInterval { start: a.end, end: a.end + Duration::minutes(second) };
            prop_assert!(!overlaps(&a, &b));
            prop_assert!(!overlaps(&b, &a));
        }

        #[test]
        fn test_accepted_bookings_are_pairwise_disjoint(
            requests in prop::collection::vec(request_strategy(), 0..40)
        ) {
            let catalog = ServiceCatalog::builtin();
            let ledger = replay(&catalog, &requests);

            for (i, a) in ledger.iter().enumerate() {
                for b in &ledger[i + 1..] {
                    let first = interval_of(&catalog, a.start, &a.service);
                    let second = interval_of(&catalog, b.start, &b.service);
                    prop_assert!(
                        !overlaps(&first, &second),
                        "{} at {} overlaps {} at {}",
                        a.service, a.start, b.service, b.start
                    );
                }
            }
        }

        #[test]
        fn test_suggestions_are_bookable_and_ordered(
            requests in prop::collection::vec(request_strategy(), 0..20),
            target in request_strategy(),
            now_offset in 0..2880i64,
        ) {
            let catalog = ServiceCatalog::builtin();
            let ledger = replay(&catalog, &requests);
            let (offset, service) = target;
            let service = SERVICES[service];
            let start = minutes(offset);
            let now = minutes(now_offset);

            let suggestions = suggest_alternatives(&catalog, start, service, now, &ledger);
            prop_assert!(suggestions.len() <= MAX_SUGGESTIONS);

            for suggestion in &suggestions {
                prop_assert!(*suggestion > now);
                let candidate = interval_of(&catalog, *suggestion, service);
                prop_assert!(!has_conflict(&catalog, &candidate, &ledger));
            }

            // suggestions are a subsequence of the candidate order
            let candidates: Vec<_> = candidate_starts(start).collect();
            let positions = suggestions
                .iter()
                .map(|s| candidates.iter().position(|c| c == s));
            let mut last = None;
            for position in positions {
                prop_assert!(position.is_some());
                prop_assert!(position > last);
                last = position;
            }
        }

        #[test]
        fn test_availability_matches_conflict_check(
            requests in prop::collection::vec(request_strategy(), 0..20),
            target in request_strategy(),
        ) {
            let catalog = ServiceCatalog::builtin();
            let ledger = replay(&catalog, &requests);
            let (offset, service) = target;
            let service = SERVICES[service];
            let start = minutes(offset);
            let now = base() - Duration::minutes(1);

            let availability = check_availability(&catalog, start, service, now, &ledger);
            let candidate = interval_of(&catalog, start, service);
            let conflicting = has_conflict(&catalog, &candidate, &ledger);
            prop_assert_eq!(availability == Availability::Available, !conflicting);
            if availability.is_available() {
                prop_assert!(availability.suggested_times().is_empty());
            }
        }
    }
}
