use dash_proto::telemetry::HistoricalSample;
use rand::Rng;
use time::{Duration, OffsetDateTime};

pub const HOURS: i64 = 24;

/// Hourly samples for the last day, oldest first, ending at `now`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: OffsetDateTime) -> Vec<HistoricalSample> {
    (0..=HOURS)
        .rev()
        .map(|h| HistoricalSample {
            timestamp: now - Duration::hours(h),
            altitude: rng.gen_range(10..110),
            speed: rng.gen_range(5..35),
            battery_level: rng.gen_range(70..100),
            temperature: rng.gen_range(20..30),
            humidity: rng.gen_range(40..70),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_generate_covers_last_day() {
        let now = datetime!(2025-10-19 12:00 UTC);
        let mut rng = StdRng::seed_from_u64(0);
        let h = generate(&mut rng, now);

        assert_eq!(h.len(), 25);
        assert_eq!(h[0].timestamp, datetime!(2025-10-18 12:00 UTC));
        assert_eq!(h[24].timestamp, now);
        assert!(h.windows(2).all(|w| w[1].timestamp - w[0].timestamp == Duration::HOUR));
    }

    #[test]
    fn test_generate_ranges() {
        let mut rng = StdRng::seed_from_u64(12);
        let now = datetime!(2025-10-19 12:00 UTC);
        for _ in 0..50 {
            for s in generate(&mut rng, now) {
                assert!((10..110).contains(&s.altitude));
                assert!((5..35).contains(&s.speed));
                assert!((70..100).contains(&s.battery_level));
                assert!((20..30).contains(&s.temperature));
                assert!((40..70).contains(&s.humidity));
            }
        }
    }
}
