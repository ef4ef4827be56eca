use chrono::Duration;

/// Rounds a duration to whole seconds for report lines. Half a second rounds up.
pub fn whole_seconds(value: Duration) -> i64 {
    (value.num_milliseconds() + 500).div_euclid(1000)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::whole_seconds;

    #[test]
    fn test_rounding() {
        assert_eq!(whole_seconds(Duration::zero()), 0);
        assert_eq!(whole_seconds(Duration::milliseconds(499)), 0);
        assert_eq!(whole_seconds(Duration::milliseconds(500)), 1);
        assert_eq!(whole_seconds(Duration::milliseconds(2499)), 2);
        assert_eq!(whole_seconds(Duration::milliseconds(5000)), 5);
    }
}
