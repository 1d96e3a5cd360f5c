//! Quality weights for synthesized `Accept` headers.
//!
//! Weights are integers in thousandths: `1000` is `q=1` and `1` is `q=0.001`.

/// Weight given to the first candidate. Never rendered as a `q` parameter.
pub const MAX_WEIGHT: i32 = 1000;
/// Lowest weight a candidate can receive.
pub const MIN_WEIGHT: i32 = 1;
/// Above this many candidates the coarse steps cannot give each one a
/// distinct weight, so weights fall by one at a time instead.
pub const MANY_CANDIDATES: usize = 28;

/// Next weight after `weight` in the descending sequence.
///
/// With `has_many` the weight drops by one. Otherwise it drops by the
/// largest power of ten below it: `1000, 900, .., 100, 90, .., 10, 9, .., 1`.
/// Weights at or below `1` always step to `1`.
pub fn get_next_weight(weight: i32, has_many: bool) -> i32 {
    if weight <= MIN_WEIGHT {
        return MIN_WEIGHT;
    }
    if has_many {
        return weight - 1;
    }
    let step = if weight > 100 {
        100
    } else if weight > 10 {
        10
    } else {
        1
    };
    (weight - step).max(MIN_WEIGHT)
}

/// Whether `count` candidates need the fine-grained weight sequence.
pub fn has_many(count: usize) -> bool {
    count > MANY_CANDIDATES
}

/// Renders `weight` as a `q` value, or `None` when it needs no parameter.
///
/// At most three decimals, trailing zeros removed: `900` gives `0.9`,
/// `850` gives `0.85`, `1` gives `0.001`.
pub fn format_quality(weight: i32) -> Option<String> {
    if weight >= MAX_WEIGHT {
        return None;
    }
    let weight = weight.max(MIN_WEIGHT);
    let digits = format!("{:03}", weight);
    Some(format!("0.{}", digits.trim_end_matches('0')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sequence() {
        let expected = [
            (1000, 900),
            (900, 800),
            (800, 700),
            (700, 600),
            (600, 500),
            (500, 400),
            (400, 300),
            (300, 200),
            (200, 100),
            (100, 90),
            (90, 80),
            (20, 10),
            (10, 9),
            (2, 1),
        ];
        for (weight, next) in expected {
            assert_eq!(get_next_weight(weight, false), next, "after {weight}");
        }
    }

    #[test]
    fn test_many_candidates_step_by_one() {
        assert_eq!(get_next_weight(1000, true), 999);
        assert_eq!(get_next_weight(999, true), 998);
        assert_eq!(get_next_weight(998, true), 997);
        assert_eq!(get_next_weight(2, true), 1);
    }

    #[test]
    fn test_floor_is_one() {
        for has_many in [false, true] {
            assert_eq!(get_next_weight(1, has_many), 1);
            assert_eq!(get_next_weight(0, has_many), 1);
            assert_eq!(get_next_weight(-1, has_many), 1);
        }
    }

    #[test]
    fn test_twenty_seven_steps_to_one() {
        let mut weight = MAX_WEIGHT;
        let mut count = 0;
        while weight > 1 {
            weight = get_next_weight(weight, false);
            count += 1;
        }
        assert_eq!(count, 27);
    }

    #[test]
    fn test_has_many() {
        assert!(!has_many(0));
        assert!(!has_many(28));
        assert!(has_many(29));
    }

    #[test]
    fn test_format_quality() {
        assert_eq!(format_quality(1000), None);
        assert_eq!(format_quality(900).as_deref(), Some("0.9"));
        assert_eq!(format_quality(850).as_deref(), Some("0.85"));
        assert_eq!(format_quality(90).as_deref(), Some("0.09"));
        assert_eq!(format_quality(9).as_deref(), Some("0.009"));
        assert_eq!(format_quality(999).as_deref(), Some("0.999"));
        assert_eq!(format_quality(1).as_deref(), Some("0.001"));
    }

    #[test]
    fn test_reachable_weights_have_no_trailing_zero() {
        for has_many in [false, true] {
            let mut weight = get_next_weight(MAX_WEIGHT, has_many);
            loop {
                let q = format_quality(weight).unwrap();
                assert!(!q.ends_with('0'), "{q} from {weight}");
                assert!(q.len() <= "0.000".len(), "{q} from {weight}");
                if weight == MIN_WEIGHT {
                    break;
                }
                weight = get_next_weight(weight, has_many);
            }
        }
    }
}
