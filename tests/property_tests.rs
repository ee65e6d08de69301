use proptest::prelude::*;
use prometheus_metric_check::Range;

fn bound() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        -1e6f64..1e6f64,
        any::<i32>().prop_map(f64::from),
    ]
}

proptest! {
    #[test]
    fn test_parse_never_panics(s in "\\PC{0,20}") {
        let _ = Range::parse(&s);
    }

    #[test]
    fn test_parse_is_idempotent(s in "@?(~|-?[0-9]{1,4}(\\.[0-9]{1,3})?)?(:(-?[0-9]{1,4}(\\.[0-9]{1,3})?)?)?") {
        let first = Range::parse(&s);
        let second = Range::parse(&s);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "parse of {:?} is not deterministic", s),
        }
    }

    #[test]
    fn test_display_round_trip(
        start in bound(),
        end in bound(),
        inverted in any::<bool>(),
        open_start in any::<bool>(),
        open_end in any::<bool>(),
    ) {
        let range = Range::new(
            if open_start { f64::NEG_INFINITY } else { start },
            if open_end { f64::INFINITY } else { end },
            inverted,
        );
        let parsed = Range::parse(&range.to_string()).unwrap();
        prop_assert_eq!(parsed, range);
    }

    #[test]
    fn test_invalid_token_is_named(token in "[a-z]{1,8}", hi in any::<bool>()) {
        // a few words are valid floats
        prop_assume!(token.parse::<f64>().is_err());

        let s = if hi { format!("1:{}", token) } else { format!("{}:1", token) };
        let err = Range::parse(&s).unwrap_err();
        prop_assert_eq!(err.token(), token.as_str());
        let expected = format!("parsing \"{}\"", token);
        prop_assert!(err.to_string().contains(&expected));
    }

    #[test]
    fn test_inversion_flips_inside_values(
        a in -1e6f64..1e6f64,
        b in -1e6f64..1e6f64,
        value in -2e6f64..2e6f64,
    ) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let normal = Range::new(start, end, false);
        let inverted = Range::new(start, end, true);

        // for a well formed range exactly one of the two alerts
        prop_assert_ne!(normal.should_alert(value), inverted.should_alert(value));
        prop_assert_eq!(inverted.should_alert(value), normal.contains(value));
    }
}
