use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

/// A threshold range in Nagios notation.
///
/// See <http://nagios-plugins.org/doc/guidelines.html#THRESHOLDFORMAT>.
///
/// ```text
/// [@]end          → 0:end
/// [@]start:end    → start:end
/// ```
///
/// `~` as the start means negative infinity, an empty end means positive infinity.
///
/// ```rust
/// # use prometheus_metric_check::Range;
/// let range: Range = "@10:20".parse().unwrap();
/// assert!(range.should_alert(15.0));
/// assert!(!range.should_alert(30.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Range {
    pub start: f64,
    pub end: f64,
    pub inverted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseRangeError {
    #[error("threshold parse error: parsing {token:?}: {source}")]
    InvalidNumber {
        token: String,
        #[source]
        source: ParseFloatError,
    },
}

impl ParseRangeError {
    /// The bound token which could not be parsed.
    pub fn token(&self) -> &str {
        match self {
            ParseRangeError::InvalidNumber { token, .. } => token,
        }
    }
}

impl Range {
    pub fn new(start: f64, end: f64, inverted: bool) -> Self {
        Range {
            start,
            end,
            inverted,
        }
    }

    /// Parses a range from Nagios threshold notation.
    ///
    /// Only the first colon splits the bounds, so `1:2:3` fails on the token `2:3`.
    pub fn parse(s: &str) -> Result<Range, ParseRangeError> {
        let (inverted, s) = match s.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (start, end) = match s.split_once(':') {
            Some((lo, hi)) => (parse_bound(lo)?, parse_bound(hi)?),
            None => (0.0, parse_bound(s)?),
        };

        Ok(Range {
            start,
            end,
            inverted,
        })
    }

    /// Returns true if `value` lies within the closed interval `[start, end]`.
    pub fn contains(&self, value: f64) -> bool {
        self.start <= value && value <= self.end
    }

    /// Returns true if `value` should raise an alert.
    ///
    /// A normal range alerts when the value is outside `[start, end]`. An inverted range alerts
    /// only when the value is inside `[start, end]`, bounds included.
    ///
    /// NaN is not special-cased: every comparison against it is false, so it never alerts in
    /// either direction. Callers which care about NaN have to decide before asking.
    pub fn should_alert(&self, value: f64) -> bool {
        if self.inverted {
            self.contains(value)
        } else {
            value < self.start || value > self.end
        }
    }
}

fn parse_bound(token: &str) -> Result<f64, ParseRangeError> {
    match token {
        "~" => Ok(f64::NEG_INFINITY),
        "" => Ok(f64::INFINITY),
        _ => token
            .parse::<f64>()
            .map_err(|source| ParseRangeError::InvalidNumber {
                token: token.to_owned(),
                source,
            }),
    }
}

impl FromStr for Range {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            f.write_str("@")?;
        }

        // short form is only unambiguous with a finite end
        if self.start == 0.0 && self.end.is_finite() {
            return write!(f, "{}", self.end);
        }

        if self.start == f64::NEG_INFINITY {
            f.write_str("~")?;
        } else {
            write!(f, "{}", self.start)?;
        }

        f.write_str(":")?;

        if self.end != f64::INFINITY {
            write!(f, "{}", self.end)?;
        }

        Ok(())
    }
}
