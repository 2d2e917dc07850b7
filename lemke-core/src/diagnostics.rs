//! Opt-in diagnostics: pivot tracing and coefficient growth monitoring.

use std::env;

use crate::scalar::LcpReal;

/// Read a boolean switch: "1", "true", "yes" or "on" (any case) enable it.
pub(crate) fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|v| parse_flag(&v))
}

/// Read a strictly positive count; anything else is ignored.
pub(crate) fn env_positive(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|v| parse_positive(&v))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|&v| v > 0)
}

/// Environment-driven diagnostics switches.
///
/// `LEMKE_DIAGNOSTICS=1` enables pivot tracing and the failure-to-converge
/// warning for every solve; `LEMKE_DIAGNOSTICS_EVERY=k` traces every k-th pivot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    pub enabled: bool,
    pub every: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { enabled: false, every: 1 }
    }
}

impl DiagnosticsConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env_flag("LEMKE_DIAGNOSTICS"),
            every: env_positive("LEMKE_DIAGNOSTICS_EVERY").unwrap_or(1),
        }
    }

    /// Merge with the per-solve `verbose` flag.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.enabled |= verbose;
        self
    }

    #[inline]
    pub fn should_log(&self, pivot: usize) -> bool {
        self.enabled && (pivot % self.every == 0)
    }
}

/// Running maximum of tableau entry sizes.
///
/// Exact rationals can grow numerators and denominators at every pivot; the
/// monitor records the largest entry seen during one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeMonitor {
    max_bits: usize,
}

impl SizeMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe<'a, R, I>(&mut self, values: I)
    where
        R: LcpReal,
        I: IntoIterator<Item = &'a R>,
    {
        for v in values {
            self.max_bits = self.max_bits.max(v.repr_bits());
        }
    }

    pub fn max_bits(&self) -> usize {
        self.max_bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_log_stride() {
        let diag = DiagnosticsConfig { enabled: true, every: 3 };
        assert!(diag.should_log(0));
        assert!(!diag.should_log(1));
        assert!(diag.should_log(3));

        let off = DiagnosticsConfig::default();
        assert!(!off.should_log(0));
        assert!(off.with_verbose(true).should_log(5));
    }

    #[test]
    fn test_env_value_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));

        assert_eq!(parse_positive("16"), Some(16));
        assert_eq!(parse_positive(" 3\n"), Some(3));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-2"), None);
        assert_eq!(parse_positive("many"), None);

        assert!(!env_flag("LEMKE_TEST_UNSET_FLAG"));
        assert_eq!(env_positive("LEMKE_TEST_UNSET_COUNT"), None);
    }

    #[test]
    fn test_size_monitor_tracks_maximum() {
        let mut monitor = SizeMonitor::new();
        monitor.observe(&[1.0f64, 2.0]);
        assert_eq!(monitor.max_bits(), 64);
        monitor.observe(std::iter::empty::<&f64>());
        assert_eq!(monitor.max_bits(), 64);
    }
}
