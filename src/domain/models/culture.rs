//! Culture-specific number formatting used by message templates.

use std::borrow::Cow;

/// Format provider: the separators used when rendering numbers into messages.
///
/// # Examples
///
/// ```
/// use logbridge::Culture;
///
/// let german = Culture::de_de();
/// assert_eq!(german.format_float(4.5), "4,5");
/// assert_eq!(Culture::invariant().format_float(4.5), "4.5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    name: Cow<'static, str>,
    decimal_separator: char,
    group_separator: char,
}

impl Culture {
    /// Culture with an arbitrary name and separators.
    pub fn new(name: impl Into<Cow<'static, str>>, decimal_separator: char, group_separator: char) -> Self {
        Self {
            name: name.into(),
            decimal_separator,
            group_separator,
        }
    }

    /// Culture-independent formatting: `.` decimals, `,` groups.
    pub const fn invariant() -> Self {
        Self {
            name: Cow::Borrowed(""),
            decimal_separator: '.',
            group_separator: ',',
        }
    }

    pub const fn en_us() -> Self {
        Self {
            name: Cow::Borrowed("en-US"),
            decimal_separator: '.',
            group_separator: ',',
        }
    }

    pub const fn de_de() -> Self {
        Self {
            name: Cow::Borrowed("de-DE"),
            decimal_separator: ',',
            group_separator: '.',
        }
    }

    pub const fn fr_fr() -> Self {
        Self {
            name: Cow::Borrowed("fr-FR"),
            decimal_separator: ',',
            group_separator: '\u{202f}',
        }
    }

    /// Look up one of the built-in cultures by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "" | "invariant" => Some(Self::invariant()),
            "en-us" | "en" => Some(Self::en_us()),
            "de-de" | "de" => Some(Self::de_de()),
            "fr-fr" | "fr" => Some(Self::fr_fr()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub const fn group_separator(&self) -> char {
        self.group_separator
    }

    /// Shortest round-trip rendering of `value` with this culture's decimal separator.
    pub fn format_float(&self, value: f64) -> String {
        self.localize(&value.to_string(), false)
    }

    /// `value` with exactly `precision` fractional digits, optionally grouping thousands.
    pub fn format_fixed(&self, value: f64, precision: usize, grouped: bool) -> String {
        self.localize(&format!("{value:.precision$}"), grouped)
    }

    /// Integer rendering, optionally grouping thousands.
    pub fn format_integer(&self, value: i128, grouped: bool) -> String {
        self.localize(&value.to_string(), grouped)
    }

    /// Rewrite a Rust-formatted number (`-1234.5`) into this culture's conventions.
    fn localize(&self, plain: &str, grouped: bool) -> String {
        let (sign, unsigned) = plain
            .strip_prefix('-')
            .map_or(("", plain), |rest| ("-", rest));
        let (integral, fraction) = unsigned
            .split_once('.')
            .map_or((unsigned, None), |(i, f)| (i, Some(f)));

        let mut out = String::with_capacity(plain.len() + integral.len() / 3 + 1);
        out.push_str(sign);

        // Non-finite values ("inf", "NaN") pass through untouched.
        if grouped && integral.bytes().all(|b| b.is_ascii_digit()) {
            for (i, digit) in integral.chars().enumerate() {
                if i > 0 && (integral.len() - i) % 3 == 0 {
                    out.push(self.group_separator);
                }
                out.push(digit);
            }
        } else {
            out.push_str(integral);
        }

        if let Some(fraction) = fraction {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_uses_decimal_separator() {
        assert_eq!(Culture::de_de().format_float(4.5), "4,5");
        assert_eq!(Culture::en_us().format_float(4.5), "4.5");
        assert_eq!(Culture::de_de().format_float(42.0), "42");
        assert_eq!(Culture::de_de().format_float(-0.25), "-0,25");
    }

    #[test]
    fn test_fixed_with_grouping() {
        assert_eq!(Culture::en_us().format_fixed(1_234_567.891, 2, true), "1,234,567.89");
        assert_eq!(Culture::de_de().format_fixed(1_234_567.891, 2, true), "1.234.567,89");
        assert_eq!(Culture::de_de().format_fixed(-1234.0, 0, true), "-1.234");
    }

    #[test]
    fn test_integer_grouping() {
        assert_eq!(Culture::invariant().format_integer(999, true), "999");
        assert_eq!(Culture::invariant().format_integer(1000, true), "1,000");
        assert_eq!(Culture::de_de().format_integer(-1_000_000, true), "-1.000.000");
        assert_eq!(Culture::de_de().format_integer(1_000_000, false), "1000000");
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(Culture::from_name("DE-de"), Some(Culture::de_de()));
        assert_eq!(Culture::from_name(""), Some(Culture::invariant()));
        assert!(Culture::from_name("xx-YY").is_none());
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert_eq!(Culture::de_de().format_float(f64::INFINITY), "inf");
        assert_eq!(Culture::de_de().format_fixed(f64::NAN, 2, true), "NaN");
    }
}
