//! Composite message templates: `"value={0}, rate={1:F2}"`.
//!
//! Placeholders have the shape `{index[,alignment][:format]}`; `{{` and `}}` are
//! literal braces. Supported numeric formats are `F<n>` (fixed), `N<n>` (fixed with
//! group separators), `D<n>` (zero-padded integer) and `X`/`x` (hexadecimal integer).
//! Any other format string renders the argument's default form.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use crate::domain::errors::TemplateError;

use super::culture::Culture;

/// A single template argument.
///
/// Numbers keep their type so that the culture can decide how they are rendered;
/// everything else is rendered through `Display`.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Int(i128),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(&'a str),
    Display(&'a dyn fmt::Display),
}

impl<'a> Arg<'a> {
    /// Wrap any displayable value.
    pub fn display(value: &'a dyn fmt::Display) -> Self {
        Self::Display(value)
    }

    fn render(&self, culture: &Culture, format: Option<&str>, out: &mut String) {
        match (*self, format.and_then(NumericFormat::parse)) {
            (Self::Int(v), Some(NumericFormat::Fixed(p))) => {
                #[allow(clippy::cast_precision_loss)]
                out.push_str(&culture.format_fixed(v as f64, p, false));
            }
            (Self::Int(v), Some(NumericFormat::Number(p))) => {
                #[allow(clippy::cast_precision_loss)]
                out.push_str(&culture.format_fixed(v as f64, p, true));
            }
            (Self::Int(v), Some(NumericFormat::Decimal(width))) => {
                if v < 0 {
                    let _ = write!(out, "-{:0width$}", v.unsigned_abs());
                } else {
                    let _ = write!(out, "{v:0width$}");
                }
            }
            (Self::Int(v), Some(NumericFormat::Hex { upper, width })) => {
                // Negative values render as their two's complement, 64 bits wide.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let bits = if v < 0 { u128::from(v as i64 as u64) } else { v as u128 };
                if upper {
                    let _ = write!(out, "{bits:0width$X}");
                } else {
                    let _ = write!(out, "{bits:0width$x}");
                }
            }
            (Self::Int(v), _) => out.push_str(&culture.format_integer(v, false)),
            (Self::Float(v), Some(NumericFormat::Fixed(p))) => out.push_str(&culture.format_fixed(v, p, false)),
            (Self::Float(v), Some(NumericFormat::Number(p))) => out.push_str(&culture.format_fixed(v, p, true)),
            (Self::Float(v), _) => out.push_str(&culture.format_float(v)),
            (Self::Bool(v), _) => out.push_str(if v { "True" } else { "False" }),
            (Self::Char(v), _) => out.push(v),
            (Self::Str(v), _) => out.push_str(v),
            (Self::Display(v), _) => {
                let _ = write!(out, "{v}");
            }
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Display(v) => f.debug_tuple("Display").field(&format_args!("{v}")).finish(),
        }
    }
}

macro_rules! impl_arg_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg<'_> {
            fn from(value: $ty) -> Self {
                Self::Int(i128::from(value))
            }
        })*
    };
}

impl_arg_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<isize> for Arg<'_> {
    fn from(value: isize) -> Self {
        Self::Int(value as i128)
    }
}

impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        Self::Int(value as i128)
    }
}

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value)
    }
}

/// Alignments and numeric precisions at or above this are rejected as malformed.
const FORMAT_LIMIT: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericFormat {
    Fixed(usize),
    Number(usize),
    Decimal(usize),
    Hex { upper: bool, width: usize },
}

impl NumericFormat {
    fn parse(format: &str) -> Option<Self> {
        let mut chars = format.chars();
        let kind = chars.next()?;
        let digits = chars.as_str();
        let precision = if digits.is_empty() { None } else { Some(digits.parse().ok()?) };

        match kind {
            'F' | 'f' => Some(Self::Fixed(precision.unwrap_or(2))),
            'N' | 'n' => Some(Self::Number(precision.unwrap_or(2))),
            'D' | 'd' => Some(Self::Decimal(precision.unwrap_or(0))),
            'X' => Some(Self::Hex { upper: true, width: precision.unwrap_or(0) }),
            'x' => Some(Self::Hex { upper: false, width: precision.unwrap_or(0) }),
            _ => None,
        }
    }

    /// Whether `format` names a numeric format with a precision too large to render.
    fn exceeds_limit(format: &str) -> bool {
        let mut chars = format.chars();
        let numeric = matches!(chars.next(), Some('F' | 'f' | 'N' | 'n' | 'D' | 'd' | 'X' | 'x'));
        let digits = chars.as_str();
        numeric
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && digits.parse::<usize>().map_or(true, |precision| precision >= FORMAT_LIMIT)
    }
}

/// Render `template` with `args`, using `culture` for numbers (invariant when `None`).
///
/// # Examples
///
/// ```
/// use logbridge::{format_template, Arg, Culture};
///
/// let text = format_template(Some(&Culture::de_de()), "value={0}", &[Arg::from(4.5)]).unwrap();
/// assert_eq!(text, "value=4,5");
/// ```
pub fn format_template(culture: Option<&Culture>, template: &str, args: &[Arg<'_>]) -> Result<String, TemplateError> {
    let invariant = Culture::invariant();
    let culture = culture.unwrap_or(&invariant);
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let bytes = template.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                out.push_str(&template[literal_start..=i]);
                i += 2;
                literal_start = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                out.push_str(&template[literal_start..=i]);
                i += 2;
                literal_start = i;
            }
            b'{' => {
                out.push_str(&template[literal_start..i]);
                let close = template[i..]
                    .find('}')
                    .map(|offset| i + offset)
                    .ok_or(TemplateError::UnclosedPlaceholder(i))?;
                render_placeholder(&template[i + 1..close], culture, args, &mut out)?;
                i = close + 1;
                literal_start = i;
            }
            b'}' => return Err(TemplateError::UnmatchedBrace(i)),
            _ => i += 1,
        }
    }

    out.push_str(&template[literal_start..]);
    Ok(out)
}

fn render_placeholder(body: &str, culture: &Culture, args: &[Arg<'_>], out: &mut String) -> Result<(), TemplateError> {
    let invalid = || TemplateError::InvalidPlaceholder(body.to_string());

    let (head, format) = body
        .split_once(':')
        .map_or((body, None), |(head, format)| (head, Some(format)));
    let (index, alignment) = head
        .split_once(',')
        .map_or((head, None), |(index, alignment)| (index, Some(alignment)));

    let index: usize = index.trim().parse().map_err(|_| invalid())?;
    let alignment: Option<i64> = alignment
        .map(|a| a.trim().parse().map_err(|_| invalid()))
        .transpose()?;
    if alignment.is_some_and(|a| a.unsigned_abs() >= FORMAT_LIMIT as u64)
        || format.is_some_and(NumericFormat::exceeds_limit)
    {
        return Err(invalid());
    }
    let arg = args.get(index).ok_or(TemplateError::IndexOutOfRange {
        index,
        count: args.len(),
    })?;

    let Some(alignment) = alignment else {
        arg.render(culture, format, out);
        return Ok(());
    };

    let mut rendered = String::new();
    arg.render(culture, format, &mut rendered);
    let width = usize::try_from(alignment.unsigned_abs()).unwrap_or(usize::MAX);
    let padding = width.saturating_sub(rendered.chars().count());
    // Positive alignment right-aligns, negative left-aligns.
    if alignment >= 0 {
        out.extend(std::iter::repeat(' ').take(padding));
        out.push_str(&rendered);
    } else {
        out.push_str(&rendered);
        out.extend(std::iter::repeat(' ').take(padding));
    }
    Ok(())
}

/// Render `template`, falling back to the raw template text when it is malformed.
///
/// Used on the logging path where a broken template must never fail the call.
pub(crate) fn format_template_lossy<'t>(culture: Option<&Culture>, template: &'t str, args: &[Arg<'_>]) -> Cow<'t, str> {
    match format_template(culture, template, args) {
        Ok(text) => Cow::Owned(text),
        Err(err) => {
            tracing::trace!(target: "logbridge", template, error = %err, "malformed message template");
            Cow::Borrowed(template)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, args: &[Arg<'_>]) -> String {
        format_template(None, template, args).unwrap()
    }

    #[test]
    fn test_positional_arguments() {
        assert_eq!(render("{0} + {0} = {1}", &[2.into(), 4.into()]), "2 + 2 = 4");
        assert_eq!(render("{1}{0}", &["a".into(), "b".into()]), "ba");
    }

    #[test]
    fn test_oversized_alignment_and_precision_rejected() {
        for template in ["{0,50000000}", "{0,-1000000}", "{0,99999999999999}", "{0:F1000000}", "{0:x99999999999999999999}"] {
            let err = format_template(None, template, &[1.into()]).unwrap_err();
            assert!(matches!(err, TemplateError::InvalidPlaceholder(_)), "{template}");
        }
        assert_eq!(render("{0,999999:D3}", &[7.into()]).len(), 999_999);
        assert_eq!(format_template_lossy(None, "{0,50000000}", &[1.into()]), "{0,50000000}");
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(render("{{{0}}}", &[7.into()]), "{7}");
        assert_eq!(render("no placeholders {{}}", &[]), "no placeholders {}");
    }

    #[test]
    fn test_culture_sensitive_numbers() {
        let german = Culture::de_de();
        assert_eq!(format_template(Some(&german), "value={0}", &[42.into()]).unwrap(), "value=42");
        assert_eq!(format_template(Some(&german), "value={0}", &[4.5.into()]).unwrap(), "value=4,5");
        assert_eq!(format_template(None, "value={0}", &[4.5.into()]).unwrap(), "value=4.5");
    }

    #[test]
    fn test_numeric_format_strings() {
        assert_eq!(render("{0:F2}", &[3.14159.into()]), "3.14");
        assert_eq!(render("{0:N0}", &[1_234_567.into()]), "1,234,567");
        assert_eq!(render("{0:D5}", &[42.into()]), "00042");
        assert_eq!(render("{0:D3}", &[(-7).into()]), "-007");
        assert_eq!(render("{0:X}", &[255.into()]), "FF");
        assert_eq!(render("{0:x4}", &[255.into()]), "00ff");
        assert_eq!(render("{0:yyyy}", &[5.into()]), "5");
    }

    #[test]
    fn test_alignment() {
        assert_eq!(render("[{0,5}]", &["ab".into()]), "[   ab]");
        assert_eq!(render("[{0,-5}]", &["ab".into()]), "[ab   ]");
        assert_eq!(render("[{0,4:F1}]", &[1.5.into()]), "[ 1.5]");
    }

    #[test]
    fn test_display_and_bool_arguments() {
        let level = crate::domain::models::Level::Warn;
        assert_eq!(render("{0} {1}", &[Arg::display(&level), true.into()]), "WARN True");
    }

    #[test]
    fn test_malformed_templates() {
        assert_eq!(format_template(None, "{0", &[1.into()]), Err(TemplateError::UnclosedPlaceholder(0)));
        assert_eq!(format_template(None, "a}b", &[]), Err(TemplateError::UnmatchedBrace(1)));
        assert_eq!(
            format_template(None, "{1}", &[1.into()]),
            Err(TemplateError::IndexOutOfRange { index: 1, count: 1 })
        );
        assert!(matches!(
            format_template(None, "{name}", &[]),
            Err(TemplateError::InvalidPlaceholder(_))
        ));
    }

    #[test]
    fn test_lossy_falls_back_to_template() {
        assert_eq!(format_template_lossy(None, "broken {0", &[]), "broken {0");
        assert_eq!(format_template_lossy(None, "ok {0}", &[1.into()]), "ok 1");
    }
}
