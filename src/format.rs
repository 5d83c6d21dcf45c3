//! Number formatting for report values.
//!
//! Values are rendered with the familiar format mini-language
//! `[[fill]align][sign][z][#][0][width][grouping][.precision][type]`, so a
//! caller can pass `".3e"` or `"12.4f"` and get the same text an engineer
//! would expect from a calculation sheet. Exponents always carry a sign and at
//! least two digits (`1.500e+00`).

use std::str::FromStr;

use crate::errors::FormatSpecError;

/// Largest width or precision accepted by [`NumberFormat::parse`].
const MAX_DIGITS: usize = i32::MAX as usize;

/// Fractional digits that always cover the exact decimal expansion of an
/// `f64`; anything past this is a trailing zero.
const EXACT_DIGITS: usize = 1100;

/// Horizontal placement of a value inside the requested width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Align {
    /// Padding after the value.
    Left,
    /// Padding before the value.
    Right,
    /// Padding split around the value, extra fill on the right.
    Center,
    /// Padding goes between the sign and the digits.
    AfterSign,
}

impl Align {
    /// Map an alignment character to its placement.
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            '=' => Some(Align::AfterSign),
            _ => None,
        }
    }
}

/// Sign policy for non-negative values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sign {
    /// Only negative values carry a sign.
    Minus,
    /// Non-negative values get `+`.
    Plus,
    /// Non-negative values get a leading space.
    Space,
}

/// Presentation type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    /// `e` / `E`: scientific notation.
    Exponent {
        /// Upper-case exponent marker and non-finite names.
        upper: bool,
    },
    /// `f` / `F`: fixed-point notation.
    Fixed {
        /// Upper-case non-finite names.
        upper: bool,
    },
    /// `g` / `G`: fixed or scientific depending on magnitude.
    General {
        /// Upper-case exponent marker and non-finite names.
        upper: bool,
    },
    /// `n`: general format without grouping.
    Number,
    /// `%`: value times 100 in fixed notation with a percent sign.
    Percent,
    /// No type given: shortest round-trip text, or `g`-like with a precision.
    Default,
}

impl Kind {
    /// Map a presentation type character, rejecting codes that are not for floats.
    fn from_char(c: char) -> Result<Self, FormatSpecError> {
        match c {
            'e' => Ok(Kind::Exponent { upper: false }),
            'E' => Ok(Kind::Exponent { upper: true }),
            'f' => Ok(Kind::Fixed { upper: false }),
            'F' => Ok(Kind::Fixed { upper: true }),
            'g' => Ok(Kind::General { upper: false }),
            'G' => Ok(Kind::General { upper: true }),
            'n' => Ok(Kind::Number),
            '%' => Ok(Kind::Percent),
            other => Err(FormatSpecError::UnknownType(other)),
        }
    }

    /// Whether letters in the output are upper-cased.
    fn is_upper(self) -> bool {
        matches!(
            self,
            Kind::Exponent { upper: true }
                | Kind::Fixed { upper: true }
                | Kind::General { upper: true }
        )
    }
}

/// A parsed number format applied identically to every reported value.
///
/// # Examples
///
/// ```
/// use sectionx::NumberFormat;
///
/// let format = NumberFormat::parse(">12.3e").expect("valid format");
/// assert_eq!(format.apply(1500.0), "   1.500e+03");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NumberFormat {
    /// Character used for padding.
    fill: char,
    /// Requested placement; numbers default to the right.
    align: Option<Align>,
    /// Sign policy.
    sign: Sign,
    /// Print negative zero (after rounding) without its sign.
    coerce_negative_zero: bool,
    /// Alternate form (`#`).
    alternate: bool,
    /// Minimum width in characters.
    width: usize,
    /// Thousands separator for the integer part.
    grouping: Option<char>,
    /// Digits after the point, or significant digits for general formats.
    precision: Option<usize>,
    /// Presentation type.
    kind: Kind,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            fill: ' ',
            align: None,
            sign: Sign::Minus,
            coerce_negative_zero: false,
            alternate: false,
            width: 0,
            grouping: None,
            precision: None,
            kind: Kind::Default,
        }
    }
}

impl FromStr for NumberFormat {
    type Err = FormatSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        NumberFormat::parse(spec)
    }
}

impl NumberFormat {
    /// Parse a format specification.
    pub fn parse(spec: &str) -> Result<Self, FormatSpecError> {
        let chars: Vec<char> = spec.chars().collect();
        let mut format = NumberFormat::default();
        let mut pos = 0;
        let mut fill_given = false;

        if let Some(align) = chars.get(1).copied().and_then(Align::from_char) {
            format.fill = chars[0];
            format.align = Some(align);
            fill_given = true;
            pos = 2;
        } else if let Some(align) = chars.first().copied().and_then(Align::from_char) {
            format.align = Some(align);
            pos = 1;
        }

        match chars.get(pos) {
            Some('+') => {
                format.sign = Sign::Plus;
                pos += 1;
            }
            Some('-') => pos += 1,
            Some(' ') => {
                format.sign = Sign::Space;
                pos += 1;
            }
            _ => {}
        }

        if chars.get(pos) == Some(&'z') {
            format.coerce_negative_zero = true;
            pos += 1;
        }

        if chars.get(pos) == Some(&'#') {
            format.alternate = true;
            pos += 1;
        }

        if chars.get(pos) == Some(&'0') && !fill_given {
            format.fill = '0';
            if format.align.is_none() {
                format.align = Some(Align::AfterSign);
            }
            pos += 1;
        }

        if let Some(width) = read_number(&chars, &mut pos)? {
            format.width = width;
        }

        match chars.get(pos) {
            Some(',') => {
                format.grouping = Some(',');
                pos += 1;
                if chars.get(pos) == Some(&'_') {
                    return Err(FormatSpecError::ConflictingGrouping);
                }
            }
            Some('_') => {
                format.grouping = Some('_');
                pos += 1;
                if chars.get(pos) == Some(&',') {
                    return Err(FormatSpecError::ConflictingGrouping);
                }
            }
            _ => {}
        }

        if chars.get(pos) == Some(&'.') {
            pos += 1;
            format.precision =
                Some(read_number(&chars, &mut pos)?.ok_or(FormatSpecError::MissingPrecision)?);
        }

        match &chars[pos..] {
            [] => {}
            [code] => format.kind = Kind::from_char(*code)?,
            _ => return Err(FormatSpecError::Invalid(spec.to_string())),
        }

        if let (Some(grouping), Kind::Number) = (format.grouping, format.kind) {
            return Err(FormatSpecError::GroupingNotAllowed { grouping, code: 'n' });
        }

        Ok(format)
    }

    /// Minimum width of the rendered value in characters.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Render a value according to this format.
    pub fn apply(&self, value: f64) -> String {
        let mut negative = value.is_sign_negative() && !value.is_nan();
        let magnitude = value.abs();

        let mut body = self.render_magnitude(magnitude);
        if self.coerce_negative_zero && rounds_to_zero(&body) {
            negative = false;
        }

        let sign = match (negative, self.sign) {
            (true, _) => "-",
            (false, Sign::Plus) => "+",
            (false, Sign::Space) => " ",
            (false, Sign::Minus) => "",
        };

        let align = self.align.unwrap_or(Align::Right);
        if let Some(separator) = self.grouping {
            let zero_padded = align == Align::AfterSign && self.fill == '0';
            let target = if zero_padded {
                self.width.saturating_sub(sign.len())
            } else {
                0
            };
            body = group_digits(&body, separator, target);
        }

        let length = sign.chars().count() + body.chars().count();
        let padding = self.width.saturating_sub(length);
        let pad = |count: usize| std::iter::repeat(self.fill).take(count).collect::<String>();

        match align {
            Align::Left => format!("{sign}{body}{}", pad(padding)),
            Align::Right => format!("{}{sign}{body}", pad(padding)),
            Align::Center => {
                let left = padding / 2;
                format!("{}{sign}{body}{}", pad(left), pad(padding - left))
            }
            Align::AfterSign => format!("{sign}{}{body}", pad(padding)),
        }
    }

    /// Render the unsigned part of a value.
    fn render_magnitude(&self, magnitude: f64) -> String {
        if !magnitude.is_finite() {
            let text = if magnitude.is_nan() { "nan" } else { "inf" };
            return match self.kind {
                Kind::Percent => format!("{text}%"),
                kind if kind.is_upper() => text.to_uppercase(),
                _ => text.to_string(),
            };
        }

        match self.kind {
            Kind::Fixed { .. } => fixed(magnitude, self.precision.unwrap_or(6), self.alternate),
            Kind::Exponent { upper } => scientific(
                magnitude,
                self.precision.unwrap_or(6),
                self.alternate,
                upper,
            ),
            Kind::General { upper } => general(
                magnitude,
                self.precision.unwrap_or(6),
                self.alternate,
                false,
                upper,
            ),
            Kind::Number => general(
                magnitude,
                self.precision.unwrap_or(6),
                self.alternate,
                false,
                false,
            ),
            Kind::Percent => {
                let precision = self.precision.unwrap_or(6);
                let mut text = fixed(magnitude * 100.0, precision, self.alternate);
                text.push('%');
                text
            }
            Kind::Default => match self.precision {
                Some(precision) => general(magnitude, precision, self.alternate, true, false),
                None => shortest(magnitude),
            },
        }
    }
}

/// Read a run of ASCII digits starting at `pos`, advancing past them.
fn read_number(chars: &[char], pos: &mut usize) -> Result<Option<usize>, FormatSpecError> {
    let start = *pos;
    let mut number: usize = 0;
    while let Some(digit) = chars.get(*pos).and_then(|c| c.to_digit(10)) {
        number = number
            .checked_mul(10)
            .and_then(|n| n.checked_add(digit as usize))
            .filter(|n| *n <= MAX_DIGITS)
            .ok_or(FormatSpecError::TooLarge)?;
        *pos += 1;
    }
    Ok((*pos > start).then_some(number))
}

/// Fixed-point digits with exactly `decimals` fractional digits.
///
/// `format!` rejects precisions above `u16::MAX`, so long expansions are
/// formatted exactly and then extended with zeros.
fn fixed_digits(magnitude: f64, decimals: usize) -> String {
    if decimals <= EXACT_DIGITS {
        return format!("{magnitude:.decimals$}");
    }
    let mut text = format!("{:.*}", EXACT_DIGITS, magnitude);
    text.extend(std::iter::repeat('0').take(decimals - EXACT_DIGITS));
    text
}

/// Scientific digits (Rust `LowerExp` layout) with `decimals` mantissa digits.
fn exponent_digits(magnitude: f64, decimals: usize) -> String {
    if decimals <= EXACT_DIGITS {
        return format!("{magnitude:.decimals$e}");
    }
    let text = format!("{:.*e}", EXACT_DIGITS, magnitude);
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let zeros: String = std::iter::repeat('0').take(decimals - EXACT_DIGITS).collect();
    format!("{mantissa}{zeros}e{exponent}")
}

/// `f` format of the magnitude.
fn fixed(magnitude: f64, precision: usize, alternate: bool) -> String {
    let mut text = fixed_digits(magnitude, precision);
    if alternate && precision == 0 {
        text.push('.');
    }
    text
}

/// Split Rust's `LowerExp` output into mantissa and decimal exponent.
fn split_exponent(text: &str) -> (&str, i32) {
    match text.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

/// Exponent written as `e+05` / `E-10`.
fn exponent_suffix(exponent: i32, upper: bool) -> String {
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{marker}{sign}{:02}", exponent.unsigned_abs())
}

/// `e` format of the magnitude.
fn scientific(magnitude: f64, precision: usize, alternate: bool, upper: bool) -> String {
    let text = exponent_digits(magnitude, precision);
    let (mantissa, exponent) = split_exponent(&text);
    let mut out = mantissa.to_string();
    if alternate && precision == 0 {
        out.push('.');
    }
    out.push_str(&exponent_suffix(exponent, upper));
    out
}

/// Drop trailing fractional zeros and a dangling point.
fn strip_trailing_zeros(text: &mut String) {
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
}

/// General format: fixed or scientific depending on the decimal exponent.
///
/// With `force_point` the fixed form always keeps one fractional digit and the
/// switch to scientific happens one digit earlier.
fn general(
    magnitude: f64,
    precision: usize,
    alternate: bool,
    force_point: bool,
    upper: bool,
) -> String {
    let precision = precision.max(1);
    let rounded = exponent_digits(magnitude, precision - 1);
    let (mantissa, exponent) = split_exponent(&rounded);
    let exponent = if magnitude == 0.0 { 0 } else { exponent };

    let limit = i64::try_from(precision).unwrap_or(i64::MAX) - i64::from(force_point);
    if exponent < -4 || i64::from(exponent) >= limit {
        let mut out = mantissa.to_string();
        if alternate {
            if !out.contains('.') {
                out.push('.');
            }
        } else {
            strip_trailing_zeros(&mut out);
        }
        out.push_str(&exponent_suffix(exponent, upper));
        return out;
    }

    let decimals = i64::try_from(precision).unwrap_or(i64::MAX) - 1 - i64::from(exponent);
    let mut out = fixed_digits(magnitude, usize::try_from(decimals).unwrap_or(0));
    if alternate {
        if !out.contains('.') {
            out.push('.');
        }
    } else {
        strip_trailing_zeros(&mut out);
    }
    if force_point && !out.contains('.') {
        out.push_str(".0");
    }
    out
}

/// Shortest text that reads back to the same value.
fn shortest(magnitude: f64) -> String {
    if magnitude == 0.0 {
        return "0.0".to_string();
    }
    let text = format!("{magnitude:e}");
    let (mantissa, exponent) = split_exponent(&text);
    if (-4..16).contains(&exponent) {
        let mut out = format!("{magnitude}");
        if !out.contains('.') {
            out.push_str(".0");
        }
        out
    } else {
        format!("{mantissa}{}", exponent_suffix(exponent, false))
    }
}

/// True when every digit of the mantissa is zero.
fn rounds_to_zero(body: &str) -> bool {
    let mantissa = body.split(['e', 'E']).next().unwrap_or(body);
    mantissa.chars().any(|c| c.is_ascii_digit())
        && mantissa.chars().filter(char::is_ascii_digit).all(|c| c == '0')
}

/// Insert `separator` every three digits of the leading integer part,
/// left-padding with zeros until the result is at least `min_len` long.
fn group_digits(body: &str, separator: char, min_len: usize) -> String {
    let split = body.find(|c: char| !c.is_ascii_digit()).unwrap_or(body.len());
    let (integer, rest) = body.split_at(split);
    if integer.is_empty() {
        return body.to_string();
    }

    // n digits take n + (n - 1) / 3 characters once grouped. Starting from
    // three quarters of the target keeps the search to a couple of steps.
    let grouped_len = |count: usize| count + (count - 1) / 3;
    let target = min_len.saturating_sub(rest.len());
    let mut count = integer.len().max(target * 3 / 4);
    while grouped_len(count) < target {
        count += 1;
    }

    let mut digits = String::with_capacity(count);
    digits.extend(std::iter::repeat('0').take(count - integer.len()));
    digits.push_str(integer);
    format!("{}{rest}", insert_separators(&digits, separator))
}

/// Insert `separator` between every group of three digits, counting from the right.
fn insert_separators(digits: &str, separator: char) -> String {
    let count = digits.len();
    let mut out = String::with_capacity(count + count / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (count - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
    out
}
