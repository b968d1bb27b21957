//! Axis tick and title formatting.

/// Tick label policy shared by both chart axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumberFormat {
    /// Every tick in scientific notation.
    #[default]
    Scientific,
    /// Grouped decimals, falling back to scientific for very small or large values.
    Full,
}

impl NumberFormat {
    pub fn from_full_numbers(full_numbers: bool) -> Self {
        if full_numbers {
            NumberFormat::Full
        } else {
            NumberFormat::Scientific
        }
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            NumberFormat::Scientific => scientific(value),
            NumberFormat::Full => full(value),
        }
    }
}

fn full(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude < 1e-3 || magnitude > 1e5 {
        scientific(value)
    } else {
        grouped(value)
    }
}

/// Two-decimal mantissa with a signed, at least two-digit exponent: `1.23e+03`.
pub fn scientific(value: f64) -> String {
    let raw = format!("{value:.2e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

/// Two decimals with `,` between thousands: `1,234.50`.
fn grouped(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && fixed != "0.00" {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('.');
    out.push_str(frac_part);
    out
}

/// `width_height` -> `Width Height`.
pub fn axis_title(parameter: &str) -> String {
    parameter
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
