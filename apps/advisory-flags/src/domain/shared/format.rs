//! Locale-free number formatting for flag messages.
//!
//! Rounding follows the standard float formatter (ties to even on the exact
//! binary value).

/// Format with a fixed number of decimals and `,` thousands separators.
#[must_use]
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let rendered = format!("{value:.decimals$}");
    let (sign, digits) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(rendered.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Whole-dollar currency: `$12,345`, `-$1,200`.
#[must_use]
pub fn currency(value: f64) -> String {
    let magnitude = group_thousands(value.abs(), 0);
    if value < 0.0 && magnitude != "0" {
        format!("-${magnitude}")
    } else {
        format!("${magnitude}")
    }
}

/// Already-scaled percentage with one decimal: `12.5%`.
#[must_use]
pub fn pct(value: f64) -> String {
    format!("{value:.1}%")
}

/// Already-scaled percentage with an explicit sign: `+2.5%`, `-1.0%`.
#[must_use]
pub fn signed_pct(value: f64) -> String {
    format!("{value:+.1}%")
}

/// Fraction rendered as a whole percentage: `0.25` → `25%`.
#[must_use]
pub fn ratio_pct(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Correlation coefficient with two decimals.
#[must_use]
pub fn correlation(value: f64) -> String {
    format!("{value:.2}")
}

/// Leverage multiple: `1.50x`.
#[must_use]
pub fn leverage(value: f64) -> String {
    format!("{value:.2}x")
}

/// Share or contract quantity: whole numbers grouped, fractions to 4 places.
#[must_use]
pub fn quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        group_thousands(value, 0)
    } else {
        let rendered = group_thousands(value, 4);
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Singular noun when `count == 1`, else the `s` plural.
#[must_use]
pub fn pluralize(count: i64, singular: &str) -> String {
    if count == 1 {
        singular.to_string()
    } else {
        format!("{singular}s")
    }
}

/// Count followed by the correctly pluralized noun: `3 positions`.
#[must_use]
pub fn counted(count: i64, singular: &str) -> String {
    format!("{count} {}", pluralize(count, singular))
}

/// `sector_concentration` → `Sector Concentration`.
#[must_use]
pub fn title_case(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join up to `limit` names, appending `(+N more)` for the remainder of `total`.
#[must_use]
pub fn names_with_overflow(names: &[String], limit: usize, total: usize) -> String {
    let shown: Vec<&str> = names.iter().take(limit).map(String::as_str).collect();
    let overflow = total.max(names.len()).saturating_sub(shown.len());
    let joined = shown.join(", ");
    if overflow > 0 {
        format!("{joined} (+{overflow} more)")
    } else {
        joined
    }
}
