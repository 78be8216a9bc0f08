use rust_decimal::Decimal;

/// Formats `value` with `dp` decimals and comma thousands separators.
pub fn format_thousands(value: Decimal, dp: u32) -> String {
    let rounded = normalize_zero(value.round_dp(dp));
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if rounded.is_sign_negative() {
        grouped.push('-');
    }
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}

/// Formats `value` with `dp` decimals and an explicit sign.
pub fn format_signed(value: Decimal, dp: u32) -> String {
    let rounded = normalize_zero(value.round_dp(dp));
    let sign = if rounded.is_sign_negative() { "" } else { "+" };
    format!("{}{:.*}", sign, dp as usize, rounded)
}

pub fn format_optional(value: Option<Decimal>, dp: u32) -> String {
    match value {
        Some(value) => format!("{:.*}", dp as usize, normalize_zero(value.round_dp(dp))),
        None => String::from("-"),
    }
}

// -0.00 prints as 0.00
fn normalize_zero(value: Decimal) -> Decimal {
    if value.is_zero() { Decimal::ZERO } else { value }
}
