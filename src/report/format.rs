//! Currency formatting for report tables

/// How amounts are written in tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberStyle {
    /// `1.2M`, `350.0K`, `812.5`
    #[default]
    Compact,
    /// `$1,234,567.8`
    Full,
}

/// Format an amount to one decimal place in the given style
pub fn format_currency(amount: f64, style: NumberStyle) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let amount = amount.abs();

    match style {
        NumberStyle::Full => {
            let formatted = format!("{:.1}", amount);
            let (int_part, frac_part) = formatted
                .split_once('.')
                .unwrap_or((formatted.as_str(), "0"));
            format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
        }
        NumberStyle::Compact => {
            if amount >= 1_000_000.0 {
                format!("{}{:.1}M", sign, amount / 1_000_000.0)
            } else if amount >= 1_000.0 {
                format!("{}{:.1}K", sign, amount / 1_000.0)
            } else {
                format!("{}{:.1}", sign, amount)
            }
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
