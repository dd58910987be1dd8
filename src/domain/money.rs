/// Prices are plain `f64` currency units. Nothing is rounded when stored;
/// only the display helpers below round.
pub type Amount = f64;

/// Format an amount with thousands separators and two decimals.
/// Example: 1234.5 -> "1,234.50", 720.0 -> "720.00"
pub fn format_amount(amount: Amount) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}{}.{}", sign, group_thousands(whole), fraction)
}

/// Format a rate the way the catalog lists it: whole amounts without
/// decimals, anything else with two.
/// Example: 120.0 -> "120", 1500.0 -> "1,500", 99.5 -> "99.50"
pub fn format_rate(rate: Amount) -> String {
    if rate.fract() == 0.0 && rate.abs() < 1e15 {
        let sign = if rate < 0.0 { "-" } else { "" };
        format!("{}{}", sign, group_thousands(&format!("{:.0}", rate.abs())))
    } else {
        format_amount(rate)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
