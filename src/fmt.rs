/// Format a value as dollars with thousands separators: $1,234.56
pub fn money(val: f64) -> String {
    let cents = (val.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if val < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(4.5), "$4.50");
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(-900.0), "-$900.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(2500000.75), "$2,500,000.75");
    }
}
