// ₹ Rupee formatting - Indian digit grouping and lakh/crore shorthand

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Whole rupees with Indian grouping: ₹24,00,000
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    format!("{}₹{}", sign, group_indian(&digits))
}

/// Last three digits, then groups of two
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// ₹1.23 Cr, ₹4.56 L, ₹7.89 K, or plain rupees below a thousand
pub fn format_compact(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let value = amount.abs();

    if value >= CRORE {
        format!("{}₹{:.2} Cr", sign, value / CRORE)
    } else if value >= LAKH {
        format!("{}₹{:.2} L", sign, value / LAKH)
    } else if value >= THOUSAND {
        format!("{}₹{:.2} K", sign, value / THOUSAND)
    } else {
        format!("{}₹{:.0}", sign, value)
    }
}

/// Chart axis labels: 1.5Cr, 12.0L, 3.2K
pub fn format_axis(value: f64) -> String {
    if value >= CRORE {
        format!("{:.1}Cr", value / CRORE)
    } else if value >= LAKH {
        format!("{:.1}L", value / LAKH)
    } else if value >= THOUSAND {
        format!("{:.1}K", value / THOUSAND)
    } else {
        format!("{:.0}", value)
    }
}

/// Percent with one decimal: 7.1%
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(1_000.0), "₹1,000");
        assert_eq!(format_inr(150_000.0), "₹1,50,000");
        assert_eq!(format_inr(2_400_000.0), "₹24,00,000");
        assert_eq!(format_inr(123_456_789.4), "₹12,34,56,789");
        assert_eq!(format_inr(-45_000.0), "-₹45,000");
    }

    #[test]
    fn test_compact() {
        assert_eq!(format_compact(10_000_000.0), "₹1.00 Cr");
        assert_eq!(format_compact(4_068_000.0), "₹40.68 L");
        assert_eq!(format_compact(7_890.0), "₹7.89 K");
        assert_eq!(format_compact(512.4), "₹512");
    }

    #[test]
    fn test_axis() {
        assert_eq!(format_axis(15_000_000.0), "1.5Cr");
        assert_eq!(format_axis(1_200_000.0), "12.0L");
        assert_eq!(format_axis(3_200.0), "3.2K");
        assert_eq!(format_axis(40.0), "40");
    }
}
