/// Format a money amount for display as `"<amount> <currency>"`.
/// The amount stays in minor units, e.g. `15000 USD`.
pub fn format_money(amount: i64, currency: &str) -> String {
    format!("{} {}", amount, currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(15000, "USD"), "15000 USD");
        assert_eq!(format_money(0, "CAD"), "0 CAD");
        assert_eq!(format_money(-250, "USD"), "-250 USD"); // refunds
    }
}
