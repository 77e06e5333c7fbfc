/// `EPjFWdd5Auf...TDt1v` style shortening: first and last four characters.
pub fn abbreviate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

pub fn ui_amount(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(i32::from(decimals))
}

/// Human readable duration, e.g. `1 day 2 hours 5 seconds`. Zero units are omitted.
pub fn for_humans(seconds: u64) -> String {
    const SEC_IN_YEAR: u64 = 31_536_000;
    const SEC_IN_DAY: u64 = 86_400;
    const SEC_IN_HOUR: u64 = 3_600;
    const SEC_IN_MIN: u64 = 60;

    let levels = [
        (seconds / SEC_IN_YEAR, "year"),
        ((seconds % SEC_IN_YEAR) / SEC_IN_DAY, "day"),
        ((seconds % SEC_IN_DAY) / SEC_IN_HOUR, "hour"),
        ((seconds % SEC_IN_HOUR) / SEC_IN_MIN, "minute"),
        (seconds % SEC_IN_MIN, "second"),
    ];

    levels
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| {
            if *count == 1 {
                format!("{count} {unit}")
            } else {
                format!("{count} {unit}s")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
