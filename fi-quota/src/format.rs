/// Formats a raw KiB count the way GPFS reports block usage, scaling up
/// through the binary unit ladder: `1048576` -> `"1 GiB"`
pub fn kib_to_str(kib: u64) -> String {
    humanize(kib, &["KiB", "MiB", "GiB", "TiB", "PiB"])
}

/// Formats a bare count, e.g. inode totals: `2048` -> `"2 Ki"`
pub fn count_to_str(count: u64) -> String {
    humanize(count, &["", "Ki", "Mi", "Gi", "Ti"])
}

/// Divides by 1024 until the value drops below one unit step, then
/// prints one decimal place, dropping a trailing ".0"
fn humanize(value: u64, units: &[&str]) -> String {
    let mut scaled = value as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < units.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let text = format!("{:.1}", scaled);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    if units[unit].is_empty() {
        text.to_string()
    } else {
        format!("{} {}", text, units[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kib_whole_units() {
        assert_eq!(kib_to_str(1048576), "1 GiB");
        assert_eq!(kib_to_str(1024), "1 MiB");
        assert_eq!(kib_to_str(512), "512 KiB");
        assert_eq!(kib_to_str(0), "0 KiB");
    }

    #[test]
    fn test_kib_fractional_units() {
        assert_eq!(kib_to_str(1200000), "1.1 GiB");
        assert_eq!(kib_to_str(1536), "1.5 MiB");
    }

    #[test]
    fn test_counts() {
        assert_eq!(count_to_str(2048), "2 Ki");
        assert_eq!(count_to_str(1000), "1000");
        assert_eq!(count_to_str(1536), "1.5 Ki");
        assert_eq!(count_to_str(0), "0");
    }
}
