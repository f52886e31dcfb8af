use crate::palette::Palette;

const FILLED: &str = "█";
const HOLLOW: &str = "░";

const USAGE_PREFIX: &str = "Usage: ";
const QUOTA_PREFIX: &str = "Quota: ";
const LIMIT_PREFIX: &str = "Limit: ";

/// Divides `total` display columns among weighted buckets so that each
/// bucket's share approximates its proportion of the weights as closely
/// as integrality allows
///
/// This is the classical largest-remainder method: every bucket gets the
/// floor of its exact share, and the units lost to flooring are handed
/// out to the buckets with the largest fractional remainders, ties going
/// to the lowest index. The portions always sum to exactly `total`
///
/// # Examples
///
/// * `apportion(&[5, 2, 3], 10)` -> `[5, 2, 3]`
/// * `apportion(&[5, 2, 3], 11)` -> `[6, 2, 3]`
///
/// # Panics
///
/// Panics if every weight is zero. Callers own that contract; dividing
/// columns among nothing has no meaningful answer
pub fn apportion(counts: &[u64], total: usize) -> Vec<usize> {
    let sum: u64 = counts.iter().sum();
    assert!(sum > 0, "apportion requires at least one nonzero weight");

    let mut portions = Vec::with_capacity(counts.len());
    let mut remainders = Vec::with_capacity(counts.len());
    for (index, &count) in counts.iter().enumerate() {
        let share = count as f64 * total as f64 / sum as f64;
        portions.push(share.floor() as usize);
        remainders.push((index, share.fract()));
    }

    let assigned: usize = portions.iter().sum();
    // A stable sort keeps the lowest index first among equal remainders
    remainders.sort_by(|a, b| b.1.total_cmp(&a.1));
    for &(index, _) in remainders.iter().take(total.saturating_sub(assigned)) {
        portions[index] += 1;
    }
    portions
}

/// Where the current usage sits relative to the soft quota and the hard
/// limit. Exactly one regime applies to any (usage, quota, limit) triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    UnderQuota,
    OverQuota,
    OverLimit,
}

impl Regime {
    pub fn classify(usage: u64, quota: u64, limit: u64) -> Self {
        if usage <= quota {
            Regime::UnderQuota
        } else if usage <= limit {
            Regime::OverQuota
        } else {
            Regime::OverLimit
        }
    }
}

/// Renders one usage bar as a set of text lines: the usage label, the
/// bar itself, and the quota/limit labels underneath
///
/// The bar is `width` columns wide. Those columns are apportioned among
/// the quota region, the quota-to-limit headroom, and any overflow past
/// the limit, each in proportion to its real magnitude; usage then fills
/// the bar from the left, switching emphasis as it crosses the quota and
/// the limit. `format_value` turns the raw numbers into label text
///
/// The quota and limit labels share one line when they fit side by side,
/// and get a line each when they would collide
pub fn render_bar(
    usage: u64,
    quota: u64,
    limit: u64,
    width: usize,
    format_value: fn(u64) -> String,
    palette: &Palette,
) -> Vec<String> {
    assert!(width > 0, "bar width must be positive");

    let max_usage = usage.max(limit);
    let regions = apportion(
        &[
            quota,
            limit.saturating_sub(quota),
            usage.saturating_sub(limit),
        ],
        width,
    );
    let (quota_cols, limit_cols, overflow_cols) = (regions[0], regions[1], regions[2]);
    let used_cols = if max_usage == 0 {
        0
    } else {
        (usage as f64 * width as f64 / max_usage as f64).round() as usize
    };

    // Rounding can nudge used_cols one column past its region boundary,
    // so every segment length clamps at zero instead of underflowing
    let bar_line = match Regime::classify(usage, quota, limit) {
        Regime::UnderQuota => format!(
            "{}{}{}",
            palette.good(&FILLED.repeat(used_cols)),
            HOLLOW.repeat(quota_cols.saturating_sub(used_cols) + limit_cols),
            " ".repeat(overflow_cols),
        ),
        Regime::OverQuota => format!(
            "{}{}{}{}",
            palette.good(&FILLED.repeat(quota_cols)),
            palette.warning(&FILLED.repeat(used_cols.saturating_sub(quota_cols))),
            HOLLOW.repeat((quota_cols + limit_cols).saturating_sub(used_cols)),
            " ".repeat(overflow_cols),
        ),
        Regime::OverLimit => format!(
            "{}{}{}",
            palette.good(&FILLED.repeat(quota_cols)),
            palette.warning(&FILLED.repeat(limit_cols)),
            palette.danger(&FILLED.repeat(used_cols.saturating_sub(quota_cols + limit_cols))),
        ),
    };

    // The usage value is right-aligned so its last character sits at the
    // used column; at tiny widths the padding clamps to zero instead
    let usage_value = format_value(usage);
    let usage_pad = used_cols.saturating_sub(USAGE_PREFIX.len() + usage_value.len());
    let usage_line = format!("{}{}{}", USAGE_PREFIX, " ".repeat(usage_pad), usage_value);

    let quota_label = format!("{}{}", QUOTA_PREFIX, format_value(quota));
    let quota_line = format!(
        "{}{}",
        " ".repeat(quota_cols.saturating_sub(quota_label.len())),
        quota_label,
    );

    let limit_label = format!("{}{}", LIMIT_PREFIX, format_value(limit));
    let limit_line = format!(
        "{}{}",
        " ".repeat((quota_cols + limit_cols).saturating_sub(limit_label.len())),
        limit_label,
    );

    let mut lines = vec![usage_line, bar_line];

    // Overlap check: the quota line collides when it reaches into the
    // limit line's leading whitespace. Comparing the whole line length
    // against the whitespace run overestimates slightly, but downstream
    // output depends on exactly this behavior, so it stays
    let limit_lead = limit_line.chars().take_while(|&c| c == ' ').count();
    if quota_line.len() >= limit_lead {
        lines.push(quota_line);
        lines.push(limit_line);
    } else {
        lines.push(overlay(&quota_line, &limit_line));
    }
    lines
}

/// Merges two label lines character by character, preferring the top
/// line's character wherever it is non-blank
fn overlay(top: &str, bottom: &str) -> String {
    let top: Vec<char> = top.chars().collect();
    let bottom: Vec<char> = bottom.chars().collect();
    (0..top.len().max(bottom.len()))
        .map(|i| match top.get(i) {
            Some(&c) if c != ' ' => c,
            _ => bottom.get(i).copied().unwrap_or(' '),
        })
        .collect()
}
