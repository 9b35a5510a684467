//! Prompt wording and parsing of generated activity lists.

use caravan_core::Activity;

/// Prompt asking for `count` activities in `city`, excluding `avoid`.
///
/// # Examples
/// ```
/// use caravan_planner::activity_prompt;
///
/// let prompt = activity_prompt("Fes", 3, &["Tanneries".to_owned()]);
/// assert!(prompt.contains("exactly 3"));
/// assert!(prompt.contains("Tanneries"));
/// ```
#[must_use]
pub fn activity_prompt(city: &str, count: usize, avoid: &[String]) -> String {
    let mut prompt = format!(
        "List exactly {count} distinct things for a visitor to do in {city}. \
         Write one activity per line as `Name - Price`, where Price is a plain \
         number in local currency for one person. Do not add any other text."
    );
    if !avoid.is_empty() {
        prompt.push_str(" Do not suggest any of: ");
        prompt.push_str(&avoid.join(", "));
        prompt.push('.');
    }
    prompt
}

/// Extract `Name - Price` pairs from generated text.
///
/// List markers such as `-`, `*` or `1.` are stripped. Lines without a
/// readable price are skipped; a price written as "free" counts as zero.
///
/// # Examples
/// ```
/// use caravan_planner::parse_activities;
///
/// let parsed = parse_activities("1. Hassan II Mosque - 130 MAD\nSome chatter\n- Beach day: free");
/// assert_eq!(parsed.len(), 2);
/// assert_eq!(parsed[0].name, "Hassan II Mosque");
/// assert_eq!(parsed[0].price, 130.0);
/// assert_eq!(parsed[1].price, 0.0);
/// ```
#[must_use]
pub fn parse_activities(text: &str) -> Vec<Activity> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Activity> {
    let entry = strip_list_marker(line.trim());
    let (raw_name, raw_price) = entry
        .rsplit_once(" - ")
        .or_else(|| entry.rsplit_once(" – "))
        .or_else(|| entry.rsplit_once(':'))?;
    let name = raw_name.trim().trim_matches(['*', '"']).trim();
    if name.is_empty() {
        return None;
    }
    Some(Activity::new(name, parse_price(raw_price)?))
}

fn strip_list_marker(line: &str) -> &str {
    let unbulleted = line.trim_start_matches(['-', '*', '•', ' ', '\t']);
    let digits = unbulleted.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return unbulleted;
    }
    unbulleted
        .get(digits..)
        .and_then(|rest| rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')))
        .map_or(unbulleted, str::trim_start)
}

fn parse_price(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.to_ascii_lowercase().contains("free") {
        return Some(0.0);
    }
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let number: String = text
        .get(start..)?
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| *c != ',')
        .collect();
    number
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}
