/// Region value that opens a listing to everyone.
pub(crate) const GLOBAL_REGION: &str = "GLOBAL";

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn restricted(region: Option<&str>) -> Option<&str> {
    region
        .map(str::trim)
        .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case(GLOBAL_REGION))
}

/// Unrestricted listings take everyone; restricted ones need a matching location.
pub(crate) fn user_region_eligible(region: Option<&str>, location: Option<&str>) -> bool {
    let Some(region) = restricted(region) else {
        return true;
    };
    location
        .map(normalize)
        .is_some_and(|loc| !loc.is_empty() && loc == normalize(region))
}

/// Hover text for an apply button held back by region. `None` when unrestricted.
pub(crate) fn region_tooltip_label(region: Option<&str>) -> Option<String> {
    let region = restricted(region)?;
    let name = normalize(region)
        .split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    Some(format!("This listing is only open to people in {name}"))
}
