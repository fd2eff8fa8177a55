//! Known learning platforms and their domains.

/// `site:` filter for a platform name (case-insensitive).
pub fn site_filter(platform: &str) -> Option<&'static str> {
    let filter = match platform.trim().to_lowercase().as_str() {
        "youtube" => "youtube.com",
        "microsoft learn" => "learn.microsoft.com",
        "udemy" => "udemy.com",
        "coursera" => "coursera.org",
        "freecodecamp" => "freecodecamp.org",
        "pluralsight" => "pluralsight.com",
        "dev.to" => "dev.to",
        "medium" => "medium.com",
        "mdn web docs" => "developer.mozilla.org",
        "w3schools" => "w3schools.com",
        "github" => "github.com",
        "edx" => "edx.org",
        "codecademy" => "codecademy.com",
        "linkedin learning" => "linkedin.com/learning",
        "stackoverflow" => "stackoverflow.com",
        _ => return None,
    };
    Some(filter)
}

/// Domains a URL must contain to count as hosted on `platform`.
///
/// `None` means the platform is not tracked and any URL is accepted.
pub fn platform_domains(platform: &str) -> Option<&'static [&'static str]> {
    let domains: &'static [&'static str] = match platform.trim().to_lowercase().as_str() {
        "youtube" => &["youtube.com", "youtu.be"],
        "microsoft learn" => &["learn.microsoft.com", "docs.microsoft.com"],
        "udemy" => &["udemy.com"],
        "coursera" => &["coursera.org"],
        "freecodecamp" => &["freecodecamp.org"],
        "pluralsight" => &["pluralsight.com"],
        "dev.to" => &["dev.to"],
        "medium" => &["medium.com"],
        "mdn web docs" => &["developer.mozilla.org"],
        "w3schools" => &["w3schools.com"],
        "github" => &["github.com"],
        "edx" => &["edx.org"],
        "codecademy" => &["codecademy.com"],
        "linkedin learning" => &["linkedin.com/learning"],
        _ => return None,
    };
    Some(domains)
}

/// Whether `url` plausibly belongs to `platform`. Empty URLs never match.
pub fn is_valid_platform_url(url: &str, platform: &str) -> bool {
    if url.trim().is_empty() {
        return false;
    }
    match platform_domains(platform) {
        Some(domains) => {
            let url = url.to_lowercase();
            domains.iter().any(|domain| url.contains(domain))
        }
        None => true,
    }
}
