use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

const MAX_LABEL_LEN: usize = 63;

// Letters and digits of any script, hyphens only inside the label.
static DOMAIN_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?$").expect("valid domain label pattern")
});

// Alphabetic in any script, or an ASCII punycode label such as `xn--p1ai`.
static TOP_LEVEL_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\p{L}{2,63}|(?i:xn--[a-z0-9-]{2,59}))$").expect("valid top-level domain pattern")
});

const GMAIL_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];
const YAHOO_DOMAINS: &[&str] = &[
    "rocketmail.com",
    "yahoo.ca",
    "yahoo.co.uk",
    "yahoo.com",
    "yahoo.de",
    "yahoo.fr",
    "yahoo.in",
    "yahoo.it",
    "ymail.com",
];
const YANDEX_DOMAINS: &[&str] = &[
    "yandex.ru",
    "yandex.ua",
    "yandex.kz",
    "yandex.com",
    "yandex.by",
    "ya.ru",
];

/// Checks the address against the email grammar and requires a dotted,
/// public-looking domain (`user@localhost` is rejected).
pub fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }

    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };

    let labels: Vec<&str> = domain.split('.').collect();
    let well_formed = |label: &&str| {
        label.chars().count() <= MAX_LABEL_LEN && DOMAIN_LABEL.is_match(label)
    };
    if labels.len() < 2 || !labels.iter().all(well_formed) {
        return false;
    }

    labels
        .last()
        .is_some_and(|tld| TOP_LEVEL_DOMAIN.is_match(tld))
}

/// Produces the canonical form of an already validated address.
///
/// Case is folded, `+tag` sub-addresses are dropped, and a few providers get
/// their own aliasing rules: Gmail ignores dots, Yahoo uses `-tag`, and the
/// Yandex domains all resolve to `yandex.ru`. Returns `None` when nothing is
/// left of the local part.
pub fn normalize_email(email: &str) -> Option<String> {
    let (local, domain) = email.trim().rsplit_once('@')?;
    let mut local = local.to_lowercase();
    let mut domain = domain.to_lowercase();

    if YAHOO_DOMAINS.contains(&domain.as_str()) {
        if let Some((head, _tag)) = local.rsplit_once('-') {
            local = head.to_string();
        }
    } else if let Some((head, _tag)) = local.split_once('+') {
        local = head.to_string();
    }

    if GMAIL_DOMAINS.contains(&domain.as_str()) {
        local.retain(|c| c != '.');
        domain = "gmail.com".to_string();
    } else if YANDEX_DOMAINS.contains(&domain.as_str()) {
        domain = "yandex.ru".to_string();
    }

    if local.is_empty() {
        return None;
    }

    Some(format!("{local}@{domain}"))
}
