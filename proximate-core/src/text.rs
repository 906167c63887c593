//! Slug and display-name normalisation.

/// Derive a URL-safe slug from a display name.
///
/// The input is lowercased, every run of characters outside `[a-z0-9]` is
/// collapsed into a single hyphen, and leading/trailing hyphens are dropped.
/// Non-ASCII letters are treated as separators rather than transliterated, so
/// the output is always ASCII. The function is idempotent.
///
/// # Examples
///
/// ```
/// use proximate_core::slugify;
///
/// assert_eq!(slugify("São Paulo, Brazil!"), "s-o-paulo-brazil");
/// assert_eq!(slugify("  New   York "), "new-york");
/// ```
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;
    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Capitalise the first letter of each whitespace-separated token and
/// lowercase the rest. Tokens are rejoined with single spaces.
///
/// # Examples
///
/// ```
/// use proximate_core::title_case;
///
/// assert_eq!(title_case("los ANGELES"), "Los Angeles");
/// ```
#[must_use]
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn a hyphenated slug back into a title-cased display name.
///
/// ```
/// use proximate_core::slug_to_display;
///
/// assert_eq!(slug_to_display("anaheim-ca"), "Anaheim Ca");
/// ```
#[must_use]
pub fn slug_to_display(slug: &str) -> String {
    title_case(&slug.replace('-', " "))
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}
