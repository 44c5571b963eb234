//! Identifier and label derivation from field names

/// Lower-case slug: runs of anything but letters and digits collapse to `-`.
///
/// `"address.city"` becomes `"address-city"`.
pub fn slug(value: &str) -> String {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Kebab case: `-` before every upper-case letter and word break, whitespace
/// dropped, everything lower-cased. `"TextInput"` becomes `"text-input"`.
pub fn kebab(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let mut word_start = false;

    for c in value.chars() {
        if c.is_whitespace() {
            word_start = true;
            continue;
        }
        if !out.is_empty() && (word_start || c.is_uppercase()) {
            out.push('-');
        }
        word_start = false;
        out.extend(c.to_lowercase());
    }

    out
}

/// Human label for the last dotted segment of `name`.
///
/// `"address.city"` becomes `"City"` and `"firstName"` becomes
/// `"First name"`. Underscores are kept: `"first_name"` is `"First_name"`.
pub fn label(name: &str) -> String {
    let segment = name.rsplit('.').next().unwrap_or(name);
    let words = kebab(segment).replace('-', " ");
    upper_first(words.trim())
}

fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
