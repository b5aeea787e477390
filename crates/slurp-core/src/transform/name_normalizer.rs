/// Derive a camelCase method identifier from an operation title.
///
/// Each letter that follows a non-letter is upper-cased and every other
/// letter lower-cased; the whole first word is lower-case. Anything that is
/// not a letter or digit is dropped afterwards.
///
/// Examples:
/// - `Get Category` → `getCategory`
/// - `List Stories (Deprecated)` → `listStoriesDeprecated`
/// - `Create Story-Link` → `createStoryLink`
/// - `Get EpicWorkflow` → `getEpicworkflow`
pub fn identifier_from_title(title: &str) -> String {
    let mut ident = String::with_capacity(title.len());
    let mut first_word = true;
    let mut after_letter = false;
    for c in title.chars().filter(|c| !matches!(c, '(' | ')')) {
        if c == ' ' {
            first_word = false;
        }
        if c.is_alphabetic() {
            if first_word || after_letter {
                ident.extend(c.to_lowercase());
            } else {
                ident.extend(c.to_uppercase());
            }
        } else if c.is_numeric() {
            ident.push(c);
        }
        after_letter = c.is_alphabetic();
    }
    ident
}

/// Categories may only contain letters, digits, spaces and hyphens.
pub fn is_valid_category(category: &str) -> bool {
    let mut chars = category
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .peekable();
    chars.peek().is_some() && chars.all(char::is_alphanumeric)
}
