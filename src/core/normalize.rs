/// Convert a user-facing key into a lower camelCase identifier.
///
/// The input is trimmed and lower-cased first. `_`, space, `-` and `.` are
/// word boundaries; a digit also capitalizes the letter after it. Any other
/// character is dropped. A leading digit gets an `_` prefix.
///
/// # Examples
///
/// ```
/// use exprmig::core::to_camel_case;
///
/// assert_eq!(to_camel_case("My Secret-Key"), "mySecretKey");
/// assert_eq!(to_camel_case("1abc"), "_1Abc");
/// assert_eq!(to_camel_case(""), "");
/// ```
pub fn to_camel_case(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len() + 1);
    let mut capitalize_next = false;

    for (i, c) in lowered.chars().enumerate() {
        if i == 0 && c.is_ascii_digit() {
            out.push('_');
        }

        if c.is_ascii_alphabetic() {
            if capitalize_next {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
            capitalize_next = false;
        } else if c.is_ascii_digit() {
            out.push(c);
            capitalize_next = true;
        } else {
            capitalize_next = matches!(c, '_' | ' ' | '-' | '.');
        }
    }

    out
}
