use std::collections::BTreeMap;

/// Expand `${name}` tokens in a value (PURE FUNCTION)
///
/// Replaces each `${name}` token with the matching value from the table.
/// A token whose name has no entry is left verbatim, as is a `${` with no
/// closing brace; missing keys are never an error.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use gitstep::env::expand;
///
/// let mut table = BTreeMap::new();
/// table.insert("BRANCH".to_string(), "main".to_string());
///
/// assert_eq!(expand("release-${BRANCH}", &table), "release-main");
/// assert_eq!(expand("release-${UNSET}", &table), "release-${UNSET}");
/// ```
pub fn expand(input: &str, table: &BTreeMap<String, String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        match rest[start + 2..].find('}') {
            Some(end) => {
                let name = &rest[start + 2..start + 2 + end];
                match table.get(name) {
                    Some(value) => result.push_str(value),
                    None => result.push_str(&rest[start..start + 3 + end]),
                }
                rest = &rest[start + 3 + end..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}
