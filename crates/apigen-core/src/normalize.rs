//! Identifier normalization shared by every backend.
//!
//! Backends never build identifiers by hand: spec-provided names go through
//! [`sanitize`] and then whichever casing the target syntax wants.

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

/// Replace every character outside `[A-Za-z0-9_]` with `_`, then strip any
/// leading run of digits. Idempotent; the result matches
/// `^[A-Za-z_][A-Za-z0-9_]*$` or is empty.
pub fn sanitize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    replaced
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .to_string()
}

/// Acronym-aware snake casing: `HTTPServer` → `http_server`,
/// `userID` → `user_id`.
pub fn to_snake_case(name: &str) -> String {
    name.to_snake_case()
}

/// `api_client` → `apiClient`. The first token is lowercased.
pub fn to_camel_case(name: &str) -> String {
    name.to_lower_camel_case()
}

/// `api_client` → `ApiClient`.
pub fn to_pascal_case(name: &str) -> String {
    name.to_pascal_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_special_chars() {
        assert_eq!(sanitize("application/json"), "application_json");
        assert_eq!(sanitize("pet-store"), "pet_store");
        assert_eq!(sanitize("a b.c"), "a_b_c");
    }

    #[test]
    fn test_sanitize_strips_leading_digits() {
        assert_eq!(sanitize("3dModel"), "dModel");
        assert_eq!(sanitize("123"), "");
        assert_eq!(sanitize("_3abc"), "_3abc");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for input in ["3d-model", "application/json", "userID", "", "x"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn test_snake_case_acronyms() {
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("userID"), "user_id");
        assert_eq!(to_snake_case("createChatCompletion"), "create_chat_completion");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("api_client"), "apiClient");
        assert_eq!(to_camel_case("get_pets"), "getPets");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("api_client"), "ApiClient");
        assert_eq!(to_pascal_case("pet_store_api"), "PetStoreApi");
    }
}
