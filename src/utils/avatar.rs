//! Avatar placeholder derivation. Until a user uploads a picture, their
//! avatar is a deterministic placeholder keyed by the initials of their
//! display name.

/// Uppercased first letter of each whitespace-separated name token.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Placeholder avatar URL for a display name.
pub fn placeholder_avatar_url(name: &str) -> String {
    format!(
        "https://via.placeholder.com/150/007AFF/FFFFFF?text={}",
        initials(name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_from_full_name() {
        assert_eq!(initials("Delia Farcas"), "DF");
        assert_eq!(initials("Andrei Guinea"), "AG");
    }

    #[test]
    fn test_initials_uppercase_and_whitespace() {
        assert_eq!(initials("ana maria pop"), "AMP");
        assert_eq!(initials("  spaced   out  "), "SO");
        assert_eq!(initials("Single"), "S");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_placeholder_url_is_keyed_by_initials() {
        assert_eq!(
            placeholder_avatar_url("Delia Farcas"),
            "https://via.placeholder.com/150/007AFF/FFFFFF?text=DF"
        );
    }
}
