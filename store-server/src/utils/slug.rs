//! Slug 工具

/// Derive a URL-safe slug from a display name.
///
/// Lowercases ASCII alphanumerics, maps everything else to single
/// dashes, and strips leading/trailing dashes. Names with no ASCII
/// alphanumerics produce an empty slug; callers treat that as a
/// validation failure.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true; // suppress leading dashes
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_dashes() {
        assert_eq!(slugify("Linen Shirt"), "linen-shirt");
        assert_eq!(slugify("Tee / V-Neck  (2024)"), "tee-v-neck-2024");
    }

    #[test]
    fn strips_edge_dashes() {
        assert_eq!(slugify("  Sale!  "), "sale");
        assert_eq!(slugify("--x--"), "x");
    }

    #[test]
    fn non_ascii_names_produce_empty_slug() {
        assert_eq!(slugify("春季新品"), "");
    }
}
