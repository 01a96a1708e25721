//! Route to window-title mapping.

pub const DEFAULT_TITLE: &str = "Driftline";

/// Display title for a navigation route. Total over all inputs: anything
/// unrecognized falls back to the product name.
pub fn title_for_route(path: &str) -> String {
    match path {
        "" | "/" => DEFAULT_TITLE.to_string(),
        "/dashboard" => format!("Dashboard | {DEFAULT_TITLE}"),
        "/communities" => format!("Communities | {DEFAULT_TITLE}"),
        "/profile" => format!("Your profile | {DEFAULT_TITLE}"),
        "/settings" => format!("Settings | {DEFAULT_TITLE}"),
        _ => DEFAULT_TITLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_routes() {
        assert_eq!(title_for_route("/dashboard"), "Dashboard | Driftline");
        assert_eq!(title_for_route("/communities"), "Communities | Driftline");
        assert_eq!(title_for_route("/"), "Driftline");
    }

    #[test]
    fn unknown_routes_fall_back_to_the_product_name() {
        assert_eq!(title_for_route("/no-such-page"), "Driftline");
        assert_eq!(title_for_route(""), "Driftline");
    }
}
