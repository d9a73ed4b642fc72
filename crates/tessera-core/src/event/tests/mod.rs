#[cfg(test)]
mod factory_tests;

#[cfg(test)]
mod tests {
    use crate::event::strip_on_prefix;

    #[test]
    fn test_strip_on_prefix_examples() {
        assert_eq!(strip_on_prefix("onLoad"), "load");
        assert_eq!(strip_on_prefix("onClick"), "click");
        assert_eq!(strip_on_prefix("onA"), "a");
        assert_eq!(strip_on_prefix("onMouseDown"), "mouseDown");
    }

    #[test]
    fn test_strip_on_prefix_leaves_other_names_alone() {
        assert_eq!(strip_on_prefix("load"), "load");
        assert_eq!(strip_on_prefix("online"), "online");
        assert_eq!(strip_on_prefix("on"), "on");
        assert_eq!(strip_on_prefix("on1"), "on1");
        assert_eq!(strip_on_prefix(""), "");
        assert_eq!(strip_on_prefix("On"), "On");
    }

    #[test]
    fn test_strip_on_prefix_is_idempotent_on_normalized_names() {
        for name in ["load", "online", "on", "resize", "mouseDown", "onA"] {
            let once = strip_on_prefix(name);
            assert_eq!(strip_on_prefix(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn test_strip_on_prefix_handles_non_ascii_remainder() {
        assert_eq!(strip_on_prefix("onÉvent"), "onÉvent");
        assert_eq!(strip_on_prefix("onZ\u{e9}"), "z\u{e9}");
    }
}
