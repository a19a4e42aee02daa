//! Deterministic per-service color assignment

use indexmap::IndexMap;
use std::fmt;

/// ANSI reset escape; closes a [`ColorToken`] region.
pub const RESET: &str = "\x1b[0m";

/// The fixed display palette, cycled across services by rank.
const PALETTE: [ColorToken; 6] = [
    ColorToken("\x1b[31m"), // red
    ColorToken("\x1b[32m"), // green
    ColorToken("\x1b[33m"), // yellow
    ColorToken("\x1b[34m"), // blue
    ColorToken("\x1b[35m"), // magenta
    ColorToken("\x1b[36m"), // cyan
];

/// An ANSI color escape assigned to one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorToken(&'static str);

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Assign palette entries by rank in lexicographic name order, wrapping
/// around at the palette size.
///
/// The result is a pure function of the name set: for a fixed set of
/// services, repeated runs color each name identically. The returned map
/// iterates in sorted name order.
pub fn assign<S: AsRef<str>>(names: &[S]) -> IndexMap<String, ColorToken> {
    let mut sorted: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
    sorted.sort_unstable();
    sorted
        .into_iter()
        .enumerate()
        .map(|(rank, name)| (name.to_string(), PALETTE[rank % PALETTE.len()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_is_deterministic() {
        let names = ["api", "web", "worker"];
        assert_eq!(assign(&names), assign(&names));
    }

    #[test]
    fn test_assignment_sorts_names_first() {
        let shuffled = assign(&["web", "api"]);
        let sorted = assign(&["api", "web"]);
        assert_eq!(shuffled, sorted);
        assert_eq!(shuffled["api"], PALETTE[0]);
        assert_eq!(shuffled["web"], PALETTE[1]);
    }

    #[test]
    fn test_assignment_wraps_around_palette() {
        let names = ["a", "b", "c", "d", "e", "f", "g"];
        let colors = assign(&names);
        assert_eq!(colors["g"], PALETTE[0]);
        assert_eq!(colors["a"], PALETTE[0]);
        assert_eq!(colors["f"], PALETTE[5]);
    }

    #[test]
    fn test_assignment_order_is_sorted() {
        let colors = assign(&["zeta", "alpha", "mid"]);
        let order: Vec<_> = colors.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["alpha", "mid", "zeta"]);
    }
}
