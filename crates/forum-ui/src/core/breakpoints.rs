//! Responsive breakpoint definitions for the forum layout.

/// Individual breakpoint with an inclusive minimum width and optional maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    /// Short name, also written to `data-bp` on the document body.
    pub name: &'static str,
    /// Inclusive lower bound in CSS pixels.
    pub min_width: u32,
    /// Inclusive upper bound in CSS pixels, `None` for the widest breakpoint.
    pub max_width: Option<u32>,
}

/// Phones in portrait.
pub const XS: Breakpoint = Breakpoint {
    name: "xs",
    min_width: 0,
    max_width: Some(575),
};
/// Phones in landscape.
pub const SM: Breakpoint = Breakpoint {
    name: "sm",
    min_width: 576,
    max_width: Some(767),
};
/// Tablets.
pub const MD: Breakpoint = Breakpoint {
    name: "md",
    min_width: 768,
    max_width: Some(991),
};
/// Small desktops; the sidebar is always shown from here up.
pub const LG: Breakpoint = Breakpoint {
    name: "lg",
    min_width: 992,
    max_width: Some(1199),
};
/// Desktops.
pub const XL: Breakpoint = Breakpoint {
    name: "xl",
    min_width: 1200,
    max_width: Some(1399),
};
/// Wide desktops.
pub const XXL: Breakpoint = Breakpoint {
    name: "xxl",
    min_width: 1400,
    max_width: None,
};

/// Ordered breakpoints used for layout decisions.
pub const BREAKPOINTS: [Breakpoint; 6] = [XS, SM, MD, LG, XL, XXL];

/// Width at which the forum switches from single-pane to side-by-side layout.
pub const LARGE_MIN_WIDTH: u32 = LG.min_width;

/// Find the first breakpoint matching the supplied width.
#[must_use]
pub fn for_width(width: u32) -> Breakpoint {
    BREAKPOINTS
        .iter()
        .copied()
        .find(|bp| width >= bp.min_width && bp.max_width.is_none_or(|max| width <= max))
        .unwrap_or(XXL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_selection_matches_ranges() {
        assert_eq!(for_width(0).name, XS.name);
        assert_eq!(for_width(576).name, SM.name);
        assert_eq!(for_width(991).name, MD.name);
        assert_eq!(for_width(992).name, LG.name);
        assert_eq!(for_width(5_000).name, XXL.name);
    }

    #[test]
    fn ranges_are_contiguous() {
        for pair in BREAKPOINTS.windows(2) {
            assert_eq!(pair[0].max_width.map(|max| max + 1), Some(pair[1].min_width));
        }
    }
}
