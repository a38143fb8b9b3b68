//! Text layout: word splitting, line wrapping, and screen placement.

use alpine_core::math::Vec2;

/// Vertical origin for draw positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// `y` measures down from the top edge of the viewport.
    #[default]
    Top,
    /// `y` measures up from the bottom edge.
    Bottom,
}

/// Splits on spaces, collapsing runs of them.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Greedy line filling against a width budget.
///
/// `measure` maps a string to its rendered width. Word widths plus an
/// inter-word space are accumulated until the budget is exceeded; a word
/// wider than the whole budget still gets a line of its own, so layout
/// always makes progress.
pub fn wrap_lines<F>(text: &str, width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let words = split_words(text);
    let space = measure("a a") - measure("aa");

    let mut lines = Vec::new();
    let mut first = 0;
    while first < words.len() {
        let mut last = first;
        let mut len = 0.0;
        while last < words.len() {
            len += measure(words[last]) + space;
            if len >= width && last != first {
                break;
            }
            last += 1;
        }
        lines.push(words[first..last].join(" "));
        first = last;
    }
    lines
}

/// Left edge that centers a run of text, clamped into the viewport.
pub fn center_x(text_width: f64, viewport_width: f64) -> f64 {
    ((viewport_width - text_width) / 2.0).max(0.0)
}

/// Resolves a pen position for a draw call.
///
/// A negative `x` requests horizontal centering. Under [`Orientation::Top`]
/// the `y` offset measures down from the viewport top to the text top, so
/// the returned baseline-origin position subtracts the text size.
pub fn place_text(
    x: f64,
    y: f64,
    text_width: f64,
    size: f64,
    viewport: Vec2,
    orientation: Orientation,
) -> Vec2 {
    let left = if x >= 0.0 {
        x
    } else {
        center_x(text_width, viewport.x)
    };
    let left = left.max(0.0);

    let bottom = match orientation {
        Orientation::Top => viewport.y - size - y,
        Orientation::Bottom => y,
    };

    Vec2::new(left, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character one unit wide; makes widths equal char counts.
    fn unit_measure(s: &str) -> f64 {
        s.chars().count() as f64
    }

    #[test]
    fn split_collapses_space_runs() {
        assert_eq!(split_words("a  quick   brown fox"), vec!["a", "quick", "brown", "fox"]);
        assert_eq!(split_words("  lead and trail  "), vec!["lead", "and", "trail"]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn wrap_fills_lines_greedily() {
        // Budget of 12: "one two" (7+spaces) fits, adding "three" breaks.
        let lines = wrap_lines("one two three four", 12.0, unit_measure);
        assert_eq!(lines, vec!["one two", "three four"]);
    }

    #[test]
    fn wrap_puts_an_oversized_word_on_its_own_line() {
        let lines = wrap_lines("tiny extraordinarily tiny", 8.0, unit_measure);
        assert_eq!(lines, vec!["tiny", "extraordinarily", "tiny"]);
    }

    #[test]
    fn wrap_of_fitting_text_is_one_line() {
        let lines = wrap_lines("all fits", 100.0, unit_measure);
        assert_eq!(lines, vec!["all fits"]);
    }

    #[test]
    fn center_x_clamps_to_the_viewport() {
        assert_eq!(center_x(100.0, 300.0), 100.0);
        assert_eq!(center_x(400.0, 300.0), 0.0);
    }

    #[test]
    fn negative_x_centers() {
        let pos = place_text(-1.0, 0.0, 100.0, 20.0, Vec2::new(300.0, 200.0), Orientation::Bottom);
        assert_eq!(pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn top_orientation_measures_down_from_the_top() {
        let pos = place_text(10.0, 30.0, 50.0, 20.0, Vec2::new(300.0, 200.0), Orientation::Top);
        assert_eq!(pos, Vec2::new(10.0, 150.0));
    }
}
