//! `iscolor`: CSS color literals.
//!
//! Accepted grammar (ASCII case-insensitive, whitespace allowed around
//! arguments and commas):
//!
//! ```text
//! color   = named | hex | rgb | rgba | hsl | hsla
//! named   = one of the 148 CSS Color Level 4 keywords, or "transparent"
//! hex     = "#" (3 | 4 | 6 | 8) hex digits
//! rgb     = "rgb("  channel "," channel "," channel ")"
//! rgba    = "rgba(" channel "," channel "," channel "," alpha ")"
//! hsl     = "hsl("  hue "," percent "," percent ")"
//! hsla    = "hsla(" hue "," percent "," percent "," alpha ")"
//! channel = number in 0..=255 | percent      (all three the same form)
//! percent = number in 0..=100 followed by "%"
//! hue     = number in 0..=360
//! alpha   = number in 0..=1
//! number  = digits with at most one ".", e.g. "12", "0.5", ".5"
//! ```
//!
//! Space-separated CSS Level 4 syntax (`rgb(0 0 0 / 50%)`) is not accepted.

use crate::engine::{Outcome, RuleError};
use crate::types::Value;

pub(crate) fn iscolor(value: &Value, _param: Option<&str>) -> Result<Outcome, RuleError> {
    match value {
        Value::String(s) => Ok(Outcome::check(is_color(s), value)),
        Value::Missing => Ok(Outcome::Fail(Value::Missing)),
        Value::Integer(_) | Value::Float(_) | Value::Bool(_) => Err(RuleError::UnsupportedKind),
    }
}

/// Whether `input` is a CSS color literal accepted by the `iscolor` rule.
///
/// ```
/// use fieldcheck::is_color;
///
/// assert!(is_color("red"));
/// assert!(is_color("#ff8800"));
/// assert!(is_color("rgb(255, 136, 0)"));
/// assert!(is_color("hsla(120, 100%, 50%, 0.3)"));
/// assert!(!is_color("#ff888"));
/// assert!(!is_color("rgb(256, 0, 0)"));
/// ```
pub fn is_color(input: &str) -> bool {
    let input = input.trim();
    if let Some(hex) = input.strip_prefix('#') {
        return is_hex(hex);
    }

    let lower = input.to_ascii_lowercase();
    if let Some(args) = function_args(&lower, "rgba") {
        return matches!(args.as_slice(), [r, g, b, a] if is_rgb_triplet(r, g, b) && is_alpha(a));
    }
    if let Some(args) = function_args(&lower, "rgb") {
        return matches!(args.as_slice(), [r, g, b] if is_rgb_triplet(r, g, b));
    }
    if let Some(args) = function_args(&lower, "hsla") {
        return matches!(
            args.as_slice(),
            [h, s, l, a] if is_hue(h) && is_percent(s) && is_percent(l) && is_alpha(a)
        );
    }
    if let Some(args) = function_args(&lower, "hsl") {
        return matches!(
            args.as_slice(),
            [h, s, l] if is_hue(h) && is_percent(s) && is_percent(l)
        );
    }

    NAMED_COLORS.binary_search(&lower.as_str()).is_ok()
}

fn is_hex(digits: &str) -> bool {
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Split `name(a, b, c)` into trimmed arguments.
fn function_args<'a>(input: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let inner = input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

fn number(s: &str) -> Option<f64> {
    let well_formed = s.chars().any(|c| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.matches('.').count() <= 1;
    if well_formed { s.parse().ok() } else { None }
}

fn in_range(s: &str, max: f64) -> bool {
    number(s).is_some_and(|n| n <= max)
}

fn is_percent(s: &str) -> bool {
    s.strip_suffix('%').is_some_and(|n| in_range(n, 100.0))
}

fn is_channel(s: &str) -> bool {
    in_range(s, 255.0)
}

fn is_rgb_triplet(r: &str, g: &str, b: &str) -> bool {
    let channels = [r, g, b];
    channels.iter().all(|c| is_channel(c)) || channels.iter().all(|c| is_percent(c))
}

fn is_hue(s: &str) -> bool {
    in_range(s, 360.0)
}

fn is_alpha(s: &str) -> bool {
    in_range(s, 1.0)
}

/// CSS Color Level 4 named colors plus `transparent`, sorted for binary search.
const NAMED_COLORS: &[&str] = &[
    "aliceblue",
    "antiquewhite",
    "aqua",
    "aquamarine",
    "azure",
    "beige",
    "bisque",
    "black",
    "blanchedalmond",
    "blue",
    "blueviolet",
    "brown",
    "burlywood",
    "cadetblue",
    "chartreuse",
    "chocolate",
    "coral",
    "cornflowerblue",
    "cornsilk",
    "crimson",
    "cyan",
    "darkblue",
    "darkcyan",
    "darkgoldenrod",
    "darkgray",
    "darkgreen",
    "darkgrey",
    "darkkhaki",
    "darkmagenta",
    "darkolivegreen",
    "darkorange",
    "darkorchid",
    "darkred",
    "darksalmon",
    "darkseagreen",
    "darkslateblue",
    "darkslategray",
    "darkslategrey",
    "darkturquoise",
    "darkviolet",
    "deeppink",
    "deepskyblue",
    "dimgray",
    "dimgrey",
    "dodgerblue",
    "firebrick",
    "floralwhite",
    "forestgreen",
    "fuchsia",
    "gainsboro",
    "ghostwhite",
    "gold",
    "goldenrod",
    "gray",
    "green",
    "greenyellow",
    "grey",
    "honeydew",
    "hotpink",
    "indianred",
    "indigo",
    "ivory",
    "khaki",
    "lavender",
    "lavenderblush",
    "lawngreen",
    "lemonchiffon",
    "lightblue",
    "lightcoral",
    "lightcyan",
    "lightgoldenrodyellow",
    "lightgray",
    "lightgreen",
    "lightgrey",
    "lightpink",
    "lightsalmon",
    "lightseagreen",
    "lightskyblue",
    "lightslategray",
    "lightslategrey",
    "lightsteelblue",
    "lightyellow",
    "lime",
    "limegreen",
    "linen",
    "magenta",
    "maroon",
    "mediumaquamarine",
    "mediumblue",
    "mediumorchid",
    "mediumpurple",
    "mediumseagreen",
    "mediumslateblue",
    "mediumspringgreen",
    "mediumturquoise",
    "mediumvioletred",
    "midnightblue",
    "mintcream",
    "mistyrose",
    "moccasin",
    "navajowhite",
    "navy",
    "oldlace",
    "olive",
    "olivedrab",
    "orange",
    "orangered",
    "orchid",
    "palegoldenrod",
    "palegreen",
    "paleturquoise",
    "palevioletred",
    "papayawhip",
    "peachpuff",
    "peru",
    "pink",
    "plum",
    "powderblue",
    "purple",
    "rebeccapurple",
    "red",
    "rosybrown",
    "royalblue",
    "saddlebrown",
    "salmon",
    "sandybrown",
    "seagreen",
    "seashell",
    "sienna",
    "silver",
    "skyblue",
    "slateblue",
    "slategray",
    "slategrey",
    "snow",
    "springgreen",
    "steelblue",
    "tan",
    "teal",
    "thistle",
    "tomato",
    "transparent",
    "turquoise",
    "violet",
    "wheat",
    "white",
    "whitesmoke",
    "yellow",
    "yellowgreen",
];
