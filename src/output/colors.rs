use colored::Color;
use std::borrow::Cow;

/// Text attribute applied to a table cell through an SGR escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Reset,
    Bold,
    /// Foreground color
    Fg(Color),
}

impl Attribute {
    /// SGR parameter, e.g. `1` for bold or `31` for a red foreground.
    pub fn code(&self) -> Cow<'static, str> {
        match self {
            Attribute::Reset => "0".into(),
            Attribute::Bold => "1".into(),
            Attribute::Fg(color) => color.to_fg_str(),
        }
    }

    /// Full escape sequence for this attribute.
    pub fn escape(&self) -> String {
        format!("\x1b[{}m", self.code())
    }
}

/// Wrap `text` in the opening sequence of every attribute, in order, and a single reset.
pub fn paint(text: &str, attributes: &[Attribute]) -> String {
    if attributes.is_empty() {
        return text.to_string();
    }

    let mut out: String = attributes.iter().map(Attribute::escape).collect();
    out.push_str(text);
    out.push_str(&Attribute::Reset.escape());
    out
}

/// Green when `good`, red otherwise. Empty when coloring is off.
pub fn status_color(enabled: bool, good: bool) -> Vec<Attribute> {
    match (enabled, good) {
        (false, _) => Vec::new(),
        (true, true) => vec![Attribute::Fg(Color::Green)],
        (true, false) => vec![Attribute::Fg(Color::Red)],
    }
}
