//! The closed set of primitive kinds the sketch transform understands.

use std::fmt;

/// Primitive kinds with a sketch handler.
///
/// Adding a kind means adding a variant here plus one extraction handler in
/// `sketch::extract`; elements of any other name are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Circle,
    Rect,
    Ellipse,
    Line,
    Polygon,
    Polyline,
    Path,
}

impl PrimitiveKind {
    /// Map an element name to a kind. `None` means the element is not a
    /// supported primitive and is skipped by the transform.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "circle" => Some(Self::Circle),
            "rect" => Some(Self::Rect),
            "ellipse" => Some(Self::Ellipse),
            "line" => Some(Self::Line),
            "polygon" => Some(Self::Polygon),
            "polyline" => Some(Self::Polyline),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Polygon => "polygon",
            Self::Polyline => "polyline",
            Self::Path => "path",
        }
    }

    /// Closed shapes take a fill; lines and polylines do not.
    pub fn is_closed(&self) -> bool {
        !matches!(self, Self::Line | Self::Polyline)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trip() {
        for name in [
            "circle", "rect", "ellipse", "line", "polygon", "polyline", "path",
        ] {
            let kind = PrimitiveKind::from_name(name).unwrap();
            assert_eq!(kind.name(), name);
        }
    }

    #[test]
    fn unsupported_names() {
        assert_eq!(PrimitiveKind::from_name("g"), None);
        assert_eq!(PrimitiveKind::from_name("svg"), None);
        assert_eq!(PrimitiveKind::from_name("text"), None);
    }
}
