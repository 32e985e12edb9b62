//! Document / element tree types.

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with ordered attributes and children.
///
/// Attribute order is preserved on round-trip; `set_attr` replaces in place
/// so rewriting a value does not reorder the attribute list.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Iterate attributes in document order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Iterate child elements (skipping text nodes).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }
}

/// A parsed vector document rooted at a single `<svg>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Count primitive descendants of the root.
    pub fn primitive_count(&self) -> usize {
        fn walk(el: &Element) -> usize {
            el.child_elements()
                .map(|child| {
                    if super::PrimitiveKind::from_name(child.name()).is_some() {
                        1
                    } else {
                        walk(child)
                    }
                })
                .sum()
        }
        walk(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_attr_replaces_in_place() {
        let mut el = Element::new("circle");
        el.set_attr("cx", "10");
        el.set_attr("cy", "20");
        el.set_attr("cx", "30");

        let attrs: Vec<_> = el.attrs().collect();
        assert_eq!(attrs, vec![("cx", "30"), ("cy", "20")]);
    }

    #[test]
    fn attr_lookup() {
        let mut el = Element::new("rect");
        el.set_attr("width", "5");
        assert_eq!(el.attr("width"), Some("5"));
        assert_eq!(el.attr("height"), None);
        assert!(el.has_attr("width"));
    }
}
