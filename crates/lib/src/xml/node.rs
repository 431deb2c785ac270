/// A parsed or fabricated document: one root element plus the comments
/// surrounding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
  /// Comments before the root element.
  pub prolog: Vec<String>,
  pub root: Element,
  /// Comments after the root element.
  pub epilog: Vec<String>,
}

impl Document {
  /// A document holding a single empty root element.
  pub fn with_root(name: impl Into<String>) -> Self {
    Self {
      prolog: Vec::new(),
      root: Element::new(name),
      epilog: Vec::new(),
    }
  }
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Element(Element),
  Text(String),
  Comment(String),
}

/// An element with ordered attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  pub name: String,
  attributes: Vec<(String, String)>,
  pub children: Vec<Node>,
}

impl Element {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      attributes: Vec::new(),
      children: Vec::new(),
    }
  }

  /// Builder-style attribute setter.
  pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.set_attr(name, value);
    self
  }

  /// Builder-style text setter.
  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.set_text(text);
    self
  }

  /// Attributes in document order.
  pub fn attributes(&self) -> &[(String, String)] {
    &self.attributes
  }

  pub fn attr(&self, name: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, v)| v.as_str())
  }

  pub fn has_attr(&self, name: &str) -> bool {
    self.attributes.iter().any(|(n, _)| n == name)
  }

  /// Set an attribute, replacing the value in place if it already exists.
  pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
    let name = name.into();
    let value = value.into();
    match self.attributes.iter_mut().find(|(n, _)| *n == name) {
      Some(slot) => slot.1 = value,
      None => self.attributes.push((name, value)),
    }
  }

  /// Set an attribute only if it is absent. Returns true if it was set.
  pub fn set_attr_if_absent(&mut self, name: &str, value: impl Into<String>) -> bool {
    if self.has_attr(name) {
      return false;
    }
    self.attributes.push((name.to_string(), value.into()));
    true
  }

  /// Child elements in document order.
  pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
    self.children.iter().filter_map(|n| match n {
      Node::Element(e) => Some(e),
      _ => None,
    })
  }

  /// Child elements with the given name.
  pub fn children_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
    self.child_elements().filter(move |e| e.name == name)
  }

  /// First child element with the given name.
  pub fn find_child(&self, name: &str) -> Option<&Element> {
    self.children_named(name).next()
  }

  /// First child element with the given name, mutably.
  pub fn find_child_mut(&mut self, name: &str) -> Option<&mut Element> {
    self.children.iter_mut().find_map(|n| match n {
      Node::Element(e) if e.name == name => Some(e),
      _ => None,
    })
  }

  pub fn has_child(&self, name: &str) -> bool {
    self.find_child(name).is_some()
  }

  /// Append a child element.
  pub fn append(&mut self, child: Element) {
    self.children.push(Node::Element(child));
  }

  /// Concatenated text content of the direct text children.
  pub fn text(&self) -> String {
    self
      .children
      .iter()
      .filter_map(|n| match n {
        Node::Text(t) => Some(t.as_str()),
        _ => None,
      })
      .collect()
  }

  /// Replace all children with a single text node.
  pub fn set_text(&mut self, text: impl Into<String>) {
    let text = text.into();
    self.children.clear();
    if !text.is_empty() {
      self.children.push(Node::Text(text));
    }
  }
}
