//! DOM Node
//!
//! Nodes carry sibling/child links as plain ids; element data keeps
//! attributes in insertion order with the `id` and `class` values cached
//! for the common lookups.

use crate::NodeId;

/// DOM node: tree links plus node-specific data
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a detached element node
    pub fn element(tag: &str) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data: NodeData::Element(ElementData::new(tag)),
        }
    }

    /// Create a detached text node
    pub fn text(content: String) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data: NodeData::Text(content),
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
}

/// Attribute name/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, lowercase
    tag: String,
    /// Attributes in insertion order
    attrs: Vec<Attribute>,
    /// Cached id attribute
    id: Option<String>,
    /// Cached class list
    classes: Vec<String>,
    /// Inline style properties in insertion order
    styles: Vec<Attribute>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            classes: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// Tag name (always lowercase)
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Cached id attribute
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    // === Attributes ===

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check if an attribute is present (regardless of value)
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => {
                self.classes = value.split_whitespace().map(String::from).collect();
            }
            _ => {}
        }
        for attr in &mut self.attrs {
            if attr.name == name {
                attr.value = value.to_string();
                return;
            }
        }
        self.attrs.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, name: &str) {
        match name {
            "id" => self.id = None,
            "class" => self.classes.clear(),
            _ => {}
        }
        self.attrs.retain(|a| a.name != name);
    }

    /// Iterate attributes in insertion order
    pub fn attrs(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    // === Classes ===

    /// Check class list membership
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class (no-op if already present)
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
            self.sync_class_attr();
        }
    }

    /// Remove a class
    pub fn remove_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.classes.retain(|c| c != class);
            self.sync_class_attr();
        }
    }

    fn sync_class_attr(&mut self) {
        let joined = self.classes.join(" ");
        for attr in &mut self.attrs {
            if attr.name == "class" {
                attr.value = joined;
                return;
            }
        }
        self.attrs.push(Attribute {
            name: "class".to_string(),
            value: joined,
        });
    }

    // === Inline styles ===

    /// Get an inline style property
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|s| s.name == property)
            .map(|s| s.value.as_str())
    }

    /// Set an inline style property
    pub fn set_style(&mut self, property: &str, value: &str) {
        for style in &mut self.styles {
            if style.name == property {
                style.value = value.to_string();
                return;
            }
        }
        self.styles.push(Attribute {
            name: property.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove an inline style property
    pub fn remove_style(&mut self, property: &str) {
        self.styles.retain(|s| s.name != property);
    }
}
