//! Encapsulated render trees produced by element behaviors.
//!
//! A [`ShadowTree`] is the output of one pure render pass: a scoped style sheet plus a node tree.
//! Hosts replace the whole tree on every observed attribute change; nodes are addressed by
//! [`NodePath`] for queries and click routing.

#[derive(Debug, Clone, PartialEq, Eq)]
/// One element node inside a render tree.
pub struct Node {
    tag: &'static str,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Node>,
    click_handler: Option<&'static str>,
}

impl Node {
    /// Creates an empty node with the given tag.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            click_handler: None,
        }
    }

    /// Creates a content projection placeholder; `None` is the default region.
    pub fn slot(name: Option<&str>) -> Self {
        let node = Self::new("slot");
        match name {
            Some(name) => node.attr("name", name),
            None => node,
        }
    }

    /// Appends class tokens; whitespace separates tokens and empty input adds nothing.
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        self.classes
            .extend(class.as_ref().split_whitespace().map(str::to_string));
        self
    }

    /// Appends an attribute. Use an empty value for presence attributes.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends an attribute only when `present` is `true`.
    pub fn flag(self, name: impl Into<String>, present: bool) -> Self {
        if present {
            self.attr(name, "")
        } else {
            self
        }
    }

    /// Sets the node's own text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child node.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Routes clicks on this node (or bubbling through it) to the behavior handler `key`.
    pub fn on_click(mut self, key: &'static str) -> Self {
        self.click_handler = Some(key);
        self
    }

    /// Tag name.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Class tokens in render order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Class membership check.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| candidate == class)
    }

    /// Returns an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.as_str())
    }

    /// Presence check for an attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Child nodes.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Click handler key, if the node handles clicks.
    pub fn click_handler(&self) -> Option<&'static str> {
        self.click_handler
    }

    /// Concatenated text of this node and its descendants.
    ///
    /// Slots contribute nothing; projected content stays in the host's light tree.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    fn matches(&self, selector: &Selector<'_>) -> bool {
        selector.tag.map_or(true, |tag| tag == self.tag)
            && selector.classes.iter().all(|class| self.has_class(class))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&self.classes.join(" "))));
        }
        for (name, value) in &self.attributes {
            if value.is_empty() {
                out.push(' ');
                out.push_str(name);
            } else {
                out.push_str(&format!(" {name}=\"{}\"", escape(value)));
            }
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str(&format!("</{}>", self.tag));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Child-index path from the tree root to a node. The empty path is the root.
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the tree root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of this node's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut steps = self.0.clone();
        steps.push(index);
        Self(steps)
    }

    /// Path of the parent node, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// This path followed by every ancestor up to the root (event bubbling order).
    pub fn ancestors_inclusive(&self) -> Vec<Self> {
        let mut out = vec![self.clone()];
        let mut cursor = self.parent();
        while let Some(path) = cursor {
            cursor = path.parent();
            out.push(path);
        }
        out
    }

    /// Depth below the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

struct Selector<'a> {
    tag: Option<&'a str>,
    classes: Vec<&'a str>,
}

impl<'a> Selector<'a> {
    fn parse(selector: &'a str) -> Self {
        let mut parts = selector.trim().split('.');
        let tag = parts.next().filter(|tag| !tag.is_empty());
        Self {
            tag,
            classes: parts.filter(|class| !class.is_empty()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A scoped style sheet plus the rendered node tree.
pub struct ShadowTree {
    style: String,
    root: Node,
}

impl ShadowTree {
    /// Creates a tree from its style sheet text and root node.
    pub fn new(style: impl Into<String>, root: Node) -> Self {
        Self {
            style: style.into(),
            root,
        }
    }

    /// Style sheet text scoped to this tree.
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Resolves a path to its node.
    pub fn node(&self, path: &NodePath) -> Option<&Node> {
        path.0
            .iter()
            .try_fold(&self.root, |node, index| node.children.get(*index))
    }

    /// First node (pre-order) matching a `tag`, `.class`, or `tag.class` selector.
    pub fn query(&self, selector: &str) -> Option<NodePath> {
        self.query_all(selector).into_iter().next()
    }

    /// All nodes matching the selector, in pre-order.
    pub fn query_all(&self, selector: &str) -> Vec<NodePath> {
        let selector = Selector::parse(selector);
        let mut out = Vec::new();
        collect_matches(&self.root, NodePath::root(), &selector, &mut out);
        out
    }

    /// First node matching the selector.
    pub fn select(&self, selector: &str) -> Option<&Node> {
        self.query(selector).and_then(|path| self.node(&path))
    }

    /// Names of the content projection regions, in document order; `None` is the default region.
    pub fn slot_names(&self) -> Vec<Option<String>> {
        self.query_all("slot")
            .iter()
            .filter_map(|path| self.node(path))
            .map(|slot| slot.attribute("name").map(str::to_string))
            .collect()
    }

    /// Serializes the tree as markup, style sheet first.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("<style>{}</style>", self.style));
        self.root.write_html(&mut out);
        out
    }
}

fn collect_matches(node: &Node, path: NodePath, selector: &Selector<'_>, out: &mut Vec<NodePath>) {
    if node.matches(selector) {
        out.push(path.clone());
    }
    for (index, child) in node.children.iter().enumerate() {
        collect_matches(child, path.child(index), selector, out);
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
