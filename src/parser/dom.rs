use scraper::ElementRef;

/// The slice of DOM behaviour the record extractor relies on.
///
/// Only element nodes are exposed; text nodes surface through `text_content`.
pub trait DomNode: Clone {
    /// Lower-case local name, e.g. `"div"`.
    fn tag_name(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
    fn parent_element(&self) -> Option<Self>;
    fn child_elements(&self) -> Vec<Self>;
    /// Concatenated text of all descendant text nodes, untrimmed.
    fn text_content(&self) -> String;
}

impl<'a> DomNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn child_elements(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }
}

/// Pre-order walk over the descendants of `root` (excluding `root`),
/// returning the first element with the given tag.
pub fn first_descendant<N: DomNode>(root: &N, tag: &str) -> Option<N> {
    for child in root.child_elements() {
        if child.tag_name() == tag {
            return Some(child);
        }
        if let Some(found) = first_descendant(&child, tag) {
            return Some(found);
        }
    }
    None
}

/// Every descendant of `root` with the given tag, in document order.
pub fn descendants_by_tag<N: DomNode>(root: &N, tag: &str) -> Vec<N> {
    let mut out = Vec::new();
    collect_by_tag(root, tag, &mut out);
    out
}

fn collect_by_tag<N: DomNode>(node: &N, tag: &str, out: &mut Vec<N>) {
    for child in node.child_elements() {
        if child.tag_name() == tag {
            out.push(child.clone());
        }
        collect_by_tag(&child, tag, out);
    }
}

/// Nearest proper ancestor of `node` with the given tag.
pub fn closest_ancestor<N: DomNode>(node: &N, tag: &str) -> Option<N> {
    let mut current = node.parent_element();
    while let Some(el) = current {
        if el.tag_name() == tag {
            return Some(el);
        }
        current = el.parent_element();
    }
    None
}
