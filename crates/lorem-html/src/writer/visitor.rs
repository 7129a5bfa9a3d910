//! The traversal is shared by the HTML writer and the plain-text collector,
//! so each only implements the per-variant callbacks it cares about.

use crate::ast::{HtmlElement, Node};
use ecow::EcoString;

/// Trait implemented by consumers of the document tree.
pub trait NodeHandler {
    /// Error type produced during traversal.
    type Error;

    /// Dispatch a single node. Most implementers will not override this and
    /// will instead implement the per-variant methods below.
    fn visit_node(&mut self, node: &Node) -> Result<(), Self::Error> {
        walk_node(self, node)
    }

    /// Visit a sequence of nodes.
    fn visit_nodes(&mut self, nodes: &[Node]) -> Result<(), Self::Error> {
        for node in nodes {
            self.visit_node(node)?;
        }
        Ok(())
    }

    /// Called for every element. Descends into the children by default.
    fn element(&mut self, element: &HtmlElement) -> Result<(), Self::Error> {
        self.visit_nodes(&element.children)
    }

    /// Called for every text leaf.
    fn text(&mut self, _text: &EcoString) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Dispatch a single node to the provided handler.
pub fn walk_node<H: NodeHandler + ?Sized>(handler: &mut H, node: &Node) -> Result<(), H::Error> {
    match node {
        Node::Element(element) => handler.element(element),
        Node::Text(text) => handler.text(text),
    }
}
