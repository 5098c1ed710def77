use rustc_hash::FxHashSet;

use crate::error::SceneError;
use crate::geometry::BBox;

use super::{Placement, SceneGraph};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A drawable leaf. `None` bounds model a shape the host can't measure.
    Shape { bounds: Option<BBox> },
    Container,
}

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    clipping: bool,
}

/// Arena-backed scene graph.
///
/// Node 0 is the document root. Layers are containers directly under the
/// root; shapes and groups live inside layers. Nodes are never freed, so a
/// [`NodeId`] stays valid for the lifetime of the document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    rejected_mutations: FxHashSet<NodeId>,
    rejected_reads: FxHashSet<NodeId>,
    send_to_back_calls: usize,
    move_calls: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let root = NodeData {
            name: "document".to_string(),
            kind: NodeKind::Container,
            parent: None,
            children: Vec::new(),
            clipping: false,
        };
        Self {
            nodes: vec![root],
            rejected_mutations: FxHashSet::default(),
            rejected_reads: FxHashSet::default(),
            send_to_back_calls: 0,
            move_calls: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn layers(&self) -> &[NodeId] {
        &self.nodes[0].children
    }

    /// Appends a layer behind the existing ones.
    pub fn add_layer(&mut self, name: &str) -> NodeId {
        self.push_node(self.root(), name, NodeKind::Container)
    }

    /// Appends a shape at the back of `parent`.
    pub fn add_shape(&mut self, parent: NodeId, name: &str, bounds: Option<BBox>) -> NodeId {
        self.push_node(parent, name, NodeKind::Shape { bounds })
    }

    /// Appends an empty container at the back of `parent`.
    pub fn add_container(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.push_node(parent, name, NodeKind::Container)
    }

    fn push_node(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            name: name.to_string(),
            kind,
            parent: Some(parent),
            children: Vec::new(),
            clipping: false,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|n| n.name.as_str())
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    pub fn is_container(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Container))
    }

    /// First node with the given name, in creation order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Children names of a container, front to back. Empty for shapes.
    pub fn child_names(&self, container: NodeId) -> Vec<&str> {
        self.nodes
            .get(container.0)
            .map(|n| {
                n.children
                    .iter()
                    .map(|c| self.nodes[c.0].name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Makes every structural call on `node` fail with [`SceneError::Rejected`].
    pub fn reject_mutations(&mut self, node: NodeId) {
        self.rejected_mutations.insert(node);
    }

    /// Makes geometry and stacking reads on `node` fail.
    pub fn reject_reads(&mut self, node: NodeId) {
        self.rejected_reads.insert(node);
    }

    /// Number of successful send-to-back calls so far.
    pub fn send_to_back_calls(&self) -> usize {
        self.send_to_back_calls
    }

    /// Number of successful move calls so far (send-to-back excluded).
    pub fn move_calls(&self) -> usize {
        self.move_calls
    }

    fn data(&self, id: NodeId) -> Result<&NodeData, SceneError> {
        self.nodes.get(id.0).ok_or(SceneError::StaleNode(id.0))
    }

    fn check_mutable(&self, id: NodeId) -> Result<(), SceneError> {
        self.data(id)?;
        if self.rejected_mutations.contains(&id) {
            return Err(SceneError::Rejected {
                node: id.0,
                reason: "node is locked".to_string(),
            });
        }
        Ok(())
    }

    fn check_readable(&self, id: NodeId) -> Result<&NodeData, SceneError> {
        let data = self.data(id)?;
        if self.rejected_reads.contains(&id) {
            return Err(SceneError::Unreadable(id.0));
        }
        Ok(data)
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes[node.0].parent {
                Some(p) => node = p,
                None => return false,
            }
        }
    }

    /// Resolves a placement to `(parent, index)` assuming `moving` has already
    /// been detached.
    fn resolve(
        &self,
        at: Placement<NodeId>,
        moving: Option<NodeId>,
    ) -> Result<(NodeId, usize), SceneError> {
        let (parent, index) = match at {
            Placement::AtBeginning(c) | Placement::AtEnd(c) => {
                if !self.is_container(c) {
                    self.data(c)?;
                    return Err(SceneError::NotAContainer(c.0));
                }
                let index = match at {
                    Placement::AtBeginning(_) => 0,
                    _ => self.nodes[c.0].children.len(),
                };
                (c, index)
            }
            Placement::Before(s) | Placement::After(s) => {
                let parent = self.data(s)?.parent.ok_or(SceneError::NoParent(s.0))?;
                if moving == Some(s) {
                    return Err(SceneError::InvalidPlacement(format!(
                        "node {} placed relative to itself",
                        s.0
                    )));
                }
                let pos = self.sibling_position(parent, s)?;
                let index = match at {
                    Placement::Before(_) => pos,
                    _ => pos + 1,
                };
                (parent, index)
            }
        };
        if let Some(m) = moving {
            if self.is_ancestor_or_self(m, parent) {
                return Err(SceneError::InvalidPlacement(format!(
                    "node {} cannot move inside itself",
                    m.0
                )));
            }
        }
        Ok((parent, index))
    }

    fn sibling_position(&self, parent: NodeId, node: NodeId) -> Result<usize, SceneError> {
        self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == node)
            .ok_or(SceneError::NoParent(node.0))
    }

    fn detach(&mut self, node: NodeId) -> Result<(), SceneError> {
        let parent = self.data(node)?.parent.ok_or(SceneError::NoParent(node.0))?;
        let pos = self.sibling_position(parent, node)?;
        self.nodes[parent.0].children.remove(pos);
        self.nodes[node.0].parent = None;
        Ok(())
    }

    fn attach(&mut self, node: NodeId, parent: NodeId, index: usize) {
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, node);
        self.nodes[node.0].parent = Some(parent);
    }
}

impl SceneGraph for Document {
    type Node = NodeId;

    fn bounds(&self, node: NodeId) -> Result<BBox, SceneError> {
        let data = self.check_readable(node)?;
        match &data.kind {
            NodeKind::Shape { bounds } => (*bounds).ok_or(SceneError::Unreadable(node.0)),
            NodeKind::Container => {
                // A clip group is as large as its mask.
                if let Some(&mask) = data.children.iter().find(|c| self.nodes[c.0].clipping) {
                    return self.bounds(mask);
                }
                data.children
                    .iter()
                    .filter_map(|&c| self.bounds(c).ok())
                    .reduce(|a, b| a.union(&b))
                    .ok_or(SceneError::EmptyBounds(node.0))
            }
        }
    }

    fn stacking_index(&self, node: NodeId) -> Result<usize, SceneError> {
        let data = self.check_readable(node)?;
        let parent = data.parent.ok_or(SceneError::NoParent(node.0))?;
        self.sibling_position(parent, node)
    }

    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.data(node)?.parent)
    }

    fn children(&self, container: NodeId) -> Result<Vec<NodeId>, SceneError> {
        let data = self.data(container)?;
        match data.kind {
            NodeKind::Container => Ok(data.children.clone()),
            NodeKind::Shape { .. } => Err(SceneError::NotAContainer(container.0)),
        }
    }

    fn create_container(&mut self, at: Placement<NodeId>) -> Result<NodeId, SceneError> {
        let (parent, index) = self.resolve(at, None)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            name: format!("group{}", id.0),
            kind: NodeKind::Container,
            parent: None,
            children: Vec::new(),
            clipping: false,
        });
        self.attach(id, parent, index);
        Ok(id)
    }

    fn move_to(&mut self, node: NodeId, at: Placement<NodeId>) -> Result<(), SceneError> {
        self.check_mutable(node)?;
        if node == self.root() {
            return Err(SceneError::InvalidPlacement("the root cannot move".to_string()));
        }
        // Validate against the tree before detaching so a bad placement leaves
        // the node where it was.
        self.resolve(at, Some(node))?;
        let old_parent = self.data(node)?.parent.ok_or(SceneError::NoParent(node.0))?;
        let old_pos = self.sibling_position(old_parent, node)?;
        self.detach(node)?;
        match self.resolve(at, Some(node)) {
            Ok((parent, index)) => {
                self.attach(node, parent, index);
                self.move_calls += 1;
                Ok(())
            }
            Err(e) => {
                self.attach(node, old_parent, old_pos);
                Err(e)
            }
        }
    }

    fn send_to_back(&mut self, node: NodeId) -> Result<(), SceneError> {
        self.check_mutable(node)?;
        let parent = self.data(node)?.parent.ok_or(SceneError::NoParent(node.0))?;
        let pos = self.sibling_position(parent, node)?;
        let children = &mut self.nodes[parent.0].children;
        let moved = children.remove(pos);
        children.push(moved);
        self.send_to_back_calls += 1;
        Ok(())
    }

    fn set_clipping(&mut self, node: NodeId, clipping: bool) -> Result<(), SceneError> {
        self.check_mutable(node)?;
        self.nodes[node.0].clipping = clipping;
        Ok(())
    }

    fn is_clipping(&self, node: NodeId) -> Result<bool, SceneError> {
        Ok(self.data(node)?.clipping)
    }
}
