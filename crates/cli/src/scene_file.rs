//! JSON scene files.
//!
//! A scene is a list of layers; each layer holds items front to back. An item
//! is either a shape with optional `[left, top, right, bottom]` bounds or a
//! group with children. `mask` marks the clipping mask of a clip group, and
//! a group with `clipped: true` but no marked child uses its first child.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clump_core::geometry::BBox;
use clump_core::scene::{Document, NodeId, NodeKind, SceneGraph};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub layers: Vec<LayerFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerFile {
    pub name: String,
    #[serde(default)]
    pub items: Vec<NodeFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeFile {
    Group {
        name: String,
        #[serde(default)]
        clipped: bool,
        children: Vec<NodeFile>,
        #[serde(default, skip_serializing_if = "is_false")]
        mask: bool,
    },
    Shape {
        name: String,
        #[serde(default)]
        bounds: Option<[f64; 4]>,
        #[serde(default, skip_serializing_if = "is_false")]
        mask: bool,
    },
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl NodeFile {
    fn is_mask(&self) -> bool {
        match self {
            Self::Group { mask, .. } | Self::Shape { mask, .. } => *mask,
        }
    }
}

impl SceneFile {
    pub fn read(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("{} is not a valid scene file", path.display()))
    }

    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self).context("failed to serialize scene")?;
        writeln!(writer)?;
        Ok(())
    }

    /// Builds an in-memory document with the same layers and items.
    pub fn to_document(&self) -> Result<Document> {
        let mut doc = Document::new();
        for layer in &self.layers {
            let id = doc.add_layer(&layer.name);
            for item in &layer.items {
                add_node(&mut doc, id, item)?;
            }
        }
        Ok(doc)
    }

    pub fn from_document(doc: &Document) -> Self {
        let layers = doc
            .layers()
            .iter()
            .map(|&layer| LayerFile {
                name: doc.name(layer).unwrap_or_default().to_string(),
                items: doc
                    .children(layer)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|child| node_file(doc, child))
                    .collect(),
            })
            .collect();
        Self { layers }
    }
}

fn add_node(doc: &mut Document, parent: NodeId, node: &NodeFile) -> Result<NodeId> {
    let id = match node {
        NodeFile::Shape { name, bounds, .. } => {
            let bounds =
                (*bounds).map(|[left, top, right, bottom]| BBox::new(left, top, right, bottom));
            doc.add_shape(parent, name, bounds)
        }
        NodeFile::Group {
            name,
            clipped,
            children,
            ..
        } => {
            let group = doc.add_container(parent, name);
            let mut ids = Vec::with_capacity(children.len());
            for child in children {
                ids.push(add_node(doc, group, child)?);
            }
            let has_mask = children.iter().any(NodeFile::is_mask);
            if *clipped && !has_mask {
                if let Some(&first) = ids.first() {
                    doc.set_clipping(first, true)?;
                }
            }
            group
        }
    };
    if node.is_mask() {
        doc.set_clipping(id, true)?;
    }
    Ok(id)
}

fn node_file(doc: &Document, id: NodeId) -> NodeFile {
    let name = doc.name(id).unwrap_or_default().to_string();
    let mask = doc.is_clipping(id).unwrap_or(false);
    match doc.kind(id) {
        Some(NodeKind::Shape { bounds }) => NodeFile::Shape {
            name,
            bounds: (*bounds).map(|b| [b.left, b.top, b.right, b.bottom]),
            mask,
        },
        _ => {
            let children = doc.children(id).unwrap_or_default();
            let clipped = children
                .iter()
                .any(|&c| doc.is_clipping(c).unwrap_or(false));
            NodeFile::Group {
                name,
                clipped,
                children: children.into_iter().map(|c| node_file(doc, c)).collect(),
                mask,
            }
        }
    }
}
