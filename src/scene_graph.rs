//! In-memory scene produced by the importers.
//!
//! Nodes live in one arena and refer to each other by index. Parents are
//! back-references only; the arena owns every node.

use crate::{error::ImportError, mesh_data::TextureKind};


pub type NodeId = usize;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneNode {
	pub name: String,
	pub parent: Option<NodeId>,
	pub children: Vec<NodeId>,
	/// Indices into [`SceneGraph::meshes`]
	pub meshes: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Face {
	pub indices: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMesh {
	pub name: String,
	pub positions: Vec<[f32; 3]>,
	pub normals: Option<Vec<[f32; 3]>>,
	/// One entry per UV channel, each as long as `positions`
	pub tex_coords: Vec<Vec<[f32; 2]>>,
	pub faces: Vec<Face>,
	pub material: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMaterial {
	pub name: String,
	pub textures: Vec<(TextureKind, String)>,
}

impl SourceMaterial {
	pub fn new(name: impl Into<String>) -> Self {
		SourceMaterial { name: name.into(), textures: Vec::new() }
	}

	pub fn add_texture(&mut self, kind: TextureKind, path: impl Into<String>) {
		self.textures.push((kind, path.into()));
	}

	pub fn texture_paths(&self, kind: TextureKind) -> impl Iterator<Item = &str> {
		self.textures.iter()
			.filter(move |(k, _)| *k == kind)
			.map(|(_, path)| path.as_str())
	}
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
	pub nodes: Vec<SceneNode>,
	pub root: Option<NodeId>,
	pub meshes: Vec<SourceMesh>,
	pub materials: Vec<SourceMaterial>,
	pub incomplete: bool,
}

impl SceneGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a node. Without a parent the node becomes the root if none is set yet.
	pub fn add_node(&mut self, parent: Option<NodeId>, name: impl Into<String>) -> NodeId {
		let id = self.nodes.len();
		self.nodes.push(SceneNode {
			name: name.into(),
			parent,
			..Default::default()
		});
		match parent {
			Some(parent) => self.nodes[parent].children.push(id),
			None if self.root.is_none() => self.root = Some(id),
			None => {},
		}
		id
	}

	/// Depth-first pre-order from the root, children in declaration order.
	pub fn pre_order(&self) -> Vec<NodeId> {
		let mut order = Vec::with_capacity(self.nodes.len());
		let Some(root) = self.root else {
			return order;
		};
		let mut visited = vec![false; self.nodes.len()];
		let mut stack = vec![root];
		while let Some(id) = stack.pop() {
			// malformed graphs may repeat or point outside the arena
			let Some(node) = self.nodes.get(id) else {
				continue;
			};
			if std::mem::replace(&mut visited[id], true) {
				continue;
			}
			order.push(id);
			stack.extend(node.children.iter().rev());
		}
		order
	}

	pub fn validate(&self, path: &str) -> Result<NodeId, ImportError> {
		if self.incomplete {
			return Err(ImportError::Incomplete(path.to_string()));
		}
		match self.root {
			Some(root) if root < self.nodes.len() => Ok(root),
			_ => Err(ImportError::NoRootNode(path.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pre_order_visits_parent_before_children() {
		let mut scene = SceneGraph::new();
		let root = scene.add_node(None, "root");
		let a = scene.add_node(Some(root), "a");
		let b = scene.add_node(Some(root), "b");
		let a1 = scene.add_node(Some(a), "a1");
		let a2 = scene.add_node(Some(a), "a2");
		let b1 = scene.add_node(Some(b), "b1");

		assert_eq!(scene.pre_order(), vec![root, a, a1, a2, b, b1]);
		assert_eq!(scene.nodes[a2].parent, Some(a));
	}

	#[test]
	fn deep_chain_does_not_overflow() {
		let mut scene = SceneGraph::new();
		let mut parent = scene.add_node(None, "root");
		for i in 0..100_000 {
			parent = scene.add_node(Some(parent), format!("n{}", i));
		}
		let order = scene.pre_order();
		assert_eq!(order.len(), 100_001);
		assert_eq!(order.last(), Some(&parent));
	}

	#[test]
	fn validate_reports_incomplete_and_missing_root() {
		let scene = SceneGraph::new();
		assert!(matches!(scene.validate("a.obj"), Err(ImportError::NoRootNode(_))));

		let mut scene = SceneGraph::new();
		scene.add_node(None, "root");
		assert_eq!(scene.validate("a.obj").unwrap(), 0);
		scene.incomplete = true;
		assert!(matches!(scene.validate("a.obj"), Err(ImportError::Incomplete(_))));
	}

	#[test]
	fn material_texture_paths_by_kind() {
		let mut material = SourceMaterial::new("brick");
		material.add_texture(TextureKind::Diffuse, "a.png");
		material.add_texture(TextureKind::Specular, "b.png");
		material.add_texture(TextureKind::Diffuse, "c.png");
		let diffuse: Vec<&str> = material.texture_paths(TextureKind::Diffuse).collect();
		assert_eq!(diffuse, vec!["a.png", "c.png"]);
	}
}
