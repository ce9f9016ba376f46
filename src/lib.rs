pub mod backend;
pub mod byte_stream;
pub mod camera;
pub mod config;
pub mod error;
pub mod gl_backend;
pub mod gltf_importer;
pub mod image_loader;
pub mod importer;
pub mod lights;
pub mod mesh;
pub mod mesh_data;
pub mod mesh_renderer;
pub mod model;
pub mod obj_importer;
pub mod scene_graph;
pub mod scene_state;
pub mod texture_cache;
pub mod ui;
pub mod viewer;
#[cfg(test)]
pub(crate) mod test_support;
