// Guide document assembly: outline the .docx as blocks, then render them with docx-rs.
// Rendering is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod handlers;
pub mod layout;
pub mod logo;
pub mod render;

pub use layout::{attachment_filename, layout_guide, DocxRequest, GuideBlock};
pub use logo::load_logo;
pub use render::{render_docx, DOCX_MEDIA_TYPE};
