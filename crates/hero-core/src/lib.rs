pub mod animator;
pub mod constants;
pub mod ease;
pub mod geometry;
pub mod hero;
pub mod intro;
pub mod layout;
pub mod scene;
pub mod scheduler;
pub mod settings;
pub mod state;
pub mod timeline;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use animator::*;
pub use constants::*;
pub use ease::*;
pub use geometry::*;
pub use hero::*;
pub use intro::*;
pub use layout::*;
pub use scene::*;
pub use scheduler::*;
pub use settings::*;
pub use state::*;
pub use timeline::*;
