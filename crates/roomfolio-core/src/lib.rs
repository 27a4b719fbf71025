//! Roomfolio Core - Presentation logic for the 3D portfolio
//!
//! This crate holds everything the frontend and server agree on, with no
//! rendering or network dependencies:
//! - The welcome/loading/portfolio step machine and loading simulation
//! - The work history table and carousel navigation
//! - Monitor hit-testing and guide arrow placement
//! - Device performance tiers, theme parameters and orbit camera math
//! - The GLB asset source chain and blob config format

pub mod asset;
pub mod experience;
pub mod interaction;
pub mod orbit;
pub mod quality;
pub mod theme;
pub mod wizard;

pub use asset::{AssetError, AssetSources, BlobConfig, BuildMode};
pub use experience::{work_history, Carousel, ExperienceLink, LinkKind, WorkExperience};
pub use interaction::{
    is_monitor_mesh, nearest_hit_is_monitor, primitive_key, ArrowPose, HoverChange, HoverState, RayHit,
};
pub use orbit::OrbitState;
pub use quality::{DeviceProfile, QualityTier, RenderQuality};
pub use theme::Theme;
pub use wizard::{LoadingDots, LoadingSimulation, Step};
