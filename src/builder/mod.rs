//! Target resolution and build graph emission.
//!
//! Resolvers turn the target model into per-target includes, toolchain and
//! link information; the plan combines them into steps, which are rendered
//! as a ninja file.

pub mod compile_commands;
pub mod flags;
pub mod includes;
pub mod link;
pub mod ninja;
pub mod plan;
pub mod resolver;
pub mod sources;
pub mod toolchain;

pub use flags::{resolve_toolchain, ResolvedToolchain};
pub use includes::{resolve_includes, IncludeSet};
pub use link::{resolve_link_info, LinkInfo};
pub use plan::{BuildPlan, BuildStep};
pub use resolver::{classify_requirements, find_target, Classified};
pub use sources::{FsSourceDiscovery, SourceDiscovery};
pub use toolchain::{for_frontend, GccToolchain, MsvcToolchain, Toolchain};
