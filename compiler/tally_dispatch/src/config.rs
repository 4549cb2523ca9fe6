//! Walk configuration.

/// Limits applied to a single walk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WalkConfig {
    /// Maximum nesting depth, or `None` for unlimited.
    pub max_depth: Option<usize>,
}

impl WalkConfig {
    /// No depth limit.
    pub const UNLIMITED: WalkConfig = WalkConfig { max_depth: None };

    /// Stop with `WalkError::DepthLimit` beyond `depth` nested nodes.
    pub const fn with_max_depth(depth: usize) -> Self {
        WalkConfig {
            max_depth: Some(depth),
        }
    }
}

impl Default for WalkConfig {
    /// Unlimited on native targets (the stack grows on demand); 200 on WASM,
    /// which cannot grow its stack.
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::with_max_depth(200)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::UNLIMITED
        }
    }
}
