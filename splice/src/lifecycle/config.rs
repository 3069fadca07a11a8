//! Plugin configuration.

use splice_std::PatchOrder;

/// The host transform phase patches are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the host's own transformations touch the class.
    Before,
    /// On top of whatever the host's pipeline produced.
    After,
}

/// Configuration for a [`PatchPlugin`](super::PatchPlugin).
///
/// # Example
/// ```rust,ignore
/// let config = PluginConfig::new(true).order(PatchOrder::ById);
/// assert_eq!(config.phase(), Phase::Before);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginConfig {
    precedence: bool,
    order: PatchOrder,
}

impl PluginConfig {
    /// Create a config.
    ///
    /// With `precedence` set, patches run before the host's own
    /// transformations; otherwise they run after.
    pub fn new(precedence: bool) -> Self {
        Self {
            precedence,
            order: PatchOrder::default(),
        }
    }

    /// Set how patches on the same class are ordered.
    pub fn order(mut self, order: PatchOrder) -> Self {
        self.order = order;
        self
    }

    /// Whether patches take precedence over the host's transformations.
    pub fn precedence(&self) -> bool {
        self.precedence
    }

    /// The ordering policy.
    pub fn patch_order(&self) -> PatchOrder {
        self.order
    }

    /// The phase that runs the dispatcher.
    pub fn phase(&self) -> Phase {
        if self.precedence {
            Phase::Before
        } else {
            Phase::After
        }
    }
}
