use derive_builder::Builder;
use fairflip_core::secret::OverlongPolicy;

/// Coin-flip configuration.
#[derive(Debug, Default, Clone, Builder)]
pub struct CointossConfig {
    /// How secrets longer than the combination width are handled.
    #[builder(default)]
    overlong: OverlongPolicy,
}

impl CointossConfigBuilder {
    /// Truncates overlong secrets instead of rejecting them.
    pub fn truncate(&mut self) -> &mut Self {
        self.overlong = Some(OverlongPolicy::Truncate);
        self
    }
}

impl CointossConfig {
    /// Creates a new builder for CointossConfig.
    pub fn builder() -> CointossConfigBuilder {
        CointossConfigBuilder::default()
    }

    /// How secrets longer than the combination width are handled.
    pub fn overlong(&self) -> OverlongPolicy {
        self.overlong
    }
}
