/// Log targets, so `RUST_LOG` can pick out one part of the engine.
pub mod targets {
    pub const CONVERSION: &str = "conversion";
    pub const PROPAGATION: &str = "propagation";
    pub const BRANCH: &str = "branch";
    pub const ENTAIL: &str = "entail";
    pub const STRATEGY: &str = "strategy";
}
