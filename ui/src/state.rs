use nomina_business::{
    BusinessConfig, InMemoryStatementSource, RestStatementSource, StatementSource,
    StatementSourceState, register,
};
use nomina_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

/// Runs on the built-in demo data.
impl Default for State {
    fn default() -> Self {
        Self::with_source(BusinessConfig::default(), InMemoryStatementSource::demo())
    }
}

impl State {
    /// Talk to the configured database, or fall back to demo data without one.
    pub fn new(config: Option<BusinessConfig>) -> Self {
        match config {
            Some(config) => {
                let source = RestStatementSource::new(&config);
                Self::with_source(config, source)
            }
            None => Self::default(),
        }
    }

    pub fn test(base_url: String) -> Self {
        Self::new(Some(BusinessConfig::new(base_url)))
    }

    pub fn with_source(config: BusinessConfig, source: impl StatementSource + 'static) -> Self {
        let mut ctx = StateCtx::new();
        register(&mut ctx, config, StatementSourceState::new(source));
        Self { ctx }
    }
}
