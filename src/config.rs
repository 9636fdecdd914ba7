//! Declarative binding profiles
//!
//! Profiles describe contexts, bindings, sensitivities, and range conversions
//! as data, so hosts can ship rebindable controls without touching code.
//! Loading layers sources in the following order:
//! 1. `config/default.toml` (base profile)
//! 2. `config/{profile}.toml` (profile-specific overrides)
//! 3. Environment variables with prefix `REMAP_`

use config::{Config, ConfigError, Environment, File};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Symbol;
use crate::context::Context;
use crate::mapper::Mapper;
use crate::range::RangeConverter;

/// Failure to load or deserialize a binding profile
///
/// Building a mapper from a loaded profile never fails; invalid entries such
/// as inverted converter domains are dropped the same way runtime
/// registrations reject them.
#[derive(Debug, Error)]
#[error("failed to load binding profile: {0}")]
pub struct ProfileError(#[from] ConfigError);

/// Binds a button code to an edge-triggered action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionBinding<A> {
    pub code: u32,
    pub action: A,
}

/// Binds a button code to a level-triggered state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateBinding<S> {
    pub code: u32,
    pub state: S,
}

/// Binds an axis code to a continuous range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeBinding<R> {
    pub code: u32,
    pub range: R,
}

/// Sensitivity factor applied to raw values for one range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivitySpec<R> {
    pub range: R,
    pub factor: f32,
}

/// Linear conversion from an input domain to an output domain for one range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterSpec<R> {
    pub range: R,
    pub input: [f32; 2],
    pub output: [f32; 2],
}

/// One named context's bindings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSpec<A, S, R> {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<ActionBinding<A>>,
    #[serde(default)]
    pub states: Vec<StateBinding<S>>,
    #[serde(default)]
    pub ranges: Vec<RangeBinding<R>>,
    #[serde(default)]
    pub sensitivities: Vec<SensitivitySpec<R>>,
    #[serde(default)]
    pub converters: Vec<ConverterSpec<R>>,
}

impl<A, S, R> ContextSpec<A, S, R>
where
    A: Symbol,
    S: Symbol,
    R: Symbol,
{
    /// Builds the context this spec describes
    pub fn build_context(&self) -> Context<A, S, R> {
        let mut context = Context::new();

        for binding in &self.actions {
            context.bind_action(binding.code, binding.action);
        }
        for binding in &self.states {
            context.bind_state(binding.code, binding.state);
        }
        for binding in &self.ranges {
            context.bind_range(binding.code, binding.range);
        }
        for spec in &self.sensitivities {
            context.set_sensitivity(spec.range, spec.factor);
        }

        let mut converter = RangeConverter::new();
        for spec in &self.converters {
            converter.register(spec.range, spec.input, spec.output);
        }
        context.set_converter(converter);

        context
    }
}

/// A complete mapper profile: contexts plus the initial active stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperProfile<A, S, R> {
    #[serde(default)]
    pub contexts: Vec<ContextSpec<A, S, R>>,
    /// Context names pushed at startup, first entry at the bottom of the stack
    #[serde(default)]
    pub active: Vec<String>,
}

impl<A, S, R> MapperProfile<A, S, R>
where
    A: Symbol,
    S: Symbol,
    R: Symbol,
{
    /// Builds a mapper with every context registered and the initial stack pushed
    pub fn build(&self) -> Mapper<A, S, R> {
        let mut mapper = Mapper::new();

        for spec in &self.contexts {
            mapper.register_context(spec.name.clone(), spec.build_context());
        }
        for name in &self.active {
            mapper.push_context(name);
        }

        mapper
    }
}

impl<A, S, R> MapperProfile<A, S, R>
where
    A: Symbol + DeserializeOwned + std::default::Default,
    S: Symbol + DeserializeOwned + std::default::Default,
    R: Symbol + DeserializeOwned + std::default::Default,
{
    /// Loads the profile with the given name
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. `config/default.toml` (base profile)
    /// 2. `config/{profile}.toml` (profile-specific overrides)
    /// 3. Environment variables with prefix `REMAP_`
    pub fn load(profile: &str) -> Result<Self, ProfileError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", profile)).required(false))
            .add_source(
                Environment::with_prefix("REMAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Loads the profile named by the `REMAP_PROFILE` environment variable,
    /// defaulting to "default" if not set
    pub fn load_from_env() -> Result<Self, ProfileError> {
        let profile = std::env::var("REMAP_PROFILE").unwrap_or_else(|_| "default".to_string());
        Self::load(&profile)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
    enum Action {
        #[default]
        Jump,
    }

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
    enum State {
        #[default]
        Run,
    }

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
    enum Range {
        #[default]
        LookX,
    }

    fn parse(toml: &str) -> MapperProfile<Action, State, Range> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .expect("test profile builds")
            .try_deserialize()
            .expect("test profile deserializes")
    }

    #[test]
    fn test_profile_builds_registered_mapper() {
        let profile = parse(
            r#"
            active = ["gameplay"]

            [[contexts]]
            name = "gameplay"

            [[contexts.actions]]
            code = 1
            action = "Jump"

            [[contexts.states]]
            code = 80
            state = "Run"

            [[contexts.ranges]]
            code = 0
            range = "LookX"

            [[contexts.sensitivities]]
            range = "LookX"
            factor = 2.0

            [[contexts.converters]]
            range = "LookX"
            input = [0.0, 100.0]
            output = [0.0, 1.0]
            "#,
        );

        let mut mapper = profile.build();
        assert_eq!(mapper.context_count(), 1);
        assert_eq!(mapper.active_count(), 1);

        mapper.handle_button(1, true, false);
        assert!(mapper.current().actions.contains(&Action::Jump));

        mapper.handle_axis(0, 25.0);
        assert_eq!(mapper.current().range(Range::LookX), Some(0.5));
    }

    #[test]
    fn test_inverted_converter_spec_is_dropped() {
        let profile = parse(
            r#"
            active = ["gameplay"]

            [[contexts]]
            name = "gameplay"

            [[contexts.ranges]]
            code = 0
            range = "LookX"

            [[contexts.converters]]
            range = "LookX"
            input = [100.0, 0.0]
            output = [0.0, 1.0]
            "#,
        );

        let mut mapper = profile.build();

        // The conversion was rejected, so raw values pass through unchanged
        mapper.handle_axis(0, 25.0);
        assert_eq!(mapper.current().range(Range::LookX), Some(25.0));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let profile = parse(
            r#"
            [[contexts]]
            name = "bare"
            "#,
        );

        let mapper = profile.build();
        assert_eq!(mapper.context_count(), 1);
        assert_eq!(mapper.active_count(), 0);
    }

    #[test]
    fn test_unknown_active_name_is_skipped() {
        let profile = parse(
            r#"
            active = ["missing"]

            [[contexts]]
            name = "gameplay"
            "#,
        );

        let mapper = profile.build();
        assert_eq!(mapper.active_count(), 0);
    }
}
