pub mod alias;
pub mod consistency;
pub mod context;
pub mod data;
pub mod likely;
pub mod minimize;
pub mod options;
pub mod pipeline;
pub mod population;
pub mod script;
pub mod stage;
pub mod tag;

pub use alias::{AliasKind, AliasTable};
pub use context::{Changes, Diagnostic, InferenceContext};
pub use likely::{LikelySubtags, LikelySubtagsBuilder, Report};
pub use minimize::{MinimalSubtags, Minimizer};
pub use options::InferenceOptions;
pub use pipeline::Pipeline;
pub use population::{OfficialStatus, PopulationOracle, PopulationRecord, PopulationTable};
pub use script::{ExemplarScripts, ScriptOracle, ScriptResolver};
pub use stage::add_countries::AddCountries;
pub use stage::add_deprecated::AddDeprecated;
pub use stage::add_language_country::AddLanguageCountry;
pub use stage::add_language_script::AddLanguageScript;
pub use stage::add_script::AddScript;
pub use stage::close_mapping::CloseMapping;
pub use stage::close_und::CloseUnd;
pub use stage::{InferenceError, Stage};
pub use tag::{LanguageTag, TagError};
