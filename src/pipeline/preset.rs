use crate::{
    pipeline::Pipeline,
    stage::{
        add_countries::AddCountries, add_deprecated::AddDeprecated,
        add_language_country::AddLanguageCountry, add_language_script::AddLanguageScript,
        add_script::AddScript, close_mapping::CloseMapping, close_und::CloseUnd,
    },
};

/// The full likely-subtags derivation.
pub fn standard() -> Pipeline {
    Pipeline::builder("standard")
        .add_stage(AddCountries)
        .add_stage(CloseMapping)
        .add_stage(AddScript)
        .add_stage(CloseMapping)
        .add_stage(AddLanguageScript)
        .add_stage(AddLanguageCountry)
        .add_stage(CloseMapping)
        .add_stage(CloseUnd)
        .add_stage(AddDeprecated)
        .add_stage(CloseMapping)
        .build()
}

/// Closure only. For tables that are already complete apart from chains.
pub fn closure_only() -> Pipeline {
    Pipeline::builder("closure_only")
        .add_stage(CloseMapping)
        .build()
}

/// Everything except population-weighted defaults and deprecated aliases.
pub fn structural() -> Pipeline {
    Pipeline::builder("structural")
        .add_stage(CloseMapping)
        .add_stage(AddScript)
        .add_stage(CloseMapping)
        .add_stage(AddLanguageScript)
        .add_stage(AddLanguageCountry)
        .add_stage(CloseMapping)
        .add_stage(CloseUnd)
        .build()
}
