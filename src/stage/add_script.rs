//! src/stage/add_script.rs
//!
//! Fills in the script of script-less targets from the script resolver.

use crate::{
    context::{Diagnostic, InferenceContext},
    stage::{InferenceError, Proposals, Stage},
    tag::LanguageTag,
};
use std::collections::BTreeSet;

/// For each target without a script, adds `target → target+Script`.
///
/// The resolver is asked about the whole target (`ii_CN`), falling back to its
/// language. When it finds zero or several scripts the target is left alone and
/// a [`Diagnostic::ScriptAmbiguous`] is recorded.
pub struct AddScript;

impl Stage for AddScript {
    fn name(&self) -> &'static str {
        "add_script"
    }

    fn pass(&self, ctx: &mut InferenceContext) -> Result<Proposals, InferenceError> {
        let targets: BTreeSet<LanguageTag> = ctx
            .table
            .values()
            .filter(|v| !v.has_script() && !v.is_und())
            .filter(|v| !ctx.table.contains_key(*v))
            .cloned()
            .collect();

        let mut proposals = Proposals::new(self.name());
        for target in targets {
            match ctx.scripts.resolve(&target.to_string()) {
                Ok(script) => {
                    let scripted = target.with_script(&script);
                    proposals.offer(target, scripted);
                }
                Err(ambiguity) => ctx.record(Diagnostic::ScriptAmbiguous {
                    locale: ambiguity.locale,
                    scripts: ambiguity.scripts,
                }),
            }
        }
        Ok(proposals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alias::AliasTable,
        options::InferenceOptions,
        population::PopulationTable,
        script::{ExemplarScripts, ScriptResolver},
    };

    fn tag(s: &str) -> LanguageTag {
        s.parse().unwrap()
    }

    fn ctx(oracle: ExemplarScripts) -> InferenceContext {
        InferenceContext::new(
            ScriptResolver::new(oracle).with_suppress_scripts([("fr", "Latn")]),
            PopulationTable::new(),
            AliasTable::new(),
            InferenceOptions::default(),
        )
    }

    #[test]
    fn adds_script_for_bare_targets() {
        let mut ctx = ctx(ExemplarScripts::new().with("ii", "ꀀꀁꀂ"));
        ctx.insert(tag("fr"), tag("fr_FR"));
        ctx.insert(tag("ii"), tag("ii_CN"));
        ctx.insert(tag("zh_Hani"), tag("zh_Hans_CN"));

        let added = ctx.add_script().unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(ctx.get(&tag("fr_FR")), Some(&tag("fr_Latn_FR")));
        assert_eq!(ctx.get(&tag("ii_CN")), Some(&tag("ii_Yiii_CN")));
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn ambiguous_script_is_skipped_with_diagnostic() {
        let mut ctx = ctx(ExemplarScripts::new().with("xx", "aа"));
        ctx.insert(tag("xx"), tag("xx_AQ"));

        assert!(ctx.add_script().unwrap().is_empty());
        assert!(ctx.get(&tag("xx_AQ")).is_none());
        assert_eq!(
            ctx.diagnostics(),
            [Diagnostic::ScriptAmbiguous {
                locale: "xx".into(),
                scripts: vec!["Cyrl".into(), "Latn".into()],
            }]
        );
    }
}
