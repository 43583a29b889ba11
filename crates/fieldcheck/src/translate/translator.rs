use std::collections::HashMap;
use std::path::Path;

use fieldcheck_syntax::ParamSpec;
use icu_locale_core::LanguageIdentifier;
use tracing::{debug, warn};

use super::defaults::base_templates;
use super::transforms::{ParamFn, ParamTransforms};
use super::{
    CatalogError, CatalogWarning, DisplayNames, LoadError, parse_entries, read_catalog,
    string_source,
};
use crate::engine::{RuleRegistry, compute_suggestions};
use crate::parser::MessageTemplate;
use crate::types::{Value, Violation, Violations};

/// Which tier a template came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Built-in template for the locale's language.
    Base,
    /// Added through [`TranslatorBuilder::add`] or a catalog file.
    Catalog,
    /// Registered through [`TranslatorBuilder::register_rule`].
    Custom,
}

#[derive(Debug, Clone)]
struct Entry {
    template: MessageTemplate,
    transform: Option<ParamFn>,
    tier: Tier,
}

#[derive(Debug, Clone)]
struct CustomRule {
    template: MessageTemplate,
    transform: Option<ParamFn>,
}

/// Setup-phase collector for one locale's templates.
///
/// Templates are gathered in three tiers and flattened by
/// [`build`](Self::build):
///
/// 1. base: built-in templates for the locale's language, present from the
///    start;
/// 2. catalog: [`add`](Self::add) and [`load_catalog`](Self::load_catalog);
///    colliding with an existing base or catalog template is an error unless
///    `replace` is set;
/// 3. custom: [`register_rule`](Self::register_rule); always wins over the
///    other two tiers, whatever the call order.
///
/// # Example
///
/// ```
/// use fieldcheck::{CatalogError, Translator};
///
/// let builder = Translator::builder("ja")?;
/// let err = builder.clone().add("required", "{0}を入力してください", false).unwrap_err();
/// assert!(matches!(err, CatalogError::DuplicateTemplate { .. }));
///
/// let translator = builder
///     .add("required", "{0}を入力してください", true)?
///     .build();
/// assert_eq!(translator.template("required").unwrap().source(), "{0}を入力してください");
/// # Ok::<(), CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TranslatorBuilder {
    locale: LanguageIdentifier,
    transforms: ParamTransforms,
    base: HashMap<String, MessageTemplate>,
    added: HashMap<String, MessageTemplate>,
    custom: HashMap<String, CustomRule>,
}

impl TranslatorBuilder {
    /// Start a builder for `locale` with the base tier for its language.
    ///
    /// Languages without built-in templates start with an empty base tier.
    pub fn new(locale: &str) -> Result<Self, CatalogError> {
        let locale = LanguageIdentifier::try_from_str(locale).map_err(|e| {
            CatalogError::InvalidLocale {
                locale: locale.to_string(),
                message: format!("{e}"),
            }
        })?;

        let base = base_templates(locale.language.as_str())
            .iter()
            .map(|(rule, source)| Ok(((*rule).to_string(), parse(rule, source)?)))
            .collect::<Result<HashMap<_, _>, CatalogError>>()?;
        if base.is_empty() {
            debug!(%locale, "no built-in templates for language");
        }

        Ok(Self {
            locale,
            transforms: ParamTransforms::with_builtins(),
            base,
            added: HashMap::new(),
            custom: HashMap::new(),
        })
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Replace the parameter transforms used by base and catalog templates.
    pub fn transforms(mut self, transforms: ParamTransforms) -> Self {
        self.transforms = transforms;
        self
    }

    /// Add a catalog-tier template.
    ///
    /// Fails with [`CatalogError::DuplicateTemplate`] when the rule already
    /// has a base or catalog template and `replace` is false.
    pub fn add(mut self, rule: &str, template: &str, replace: bool) -> Result<Self, CatalogError> {
        if !replace && (self.base.contains_key(rule) || self.added.contains_key(rule)) {
            return Err(CatalogError::DuplicateTemplate {
                locale: self.locale.to_string(),
                rule: rule.to_string(),
            });
        }
        let parsed = parse(rule, template)?;
        if self.custom.contains_key(rule) {
            debug!(rule, "catalog template is shadowed by a custom rule");
        }
        self.added.insert(rule.to_string(), parsed);
        Ok(self)
    }

    /// Register a custom-tier template with an optional parameter transform.
    ///
    /// Replaces any earlier registration for the rule and takes precedence
    /// over base and catalog templates. Without a transform, the rule's entry
    /// in the builder's [`ParamTransforms`] applies.
    pub fn register_rule(
        mut self,
        rule: &str,
        template: &str,
        transform: Option<ParamFn>,
    ) -> Result<Self, CatalogError> {
        let template = parse(rule, template)?;
        self.custom
            .insert(rule.to_string(), CustomRule { template, transform });
        Ok(self)
    }

    /// Add every entry of a catalog file as a catalog-tier template.
    ///
    /// ```ignore
    /// let translator = Translator::builder("ja")?
    ///     .load_catalog("locales/ja.fcat", true)?
    ///     .build();
    /// ```
    pub fn load_catalog(self, path: impl AsRef<Path>, replace: bool) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = read_catalog(path)?;
        self.load_entries(&content, path, replace)
    }

    /// Add every entry of catalog text as a catalog-tier template.
    pub fn load_catalog_str(self, content: &str, replace: bool) -> Result<Self, LoadError> {
        let path = string_source(&self.locale.to_string());
        self.load_entries(content, &path, replace)
    }

    fn load_entries(mut self, content: &str, path: &Path, replace: bool) -> Result<Self, LoadError> {
        let entries = parse_entries(content, path)?;
        let count = entries.len();
        for entry in entries {
            self = self
                .add(&entry.name, &entry.value, replace)
                .map_err(|source| LoadError::Catalog {
                    path: path.to_path_buf(),
                    line: entry.line,
                    source,
                })?;
        }
        debug!(locale = %self.locale, path = %path.display(), count, "loaded catalog");
        Ok(self)
    }

    /// Flatten the tiers into a read-only [`Translator`].
    pub fn build(self) -> Translator {
        let language = self.locale.language.as_str();
        let base_count = self.base.len();
        let added_count = self.added.len();
        let custom_count = self.custom.len();

        let mut templates = HashMap::new();
        let layered = self
            .base
            .into_iter()
            .map(|(rule, template)| (rule, template, Tier::Base))
            .chain(
                self.added
                    .into_iter()
                    .map(|(rule, template)| (rule, template, Tier::Catalog)),
            );
        templates.extend(layered.map(|(rule, template, tier)| {
            let transform = self.transforms.get(base_rule(&rule), language);
            (
                rule,
                Entry {
                    template,
                    transform,
                    tier,
                },
            )
        }));
        templates.extend(self.custom.into_iter().map(|(rule, custom)| {
            let transform = custom
                .transform
                .or_else(|| self.transforms.get(base_rule(&rule), language));
            (
                rule,
                Entry {
                    template: custom.template,
                    transform,
                    tier: Tier::Custom,
                },
            )
        }));

        debug!(
            locale = %self.locale,
            base = base_count,
            catalog = added_count,
            custom = custom_count,
            templates = templates.len(),
            "built translator"
        );
        Translator {
            locale: self.locale,
            templates,
        }
    }
}

/// The rule a template key belongs to: `min.number` belongs to `min`.
fn base_rule(key: &str) -> &str {
    key.split_once('.').map_or(key, |(rule, _)| rule)
}

fn parse(rule: &str, template: &str) -> Result<MessageTemplate, CatalogError> {
    MessageTemplate::parse(template).map_err(|source| CatalogError::InvalidTemplate {
        rule: rule.to_string(),
        source,
    })
}

/// Rules with and without a template, from [`Translator::coverage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    pub covered: Vec<String>,
    pub missing: Vec<String>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Renders violations as messages for one locale.
///
/// Read-only once built; share it freely across threads and evaluations.
///
/// # Example
///
/// ```
/// use fieldcheck::{DisplayNames, Rule, Translator, Value, Violation};
///
/// let translator = Translator::builder("en")?.build();
/// let names: DisplayNames = [("FirstName", "First name")].into_iter().collect();
///
/// let violation = Violation::new("FirstName", &Rule::with_param("min", "10"), Value::from("John"));
/// assert_eq!(
///     translator.render(&violation, &names),
///     "First name must be at least 10 characters in length"
/// );
/// # Ok::<(), fieldcheck::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
    locale: LanguageIdentifier,
    templates: HashMap<String, Entry>,
}

impl Translator {
    /// Start building a translator for `locale`.
    pub fn builder(locale: &str) -> Result<TranslatorBuilder, CatalogError> {
        TranslatorBuilder::new(locale)
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// The template for a rule, if any tier supplied one.
    pub fn template(&self, rule: &str) -> Option<&MessageTemplate> {
        self.templates.get(rule).map(|entry| &entry.template)
    }

    /// The tier a rule's template came from.
    pub fn tier(&self, rule: &str) -> Option<Tier> {
        self.templates.get(rule).map(|entry| entry.tier)
    }

    /// Rule names with templates, sorted.
    pub fn rules(&self) -> Vec<&str> {
        let mut rules: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        rules.sort_unstable();
        rules
    }

    /// Render one violation.
    ///
    /// `{0}` is the field's display name and `{1}` the rule parameter after
    /// its transform. When the observed value is a number, a `<rule>.number`
    /// template is preferred over the rule's own. A rule without a template
    /// renders as
    /// `"<display name> <rule> <parameter>"` and logs a warning.
    pub fn render(&self, violation: &Violation, names: &DisplayNames) -> String {
        let name = names.resolve(violation.field());
        let Some(entry) = self.entry_for(violation) else {
            warn!(
                locale = %self.locale,
                rule = violation.rule(),
                field = violation.field(),
                "no template for rule, using generic message"
            );
            return generic_message(name, violation.rule(), violation.param());
        };

        let param = violation.param().map(|raw| match entry.transform {
            Some(transform) => transform(raw),
            None => raw.to_string(),
        });
        match param.as_deref() {
            Some(param) => entry.template.render(&[name, param]),
            None => entry.template.render(&[name]),
        }
    }

    fn entry_for(&self, violation: &Violation) -> Option<&Entry> {
        let number = match violation.value() {
            Value::Integer(_) | Value::Float(_) => {
                self.templates.get(&format!("{}.number", violation.rule()))
            }
            _ => None,
        };
        number.or_else(|| self.templates.get(violation.rule()))
    }

    /// Render every violation, in order.
    pub fn render_all(&self, violations: &Violations, names: &DisplayNames) -> Vec<String> {
        violations
            .iter()
            .map(|violation| self.render(violation, names))
            .collect()
    }

    /// Lint templates against the rules they belong to.
    ///
    /// Reports templates for rules `registry` does not know, templates that
    /// reference arguments their rule never supplies, and templates that
    /// omit the field name.
    pub fn check_placeholders(&self, registry: &RuleRegistry) -> Vec<CatalogWarning> {
        let mut entries: Vec<(&str, &Entry)> = self
            .templates
            .iter()
            .map(|(rule, entry)| (rule.as_str(), entry))
            .collect();
        entries.sort_unstable_by_key(|(rule, _)| *rule);

        let mut warnings = Vec::new();
        for (rule, entry) in entries {
            let Some(spec) = registry.param_spec(base_rule(rule)) else {
                warnings.push(CatalogWarning::UnknownRule {
                    locale: self.locale.to_string(),
                    rule: rule.to_string(),
                    suggestions: compute_suggestions(base_rule(rule), registry.names()),
                });
                continue;
            };

            let supplied = if spec == ParamSpec::None { 1 } else { 2 };
            if let Some(index) = entry.template.max_placeholder().filter(|i| *i >= supplied) {
                warnings.push(CatalogWarning::PlaceholderOutOfRange {
                    locale: self.locale.to_string(),
                    rule: rule.to_string(),
                    index,
                    supplied,
                });
            }
            if !entry.template.placeholders().any(|i| i == 0) {
                warnings.push(CatalogWarning::MissingFieldName {
                    locale: self.locale.to_string(),
                    rule: rule.to_string(),
                });
            }
        }
        warnings
    }

    /// Split `rules` into those with and without a template.
    pub fn coverage<'a>(&self, rules: impl IntoIterator<Item = &'a str>) -> Coverage {
        let mut coverage = Coverage::default();
        for rule in rules {
            if self.templates.contains_key(rule) {
                coverage.covered.push(rule.to_string());
            } else {
                coverage.missing.push(rule.to_string());
            }
        }
        coverage
    }
}

fn generic_message(name: &str, rule: &str, param: Option<&str>) -> String {
    match param {
        Some(param) => format!("{name} {rule} {param}"),
        None => format!("{name} {rule}"),
    }
}
