// Unknown rule names compile; they must be registered before validation.
use fieldcheck::{Outcome, ParamSpec, RuleError, RuleRegistry, Validate, Validator, Value};

#[derive(Validate)]
struct Account {
    #[validate("required,lowercase")]
    handle: String,
}

fn lowercase(value: &Value, _: Option<&str>) -> Result<Outcome, RuleError> {
    let passed = value.as_str().is_some_and(|s| !s.chars().any(char::is_uppercase));
    Ok(Outcome::check(passed, value))
}

fn main() {
    assert!(Validator::new().constraints_for::<Account>().is_err());

    let mut registry = RuleRegistry::with_builtins();
    registry.register("lowercase", ParamSpec::None, lowercase);
    let validator = Validator::with_registry(registry);

    let account = Account { handle: "Yamada".to_string() };
    let violations = validator.validate_declared(&account).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.as_slice()[0].rule(), "lowercase");
}
