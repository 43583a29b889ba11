use fieldcheck_syntax::{
    BuiltinRule, ParamKind, ParamSpec, SyntaxError, builtin_rule_names, check_constraint,
    check_param, resolve_builtin, tokenize,
};

#[test]
fn tokenize_splits_rules_in_order() {
    let tokens = tokenize("required,min=10,iscolor").unwrap();
    let names: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["required", "min", "iscolor"]);
    assert_eq!(tokens[0].param, None);
    assert_eq!(tokens[1].param.as_deref(), Some("10"));
    assert_eq!(tokens[2].param, None);
}

#[test]
fn tokenize_records_offsets() {
    let tokens = tokenize("required,min=10").unwrap();
    assert_eq!(tokens[0].offset, 0);
    assert_eq!(tokens[1].offset, 9);
}

#[test]
fn tokenize_trims_whitespace_around_names() {
    let tokens = tokenize(" required , min=3").unwrap();
    assert_eq!(tokens[0].name, "required");
    assert_eq!(tokens[1].name, "min");
}

#[test]
fn empty_constraint_declares_no_rules() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("   ").unwrap().is_empty());
}

#[test]
fn empty_rule_name_is_rejected() {
    assert_eq!(
        tokenize("required,").unwrap_err(),
        SyntaxError::EmptyRuleName { offset: 9 }
    );
    assert_eq!(
        tokenize("=5").unwrap_err(),
        SyntaxError::EmptyRuleName { offset: 0 }
    );
}

#[test]
fn invalid_rule_name_is_rejected() {
    assert!(matches!(
        tokenize("requi red").unwrap_err(),
        SyntaxError::InvalidRuleName { .. }
    ));
}

#[test]
fn empty_parameter_is_rejected() {
    assert_eq!(
        tokenize("min=").unwrap_err(),
        SyntaxError::EmptyParameter {
            rule: "min".to_string(),
            offset: 0,
        }
    );
}

#[test]
fn comma_escape_is_resolved_in_parameters() {
    let tokens = tokenize("datetime=Jan 2 0x2C 2006").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].param.as_deref(), Some("Jan 2 , 2006"));
}

#[test]
fn builtin_table_resolves_every_name() {
    for name in builtin_rule_names() {
        let rule = resolve_builtin(name).unwrap();
        assert_eq!(rule.name(), *name);
    }
    assert_eq!(resolve_builtin("email"), None);
}

#[test]
fn builtin_param_specs() {
    assert_eq!(BuiltinRule::Required.param_spec(), ParamSpec::None);
    assert_eq!(
        BuiltinRule::Min.param_spec(),
        ParamSpec::Required(ParamKind::Integer)
    );
    assert_eq!(
        BuiltinRule::Datetime.param_spec(),
        ParamSpec::Required(ParamKind::Text)
    );
}

#[test]
fn check_param_matrix() {
    let integer = ParamSpec::Required(ParamKind::Integer);
    assert!(check_param("min", integer, Some("10")).is_ok());
    assert!(check_param("min", integer, Some("-3")).is_ok());
    assert_eq!(
        check_param("min", integer, Some("ten")),
        Err(SyntaxError::InvalidInteger {
            rule: "min".to_string(),
            param: "ten".to_string(),
        })
    );
    assert_eq!(
        check_param("min", integer, None),
        Err(SyntaxError::MissingParameter {
            rule: "min".to_string(),
        })
    );
    assert!(check_param("required", ParamSpec::None, None).is_ok());
    assert!(matches!(
        check_param("required", ParamSpec::None, Some("x")),
        Err(SyntaxError::UnexpectedParameter { .. })
    ));
    assert!(check_param("custom", ParamSpec::Optional(ParamKind::Text), None).is_ok());
}

#[test]
fn check_constraint_validates_builtins_only() {
    assert!(check_constraint("required,min=10").is_ok());
    assert!(check_constraint("datetime=2006-01-02").is_ok());
    assert!(matches!(
        check_constraint("datetime"),
        Err(SyntaxError::MissingParameter { .. })
    ));
    assert!(matches!(
        check_constraint("min=abc"),
        Err(SyntaxError::InvalidInteger { .. })
    ));
    // Custom rules are checked once they are registered at runtime.
    assert!(check_constraint("evenlength=whatever").is_ok());
}

#[test]
fn syntax_errors_display_context() {
    let err = SyntaxError::MissingParameter {
        rule: "datetime".to_string(),
    };
    assert_eq!(err.to_string(), "rule 'datetime' requires a parameter");
}
