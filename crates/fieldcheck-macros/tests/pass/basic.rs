// Derive on a plain struct and validate it.
use fieldcheck::{Record, Validate, Validator, Value};

#[derive(Validate)]
struct User {
    #[validate("required", rename = "FamilyName")]
    family_name: String,
    #[validate("required,min=10", rename = "FirstName")]
    first_name: String,
    #[validate("iscolor", rename = "Color")]
    color: String,
    nickname: String,
}

fn main() {
    let user = User {
        family_name: String::new(),
        first_name: "John".to_string(),
        color: "red".to_string(),
        nickname: "jj".to_string(),
    };

    assert_eq!(User::DECLARATIONS.len(), 3);
    assert_eq!(user.value("Color"), Some(Value::from("red")));
    assert_eq!(user.value("nickname"), None);
    let _ = &user.nickname;

    let violations = Validator::new().validate_declared(&user).unwrap();
    assert_eq!(violations.len(), 2);
}
