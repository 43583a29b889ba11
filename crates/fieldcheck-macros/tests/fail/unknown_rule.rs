use fieldcheck::Validate;

#[derive(Validate)]
struct User {
    #[validate("requird", rename = "FamilyName")]
    family_name: String,
}

fn main() {}
