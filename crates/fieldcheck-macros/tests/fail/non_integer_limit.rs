use fieldcheck::Validate;

#[derive(Validate)]
struct User {
    #[validate("required,min=ten", rename = "FirstName")]
    first_name: String,
}

fn main() {}
