// Non-string field types convert through ToValue.
use fieldcheck::{Record, Validate, Value};

#[derive(Validate)]
struct Order {
    #[validate("min=1")]
    quantity: u32,
    #[validate("max=100")]
    discount: f64,
    #[validate("required")]
    confirmed: bool,
    #[validate("required")]
    note: Option<String>,
    #[validate("required")]
    r#type: &'static str,
}

fn main() {
    let order = Order {
        quantity: 3,
        discount: 12.5,
        confirmed: true,
        note: None,
        r#type: "standard",
    };

    assert_eq!(order.value("quantity"), Some(Value::Integer(3)));
    assert_eq!(order.value("discount"), Some(Value::Float(12.5)));
    assert_eq!(order.value("confirmed"), Some(Value::Bool(true)));
    assert_eq!(order.value("note"), Some(Value::Missing));
    assert_eq!(order.value("type"), Some(Value::from("standard")));
    assert_eq!(Order::DECLARATIONS[4], ("type", "required"));
}
