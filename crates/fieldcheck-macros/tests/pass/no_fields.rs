// A struct without annotated fields declares nothing.
use fieldcheck::{Record, Validate};

#[derive(Validate)]
struct Empty {
    _unused: u8,
}

fn main() {
    let empty = Empty { _unused: 0 };
    assert!(Empty::DECLARATIONS.is_empty());
    assert_eq!(empty.value("_unused"), None);
}
