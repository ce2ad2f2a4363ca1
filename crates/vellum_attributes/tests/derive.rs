//! Tests for `#[derive(Attributes)]`.

use vellum_attributes::{AttributeError, Attributes};
use vellum_resources::{ResourceValue, ValueType};

#[derive(Debug, Default, Attributes)]
struct CheckBox {
    #[attribute(rename = "Text")]
    text: String,
    #[attribute(rename = "Checked")]
    checked: bool,
    #[attribute(rename = "ToolTip")]
    tool_tip: Option<String>,
    #[attribute(rename = "TabIndex", read_only)]
    tab_index: u32,
    #[attribute(skip)]
    handle: usize,
    r#type: String,
}

#[test]
fn derives_fields_in_declaration_order() {
    let names: Vec<_> = CheckBox::default()
        .attribute_set()
        .iter()
        .map(|attribute| attribute.name().to_owned())
        .collect();
    assert_eq!(names, ["Text", "Checked", "ToolTip", "TabIndex", "type"]);
}

#[test]
fn skipped_fields_are_not_described() {
    let attributes = CheckBox::default().attribute_set();
    assert!(attributes.find("handle").is_none());
}

#[test]
fn declared_types_follow_field_types() {
    let attributes = CheckBox::default().attribute_set();
    assert_eq!(
        attributes.find("Checked").unwrap().declared_type(),
        ValueType::of::<bool>()
    );

    let tool_tip = attributes.find("ToolTip").unwrap();
    assert_eq!(tool_tip.declared_type(), ValueType::of::<String>());
    assert!(tool_tip.is_nullable());
}

#[test]
fn generated_setters_write_fields() {
    let mut check_box = CheckBox::default();
    let attributes = check_box.attribute_set();

    attributes
        .find("checked")
        .unwrap()
        .set(&mut check_box, &ResourceValue::new(true))
        .unwrap();
    attributes
        .find("TOOLTIP")
        .unwrap()
        .set(&mut check_box, &ResourceValue::from("Remember me"))
        .unwrap();
    attributes
        .find("type")
        .unwrap()
        .set(&mut check_box, &ResourceValue::from("toggle"))
        .unwrap();

    assert!(check_box.checked);
    assert_eq!(check_box.tool_tip.as_deref(), Some("Remember me"));
    assert_eq!(check_box.r#type, "toggle");
    assert_eq!(check_box.handle, 0);
}

#[test]
fn read_only_fields_refuse_writes() {
    let mut check_box = CheckBox::default();
    let tab_index = check_box.attribute_set().find("TabIndex").cloned().unwrap();

    assert!(!tab_index.is_writable());
    let err = tab_index
        .set(&mut check_box, &ResourceValue::new(3_u32))
        .unwrap_err();
    assert!(matches!(err, AttributeError::ReadOnly { .. }));
    assert_eq!(check_box.tab_index, 0);
}
