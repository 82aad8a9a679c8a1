mod common;

use common::{create, document, metadata, props, set_text, types};
use rstest::rstest;
use xbfload_core::{Constant, NodeKind, ObjectRef, ResourceKey, StaticMetadata, Value, directive_names};
use xbfload_writer::{ObjectWriter, WriterError};

fn text_block_with(metadata: &StaticMetadata, body: Vec<NodeKind>) -> Result<ObjectRef, WriterError> {
    let mut nodes = vec![create(types::TEXT_BLOCK)];
    nodes.extend(body);
    nodes.push(NodeKind::EndInitPopScope);
    let document = document(vec![nodes]);
    let root = ObjectWriter::new(metadata, &document).process_document()?;
    Ok(root.into_object().expect("root is an object"))
}

#[rstest]
fn static_resource_placeholder_is_pushed_then_set(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![
        NodeKind::ProvideStaticResourceValue { key: "Accent".into() },
        NodeKind::SetValue { property: props::FOREGROUND },
    ])
    .unwrap();

    assert_eq!(
        text_block.property("Foreground"),
        Some(Value::StaticResource(ResourceKey::name("Accent")))
    );
}

#[rstest]
fn resource_references_can_be_set_directly(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![
        NodeKind::SetValueFromStaticResource { property: props::FOREGROUND, key: "Accent".into() },
        NodeKind::SetValueFromThemeResource { property: props::TAG, key: "SystemBase".into() },
    ])
    .unwrap();

    assert_eq!(
        text_block.property("Foreground"),
        Some(Value::StaticResource(ResourceKey::name("Accent")))
    );
    assert_eq!(text_block.property("Tag"), Some(Value::ThemeResource(ResourceKey::name("SystemBase"))));
}

#[rstest]
fn theme_resource_placeholder_is_pushed_then_set(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![
        NodeKind::ProvideThemeResourceValue { key: "SystemAccent".into() },
        NodeKind::SetValue { property: props::FOREGROUND },
    ])
    .unwrap();

    assert_eq!(
        text_block.property("Foreground"),
        Some(Value::ThemeResource(ResourceKey::name("SystemAccent")))
    );
}

#[rstest]
fn template_binding_refers_to_the_source_property(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![NodeKind::SetValueFromTemplateBinding {
        property: props::TEXT,
        source: props::TAG,
    }])
    .unwrap();

    let Some(Value::TemplateBinding(source)) = text_block.property("Text") else {
        panic!("Text is not a template binding");
    };
    assert_eq!(&*source.name, "Tag");
}

#[rstest]
fn markup_extension_objects_are_flagged(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![
        create(types::BINDING),
        NodeKind::EndInitPopScope,
        NodeKind::SetValueFromMarkupExtension { property: props::DATA_CONTEXT },
    ])
    .unwrap();

    let binding = text_block.property("DataContext").and_then(Value::into_object).unwrap();
    assert_eq!(&*binding.type_name(), "Binding");
    assert!(binding.is_markup_extension());
}

#[rstest]
fn only_the_markup_extension_setter_flags_an_object(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![
        create(types::BINDING),
        NodeKind::EndInitPopScope,
        NodeKind::SetValue { property: props::DATA_CONTEXT },
    ])
    .unwrap();

    let binding = text_block.property("DataContext").and_then(Value::into_object).unwrap();
    assert!(!binding.is_markup_extension());
}

#[rstest]
fn markup_extension_must_be_an_object(metadata: StaticMetadata) {
    let error = text_block_with(&metadata, vec![
        NodeKind::ProvideStaticResourceValue { key: "Accent".into() },
        NodeKind::SetValueFromMarkupExtension { property: props::TAG },
    ])
    .unwrap_err();

    assert_eq!(
        error,
        WriterError::ExpectedObject {
            node: "SetValueFromMarkupExtension".into(),
            offset: 2,
            found: "static resource reference",
        }
    );
}

#[rstest]
fn type_converted_constants_carry_their_target_type(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![
        NodeKind::SetValueTypeConvertedConstant { property: props::MARGIN, value: "4,0,4,0".into() },
        NodeKind::CreateTypeWithTypeConvertedConstantBeginInit {
            type_index: types::BRUSH,
            value: "Red".into(),
        },
        NodeKind::SetValue { property: props::FOREGROUND },
    ])
    .unwrap();

    let Some(Value::TypeConverted { target, value }) = text_block.property("Margin") else {
        panic!("Margin is not type converted");
    };
    assert_eq!(&*target.name, "Thickness");
    assert_eq!(value, Constant::from("4,0,4,0"));

    let Some(Value::TypeConverted { target, .. }) = text_block.property("Foreground") else {
        panic!("Foreground is not type converted");
    };
    assert_eq!(&*target.name, "SolidColorBrush");
}

#[rstest]
fn resolved_types_and_properties_are_set_inline(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![
        NodeKind::SetValueTypeConvertedResolvedType { property: props::TAG, type_index: types::BUTTON },
        NodeKind::SetValueTypeConvertedResolvedProperty { property: props::DATA_CONTEXT, value: props::TEXT },
    ])
    .unwrap();

    assert!(matches!(text_block.property("Tag"), Some(Value::Type(info)) if &*info.name == "Button"));
    assert!(
        matches!(text_block.property("DataContext"), Some(Value::Property(info)) if &*info.name == "Text")
    );
}

#[rstest]
fn scoped_constants_are_pushed_as_values(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![
        NodeKind::PushScopeCreateTypeWithConstantBeginInit { type_index: types::STRING, value: "hi".into() },
        NodeKind::SetName { name: "greeting".into() },
        NodeKind::EndInitPopScope,
        NodeKind::SetValue { property: props::TEXT },
        NodeKind::PushScopeCreateTypeWithTypeConvertedConstantBeginInit {
            type_index: types::THICKNESS,
            value: "2".into(),
        },
        NodeKind::EndInitPopScope,
        NodeKind::SetValue { property: props::MARGIN },
        NodeKind::CreateTypeWithConstantBeginInit { type_index: types::STRING, value: "tag".into() },
        NodeKind::SetValue { property: props::TAG },
    ])
    .unwrap();

    assert_eq!(text_block.property("Text").unwrap().as_str(), Some("hi"));
    assert!(matches!(text_block.property("Margin"), Some(Value::TypeConverted { .. })));
    assert_eq!(text_block.property("Tag").unwrap().as_str(), Some("tag"));
    assert_eq!(text_block.find_name("greeting"), Some(Value::Constant(Constant::from("hi"))));
}

#[rstest]
fn set_name_also_sets_the_name_property(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![NodeKind::SetName { name: "title".into() }]).unwrap();

    assert_eq!(text_block.property(directive_names::NAME).unwrap().as_str(), Some("title"));
    assert_eq!(text_block.find_name("title"), Some(Value::Object(text_block.clone())));
}

#[rstest]
fn connection_id_is_ignored_on_constants(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![
        NodeKind::PushScopeCreateTypeWithConstantBeginInit { type_index: types::STRING, value: "hi".into() },
        NodeKind::SetConnectionId { value: Constant::Int32(3) },
        NodeKind::EndInitPopScope,
        NodeKind::SetValue { property: props::TEXT },
        NodeKind::SetConnectionId { value: Constant::Int32(4) },
    ])
    .unwrap();

    assert_eq!(text_block.property("Text").unwrap().as_str(), Some("hi"));
    assert_eq!(text_block.property(directive_names::X_CONNECTION_ID), Some(Value::Constant(Constant::Int32(4))));
}

#[rstest]
fn resource_property_bag_tags_the_object_being_initialized(metadata: StaticMetadata) {
    let document = document(vec![vec![
        create(types::PAGE),
        NodeKind::PushScopeGetValue { property: props::RESOURCES },
        NodeKind::GetResourcePropertyBag { uid: "MainPage.Resources".into() },
        NodeKind::PopScope,
        NodeKind::EndInitPopScope,
    ]]);

    let page = ObjectWriter::new(&metadata, &document).process_document().unwrap().into_object().unwrap();

    assert_eq!(page.property(directive_names::X_UID).unwrap().as_str(), Some("MainPage.Resources"));
    let resources = page.property("Resources").and_then(Value::into_object).unwrap();
    assert_eq!(resources.property(directive_names::X_UID), None);
}

#[rstest]
fn resource_property_bag_needs_an_object_below_the_top(metadata: StaticMetadata) {
    let error = text_block_with(&metadata, vec![NodeKind::GetResourcePropertyBag { uid: "x".into() }]).unwrap_err();

    assert_eq!(error, WriterError::StackUnderflow { node: "GetResourcePropertyBag".into(), offset: 1 });
}

#[rstest]
fn existing_property_values_are_reused_by_get_value(metadata: StaticMetadata) {
    let document = document(vec![vec![
        create(types::STACK_PANEL),
        NodeKind::PushScopeGetValue { property: props::CHILDREN },
        create(types::TEXT_BLOCK),
        NodeKind::EndInitPopScope,
        NodeKind::AddToCollection,
        NodeKind::PopScope,
        NodeKind::PushScopeGetValue { property: props::CHILDREN },
        create(types::TEXT_BLOCK),
        NodeKind::EndInitPopScope,
        NodeKind::AddToCollection,
        NodeKind::PopScope,
        NodeKind::EndInitPopScope,
    ]]);

    let panel = ObjectWriter::new(&metadata, &document).process_document().unwrap().into_object().unwrap();

    let children = panel.property("Children").and_then(Value::into_object).unwrap();
    assert_eq!(children.items().len(), 2);
}

#[rstest]
fn conditional_scopes_are_walked_unconditionally(metadata: StaticMetadata) {
    let text_block = text_block_with(&metadata, vec![
        NodeKind::BeginConditionalScope { predicate: "IsApiContractPresent(Foundation, 5)".into() },
        set_text(props::TAG, "conditional"),
        NodeKind::PopScope,
    ])
    .unwrap();

    assert_eq!(text_block.property("Tag").unwrap().as_str(), Some("conditional"));
}

#[rstest]
fn root_may_be_a_constant(metadata: StaticMetadata) {
    let document = document(vec![vec![
        NodeKind::PushScopeCreateTypeWithConstantBeginInit { type_index: types::STRING, value: "solo".into() },
        NodeKind::SetName { name: "lonely".into() },
        NodeKind::EndInitPopScope,
    ]]);

    let root = ObjectWriter::new(&metadata, &document).process_document().unwrap();

    assert_eq!(root, Value::Constant(Constant::from("solo")));
}
